//! 도서 endpoint. 모두 인증이 필요합니다.
//!
//! - `POST /books/add-book` 등록
//! - `DELETE /books/{id}` 삭제
//! - `PUT /books/{id}/mark-unavailable` 대여 불가 처리
//! - `GET /books/all` 대여 가능 목록

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use library_core::Book;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::users::not_blank;
use crate::auth::{require_auth, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidJson;
use crate::response::{created, ok, ok_message, Envelope, Reply, ResponseStatus};
use crate::state::AppState;

pub const MSG_BOOK_ADDED: &str = "Book added successfully";
pub const MSG_BOOK_DELETED: &str = "Deleted successfully";
pub const MSG_BOOK_MARKED: &str = "Book is made temporarily unavailable";
pub const MSG_BOOKS_LISTED: &str = "Retrieved all available books";
pub const MSG_NO_BOOKS: &str = "No Books available";

/// 도서 등록 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddBookRequest {
    /// 도서명
    #[serde(rename = "bookName")]
    #[validate(custom(function = "not_blank", message = "bookName is required"))]
    #[schema(example = "The Art of Computer Programming")]
    pub book_name: String,
    /// 저자
    #[validate(custom(function = "not_blank", message = "author is required"))]
    #[schema(example = "Donald Knuth")]
    pub author: String,
}

fn parse_book_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation("invalid book id"))
}

/// 도서 등록.
#[utoipa::path(
    post,
    path = "/books/add-book",
    tag = "books",
    request_body = AddBookRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "등록 완료", body = crate::response::BookResponse),
        (status = 400, description = "입력 오류", body = crate::response::MessageResponse),
        (status = 401, description = "인증 실패", body = crate::response::MessageResponse)
    )
)]
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ValidJson(req): ValidJson<AddBookRequest>,
) -> ApiResult<Reply<Book>> {
    let book = state
        .books
        .add(&identity, &req.book_name, &req.author)
        .await?;
    Ok(created(MSG_BOOK_ADDED, book))
}

/// 도서 삭제.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "도서 ID (UUID)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 완료", body = crate::response::MessageResponse),
        (status = 400, description = "잘못된 ID", body = crate::response::MessageResponse),
        (status = 401, description = "인증 실패", body = crate::response::MessageResponse),
        (status = 404, description = "도서 없음", body = crate::response::MessageResponse)
    )
)]
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Reply<()>> {
    let id = parse_book_id(&id)?;
    state.books.delete(id).await?;
    Ok(ok_message(MSG_BOOK_DELETED))
}

/// 대여 불가 처리. 이미 대여 불가 상태여도 성공합니다.
#[utoipa::path(
    put,
    path = "/books/{id}/mark-unavailable",
    tag = "books",
    params(("id" = String, Path, description = "도서 ID (UUID)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "처리 완료", body = crate::response::BookResponse),
        (status = 400, description = "잘못된 ID", body = crate::response::MessageResponse),
        (status = 401, description = "인증 실패", body = crate::response::MessageResponse),
        (status = 404, description = "도서 없음", body = crate::response::MessageResponse)
    )
)]
pub async fn mark_unavailable(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Reply<Book>> {
    let id = parse_book_id(&id)?;
    let book = state.books.mark_unavailable(id).await?;
    Ok(ok(MSG_BOOK_MARKED, book))
}

/// 대여 가능 도서 목록.
///
/// 목록이 비어 있으면 `404`와 빈 배열을 반환합니다.
#[utoipa::path(
    get,
    path = "/books/all",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "목록", body = crate::response::BookListResponse),
        (status = 401, description = "인증 실패", body = crate::response::MessageResponse),
        (status = 404, description = "대여 가능한 도서 없음", body = crate::response::BookListResponse)
    )
)]
pub async fn list_books(State(state): State<Arc<AppState>>) -> ApiResult<Reply<Vec<Book>>> {
    let books = state.books.list_available().await?;

    if books.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(Envelope {
                status: ResponseStatus::Fail,
                message: MSG_NO_BOOKS.to_string(),
                data: Some(books),
            }),
        ));
    }

    Ok(ok(MSG_BOOKS_LISTED, books))
}

/// 도서 라우터 생성.
pub fn books_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/add-book", post(add_book))
        .route("/all", get(list_books))
        .route("/{id}", delete(delete_book))
        .route("/{id}/mark-unavailable", put(mark_unavailable))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_book_request_uses_camel_case_name() {
        let req: AddBookRequest =
            serde_json::from_str(r#"{"bookName":"SICP","author":"Abelson"}"#).unwrap();
        assert_eq!(req.book_name, "SICP");
        assert!(req.validate().is_ok());

        let blank: AddBookRequest =
            serde_json::from_str(r#"{"bookName":" ","author":""}"#).unwrap();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_parse_book_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_book_id(&id.to_string()).unwrap(), id);
        assert!(parse_book_id("42").is_err());
    }
}
