//! 도서 수명 주기 HTTP 통합 테스트.

mod common;

use axum::http::{Method, StatusCode};
use common::{add_book, app, register, send};
use serde_json::json;

#[tokio::test]
async fn book_routes_require_token() {
    let app = app();
    let id = uuid::Uuid::new_v4();

    let cases = [
        (Method::GET, "/books/all".to_string()),
        (Method::POST, "/books/add-book".to_string()),
        (Method::DELETE, format!("/books/{id}")),
        (Method::PUT, format!("/books/{id}/mark-unavailable")),
    ];

    for (method, uri) in cases {
        let body = (method == Method::POST).then(|| json!({ "bookName": "x", "author": "y" }));
        let (status, json) = send(&app, method, &uri, None, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(json["message"], "unauthorized");
    }
}

#[tokio::test]
async fn empty_listing_is_distinct_from_error() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com", "pw").await;

    let (status, body) = send(&app, Method::GET, "/books/all", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "No Books available");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn add_mark_delete_lifecycle() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com", "pw").await;

    let (status, body) = add_book(&app, &token, "TAOCP", "Knuth").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Book added successfully");
    assert_eq!(body["data"]["bookName"], "TAOCP");
    assert_eq!(body["data"]["availability"], "available");
    let book_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = add_book(&app, &token, "SICP", "Abelson").await;
    let other_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/books/all", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Retrieved all available books");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let mark_uri = format!("/books/{book_id}/mark-unavailable");
    let (status, body) = send(&app, Method::PUT, &mark_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book is made temporarily unavailable");
    assert_eq!(body["data"]["availability"], "unavailable");

    // 재요청도 성공 (상태 유지)
    let (status, body) = send(&app, Method::PUT, &mark_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], "unavailable");

    let (_, body) = send(&app, Method::GET, "/books/all", Some(&token), None).await;
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], other_id.as_str());

    // 대여 불가 상태여도 삭제 가능
    let delete_uri = format!("/books/{book_id}");
    let (status, body) = send(&app, Method::DELETE, &delete_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deleted successfully");

    let (status, _) = send(&app, Method::DELETE, &delete_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::PUT, &mark_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn any_authenticated_caller_can_manage_books() {
    let app = app();
    let owner = register(&app, "Owner", "owner@example.com", "pw").await;
    let other = register(&app, "Other", "other@example.com", "pw").await;

    let (_, body) = add_book(&app, &owner, "Dune", "Herbert").await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/books/{id}/mark-unavailable"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn invalid_input_is_bad_request() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com", "pw").await;

    let (status, body) = send(&app, Method::DELETE, "/books/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid book id");

    let (status, body) = add_book(&app, &token, "   ", "Knuth").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "bookName is required");
}
