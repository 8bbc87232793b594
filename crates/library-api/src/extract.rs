//! 검증 포함 JSON 추출기.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// 역직렬화 후 `validator` 규칙까지 통과한 JSON 본문.
///
/// 형식 오류, 필드 누락, 규칙 위반 모두 저장소 접근 전에 `400`으로 거부됩니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection_message(&rejection)))?;

        value
            .validate()
            .map_err(|errors| ApiError::validation(validation_message(&errors)))?;

        Ok(ValidJson(value))
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "expected request with `Content-Type: application/json`".to_string()
        }
        other => other.body_text(),
    }
}

/// 필드별 검증 메시지를 `; `로 이어 붙입니다. 필드 이름 순으로 정렬됩니다.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: invalid value", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, http::StatusCode, response::IntoResponse, routing::post, Router};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(email(message = "email is invalid"))]
        email: String,
    }

    async fn handler(ValidJson(payload): ValidJson<Payload>) -> impl IntoResponse {
        payload.name
    }

    async fn send(body: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(handler));
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let (status, _) = send(r#"{"name":"a","email":"a@x.com"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rule_violations_are_joined() {
        let (status, json) = send(r#"{"name":"","email":"nope"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "fail");
        assert_eq!(json["message"], "email is invalid; name is required");
    }

    #[tokio::test]
    async fn test_malformed_and_missing_fields() {
        for body in ["{not json", r#"{"name":"a"}"#] {
            let (status, json) = send(body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["status"], "fail");
        }
    }
}
