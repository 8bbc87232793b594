//! 통합 테스트 공용 헬퍼.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use library_api::{create_router, create_test_state, create_test_state_with_ttl};
use library_core::ServerConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

/// 메모리 저장소 기반 전체 라우터.
pub fn app() -> Router {
    create_router(Arc::new(create_test_state()), &ServerConfig::default(), None)
}

/// 토큰 유효 시간을 지정한 라우터.
pub fn app_with_ttl(ttl: chrono::Duration) -> Router {
    create_router(
        Arc::new(create_test_state_with_ttl(ttl)),
        &ServerConfig::default(),
        None,
    )
}

/// 요청을 보내고 상태 코드와 JSON 본문을 반환합니다.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn signup(app: &Router, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/user/signup",
        None,
        Some(json!({ "name": name, "email": email, "password": password })),
    )
    .await
}

pub async fn signin(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/user/signin",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// 가입 후 로그인해 토큰을 반환합니다.
pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
    let (status, _) = signup(app, name, email, password).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = signin(app, email, password).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

pub async fn add_book(app: &Router, token: &str, name: &str, author: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/books/add-book",
        Some(token),
        Some(json!({ "bookName": name, "author": author })),
    )
    .await
}
