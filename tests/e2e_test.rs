use axum::body::Body;
use axum::http::{Request, StatusCode};
use library_circulation::adapters::memory::InMemoryStore;
use library_circulation::api::handlers::AppState;
use library_circulation::api::router::create_router;
use library_circulation::api::types::*;
use library_circulation::domain::BookStatus;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// インメモリストアで実際のAPIルーターを組み立てる
fn setup_app() -> (axum::Router, Arc<InMemoryStore>) {
    let (service_deps, store) = common::in_memory_deps();
    let app_state = Arc::new(AppState { service_deps });
    (create_router(app_state), store)
}

/// リクエストを送り、ステータスとJSONボディを返す
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_book(app: &axum::Router, title: &str, author: &str) -> BookCreatedResponse {
    let (status, body) = send(
        app,
        "POST",
        "/books",
        Some(json!({ "title": title, "author": author })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body).unwrap()
}

async fn create_member(app: &axum::Router, name: &str) -> i64 {
    let (status, body) = send(app, "POST", "/members", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

// ============================================================================
// E2Eテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_e2e_full_circulation_flow() {
    let (app, _) = setup_app();

    // Step 1: 書籍登録（POST /books）
    let created = create_book(&app, "Dune", "Herbert").await;
    assert_eq!(created.book.status, BookStatus::Available);
    assert!(created.qr_image.starts_with("data:image/png;base64,"));
    let qr_data = created.book.qr_data.as_str().to_string();

    // Step 2: 会員登録（POST /members）
    let member_id = create_member(&app, "Alice").await;
    assert_eq!(member_id, 1);

    // Step 3: 貸出（POST /checkout）
    let (status, body) = send(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "qrData": qr_data, "memberId": member_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let checkout: CheckoutResponse = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(checkout.message, "Checkout successful");
    assert_eq!(checkout.loan.member_id.value(), member_id);
    assert!(body["loan"]["returnDate"].is_null());
    let due = checkout.loan.due_date - checkout.loan.loan_date;
    assert_eq!(due, chrono::Duration::days(14));

    // 貸出後の状態確認（GET /books）
    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["status"], "LOANED");
    assert_eq!(body[0]["loans"].as_array().unwrap().len(), 1);

    // Step 4: 返却（POST /return）
    let (status, body) = send(&app, "POST", "/return", Some(json!({ "qrData": qr_data }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Return successful");
    assert!(body["loan"]["returnDate"].is_string());

    // 返却後の状態確認（GET /members）
    let (status, body) = send(&app, "GET", "/members", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Alice");
    assert!(body[0]["loans"][0]["returnDate"].is_string());

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body[0]["status"], "AVAILABLE");
}

#[tokio::test]
async fn test_e2e_root_and_health() {
    let (app, _) = setup_app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Library Management System API");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// E2Eテスト: 異常系
// ============================================================================

#[tokio::test]
async fn test_e2e_checkout_unknown_token_returns_404() {
    let (app, _) = setup_app();
    let member_id = create_member(&app, "Alice").await;

    let (status, body) = send(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "qrData": "unknown", "memberId": member_id })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "BOOK_NOT_FOUND");
    assert_eq!(error.message, "Book not found");
}

#[tokio::test]
async fn test_e2e_checkout_unknown_member_returns_404() {
    let (app, _) = setup_app();
    let created = create_book(&app, "Dune", "Herbert").await;

    let (status, body) = send(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "qrData": created.book.qr_data, "memberId": 42 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "MEMBER_NOT_FOUND");
}

#[tokio::test]
async fn test_e2e_double_checkout_returns_400() {
    let (app, _) = setup_app();
    let created = create_book(&app, "Dune", "Herbert").await;
    let member_id = create_member(&app, "Alice").await;
    let request = json!({ "qrData": created.book.qr_data, "memberId": member_id });

    let (status, _) = send(&app, "POST", "/checkout", Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/checkout", Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Book is not available");
}

#[tokio::test]
async fn test_e2e_return_available_book_returns_400() {
    let (app, _) = setup_app();
    let created = create_book(&app, "Dune", "Herbert").await;

    let (status, body) = send(
        &app,
        "POST",
        "/return",
        Some(json!({ "qrData": created.book.qr_data })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Book is already returned");
}

#[tokio::test]
async fn test_e2e_return_unknown_token_returns_404() {
    let (app, _) = setup_app();

    let (status, _) = send(&app, "POST", "/return", Some(json!({ "qrData": "unknown" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_return_without_open_loan_succeeds() {
    let (app, store) = setup_app();
    let created = create_book(&app, "Dune", "Herbert").await;
    store
        .force_status(created.book.id, BookStatus::Loaned)
        .unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/return",
        Some(json!({ "qrData": created.book.qr_data })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["loan"].is_null());

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body[0]["status"], "AVAILABLE");
}

#[tokio::test]
async fn test_e2e_blank_member_name_returns_400() {
    let (app, _) = setup_app();

    let (status, body) = send(&app, "POST", "/members", Some(json!({ "name": "" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
