// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bankbook::application::AccountService;
use bankbook::domain::{AccountDraft, AccountType};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(AccountService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = AccountService::init(&format!("sqlite:{}", db_path.display())).await?;
    Ok((service, temp_dir))
}

/// Helper to build a draft dated 2024-01-15
pub fn draft(balance: f64, account_type: AccountType) -> AccountDraft {
    AccountDraft::new(balance, "2024-01-15", account_type)
}

/// Call one procedure on the router and decode the JSON reply.
pub async fn call(router: &Router, method: &str, body: Value) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/bankbook.AccountService/{}", method))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;

    send(router, request).await
}

/// Send a prepared request and decode the JSON reply.
pub async fn send(router: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}
