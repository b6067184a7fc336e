mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bankbook::rpc;
use serde_json::{Value, json};

use common::{call, send, test_service};

fn create_body(balance: f64, date: &str, account_type: &str) -> Value {
    json!({
        "account": {
            "balance": balance,
            "creationDate": date,
            "accountType": account_type,
        }
    })
}

#[tokio::test]
async fn test_create_then_get_round_trips_every_field() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let router = rpc::router(service);

    let (status, created) = call(
        &router,
        "CreateAccount",
        create_body(8900.0, "2024-02-20", "SAVINGS"),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let account = &created["account"];
    let id = account["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());
    assert_eq!(account["balance"], json!(8900.0));
    assert_eq!(account["creationDate"], "2024-02-20");
    assert_eq!(account["accountType"], "SAVINGS");

    let (status, fetched) = call(&router, "GetAccountById", json!({ "id": id })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched["account"], account);

    Ok(())
}

#[tokio::test]
async fn test_negative_balance_is_invalid_argument() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let router = rpc::router(service.clone());

    let (status, body) = call(
        &router,
        "CreateAccount",
        create_body(-0.01, "2024-01-15", "CURRENT"),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert_eq!(body["message"], "Balance cannot be negative");

    assert_eq!(service.compute_statistics().await?.count, 0);

    Ok(())
}

#[tokio::test]
async fn test_unknown_id_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let router = rpc::router(service);

    let (status, body) = call(&router, "GetAccountById", json!({ "id": "missing" })).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Account with ID 'missing' does not exist");

    Ok(())
}

#[tokio::test]
async fn test_statistics_empty_and_populated() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let router = rpc::router(service);

    let (status, body) = call(&router, "GetStatistics", json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["stats"],
        json!({ "count": 0, "sum": 0.0, "average": 0.0 })
    );

    for balance in [1000.0, 2000.0, 3000.0] {
        let (status, _) = call(
            &router,
            "CreateAccount",
            create_body(balance, "2024-01-15", "CURRENT"),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = call(&router, "GetStatistics", json!({})).await?;
    assert_eq!(
        body["stats"],
        json!({ "count": 3, "sum": 6000.0, "average": 2000.0 })
    );

    Ok(())
}

#[tokio::test]
async fn test_list_accounts_returns_both_types() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let router = rpc::router(service);

    call(&router, "CreateAccount", create_body(1.0, "2024-01-15", "CURRENT")).await?;
    call(&router, "CreateAccount", create_body(2.0, "2024-01-16", "SAVINGS")).await?;

    let (status, first) = call(&router, "ListAccounts", json!({})).await?;
    assert_eq!(status, StatusCode::OK);

    let mut types: Vec<String> = first["accounts"]
        .as_array()
        .map(|accounts| {
            accounts
                .iter()
                .filter_map(|a| a["accountType"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    types.sort();
    assert_eq!(types, vec!["CURRENT", "SAVINGS"]);

    let (_, second) = call(&router, "ListAccounts", json!({})).await?;
    let sorted = |value: &Value| {
        let mut accounts = value["accounts"].as_array().cloned().unwrap_or_default();
        accounts.sort_by_key(|a| a["id"].as_str().unwrap_or_default().to_string());
        accounts
    };
    assert_eq!(sorted(&first), sorted(&second));

    Ok(())
}

#[tokio::test]
async fn test_unknown_account_type_is_invalid_argument() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let router = rpc::router(service.clone());

    let (status, body) = call(
        &router,
        "CreateAccount",
        create_body(10.0, "2024-01-15", "COURANT"),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert!(service.list_accounts().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_missing_fields_are_invalid_argument() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let router = rpc::router(service);

    let (status, body) = call(&router, "GetAccountById", json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let request = Request::builder()
        .method("POST")
        .uri("/bankbook.AccountService/CreateAccount")
        .body(Body::from("not json"))?;
    let (status, body) = send(&router, request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    Ok(())
}

#[tokio::test]
async fn test_storage_failure_is_internal() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let router = rpc::router(service.clone());
    service.repository().close().await;

    let (status, body) = call(&router, "ListAccounts", json!({})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL");
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.starts_with("Failed to retrieve accounts: "));

    let (status, body) = call(&router, "GetAccountById", json!({ "id": "any" })).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL");
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Internal error: ")
    );

    let (status, body) = call(&router, "GetStatistics", json!({})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Failed to calculate statistics: ")
    );

    let (status, body) = call(
        &router,
        "CreateAccount",
        create_body(1.0, "2024-01-15", "CURRENT"),
    )
    .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Failed to save account: ")
    );

    Ok(())
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let router = rpc::router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())?;
    let (status, body) = send(&router, request).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    Ok(())
}
