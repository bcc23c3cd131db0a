mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{build_test_app, TestApp};

async fn seed(app: &TestApp) -> (i64, i64) {
    let (status, account) = app
        .post("/api/v1/accounts", json!({ "userId": 1, "name": "Demat" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, security) = app
        .post(
            "/api/v1/securities",
            json!({ "securityType": "stock", "exchange": "nse", "symbol": "infy", "name": "Infosys" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(security["data"]["symbol"], "INFY");

    (
        account["data"]["id"].as_i64().unwrap(),
        security["data"]["id"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn buy_then_summary_with_market_data_off() {
    let app = build_test_app().await;
    let (account_id, security_id) = seed(&app).await;

    let (status, body) = app
        .post(
            "/api/v1/stocks/buy",
            json!({
                "accountId": account_id,
                "securityId": security_id,
                "quantity": 10,
                "averagePrice": 150,
                "fee": 2,
                "date": "2024-03-01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["transactions"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .get(&format!("/api/v1/stocks/summary?accountId={}", account_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["quantity"], 10.0);
    assert_eq!(rows[0]["totalValue"], 1500.0);
    assert_eq!(rows[0]["marketPrice"], 0.0);

    // Mutual fund views do not see stock holdings.
    let (_, body) = app
        .get(&format!("/api/v1/mutual-funds/summary?accountId={}", account_id))
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn insufficient_sell_answers_with_error_envelope() {
    let app = build_test_app().await;
    let (account_id, security_id) = seed(&app).await;
    app.post(
        "/api/v1/stocks/buy",
        json!({ "accountId": account_id, "securityId": security_id, "quantity": 5, "averagePrice": 100 }),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/v1/stocks/sell",
            json!({ "accountId": account_id, "securityId": security_id, "quantity": 10, "averagePrice": 120 }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"][0]["code"], "InsufficientQuantity");
    assert!(body["data"].is_null());

    let (_, body) = app
        .get(&format!(
            "/api/v1/stocks/transactions?accountId={}&securityId={}",
            account_id, security_id
        ))
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn stock_cannot_be_traded_as_mutual_fund() {
    let app = build_test_app().await;
    let (account_id, security_id) = seed(&app).await;

    let (status, body) = app
        .post(
            "/api/v1/mutual-funds/buy",
            json!({ "accountId": account_id, "securityId": security_id, "quantity": 1, "averagePrice": 10 }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"][0]["code"], "InvalidSecurity");
}

#[tokio::test]
async fn malformed_requests_are_invalid() {
    let app = build_test_app().await;
    let (account_id, security_id) = seed(&app).await;

    let (status, body) = app
        .post(
            "/api/v1/stocks/buy",
            json!({ "accountId": account_id, "securityId": security_id, "quantity": -1, "averagePrice": 10 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"][0]["code"], "InvalidRequest");

    let (status, body) = app.post("/api/v1/stocks/buy", json!({ "quantity": "lots" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"][0]["code"], "InvalidRequest");
}

#[tokio::test]
async fn account_can_be_inactivated_and_blocks_trading() {
    let app = build_test_app().await;
    let (account_id, security_id) = seed(&app).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/v1/accounts/{}/inactivate", account_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "INACTIVE");

    let (status, body) = app
        .post(
            "/api/v1/stocks/buy",
            json!({ "accountId": account_id, "securityId": security_id, "quantity": 1, "averagePrice": 10 }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"][0]["code"], "InactiveAccount");

    let (status, body) = app.get("/api/v1/accounts/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"][0]["code"], "AccountNotFound");
}

#[tokio::test]
async fn duplicate_security_conflicts_and_search_finds_it() {
    let app = build_test_app().await;
    seed(&app).await;

    let (status, body) = app
        .post(
            "/api/v1/securities",
            json!({ "securityType": "STOCK", "exchange": "NSE", "symbol": "INFY", "name": "Infosys" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"][0]["code"], "DuplicateSecurity");

    let (status, body) = app
        .get("/api/v1/securities/search?type=stock&exchange=nse&term=info")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["symbol"], "INFY");

    let (_, body) = app
        .get("/api/v1/securities/lookup?type=stock&exchange=bse&symbol=INFY")
        .await;
    assert!(body["data"].is_null());
}
