//! Common test utilities and fixtures for HTTP tests
//!
//! Response bodies follow the shapes documented for the FTX REST API.

#![allow(dead_code)]

use ftx_rest::{ClientConfig, Credentials, FtxRestClient, RateLimitConfig};
use serde_json::{json, Value};
use wiremock::{MockServer, Request, ResponseTemplate};

pub const API_KEY: &str = "LR0RQT6bKjrUNh38eCw9jYC89VDAbRkCogAc_XAm";
pub const API_SECRET: &str = "T4lPid48QtjNxjLUFOcUZghD7CUJ7sTVsfuvQZF2";

/// Base URL of the mock exchange
pub fn base_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// Config pointed at the mock server that never pauses
pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(base_url(server))
        .with_rate_limit(RateLimitConfig::permissive())
        .with_timeout(5)
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET).unwrap()
}

pub fn public_client(server: &MockServer) -> FtxRestClient {
    FtxRestClient::with_config(test_config(server)).unwrap()
}

pub fn private_client(server: &MockServer) -> FtxRestClient {
    FtxRestClient::with_config(test_config(server).with_credentials(credentials())).unwrap()
}

pub fn subaccount_client(server: &MockServer, subaccount: &str) -> FtxRestClient {
    let creds = credentials().with_subaccount(subaccount);
    FtxRestClient::with_config(test_config(server).with_credentials(creds)).unwrap()
}

/// `{"success": true, "result": ...}`
pub fn ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": result}))
}

/// `{"success": false, "error": ...}` with the status FTX uses for rejections
pub fn rejected(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({"success": false, "error": message}))
}

/// Header value of a received request
pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

/// All requests the mock server saw
pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

/// Recompute the signature of a received request from its own timestamp
pub fn expected_signature(request: &Request) -> String {
    let nonce = header(request, "FTX-TS").unwrap();
    let path = request.url.path();

    let mut payload = format!("{}{}{}", nonce, request.method.as_str(), path);
    if let Some(query) = request.url.query() {
        payload.push('?');
        payload.push_str(query);
    }
    payload.push_str(std::str::from_utf8(&request.body).unwrap());

    credentials().sign(&payload)
}

pub fn orderbook() -> Value {
    json!({
        "asks": [[4114.25, 6.263], [4114.5, 0.5]],
        "bids": [[4112.25, 49.29], [4112.0, 1.2]]
    })
}

pub fn balances() -> Value {
    json!([
        {
            "coin": "USDTBEAR",
            "free": 2320.2,
            "spotBorrow": 0.0,
            "total": 2340.2,
            "usdValue": 2340.2,
            "availableWithoutBorrow": 2320.2
        },
        {
            "coin": "BTC",
            "free": 0.5,
            "spotBorrow": 0.0,
            "total": 0.75,
            "usdValue": 15000.0,
            "availableWithoutBorrow": 0.5
        }
    ])
}

pub fn futures() -> Value {
    json!([
        {"name": "BTC-PERP", "underlying": "BTC", "perpetual": true, "type": "perpetual"},
        {"name": "BTC-0925", "underlying": "BTC", "perpetual": false, "type": "future"},
        {"name": "ETH-PERP", "underlying": "ETH", "perpetual": true, "type": "perpetual"}
    ])
}

pub fn placed_order() -> Value {
    json!({
        "id": 9596912,
        "market": "XRP-PERP",
        "side": "sell",
        "price": 0.306525,
        "type": "limit",
        "size": 31431.0,
        "status": "new",
        "filledSize": 0.0,
        "reduceOnly": false,
        "ioc": false,
        "postOnly": false,
        "clientId": null
    })
}
