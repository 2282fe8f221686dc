//! Request building: scope, headers, URL and body
//!
//! Everything here is pure so the exact bytes that would go on the wire can be
//! inspected without a network.

use std::fmt;

use ftx_auth::{RequestSigner, SignedParams};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};

use crate::client::ClientConfig;
use crate::error::{RestError, RestResult};
use crate::query::{self, Query};

/// Endpoint prefixes that require a signed request
pub const PRIVATE_PREFIXES: &[&str] = &[
    "positions",
    "wallet",
    "account",
    "spot_margin",
    "srm_stakes",
    "orders",
    "conditional_orders",
    "leverage",
    "subaccounts",
    "fills",
    "funding_payments",
    "otc",
];

const JSON: &str = "application/json";

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Whether a request must be signed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Public,
    Private,
}

impl Scope {
    /// Classify an endpoint path by its prefix
    pub fn classify(endpoint: &str) -> Self {
        let endpoint = normalize_endpoint(endpoint);
        if PRIVATE_PREFIXES.iter().any(|prefix| endpoint.starts_with(prefix)) {
            Self::Private
        } else {
            Self::Public
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

/// Strip any leading slashes from an endpoint path
pub fn normalize_endpoint(endpoint: &str) -> &str {
    endpoint.trim_start_matches('/')
}

/// A fully built request, ready to dispatch
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub scope: Scope,
    pub endpoint: String,
    pub url: String,
    pub headers: HeaderMap,
    /// JSON body for POST and DELETE requests with parameters
    pub body: Option<String>,
}

/// Build the request for `method endpoint` with `query`
///
/// `nonce` overrides the generated nonce, which makes signatures reproducible.
pub fn prepare(
    config: &ClientConfig,
    method: HttpMethod,
    endpoint: &str,
    query: &Query,
    nonce: Option<&str>,
) -> RestResult<PreparedRequest> {
    let endpoint = normalize_endpoint(endpoint);
    let scope = Scope::classify(endpoint);

    let body = match method {
        HttpMethod::Get => None,
        _ if query.is_empty() => None,
        _ => Some(serde_json::to_string(query).map_err(|e| RestError::Serialize(e.to_string()))?),
    };

    let headers = match scope {
        Scope::Public => public_headers(config)?,
        Scope::Private => {
            let signed_query;
            let params = match (method, &body) {
                (HttpMethod::Get, _) => {
                    signed_query = query::encode_signed(query)?;
                    SignedParams::Query(&signed_query)
                }
                (_, Some(body)) => SignedParams::Body(body),
                (_, None) => SignedParams::None,
            };
            private_headers(config, method, endpoint, params, nonce)?
        }
    };

    let url = build_url(config, scope, method, endpoint, query)?;

    Ok(PreparedRequest {
        method,
        scope,
        endpoint: endpoint.to_string(),
        url,
        headers,
        body,
    })
}

/// Build the final URL
///
/// GET parameters are appended as a query string; other methods carry them in
/// the body instead.
pub fn build_url(
    config: &ClientConfig,
    scope: Scope,
    method: HttpMethod,
    endpoint: &str,
    query: &Query,
) -> RestResult<String> {
    let base = match scope {
        Scope::Public => &config.public_url,
        Scope::Private => &config.private_url,
    };
    let url = format!("{}/{}", base.trim_end_matches('/'), normalize_endpoint(endpoint));

    if method != HttpMethod::Get || query.is_empty() {
        return Ok(url);
    }

    let encoded = query::encode_url(query)?;
    if encoded.is_empty() {
        Ok(url)
    } else {
        Ok(format!("{}?{}", url, encoded))
    }
}

/// Headers sent on every request
pub fn public_headers(config: &ClientConfig) -> RestResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON));
    headers.insert(USER_AGENT, header_value(USER_AGENT.as_str(), config.user_agent())?);
    Ok(headers)
}

/// Headers for a signed request
pub fn private_headers(
    config: &ClientConfig,
    method: HttpMethod,
    endpoint: &str,
    params: SignedParams<'_>,
    nonce: Option<&str>,
) -> RestResult<HeaderMap> {
    let credentials = config.credentials.as_ref().ok_or(RestError::AuthRequired)?;
    let signer = match nonce {
        Some(nonce) => RequestSigner::with_nonce(credentials, nonce),
        None => RequestSigner::new(credentials),
    };
    let signature = signer.sign(method.as_str(), endpoint, params);
    let names = &config.auth_headers;

    let mut headers = public_headers(config)?;
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
    headers.insert(header_name(&names.key)?, header_value(&names.key, credentials.api_key())?);
    headers.insert(header_name(&names.sign)?, header_value(&names.sign, &signature)?);
    headers.insert(header_name(&names.timestamp)?, header_value(&names.timestamp, signer.nonce())?);

    if let Some(subaccount) = credentials.encoded_subaccount() {
        headers.insert(
            header_name(&names.subaccount)?,
            header_value(&names.subaccount, &subaccount)?,
        );
    }

    Ok(headers)
}

fn header_name(name: &str) -> RestResult<HeaderName> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| RestError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

fn header_value(name: &str, value: &str) -> RestResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| RestError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftx_auth::{AuthHeaders, Credentials};
    use serde_json::{json, Value};

    const KEY: &str = "LR0RQT6bKjrUNh38eCw9jYC89VDAbRkCogAc_XAm";
    const SECRET: &str = "T4lPid48QtjNxjLUFOcUZghD7CUJ7sTVsfuvQZF2";

    fn query(value: Value) -> Query {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn signed_config() -> ClientConfig {
        ClientConfig::new().with_credentials(Credentials::new(KEY, SECRET).unwrap())
    }

    #[test]
    fn test_scope_classification() {
        for endpoint in [
            "orders",
            "orders/history",
            "wallet/balances",
            "account/leverage",
            "positions",
            "fills",
            "subaccounts/sub1/balances",
            "funding_payments",
            "spot_margin/offers",
            "srm_stakes/stakes",
            "conditional_orders/history",
            "leverage",
            "otc/quotes",
            "/orders",
        ] {
            assert_eq!(Scope::classify(endpoint), Scope::Private, "{endpoint}");
        }

        for endpoint in ["markets", "markets/BTC/USD/orderbook", "futures", "indexes/ALT/weights", "funding_rates"] {
            assert_eq!(Scope::classify(endpoint), Scope::Public, "{endpoint}");
        }
    }

    #[test]
    fn test_get_url_with_query() {
        let config = ClientConfig::new();
        let q = query(json!({"depth": 20}));
        let url = build_url(&config, Scope::Public, HttpMethod::Get, "markets/BTC/USD/orderbook", &q).unwrap();
        assert_eq!(url, "https://ftx.com/api/markets/BTC/USD/orderbook?depth=20");
    }

    #[test]
    fn test_get_url_without_query() {
        let config = ClientConfig::new();
        let url = build_url(&config, Scope::Public, HttpMethod::Get, "/futures", &Query::new()).unwrap();
        assert_eq!(url, "https://ftx.com/api/futures");
    }

    #[test]
    fn test_get_url_brackets_lists() {
        let config = ClientConfig::new();
        let q = query(json!({"coins": ["BTC", "ETH"]}));
        let url = build_url(&config, Scope::Public, HttpMethod::Get, "markets", &q).unwrap();
        assert_eq!(url, "https://ftx.com/api/markets?coins[]=BTC&coins[]=ETH");
    }

    #[test]
    fn test_post_url_has_no_query() {
        let config = ClientConfig::new();
        let q = query(json!({"nickname": "sub1"}));
        let url = build_url(&config, Scope::Private, HttpMethod::Post, "subaccounts", &q).unwrap();
        assert_eq!(url, "https://ftx.com/api/subaccounts");
    }

    #[test]
    fn test_separate_base_urls() {
        let config = ClientConfig::new().with_base_urls("http://public.test/api/", "http://private.test/api");
        let public = build_url(&config, Scope::Public, HttpMethod::Get, "markets", &Query::new()).unwrap();
        let private = build_url(&config, Scope::Private, HttpMethod::Get, "orders", &Query::new()).unwrap();
        assert_eq!(public, "http://public.test/api/markets");
        assert_eq!(private, "http://private.test/api/orders");
    }

    #[test]
    fn test_public_request_is_unsigned() {
        let config = signed_config();
        let request = prepare(&config, HttpMethod::Get, "markets", &Query::new(), None).unwrap();

        assert_eq!(request.scope, Scope::Public);
        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.headers[ACCEPT], "application/json");
        assert_eq!(request.headers[USER_AGENT], "FTX-Trader/1.0");
        for name in AuthHeaders::default().names() {
            assert!(!request.headers.contains_key(name));
        }
    }

    #[test]
    fn test_private_request_is_signed() {
        let config = signed_config();
        let request = prepare(&config, HttpMethod::Get, "account", &Query::new(), Some("1588591511721")).unwrap();
        assert_eq!(request.scope, Scope::Private);
        assert_eq!(request.headers["FTX-KEY"], KEY);
        assert_eq!(request.headers["FTX-TS"], "1588591511721");
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert!(!request.headers.contains_key("FTX-SUBACCOUNT"));

        let expected = Credentials::new(KEY, SECRET)
            .unwrap()
            .sign("1588591511721GET/api/account");
        assert_eq!(request.headers["FTX-SIGN"], expected.as_str());
    }

    #[test]
    fn test_private_get_signs_query() {
        let config = signed_config();
        let q = query(json!({"market": "BTC-PERP"}));
        let request = prepare(&config, HttpMethod::Get, "orders", &q, Some("1588591856950")).unwrap();

        assert_eq!(request.url, "https://ftx.com/api/orders?market=BTC-PERP");
        assert!(request.body.is_none());

        let expected = Credentials::new(KEY, SECRET)
            .unwrap()
            .sign("1588591856950GET/api/orders?market=BTC-PERP");
        assert_eq!(request.headers["FTX-SIGN"], expected.as_str());
    }

    #[test]
    fn test_private_post_signs_exact_body() {
        let config = signed_config();
        let q = query(json!({"nickname": "sub1"}));
        let request = prepare(&config, HttpMethod::Post, "subaccounts", &q, Some("1700000000000")).unwrap();

        assert_eq!(request.body.as_deref(), Some(r#"{"nickname":"sub1"}"#));
        assert_eq!(
            request.headers["FTX-SIGN"],
            "89051d9c1b2c7cdebb67e73ddcc91ea703516c62959e533df7f51a3129ab6955"
        );
    }

    #[test]
    fn test_empty_delete_has_no_body() {
        let config = signed_config();
        let request = prepare(&config, HttpMethod::Delete, "orders/123", &Query::new(), Some("1")).unwrap();
        assert!(request.body.is_none());

        let expected = Credentials::new(KEY, SECRET).unwrap().sign("1DELETE/api/orders/123");
        assert_eq!(request.headers["FTX-SIGN"], expected.as_str());
    }

    #[test]
    fn test_subaccount_header() {
        let creds = Credentials::new(KEY, SECRET).unwrap().with_subaccount("my sub");
        let config = ClientConfig::new().with_credentials(creds);
        let request = prepare(&config, HttpMethod::Get, "positions", &Query::new(), None).unwrap();
        assert_eq!(request.headers["FTX-SUBACCOUNT"], "my%20sub");
    }

    #[test]
    fn test_custom_header_names() {
        let creds = Credentials::new(KEY, SECRET).unwrap().with_subaccount("sub");
        let config = ClientConfig::new()
            .with_credentials(creds)
            .with_auth_headers(AuthHeaders::generic());
        let request = prepare(&config, HttpMethod::Get, "positions", &Query::new(), None).unwrap();

        for name in ["API-KEY", "API-SIGN", "API-TIMESTAMP", "API-SUBACCOUNT"] {
            assert!(request.headers.contains_key(name), "{name}");
        }
        assert!(!request.headers.contains_key("FTX-KEY"));
    }

    #[test]
    fn test_private_without_credentials() {
        let config = ClientConfig::new();
        let result = prepare(&config, HttpMethod::Get, "account", &Query::new(), None);
        assert!(matches!(result, Err(RestError::AuthRequired)));
    }
}
