//! Authentication credentials for the FTX API
//!
//! Implements HMAC-SHA256 signing as required by FTX's private endpoints.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`
//!
//! The secret is only ever used as an HMAC key; it is never transmitted.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Prefix every signed endpoint path carries
const API_PATH_PREFIX: &str = "/api/";

/// Generate a nonce for a request
///
/// The current wall-clock time in milliseconds, as a decimal string.
pub fn generate_nonce() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Request parameters covered by the signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignedParams<'a> {
    /// No query and no body
    #[default]
    None,
    /// URL-encoded query string of a GET request, without the leading `?`
    Query(&'a str),
    /// Serialized JSON body of a POST or DELETE request
    Body(&'a str),
}

impl<'a> From<Option<&'a str>> for SignedParams<'a> {
    /// Treat a bare string as a JSON body
    fn from(body: Option<&'a str>) -> Self {
        match body {
            Some(body) if !body.is_empty() => Self::Body(body),
            _ => Self::None,
        }
    }
}

/// Build the string that is signed for a private request
///
/// `nonce + METHOD + "/api/" + endpoint`, followed by `?query` for a GET with
/// parameters or by the JSON body for a request that carries one. Empty
/// queries and bodies contribute nothing.
pub fn signature_payload(nonce: &str, method: &str, endpoint: &str, params: SignedParams<'_>) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    let mut payload = format!(
        "{}{}{}{}",
        nonce,
        method.to_ascii_uppercase(),
        API_PATH_PREFIX,
        endpoint
    );

    match params {
        SignedParams::Query(query) if !query.is_empty() => {
            payload.push('?');
            payload.push_str(query);
        }
        SignedParams::Body(body) if !body.is_empty() => payload.push_str(body),
        _ => {}
    }

    payload
}

/// API credentials for authenticated requests
///
/// The secret is automatically zeroized when the Credentials are dropped,
/// preventing sensitive data from remaining in memory.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// API secret (HMAC key, zeroized on drop)
    api_secret: SecretString,
    /// Subaccount the requests act on, main account when absent
    subaccount: Option<String>,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// # Arguments
    /// * `api_key` - Your FTX API key
    /// * `api_secret` - Your FTX API secret
    ///
    /// # Returns
    /// Result containing Credentials or error if either value is empty
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
            subaccount: None,
        })
    }

    /// Act on a subaccount instead of the main account
    pub fn with_subaccount(mut self, subaccount: impl Into<String>) -> Self {
        let subaccount = subaccount.into();
        self.subaccount = (!subaccount.is_empty()).then_some(subaccount);
        self
    }

    /// Create credentials from environment variables
    ///
    /// Reads `FTX_API_KEY` and `FTX_API_SECRET`, plus the optional
    /// `FTX_SUBACCOUNT`, from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("FTX_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("FTX_API_KEY".to_string()))?;
        let api_secret = std::env::var("FTX_API_SECRET")
            .map_err(|_| AuthError::EnvVarNotSet("FTX_API_SECRET".to_string()))?;

        let creds = Self::new(api_key, api_secret)?;
        Ok(match std::env::var("FTX_SUBACCOUNT") {
            Ok(subaccount) => creds.with_subaccount(subaccount),
            Err(_) => creds,
        })
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the subaccount name, if any
    pub fn subaccount(&self) -> Option<&str> {
        self.subaccount.as_deref()
    }

    /// Get the subaccount name percent-encoded for use in a header
    ///
    /// `/` is left literal, so `desk/alpha one` becomes `desk/alpha%20one`.
    pub fn encoded_subaccount(&self) -> Option<String> {
        self.subaccount
            .as_deref()
            .map(|name| urlencoding::encode(name).replace("%2F", "/"))
    }

    /// Sign a payload
    ///
    /// Returns the lowercase hex HMAC-SHA256 of `payload` keyed by the secret.
    pub fn sign(&self, payload: &str) -> String {
        // expose_secret() provides controlled access to the key
        let mut mac = HmacSha256::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretString with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
            subaccount: self.subaccount.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .api_key
            .char_indices()
            .nth(8)
            .map_or(self.api_key.as_str(), |(idx, _)| &self.api_key[..idx]);

        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("api_secret", &"[REDACTED]")
            .field("subaccount", &self.subaccount)
            .finish()
    }
}

/// Request signer for building authenticated requests
///
/// Captures one nonce so the signature and the timestamp header agree.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    nonce: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with a fresh nonce
    pub fn new(credentials: &'a Credentials) -> Self {
        Self::with_nonce(credentials, generate_nonce())
    }

    /// Create a request signer with a fixed nonce
    pub fn with_nonce(credentials: &'a Credentials, nonce: impl Into<String>) -> Self {
        Self {
            credentials,
            nonce: nonce.into(),
        }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Get the credentials this signer uses
    pub fn credentials(&self) -> &Credentials {
        self.credentials
    }

    /// Sign a request
    ///
    /// `params` is the encoded query for a GET or the JSON body otherwise.
    pub fn sign<'p>(&self, method: &str, endpoint: &str, params: impl Into<SignedParams<'p>>) -> String {
        let payload = signature_payload(&self.nonce, method, endpoint, params.into());
        tracing::trace!(method, endpoint, nonce = %self.nonce, "signing request");
        self.credentials.sign(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "T4lPid48QtjNxjLUFOcUZghD7CUJ7sTVsfuvQZF2";

    fn creds() -> Credentials {
        Credentials::new("LR0RQT6bKjrUNh38eCw9jYC89VDAbRkCogAc_XAm", SECRET).unwrap()
    }

    #[test]
    fn test_nonce_is_millisecond_timestamp() {
        let nonce = generate_nonce();
        assert!(nonce.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(nonce.len(), 13);
    }

    #[test]
    fn test_payload_without_params() {
        let payload = signature_payload("1588591511721", "get", "markets", SignedParams::None);
        assert_eq!(payload, "1588591511721GET/api/markets");
    }

    #[test]
    fn test_payload_with_query() {
        let payload = signature_payload(
            "1",
            "GET",
            "orders",
            SignedParams::Query("market=BTC-PERP"),
        );
        assert_eq!(payload, "1GET/api/orders?market=BTC-PERP");

        let payload = signature_payload("1", "GET", "orders", SignedParams::Query(""));
        assert_eq!(payload, "1GET/api/orders");
    }

    #[test]
    fn test_payload_with_body() {
        let payload = signature_payload(
            "1",
            "POST",
            "/subaccounts",
            SignedParams::Body(r#"{"nickname":"sub1"}"#),
        );
        assert_eq!(payload, r#"1POST/api/subaccounts{"nickname":"sub1"}"#);
    }

    #[test]
    fn test_known_get_signature() {
        let creds = creds();
        let signer = RequestSigner::with_nonce(&creds, "1588591511721");
        assert_eq!(
            signer.sign("GET", "markets", SignedParams::None),
            "dbc62ec300b2624c580611858d94f2332ac636bb86eccfa1167a7777c496ee6f"
        );
    }

    #[test]
    fn test_known_post_signature() {
        let body = r#"{"market": "BTC-PERP", "side": "buy", "price": 8500, "size": 1, "type": "limit", "reduceOnly": false, "ioc": false, "postOnly": false, "clientId": null}"#;
        let creds = creds();
        let signer = RequestSigner::with_nonce(&creds, "1588591856950");
        assert_eq!(
            signer.sign("POST", "orders", Some(body)),
            "c4fbabaf178658a59d7bbf57678d44c369382f3da29138f04cd46d3d582ba4ba"
        );
    }

    #[test]
    fn test_signing_consistency() {
        let creds = creds();
        let a = RequestSigner::with_nonce(&creds, "1700000000000");
        let b = RequestSigner::with_nonce(&creds, "1700000000000");

        let query = SignedParams::Query("limit=50&start_time=1600000000");
        assert_eq!(a.sign("GET", "wallet/deposits", query), b.sign("GET", "wallet/deposits", query));
        assert_eq!(
            a.sign("GET", "wallet/deposits", query),
            "e4a30284428b2265d2c85dc7259260005533d8d89db61693e861443bed2508dd"
        );
    }

    #[test]
    fn test_any_input_change_changes_signature() {
        let creds = creds();
        let base = RequestSigner::with_nonce(&creds, "1").sign("GET", "orders", SignedParams::None);

        let other_nonce = RequestSigner::with_nonce(&creds, "2").sign("GET", "orders", SignedParams::None);
        let other_method = RequestSigner::with_nonce(&creds, "1").sign("DELETE", "orders", SignedParams::None);
        let other_endpoint = RequestSigner::with_nonce(&creds, "1").sign("GET", "fills", SignedParams::None);
        let other_params =
            RequestSigner::with_nonce(&creds, "1").sign("GET", "orders", SignedParams::Query("market=BTC-PERP"));
        let other_secret = RequestSigner::with_nonce(&Credentials::new("k", "other").unwrap(), "1")
            .sign("GET", "orders", SignedParams::None);

        for sig in [other_nonce, other_method, other_endpoint, other_params, other_secret] {
            assert_ne!(sig, base);
        }
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let sig = creds().sign("payload");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            Credentials::new("", SECRET),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("key", ""),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_subaccount_is_percent_encoded() {
        let creds = creds().with_subaccount("my sub/1");
        assert_eq!(creds.subaccount(), Some("my sub/1"));
        assert_eq!(creds.encoded_subaccount().as_deref(), Some("my%20sub/1"));

        let desk = creds.clone().with_subaccount("desk/alpha one");
        assert_eq!(desk.encoded_subaccount().as_deref(), Some("desk/alpha%20one"));

        let main = creds.clone().with_subaccount("");
        assert_eq!(main.subaccount(), None);
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let debug = format!("{:?}", creds());
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("LR0RQT6b..."));
    }
}
