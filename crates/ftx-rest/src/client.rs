//! Main REST client implementation

use std::sync::Arc;
use std::time::Duration;

use ftx_auth::{AuthHeaders, Credentials};
use ftx_types::{RateLimitConfig, RateLimitResult, RateWindow};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::endpoints::{
    AccountEndpoints, FuturesEndpoints, MarginEndpoints, MarketEndpoints, OtcEndpoints, StakingEndpoints,
    TradingEndpoints, WalletEndpoints,
};
use crate::error::{RestError, RestResult};
use crate::query::Query;
use crate::request::{self, HttpMethod, PreparedRequest, Scope};
use crate::response;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
pub const DEFAULT_USER_AGENT: &str = "FTX-Trader/1.0";

/// Default base URL for both public and private endpoints
pub const DEFAULT_BASE_URL: &str = "https://ftx.com/api";

/// FTX REST API client
///
/// Provides access to both public and private endpoints. Cloning is cheap and
/// clones share the connection pool and the rate window.
///
/// # Example
///
/// ```no_run
/// use ftx_rest::{Credentials, FtxRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = FtxRestClient::new()?;
///     let book = client.market().get_orderbook("BTC/USD", 20).await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = FtxRestClient::with_credentials(creds)?;
///     let account = auth_client.account()?.get_account_info().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct FtxRestClient {
    http_client: Client,
    config: Arc<ClientConfig>,
    rate_window: Arc<RateWindow>,
}

impl FtxRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let rate_window = config
            .rate_window
            .clone()
            .unwrap_or_else(|| Arc::new(RateWindow::new(config.rate_limit)));

        info!(
            has_credentials = config.credentials.is_some(),
            subaccount = config.credentials.as_ref().and_then(|c| c.subaccount()),
            "Created FTX REST client"
        );

        Ok(Self {
            http_client,
            config: Arc::new(config),
            rate_window,
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.config.credentials.is_some()
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the rate window shared by this client and its clones
    pub fn rate_window(&self) -> &Arc<RateWindow> {
        &self.rate_window
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Send a request and unwrap the response envelope
    ///
    /// Private endpoints are signed, public ones are sent anonymously. When the
    /// rate window is full the request pauses briefly before it is sent. The
    /// attempt is recorded in the window whether or not it succeeds.
    ///
    /// # Errors
    /// - [`RestError::AuthRequired`] for a private endpoint without credentials
    /// - [`RestError::Http`] or [`RestError::Decode`] when the exchange could not
    ///   be reached or answered with something other than JSON
    /// - [`RestError::Remote`] when the exchange answered `{"error": ...}`
    #[instrument(skip(self, method, query), fields(method = %method))]
    pub async fn send(&self, method: HttpMethod, endpoint: &str, query: Option<Query>) -> RestResult<Value> {
        let query = query.unwrap_or_default();

        if Scope::classify(endpoint).is_private() && !self.has_credentials() {
            return Err(RestError::AuthRequired);
        }

        self.throttle(method, endpoint).await;

        let request = request::prepare(&self.config, method, endpoint, &query, None)?;
        self.dispatch(request).await
    }

    /// Send a request and deserialize its result
    pub async fn send_as<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        query: Option<Query>,
    ) -> RestResult<T> {
        let value = self.send(method, endpoint, query).await?;
        serde_json::from_value(value).map_err(|e| RestError::Parse(e.to_string()))
    }

    /// GET request
    pub async fn get(&self, endpoint: &str, query: Option<Query>) -> RestResult<Value> {
        self.send(HttpMethod::Get, endpoint, query).await
    }

    /// POST request with a JSON body
    pub async fn post(&self, endpoint: &str, query: Option<Query>) -> RestResult<Value> {
        self.send(HttpMethod::Post, endpoint, query).await
    }

    /// DELETE request with a JSON body
    pub async fn delete(&self, endpoint: &str, query: Option<Query>) -> RestResult<Value> {
        self.send(HttpMethod::Delete, endpoint, query).await
    }

    async fn throttle(&self, method: HttpMethod, endpoint: &str) {
        if let RateLimitResult::Limited { wait, recent } = self.rate_window.check() {
            warn!(
                %method,
                endpoint,
                recent,
                wait_ms = wait.as_millis() as u64,
                "Rate window full, pausing before request"
            );
            tokio::time::sleep(wait).await;
        }
    }

    async fn dispatch(&self, request: PreparedRequest) -> RestResult<Value> {
        debug!(
            method = %request.method,
            url = %request.url,
            private = request.scope.is_private(),
            "Sending request"
        );

        let mut builder = self
            .http_client
            .request(request.method.into(), &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let outcome = async {
            let response = builder.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, RestError>((status, text))
        }
        .await;

        self.rate_window.record();

        let (status, text) = match outcome {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "Request failed");
                return Err(e);
            }
        };
        debug!(status = status.as_u16(), bytes = text.len(), "Received response");

        response::parse_response(&text)
    }

    // ========================================================================
    // Public Endpoints
    // ========================================================================

    /// Get spot and futures market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get futures and index endpoints
    pub fn futures(&self) -> FuturesEndpoints<'_> {
        FuturesEndpoints::new(self)
    }

    // ========================================================================
    // Private Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        self.require_credentials()?;
        Ok(AccountEndpoints::new(self))
    }

    /// Get wallet endpoints (requires credentials)
    pub fn wallet(&self) -> RestResult<WalletEndpoints<'_>> {
        self.require_credentials()?;
        Ok(WalletEndpoints::new(self))
    }

    /// Get order and trigger order endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        self.require_credentials()?;
        Ok(TradingEndpoints::new(self))
    }

    /// Get SRM staking endpoints (requires credentials)
    pub fn staking(&self) -> RestResult<StakingEndpoints<'_>> {
        self.require_credentials()?;
        Ok(StakingEndpoints::new(self))
    }

    /// Get OTC quote endpoints (requires credentials)
    pub fn otc(&self) -> RestResult<OtcEndpoints<'_>> {
        self.require_credentials()?;
        Ok(OtcEndpoints::new(self))
    }

    /// Get spot margin lending and borrowing endpoints (requires credentials)
    pub fn margin(&self) -> RestResult<MarginEndpoints<'_>> {
        self.require_credentials()?;
        Ok(MarginEndpoints::new(self))
    }

    fn require_credentials(&self) -> RestResult<()> {
        if self.has_credentials() {
            Ok(())
        } else {
            Err(RestError::AuthRequired)
        }
    }
}

impl std::fmt::Debug for FtxRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtxRestClient")
            .field("has_credentials", &self.has_credentials())
            .field("public_url", &self.config.public_url)
            .field("private_url", &self.config.private_url)
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Base URL for public endpoints
    pub public_url: String,
    /// Base URL for private endpoints
    pub private_url: String,
    /// Names of the signing headers
    pub auth_headers: AuthHeaders,
    /// Throttle settings for a window owned by the client
    pub rate_limit: RateLimitConfig,
    /// Externally owned window, shared instead of creating one
    pub rate_window: Option<Arc<RateWindow>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            public_url: DEFAULT_BASE_URL.to_string(),
            private_url: DEFAULT_BASE_URL.to_string(),
            auth_headers: AuthHeaders::default(),
            rate_limit: RateLimitConfig::default(),
            rate_window: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the public and private base URLs
    pub fn with_base_urls(mut self, public_url: impl Into<String>, private_url: impl Into<String>) -> Self {
        self.public_url = public_url.into();
        self.private_url = private_url.into();
        self
    }

    /// Use one base URL for every endpoint
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.with_base_urls(url.clone(), url)
    }

    /// Set the signing header names
    pub fn with_auth_headers(mut self, headers: AuthHeaders) -> Self {
        self.auth_headers = headers;
        self
    }

    /// Set throttle settings
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Share an existing rate window
    pub fn with_rate_window(mut self, window: Arc<RateWindow>) -> Self {
        self.rate_window = Some(window);
        self
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_credentials() {
        let client = FtxRestClient::new().unwrap();
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("http://localhost:9000/api");

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent(), "test-agent");
        assert_eq!(config.public_url, "http://localhost:9000/api");
        assert_eq!(config.private_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.user_agent(), "FTX-Trader/1.0");
        assert_eq!(config.public_url, "https://ftx.com/api");
        assert_eq!(config.rate_limit, RateLimitConfig::default());
    }

    #[test]
    fn test_auth_required_error() {
        let client = FtxRestClient::new().unwrap();
        assert!(matches!(client.account(), Err(RestError::AuthRequired)));
        assert!(matches!(client.trading(), Err(RestError::AuthRequired)));
        assert!(matches!(client.otc(), Err(RestError::AuthRequired)));
    }

    #[test]
    fn test_shared_rate_window() {
        let window = Arc::new(RateWindow::default());
        let a = FtxRestClient::with_config(ClientConfig::new().with_rate_window(window.clone())).unwrap();
        let b = a.clone();

        window.record();
        assert_eq!(a.rate_window().recent(), 1);
        assert!(Arc::ptr_eq(a.rate_window(), b.rate_window()));
    }
}
