//! REST API client for the FTX cryptocurrency exchange
//!
//! This crate provides an async REST client covering FTX market data, account
//! management, wallet, order execution, staking, OTC and spot margin endpoints.
//!
//! # Features
//!
//! - **Market Data**: Markets, orderbook, trades, candles, futures and indexes
//! - **Account**: Account info, positions, leverage, subaccounts, fills
//! - **Wallet**: Balances, deposit addresses, deposit and withdrawal history
//! - **Trading**: Place, modify and cancel orders and trigger orders
//! - **Staking / OTC / Margin**: SRM staking, OTC quotes, lending offers
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA256 over `nonce + METHOD + /api/endpoint + query-or-body`.
//!
//! # Example
//!
//! ```no_run
//! use ftx_rest::{Credentials, FtxRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = FtxRestClient::new()?;
//!     let book = client.market().get_orderbook("BTC/USD", 20).await?;
//!     println!("BTC/USD spread: {:?}", book.spread());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = FtxRestClient::with_credentials(creds)?;
//!     let balances = auth_client.wallet()?.get_balances().await?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! Every request is recorded in a trailing 60 second window. Once the window
//! holds 30 requests, the next request pauses for half a second before it is
//! sent. See [`RateLimitConfig`] to tune or share the window.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, FtxRestClient};
pub use error::{ErrorKind, RestError, RestResult};
pub use query::{build_query, Query, QueryBuilder};
pub use request::{HttpMethod, Scope};

pub use ftx_auth::{AuthHeaders, Credentials};
pub use ftx_types::{
    DepositChain, OrderType, RateLimitConfig, RateWindow, Resolution, Side, SortOrder, TriggerType,
    ValidationError,
};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    Orderbook,
    // Account
    Balance,
    // Filters
    FillsFilter, HistoryFilter, TriggerHistoryFilter,
    // Trading
    OrderRequest, OrderUpdate, TriggerOrderRequest, TriggerOrderUpdate,
};
