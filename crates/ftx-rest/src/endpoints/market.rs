//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use ftx_types::{validate, Resolution};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::query::QueryBuilder;
use crate::request::HttpMethod;
use crate::types::{HistoryFilter, Orderbook};

/// Default orderbook depth
pub const DEFAULT_DEPTH: u32 = 20;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// List all spot and futures markets
    #[instrument(skip(self))]
    pub async fn get_markets(&self) -> RestResult<Value> {
        debug!("Fetching markets");
        self.client.get("markets", None).await
    }

    /// Get a single market
    ///
    /// # Arguments
    /// * `market` - Market name (e.g., "BTC/USD", "BTC-PERP")
    #[instrument(skip(self))]
    pub async fn get_market(&self, market: &str) -> RestResult<Value> {
        self.client.get(&format!("markets/{}", market), None).await
    }

    /// Get an orderbook snapshot
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `depth` - Price levels per side, 20 to 100
    #[instrument(skip(self))]
    pub async fn get_orderbook(&self, market: &str, depth: u32) -> RestResult<Orderbook> {
        let depth = validate::depth(depth)?;
        let query = QueryBuilder::new().param("depth", depth).build();

        debug!("Fetching orderbook for {} at depth {}", market, depth);

        self.client
            .send_as(HttpMethod::Get, &format!("markets/{}/orderbook", market), Some(query))
            .await
    }

    /// Get recent trades
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `filter` - Optional limit (at most 100) and time bounds in epoch seconds
    #[instrument(skip(self))]
    pub async fn get_recent_trades(&self, market: &str, filter: &HistoryFilter) -> RestResult<Value> {
        let query = filter.to_query()?;
        self.client
            .get(&format!("markets/{}/trades", market), Some(query))
            .await
    }

    /// Get OHLC candles
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `resolution` - Candle window
    /// * `filter` - Optional limit (at most 100) and time bounds in epoch seconds
    #[instrument(skip(self))]
    pub async fn get_candles(
        &self,
        market: &str,
        resolution: Resolution,
        filter: &HistoryFilter,
    ) -> RestResult<Value> {
        let mut query = filter.to_query()?;
        query.insert("resolution".to_string(), resolution.seconds().into());

        debug!("Fetching {}s candles for {}", resolution.seconds(), market);

        self.client
            .get(&format!("markets/{}/candles", market), Some(query))
            .await
    }

    /// Get OHLC candles with the resolution given in seconds
    ///
    /// Rejects any resolution outside the fixed set before sending.
    pub async fn get_candles_secs(
        &self,
        market: &str,
        resolution_secs: u32,
        filter: &HistoryFilter,
    ) -> RestResult<Value> {
        let resolution = validate::resolution(resolution_secs)?;
        self.get_candles(market, resolution, filter).await
    }
}
