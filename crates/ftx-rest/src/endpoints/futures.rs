//! Public futures and index endpoints

use ftx_types::Resolution;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::FtxRestClient;
use crate::error::{RestError, RestResult};
use crate::types::HistoryFilter;

/// Public futures and index endpoints
pub struct FuturesEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> FuturesEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// List all futures
    #[instrument(skip(self))]
    pub async fn get_futures(&self) -> RestResult<Value> {
        self.client.get("futures", None).await
    }

    /// List perpetual futures only
    ///
    /// Filters [`get_futures`](Self::get_futures) locally on the `perpetual` flag.
    #[instrument(skip(self))]
    pub async fn get_perpetual_futures(&self) -> RestResult<Vec<Value>> {
        let futures = match self.get_futures().await? {
            Value::Array(futures) => futures,
            other => {
                return Err(RestError::Parse(format!(
                    "expected a list of futures, got {}",
                    other
                )))
            }
        };

        let perpetuals: Vec<Value> = futures
            .into_iter()
            .filter(|f| f.get("perpetual").and_then(Value::as_bool).unwrap_or(false))
            .collect();

        debug!("Found {} perpetual futures", perpetuals.len());
        Ok(perpetuals)
    }

    /// Get a single future
    #[instrument(skip(self))]
    pub async fn get_future(&self, future: &str) -> RestResult<Value> {
        self.client.get(&format!("futures/{}", future), None).await
    }

    /// Get open interest, volume and funding stats of a future
    #[instrument(skip(self))]
    pub async fn get_future_stats(&self, future: &str) -> RestResult<Value> {
        self.client.get(&format!("futures/{}/stats", future), None).await
    }

    /// Get funding rates of all perpetual futures
    #[instrument(skip(self))]
    pub async fn get_funding_rates(&self) -> RestResult<Value> {
        self.client.get("funding_rates", None).await
    }

    /// Get component weights of an index (e.g., "ALT", "MID", "SHIT")
    #[instrument(skip(self))]
    pub async fn get_index_weights(&self, index: &str) -> RestResult<Value> {
        self.client.get(&format!("indexes/{}/weights", index), None).await
    }

    /// List expired futures
    #[instrument(skip(self))]
    pub async fn get_expired_futures(&self) -> RestResult<Value> {
        self.client.get("expired_futures", None).await
    }

    /// Get OHLC candles of an index
    #[instrument(skip(self))]
    pub async fn get_index_candles(
        &self,
        index: &str,
        resolution: Resolution,
        filter: &HistoryFilter,
    ) -> RestResult<Value> {
        let mut query = filter.to_query()?;
        query.insert("resolution".to_string(), resolution.seconds().into());

        self.client
            .get(&format!("indexes/{}/candles", index), Some(query))
            .await
    }
}
