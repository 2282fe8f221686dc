//! Private OTC quote endpoints

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::query::QueryBuilder;

/// Private OTC quote endpoints
pub struct OtcEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> OtcEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// Request a quote to convert `size` of `from_coin` into `to_coin`
    #[instrument(skip(self))]
    pub async fn request_quote(&self, from_coin: &str, to_coin: &str, size: Decimal) -> RestResult<Value> {
        let query = QueryBuilder::new()
            .param("fromCoin", from_coin)
            .param("toCoin", to_coin)
            .decimal("size", size)
            .build();
        self.client.post("otc/quotes", Some(query)).await
    }

    #[instrument(skip(self))]
    pub async fn get_quote_status(&self, quote_id: u64) -> RestResult<Value> {
        self.client.get(&format!("otc/quotes/{}", quote_id), None).await
    }

    /// Accept a quote before it expires
    #[instrument(skip(self))]
    pub async fn accept_quote(&self, quote_id: u64) -> RestResult<Value> {
        info!("Accepting quote {}", quote_id);
        self.client
            .post(&format!("otc/quotes/{}/accept", quote_id), None)
            .await
    }
}
