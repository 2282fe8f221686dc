//! Private spot margin endpoints
//!
//! Lending and borrowing rates, history and lending offers.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::query::QueryBuilder;

/// Private spot margin endpoints
pub struct MarginEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> MarginEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// Get your own lending history
    #[instrument(skip(self))]
    pub async fn get_lending_history(&self) -> RestResult<Value> {
        self.client.get("spot_margin/lending_history", None).await
    }

    #[instrument(skip(self))]
    pub async fn get_borrow_rates(&self) -> RestResult<Value> {
        self.client.get("spot_margin/borrow_rates", None).await
    }

    /// Get estimated and previous lending rates
    #[instrument(skip(self))]
    pub async fn get_lending_rates(&self) -> RestResult<Value> {
        self.client.get("spot_margin/lending_rates", None).await
    }

    #[instrument(skip(self))]
    pub async fn get_lending_info(&self) -> RestResult<Value> {
        self.client.get("spot_margin/lending_info", None).await
    }

    #[instrument(skip(self))]
    pub async fn get_borrow_history(&self) -> RestResult<Value> {
        self.client.get("spot_margin/borrow_history", None).await
    }

    #[instrument(skip(self))]
    pub async fn get_borrow_summary(&self) -> RestResult<Value> {
        self.client.get("spot_margin/borrow_summary", None).await
    }

    /// Get borrow and lending info of a spot market
    #[instrument(skip(self))]
    pub async fn get_market_info(&self, market: &str) -> RestResult<Value> {
        let query = QueryBuilder::new().param("market", market).build();
        self.client.get("spot_margin/market_info", Some(query)).await
    }

    #[instrument(skip(self))]
    pub async fn get_lending_offers(&self) -> RestResult<Value> {
        self.client.get("spot_margin/offers", None).await
    }

    /// Submit a lending offer
    ///
    /// A `size` of zero withdraws the offer.
    #[instrument(skip(self))]
    pub async fn set_lending_offer(&self, coin: &str, size: Decimal, rate: Decimal) -> RestResult<Value> {
        info!("Offering {} {} at hourly rate {}", size, coin, rate);

        let query = QueryBuilder::new()
            .param("coin", coin)
            .decimal("size", size)
            .decimal("rate", rate)
            .build();
        self.client.post("spot_margin/offers", Some(query)).await
    }
}
