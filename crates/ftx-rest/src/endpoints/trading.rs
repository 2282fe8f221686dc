//! Private trading endpoints
//!
//! Order placement, modification and cancellation, plus trigger (conditional)
//! orders.

use ftx_types::{validate, TriggerType};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::query::QueryBuilder;
use crate::types::{
    HistoryFilter, OrderRequest, OrderUpdate, TriggerHistoryFilter, TriggerOrderRequest, TriggerOrderUpdate,
};

/// Limit used by order history when the caller sets none
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// Private trading endpoints
pub struct TradingEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Get open orders, optionally for one market
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, market: Option<&str>) -> RestResult<Value> {
        let query = QueryBuilder::new().opt("market", market).build();
        self.client.get("orders", Some(query)).await
    }

    /// Get order history
    ///
    /// Requests up to 100 orders when `filter.limit` is unset.
    #[instrument(skip(self))]
    pub async fn get_order_history(&self, market: Option<&str>, filter: &HistoryFilter) -> RestResult<Value> {
        let limit = validate::limit(Some(filter.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)))?;
        let query = QueryBuilder::new()
            .opt("end_time", filter.end_time)
            .opt("start_time", filter.start_time)
            .opt("limit", limit)
            .opt("market", market)
            .build();
        self.client.get("orders/history", Some(query)).await
    }

    /// Get the status of an order
    #[instrument(skip(self))]
    pub async fn get_order_status(&self, order_id: u64) -> RestResult<Value> {
        self.client.get(&format!("orders/{}", order_id), None).await
    }

    /// Get the status of an order by its client ID
    #[instrument(skip(self))]
    pub async fn get_order_status_by_client_id(&self, client_id: &str) -> RestResult<Value> {
        self.client
            .get(&format!("orders/by_client_id/{}", client_id), None)
            .await
    }

    /// Place a new order
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ftx_rest::{Credentials, FtxRestClient, OrderRequest, Side};
    /// use rust_decimal_macros::dec;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = FtxRestClient::with_credentials(Credentials::from_env()?)?;
    /// let order = OrderRequest::limit("BTC-PERP", Side::Buy, dec!(0.001), dec!(20000)).post_only();
    /// let placed = client.trading()?.place_order(&order).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side))]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Value> {
        let query = order.to_query()?;

        info!(
            "Placing {} {} order: {} {} @ {:?}",
            order.order_type, order.side, order.size, order.market, order.price
        );

        self.client.post("orders", Some(query)).await
    }

    /// Modify an open order
    ///
    /// The exchange cancels and replaces the order, so the modified order gets
    /// a new ID.
    #[instrument(skip(self))]
    pub async fn modify_order(&self, order_id: u64, update: &OrderUpdate) -> RestResult<Value> {
        let query = update.to_query()?;
        self.client
            .post(&format!("orders/{}/modify", order_id), Some(query))
            .await
    }

    /// Modify an open order by its client ID
    #[instrument(skip(self))]
    pub async fn modify_order_by_client_id(&self, client_id: &str, update: &OrderUpdate) -> RestResult<Value> {
        let query = update.to_query()?;
        self.client
            .post(&format!("orders/by_client_id/{}/modify", client_id), Some(query))
            .await
    }

    /// Cancel an order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Value> {
        info!("Cancelling order {}", order_id);
        self.client.delete(&format!("orders/{}", order_id), None).await
    }

    /// Cancel an order by its client ID
    #[instrument(skip(self))]
    pub async fn cancel_order_by_client_id(&self, client_id: &str) -> RestResult<Value> {
        info!("Cancelling order with client ID {}", client_id);
        self.client
            .delete(&format!("orders/by_client_id/{}", client_id), None)
            .await
    }

    /// Cancel all orders
    ///
    /// # Arguments
    /// * `market` - Restrict to one market
    /// * `conditional_only` - Only cancel trigger orders
    /// * `limit_only` - Only cancel plain limit orders
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(
        &self,
        market: Option<&str>,
        conditional_only: bool,
        limit_only: bool,
    ) -> RestResult<Value> {
        info!("Cancelling all orders");

        let query = QueryBuilder::new()
            .param("conditionalOrdersOnly", conditional_only)
            .param("limitOrdersOnly", limit_only)
            .opt("market", market)
            .build();
        self.client.delete("orders", Some(query)).await
    }

    // ========================================================================
    // Trigger Orders
    // ========================================================================

    /// Get open trigger orders
    #[instrument(skip(self))]
    pub async fn get_open_trigger_orders(
        &self,
        market: Option<&str>,
        trigger_type: Option<TriggerType>,
    ) -> RestResult<Value> {
        let query = QueryBuilder::new()
            .opt("market", market)
            .opt("type", trigger_type.map(|t| t.as_str()))
            .build();
        self.client.get("conditional_orders", Some(query)).await
    }

    /// Get the triggers of a trigger order
    #[instrument(skip(self))]
    pub async fn get_trigger_order_triggers(&self, order_id: u64) -> RestResult<Value> {
        self.client
            .get(&format!("conditional_orders/{}/triggers", order_id), None)
            .await
    }

    /// Get trigger order history
    ///
    /// Requests [`DEFAULT_HISTORY_LIMIT`] entries when the filter sets no limit.
    #[instrument(skip(self))]
    pub async fn get_trigger_order_history(&self, filter: &TriggerHistoryFilter) -> RestResult<Value> {
        let query = filter.to_query()?;
        self.client.get("conditional_orders/history", Some(query)).await
    }

    /// Place a trigger order
    #[instrument(skip(self, order), fields(market = %order.market, trigger_type = %order.trigger_type))]
    pub async fn place_trigger_order(&self, order: &TriggerOrderRequest) -> RestResult<Value> {
        let query = order.to_query()?;

        info!(
            "Placing {} {} trigger order: {} {}",
            order.trigger_type, order.side, order.size, order.market
        );

        self.client.post("conditional_orders", Some(query)).await
    }

    /// Modify a trigger order
    ///
    /// The modified order gets a new ID.
    #[instrument(skip(self))]
    pub async fn modify_trigger_order(&self, order_id: u64, update: &TriggerOrderUpdate) -> RestResult<Value> {
        let query = update.to_query()?;
        debug!("Modifying {} trigger order {}", update.trigger_type, order_id);
        self.client
            .post(&format!("conditional_orders/{}/modify", order_id), Some(query))
            .await
    }

    /// Cancel a trigger order
    #[instrument(skip(self))]
    pub async fn cancel_trigger_order(&self, order_id: u64) -> RestResult<Value> {
        info!("Cancelling trigger order {}", order_id);
        self.client
            .delete(&format!("conditional_orders/{}", order_id), None)
            .await
    }
}
