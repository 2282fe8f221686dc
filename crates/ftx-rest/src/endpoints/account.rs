//! Private account endpoints
//!
//! Account info, positions, leverage, subaccounts, funding payments and fills.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::query::QueryBuilder;
use crate::types::{FillsFilter, HistoryFilter};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// Get account information, including collateral and positions
    #[instrument(skip(self))]
    pub async fn get_account_info(&self) -> RestResult<Value> {
        debug!("Fetching account info");
        self.client.get("account", None).await
    }

    /// Get open positions
    ///
    /// # Arguments
    /// * `show_avg_price` - Include average entry and break-even prices
    #[instrument(skip(self))]
    pub async fn get_positions(&self, show_avg_price: bool) -> RestResult<Value> {
        let query = QueryBuilder::new().param("showAvgPrice", show_avg_price).build();
        self.client.get("positions", Some(query)).await
    }

    /// Change account-wide leverage
    #[instrument(skip(self))]
    pub async fn change_leverage(&self, leverage: u32) -> RestResult<Value> {
        info!("Changing account leverage to {}x", leverage);
        let query = QueryBuilder::new().param("leverage", leverage).build();
        self.client.post("account/leverage", Some(query)).await
    }

    // ========================================================================
    // Subaccounts
    // ========================================================================

    /// List all subaccounts
    #[instrument(skip(self))]
    pub async fn get_subaccounts(&self) -> RestResult<Value> {
        self.client.get("subaccounts", None).await
    }

    /// Create a subaccount
    #[instrument(skip(self))]
    pub async fn create_subaccount(&self, nickname: &str) -> RestResult<Value> {
        let query = QueryBuilder::new().param("nickname", nickname).build();
        self.client.post("subaccounts", Some(query)).await
    }

    /// Rename a subaccount
    #[instrument(skip(self))]
    pub async fn rename_subaccount(&self, nickname: &str, new_nickname: &str) -> RestResult<Value> {
        let query = QueryBuilder::new()
            .param("nickname", nickname)
            .param("newNickname", new_nickname)
            .build();
        self.client.post("subaccounts/update_name", Some(query)).await
    }

    /// Delete a subaccount
    #[instrument(skip(self))]
    pub async fn delete_subaccount(&self, nickname: &str) -> RestResult<Value> {
        let query = QueryBuilder::new().param("nickname", nickname).build();
        self.client.delete("subaccounts", Some(query)).await
    }

    /// Get balances of a subaccount
    #[instrument(skip(self))]
    pub async fn get_subaccount_balances(&self, nickname: &str) -> RestResult<Value> {
        self.client
            .get(&format!("subaccounts/{}/balances", nickname), None)
            .await
    }

    /// Transfer a coin between subaccounts
    ///
    /// # Arguments
    /// * `source` - Source subaccount, "main" for the main account
    /// * `destination` - Destination subaccount, "main" for the main account
    #[instrument(skip(self))]
    pub async fn transfer_between_subaccounts(
        &self,
        coin: &str,
        size: Decimal,
        source: &str,
        destination: &str,
    ) -> RestResult<Value> {
        info!("Transferring {} {} from {} to {}", size, coin, source, destination);

        let query = QueryBuilder::new()
            .param("coin", coin)
            .decimal("size", size)
            .param("source", source)
            .param("destination", destination)
            .build();
        self.client.post("subaccounts/transfer", Some(query)).await
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Get funding payments
    ///
    /// # Arguments
    /// * `future` - Perpetual future; a bare coin such as "BTC" means "BTC-PERP"
    /// * `filter` - Time bounds in epoch seconds; `limit` is ignored
    #[instrument(skip(self))]
    pub async fn get_funding_payments(&self, future: Option<&str>, filter: &HistoryFilter) -> RestResult<Value> {
        let query = QueryBuilder::new()
            .opt("end_time", filter.end_time)
            .opt("start_time", filter.start_time)
            .opt("future", future.map(perpetual_name))
            .build();
        self.client.get("funding_payments", Some(query)).await
    }

    /// Get fills of a market
    #[instrument(skip(self))]
    pub async fn get_fills(&self, filter: &FillsFilter) -> RestResult<Value> {
        let query = filter.to_query()?;
        self.client.get("fills", Some(query)).await
    }
}

/// Expand a bare coin into its perpetual future name
fn perpetual_name(future: &str) -> String {
    if future.contains('-') {
        future.to_string()
    } else {
        format!("{}-PERP", future)
    }
}
