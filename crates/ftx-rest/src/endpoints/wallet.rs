//! Private wallet endpoints

use ftx_types::DepositChain;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::query::QueryBuilder;
use crate::request::HttpMethod;
use crate::types::{Balance, HistoryFilter};

/// Private wallet endpoints
pub struct WalletEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> WalletEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// List coins known to the wallet
    #[instrument(skip(self))]
    pub async fn get_coins(&self) -> RestResult<Value> {
        self.client.get("wallet/coins", None).await
    }

    /// Get balances of the current account
    #[instrument(skip(self))]
    pub async fn get_balances(&self) -> RestResult<Vec<Balance>> {
        self.client
            .send_as(HttpMethod::Get, "wallet/balances", None)
            .await
    }

    /// Get the balance of a single coin
    ///
    /// Returns `None` if the account holds no balance entry for `coin`.
    #[instrument(skip(self))]
    pub async fn get_balance(&self, coin: &str) -> RestResult<Option<Balance>> {
        let balance = self.get_balances().await?.into_iter().find(|b| b.coin == coin);
        if balance.is_none() {
            debug!("No balance entry for {}", coin);
        }
        Ok(balance)
    }

    /// Get balances of the main account and every subaccount
    #[instrument(skip(self))]
    pub async fn get_all_balances(&self) -> RestResult<Value> {
        self.client.get("wallet/all_balances", None).await
    }

    /// Get a deposit address
    ///
    /// # Arguments
    /// * `coin` - Coin to deposit
    /// * `chain` - Blockchain to deposit from, sent as `method`
    #[instrument(skip(self))]
    pub async fn get_deposit_address(&self, coin: &str, chain: Option<DepositChain>) -> RestResult<Value> {
        let query = QueryBuilder::new().opt("method", chain.map(|c| c.as_str())).build();
        self.client
            .get(&format!("wallet/deposit_address/{}", coin), Some(query))
            .await
    }

    /// Get deposit history
    #[instrument(skip(self))]
    pub async fn get_deposit_history(&self, filter: &HistoryFilter) -> RestResult<Value> {
        self.history("wallet/deposits", filter).await
    }

    /// Get withdrawal history
    #[instrument(skip(self))]
    pub async fn get_withdrawal_history(&self, filter: &HistoryFilter) -> RestResult<Value> {
        self.history("wallet/withdrawals", filter).await
    }

    /// Get airdrop history
    #[instrument(skip(self))]
    pub async fn get_airdrops(&self, filter: &HistoryFilter) -> RestResult<Value> {
        self.history("wallet/airdrops", filter).await
    }

    async fn history(&self, endpoint: &str, filter: &HistoryFilter) -> RestResult<Value> {
        let query = filter.to_query()?;
        self.client.get(endpoint, Some(query)).await
    }
}
