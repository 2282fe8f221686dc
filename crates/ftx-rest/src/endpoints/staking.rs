//! Private SRM staking endpoints

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::query::{Query, QueryBuilder};

/// Private SRM staking endpoints
pub struct StakingEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> StakingEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get_stake_history(&self) -> RestResult<Value> {
        self.client.get("srm_stakes/stakes", None).await
    }

    #[instrument(skip(self))]
    pub async fn get_unstake_history(&self) -> RestResult<Value> {
        self.client.get("srm_stakes/unstake_requests", None).await
    }

    /// Get actively staked, pending unstake and lifetime reward balances
    #[instrument(skip(self))]
    pub async fn get_stake_balances(&self) -> RestResult<Value> {
        self.client.get("srm_stakes/balances", None).await
    }

    #[instrument(skip(self))]
    pub async fn get_staking_rewards(&self) -> RestResult<Value> {
        self.client.get("srm_stakes/staking_rewards", None).await
    }

    /// Stake a coin (SRM, SRM_LOCKED or MSRM)
    #[instrument(skip(self))]
    pub async fn stake(&self, coin: &str, size: Decimal) -> RestResult<Value> {
        info!("Staking {} {}", size, coin);
        self.client.post("srm_stakes/stakes", Some(coin_size(coin, size))).await
    }

    /// Request to unstake a coin
    #[instrument(skip(self))]
    pub async fn unstake(&self, coin: &str, size: Decimal) -> RestResult<Value> {
        info!("Requesting unstake of {} {}", size, coin);
        self.client
            .post("srm_stakes/unstake_requests", Some(coin_size(coin, size)))
            .await
    }

    /// Cancel a pending unstake request
    #[instrument(skip(self))]
    pub async fn cancel_unstake(&self, request_id: u64) -> RestResult<Value> {
        self.client
            .delete(&format!("srm_stakes/unstake_requests/{}", request_id), None)
            .await
    }
}

fn coin_size(coin: &str, size: Decimal) -> Query {
    QueryBuilder::new().param("coin", coin).decimal("size", size).build()
}
