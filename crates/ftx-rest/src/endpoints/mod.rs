//! API endpoint implementations
//!
//! Each group is a thin typed layer over [`FtxRestClient::send`]: it validates
//! parameters, assembles the query and picks the path.
//!
//! [`FtxRestClient::send`]: crate::FtxRestClient::send

pub mod market;
pub mod futures;
pub mod account;
pub mod wallet;
pub mod trading;
pub mod staking;
pub mod otc;
pub mod margin;

pub use market::MarketEndpoints;
pub use futures::FuturesEndpoints;
pub use account::AccountEndpoints;
pub use wallet::WalletEndpoints;
pub use trading::TradingEndpoints;
pub use staking::StakingEndpoints;
pub use otc::OtcEndpoints;
pub use margin::MarginEndpoints;
