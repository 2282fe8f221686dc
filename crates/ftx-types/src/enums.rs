//! Side, OrderType, TriggerType, SortOrder, DepositChain and Resolution enums
//!
//! Every enum parses from the exchange's wire spelling and rejects anything
//! else with a [`ValidationError`] naming the parameter and accepted values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Buy, Side::Sell];

    /// Returns the side as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ValidationError::one_of("side", &Self::ALL, s))
    }
}

/// Order type for regular orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
}

impl OrderType {
    pub const ALL: [OrderType; 2] = [OrderType::Limit, OrderType::Market];

    /// Returns the order type as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ValidationError::one_of("type", &Self::ALL, s))
    }
}

/// Trigger (conditional) order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Stop loss
    #[default]
    Stop,
    /// Trailing stop
    TrailingStop,
    /// Take profit
    TakeProfit,
}

impl TriggerType {
    pub const ALL: [TriggerType; 3] = [
        TriggerType::Stop,
        TriggerType::TrailingStop,
        TriggerType::TakeProfit,
    ];

    /// Returns the trigger type as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::TrailingStop => "trailing_stop",
            Self::TakeProfit => "take_profit",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ValidationError::one_of("type", &Self::ALL, s))
    }
}

/// Sort direction for history queries
///
/// The exchange returns newest first by default; ascending is the only
/// direction that can be requested explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 1] = [SortOrder::Asc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ValidationError::one_of("order", &Self::ALL, s))
    }
}

/// Blockchain used for a deposit address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositChain {
    /// Omni layer (USDT)
    Omni,
    /// Ethereum ERC-20
    Erc20,
    /// Tron
    Trx,
    /// Solana
    Sol,
    /// Binance Chain BEP-2
    Bep2,
}

impl DepositChain {
    pub const ALL: [DepositChain; 5] = [
        DepositChain::Omni,
        DepositChain::Erc20,
        DepositChain::Trx,
        DepositChain::Sol,
        DepositChain::Bep2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Omni => "omni",
            Self::Erc20 => "erc20",
            Self::Trx => "trx",
            Self::Sol => "sol",
            Self::Bep2 => "bep2",
        }
    }
}

impl fmt::Display for DepositChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepositChain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ValidationError::one_of("chain", &Self::ALL, s))
    }
}

/// Candle resolution in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Resolution {
    /// 15 seconds
    Sec15,
    /// 1 minute
    Min1,
    /// 5 minutes
    #[default]
    Min5,
    /// 15 minutes
    Min15,
    /// 1 hour
    Hour1,
    /// 4 hours
    Hour4,
    /// 1 day
    Day1,
}

impl Resolution {
    pub const ALL: [Resolution; 7] = [
        Resolution::Sec15,
        Resolution::Min1,
        Resolution::Min5,
        Resolution::Min15,
        Resolution::Hour1,
        Resolution::Hour4,
        Resolution::Day1,
    ];

    /// Window length in seconds
    pub fn seconds(&self) -> u32 {
        match self {
            Self::Sec15 => 15,
            Self::Min1 => 60,
            Self::Min5 => 300,
            Self::Min15 => 900,
            Self::Hour1 => 3600,
            Self::Hour4 => 14400,
            Self::Day1 => 86400,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.seconds())
    }
}

impl TryFrom<u32> for Resolution {
    type Error = ValidationError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|r| r.seconds() == secs)
            .ok_or_else(|| ValidationError::one_of("resolution", &Self::ALL, secs))
    }
}

impl Serialize for Resolution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.seconds())
    }
}

impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let secs = u32::deserialize(deserializer)?;
        Self::try_from(secs).map_err(serde::de::Error::custom)
    }
}
