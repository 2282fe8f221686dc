//! Types for FTX REST API requests and responses
//!
//! Most endpoints return their `result` as a raw [`serde_json::Value`]. The
//! types here cover the request shapes with many optional fields and the few
//! responses the client inspects itself.

use ftx_types::{validate, OrderType, Side, SortOrder, TriggerType, ValidationError, ValidationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoints::trading::DEFAULT_HISTORY_LIMIT;
use crate::query::{Query, QueryBuilder};

// ============================================================================
// Market Data Types
// ============================================================================

/// Orderbook snapshot
///
/// Each level is `[price, size]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orderbook {
    pub bids: Vec<[Decimal; 2]>,
    pub asks: Vec<[Decimal; 2]>,
}

impl Orderbook {
    /// Best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|level| level[0])
    }

    /// Best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|level| level[0])
    }

    /// Difference between best ask and best bid
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Wallet balance of a single coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub coin: String,
    pub free: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub usd_value: Option<Decimal>,
    #[serde(default)]
    pub spot_borrow: Option<Decimal>,
    #[serde(default)]
    pub available_without_borrow: Option<Decimal>,
}

// ============================================================================
// Query Filters
// ============================================================================

/// Time-bounded history query shared by many endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Maximum number of records, at most 100
    pub limit: Option<u32>,
    /// Epoch seconds, inclusive lower bound
    pub start_time: Option<i64>,
    /// Epoch seconds, inclusive upper bound
    pub end_time: Option<i64>,
}

impl HistoryFilter {
    /// Create an unbounded filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of records
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the lower time bound
    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Set the upper time bound
    pub fn end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Validate and build the query
    pub fn to_query(&self) -> ValidationResult<Query> {
        Ok(QueryBuilder::new()
            .opt("limit", validate::limit(self.limit)?)
            .opt("start_time", self.start_time)
            .opt("end_time", self.end_time)
            .build())
    }
}

/// Fills query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillsFilter {
    pub market: String,
    pub limit: Option<u32>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    /// Oldest first when set
    pub order: Option<SortOrder>,
    pub order_id: Option<u64>,
}

impl FillsFilter {
    /// Create a filter for fills in `market`
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            limit: None,
            start_time: None,
            end_time: None,
            order: None,
            order_id: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Set the sort direction
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Only fills of one order
    pub fn order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn to_query(&self) -> ValidationResult<Query> {
        Ok(QueryBuilder::new()
            .opt("limit", validate::limit(self.limit)?)
            .opt("start_time", self.start_time)
            .opt("end_time", self.end_time)
            .opt("order", self.order.map(|o| o.as_str()))
            .opt("orderId", self.order_id)
            .param("market", self.market.as_str())
            .build())
    }
}

/// Trigger order history query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerHistoryFilter {
    pub market: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub side: Option<Side>,
    pub trigger_type: Option<TriggerType>,
    /// Type of the order placed once triggered
    pub order_type: Option<OrderType>,
    pub limit: Option<u32>,
}

impl TriggerHistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn trigger_type(mut self, trigger_type: TriggerType) -> Self {
        self.trigger_type = Some(trigger_type);
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_query(&self) -> ValidationResult<Query> {
        Ok(QueryBuilder::new()
            .opt("start_time", self.start_time)
            .opt("end_time", self.end_time)
            .opt("side", self.side.map(|s| s.as_str()))
            .opt("orderType", self.order_type.map(|t| t.as_str()))
            .opt("limit", validate::limit(Some(self.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)))?)
            .opt("market", self.market.as_deref())
            .opt("type", self.trigger_type.map(|t| t.as_str()))
            .build())
    }
}

// ============================================================================
// Trading Types
// ============================================================================

/// New order request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Market, e.g. "BTC/USD" for spot or "XRP-PERP" for futures
    pub market: String,
    pub side: Side,
    pub order_type: OrderType,
    pub size: Decimal,
    /// Limit price, absent for market orders
    pub price: Option<Decimal>,
    /// Only reduce an existing position (futures only)
    pub reduce_only: bool,
    /// Immediate or cancel
    pub ioc: bool,
    /// Always maker
    pub post_only: bool,
    pub client_id: Option<String>,
}

impl OrderRequest {
    /// Create a market order
    pub fn market(market: impl Into<String>, side: Side, size: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            order_type: OrderType::Market,
            size,
            price: None,
            reduce_only: false,
            ioc: false,
            post_only: false,
            client_id: None,
        }
    }

    /// Create a limit order
    pub fn limit(market: impl Into<String>, side: Side, size: Decimal, price: Decimal) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            ..Self::market(market, side, size)
        }
    }

    /// Set post-only flag
    pub fn post_only(mut self) -> Self {
        self.post_only = true;
        self
    }

    /// Set reduce-only flag
    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    /// Set immediate-or-cancel flag
    pub fn ioc(mut self) -> Self {
        self.ioc = true;
        self
    }

    /// Set client order ID
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Validate and build the request body
    ///
    /// Market orders send `price: null`.
    pub fn to_query(&self) -> ValidationResult<Query> {
        if self.order_type == OrderType::Limit && self.price.is_none() {
            return Err(ValidationError::new("price", "a price for limit orders", "none"));
        }

        let price = match self.order_type {
            OrderType::Limit => self.price.map(crate::query::decimal_value),
            OrderType::Market => None,
        };

        Ok(QueryBuilder::new()
            .param("market", self.market.as_str())
            .param("side", self.side.as_str())
            .param("price", price.unwrap_or(Value::Null))
            .param("type", self.order_type.as_str())
            .decimal("size", self.size)
            .param("reduceOnly", self.reduce_only)
            .param("ioc", self.ioc)
            .param("postOnly", self.post_only)
            .opt("clientId", self.client_id.as_deref())
            .build())
    }
}

/// New trigger order request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOrderRequest {
    pub market: String,
    pub side: Side,
    pub trigger_type: TriggerType,
    pub size: Decimal,
    /// Price that triggers a stop or take-profit order
    pub trigger_price: Option<Decimal>,
    /// Limit price once triggered; market order when absent
    pub order_price: Option<Decimal>,
    /// Trailing distance, negative for sells and positive for buys
    pub trail_value: Option<Decimal>,
    pub reduce_only: bool,
    /// Keep re-triggering until filled
    pub retry_until_filled: bool,
}

impl TriggerOrderRequest {
    /// Create a stop order
    pub fn stop(market: impl Into<String>, side: Side, size: Decimal, trigger_price: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            trigger_type: TriggerType::Stop,
            size,
            trigger_price: Some(trigger_price),
            order_price: None,
            trail_value: None,
            reduce_only: false,
            retry_until_filled: true,
        }
    }

    /// Create a take-profit order
    pub fn take_profit(market: impl Into<String>, side: Side, size: Decimal, trigger_price: Decimal) -> Self {
        Self {
            trigger_type: TriggerType::TakeProfit,
            ..Self::stop(market, side, size, trigger_price)
        }
    }

    /// Create a trailing stop order
    pub fn trailing_stop(market: impl Into<String>, side: Side, size: Decimal, trail_value: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            trigger_type: TriggerType::TrailingStop,
            size,
            trigger_price: None,
            order_price: None,
            trail_value: Some(trail_value),
            reduce_only: false,
            retry_until_filled: true,
        }
    }

    /// Place a limit order once triggered
    pub fn with_order_price(mut self, price: Decimal) -> Self {
        self.order_price = Some(price);
        self
    }

    /// Set reduce-only flag
    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    /// Set whether to keep re-triggering until filled
    pub fn retry_until_filled(mut self, retry: bool) -> Self {
        self.retry_until_filled = retry;
        self
    }

    pub fn to_query(&self) -> ValidationResult<Query> {
        check_trigger_prices(self.trigger_type, self.trigger_price, self.trail_value)?;

        Ok(QueryBuilder::new()
            .param("market", self.market.as_str())
            .param("side", self.side.as_str())
            .opt_decimal("triggerPrice", self.trigger_price)
            .decimal("size", self.size)
            .param("type", self.trigger_type.as_str())
            .param("reduceOnly", self.reduce_only)
            .param("retryUntilFilled", self.retry_until_filled)
            .opt_decimal("orderPrice", self.order_price)
            .opt_decimal("trailValue", self.trail_value)
            .build())
    }
}

/// Trigger order modification
///
/// Stop and take-profit orders update their trigger and order price; trailing
/// stops update their trail value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOrderUpdate {
    pub trigger_type: TriggerType,
    pub size: Decimal,
    pub trigger_price: Option<Decimal>,
    pub order_price: Option<Decimal>,
    pub trail_value: Option<Decimal>,
}

impl TriggerOrderUpdate {
    /// New size and trigger price for a stop order
    pub fn stop(size: Decimal, trigger_price: Decimal) -> Self {
        Self {
            trigger_type: TriggerType::Stop,
            size,
            trigger_price: Some(trigger_price),
            order_price: None,
            trail_value: None,
        }
    }

    /// New size and trigger price for a take-profit order
    pub fn take_profit(size: Decimal, trigger_price: Decimal) -> Self {
        Self {
            trigger_type: TriggerType::TakeProfit,
            ..Self::stop(size, trigger_price)
        }
    }

    /// New size and trail value for a trailing stop
    pub fn trailing_stop(size: Decimal, trail_value: Decimal) -> Self {
        Self {
            trigger_type: TriggerType::TrailingStop,
            size,
            trigger_price: None,
            order_price: None,
            trail_value: Some(trail_value),
        }
    }

    /// New limit price once triggered
    pub fn with_order_price(mut self, price: Decimal) -> Self {
        self.order_price = Some(price);
        self
    }

    pub fn to_query(&self) -> ValidationResult<Query> {
        check_trigger_prices(self.trigger_type, self.trigger_price, self.trail_value)?;

        let query = QueryBuilder::new().decimal("size", self.size);
        Ok(match self.trigger_type {
            TriggerType::Stop | TriggerType::TakeProfit => query
                .opt_decimal("triggerPrice", self.trigger_price)
                .opt_decimal("orderPrice", self.order_price)
                .build(),
            TriggerType::TrailingStop => query.opt_decimal("trailValue", self.trail_value).build(),
        })
    }
}

fn check_trigger_prices(
    trigger_type: TriggerType,
    trigger_price: Option<Decimal>,
    trail_value: Option<Decimal>,
) -> ValidationResult<()> {
    match trigger_type {
        TriggerType::Stop | TriggerType::TakeProfit if trigger_price.is_none() => Err(ValidationError::new(
            "triggerPrice",
            format!("a trigger price for {} orders", trigger_type),
            "none",
        )),
        TriggerType::TrailingStop if trail_value.is_none() => Err(ValidationError::new(
            "trailValue",
            "a trail value for trailing_stop orders",
            "none",
        )),
        _ => Ok(()),
    }
}

/// Price and size change for an open order
///
/// At least one of price or size must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub price: Option<Decimal>,
    pub size: Option<Decimal>,
    /// Client ID for the replacement order
    pub client_id: Option<String>,
}

impl OrderUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new price
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the new size
    pub fn size(mut self, size: Decimal) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the client ID of the replacement order
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn to_query(&self) -> ValidationResult<Query> {
        if self.price.is_none() && self.size.is_none() {
            return Err(ValidationError::new("price", "a new price or size", "none"));
        }

        Ok(QueryBuilder::new()
            .opt("clientId", self.client_id.as_deref())
            .opt_decimal("size", self.size)
            .opt_decimal("price", self.price)
            .build())
    }
}
