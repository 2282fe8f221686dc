//! Pre-flight parameter guards
//!
//! Guards run before a request is throttled, signed or dispatched, so an
//! invalid call never counts against the rate window and never reaches the
//! network. String guards accept raw caller input and return the typed value;
//! an absent optional stays absent.

use crate::enums::{DepositChain, OrderType, Resolution, Side, SortOrder, TriggerType};
use crate::error::{ValidationError, ValidationResult};

/// Largest accepted result count
pub const MAX_LIMIT: u32 = 100;

/// Smallest accepted orderbook depth
pub const MIN_DEPTH: u32 = 20;

/// Largest accepted orderbook depth
pub const MAX_DEPTH: u32 = 100;

/// Result-count limit must not exceed [`MAX_LIMIT`]
pub fn limit(limit: Option<u32>) -> ValidationResult<Option<u32>> {
    match limit {
        Some(n) if n > MAX_LIMIT => Err(ValidationError::new(
            "limit",
            format!("{} or lower", MAX_LIMIT),
            n,
        )),
        other => Ok(other),
    }
}

/// Orderbook depth must lie in `[MIN_DEPTH, MAX_DEPTH]`
pub fn depth(depth: u32) -> ValidationResult<u32> {
    if (MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        Ok(depth)
    } else {
        Err(ValidationError::new(
            "depth",
            format!("a value between {} and {}", MIN_DEPTH, MAX_DEPTH),
            depth,
        ))
    }
}

/// Candle resolution must be one of the exchange's fixed windows
pub fn resolution(secs: u32) -> ValidationResult<Resolution> {
    Resolution::try_from(secs)
}

pub fn side(side: Option<&str>) -> ValidationResult<Option<Side>> {
    side.map(str::parse).transpose()
}

/// Regular orders always carry an explicit type
pub fn order_type(order_type: &str) -> ValidationResult<OrderType> {
    order_type.parse()
}

pub fn trigger_type(trigger_type: Option<&str>) -> ValidationResult<Option<TriggerType>> {
    trigger_type.map(str::parse).transpose()
}

pub fn sort_order(order: Option<&str>) -> ValidationResult<Option<SortOrder>> {
    order.map(str::parse).transpose()
}

pub fn chain(chain: Option<&str>) -> ValidationResult<Option<DepositChain>> {
    chain.map(str::parse).transpose()
}
