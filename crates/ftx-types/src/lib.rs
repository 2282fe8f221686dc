//! Shared types for the FTX REST client
//!
//! This crate provides the parameter types and guards used across the
//! workspace. It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Side`], [`OrderType`], [`TriggerType`], [`SortOrder`], [`DepositChain`],
//!   [`Resolution`] - Validated request parameters
//! - [`ValidationError`] - Raised by every pre-flight parameter guard
//! - [`RateWindow`], [`RateLimitConfig`] - Client-side request throttling

pub mod enums;
pub mod error;
pub mod rate_limit;
pub mod validate;

// Re-export commonly used types
pub use enums::*;
pub use error::*;
pub use rate_limit::*;
pub use validate::{MAX_DEPTH, MAX_LIMIT, MIN_DEPTH};
