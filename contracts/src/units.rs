//! Boundary conversions between human-facing values and on-chain encodings.
//!
//! Prices cross the boundary as decimal strings ("0.05") and live on chain as
//! base-unit integers (wei). Event dates cross as [`DateTime<Utc>`] and live
//! on chain as Unix seconds. All arithmetic stays in `U256`; totals are never
//! accumulated through floating point.

use alloy::primitives::{
    U256,
    utils::{format_ether, parse_ether},
};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from unit conversions.
#[derive(Debug, Error)]
pub enum UnitError {
    /// The decimal amount string could not be parsed.
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount {
        /// The rejected input string.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Quantity must be at least one.
    #[error("quantity must be a positive integer")]
    ZeroQuantity,

    /// The multiplied total does not fit in 256 bits.
    #[error("total value overflows 256 bits")]
    Overflow,

    /// Event dates before the Unix epoch cannot be encoded.
    #[error("date {0} predates the Unix epoch")]
    PreEpochDate(DateTime<Utc>),
}

/// Parse a decimal ether-denominated string into base units (wei).
///
/// # Errors
///
/// Returns [`UnitError::InvalidAmount`] for non-numeric, negative or
/// malformed input.
pub fn parse_amount(amount: &str) -> Result<U256, UnitError> {
    parse_ether(amount).map_err(|e| UnitError::InvalidAmount {
        input: amount.to_string(),
        reason: e.to_string(),
    })
}

/// Format a base-unit (wei) value as a decimal ether string.
#[must_use]
pub fn format_amount(base_units: U256) -> String {
    format_ether(base_units)
}

/// Total value for a multi-ticket mint: `unit price × quantity`, exactly.
///
/// The price is parsed once and multiplied in `U256`, so `mint_total("0.05", 3)`
/// is the precise base-unit equivalent of 0.15 — not three floating-point
/// additions of 0.05.
///
/// # Errors
///
/// Returns [`UnitError::ZeroQuantity`] for `quantity == 0`,
/// [`UnitError::InvalidAmount`] for an unparseable price, and
/// [`UnitError::Overflow`] if the product exceeds 256 bits.
pub fn mint_total(price_per_ticket: &str, quantity: u32) -> Result<U256, UnitError> {
    if quantity == 0 {
        return Err(UnitError::ZeroQuantity);
    }
    let unit = parse_amount(price_per_ticket)?;
    unit.checked_mul(U256::from(quantity))
        .ok_or(UnitError::Overflow)
}

/// Encode an event date as on-chain Unix seconds.
///
/// # Errors
///
/// Returns [`UnitError::PreEpochDate`] for dates before 1970.
pub fn to_unix_seconds(date: DateTime<Utc>) -> Result<U256, UnitError> {
    let secs = date.timestamp();
    if secs < 0 {
        return Err(UnitError::PreEpochDate(date));
    }
    Ok(U256::from(secs.unsigned_abs()))
}

/// Decode on-chain Unix seconds into a date.
///
/// Returns `None` if the value does not fit a representable timestamp.
#[must_use]
pub fn from_unix_seconds(seconds: U256) -> Option<DateTime<Utc>> {
    let secs: i64 = i64::try_from(seconds).ok()?;
    DateTime::from_timestamp(secs, 0)
}
