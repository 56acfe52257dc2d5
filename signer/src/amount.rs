//! # Amounts
//!
//! Conversion between user-facing decimal MER strings and on-wire grain
//! counts. One MER is 10^9 grains, and every monetary field of an operation
//! is an integer grain count; no floating point gets anywhere near money.
//!
//! Parsing is strict in both directions that matter:
//!
//! - more precision than a grain can hold is an error, never a rounding
//! - anything above the chain's signed-64-bit accounting range is an error

use std::fmt;

use thiserror::Error;

use crate::config::{COIN_DECIMALS, GRAINS_PER_COIN, MAX_GRAINS};

/// Errors from decimal amount parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The fractional part carries precision below one grain.
    #[error("amount has more than {COIN_DECIMALS} decimal places")]
    PrecisionExceeded,

    /// The value does not fit the chain's 63-bit accounting range.
    #[error("amount exceeds the maximum representable value")]
    AmountTooLarge,

    /// The string is not a plain decimal number.
    #[error("amount is not a valid decimal number")]
    Malformed,
}

/// Parses a decimal MER string (`"1.5"`, `"0.000000001"`, `"42"`) into
/// grains.
///
/// Accepted syntax: optional whole digits, optional `.` plus fraction
/// digits, at least one digit overall. No sign, no exponent, no separators;
/// this parses amounts a user typed, not a general float grammar.
pub fn parse_amount(text: &str) -> Result<u64, AmountError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AmountError::Malformed);
    }

    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::Malformed);
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::Malformed);
    }

    // Digits past the ninth place are representable only if they are zero.
    let decimals = COIN_DECIMALS as usize;
    if fraction.len() > decimals && fraction[decimals..].bytes().any(|b| b != b'0') {
        return Err(AmountError::PrecisionExceeded);
    }

    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::AmountTooLarge)?
    };

    let significant = &fraction[..fraction.len().min(decimals)];
    let mut fraction_value: u128 = if significant.is_empty() {
        0
    } else {
        significant.parse().map_err(|_| AmountError::Malformed)?
    };
    // Scale a short fraction up to grain resolution: "1.5" -> 500_000_000.
    fraction_value *= 10u128.pow(COIN_DECIMALS - significant.len() as u32);

    let grains = whole_value
        .checked_mul(GRAINS_PER_COIN as u128)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or(AmountError::AmountTooLarge)?;

    if grains > MAX_GRAINS as u128 {
        return Err(AmountError::AmountTooLarge);
    }
    Ok(grains as u64)
}

/// Formats a grain count as a decimal MER string, trimming trailing
/// fractional zeros. Display-only; never fed back into the wire format.
pub fn format_amount(grains: u64) -> String {
    let whole = grains / GRAINS_PER_COIN;
    let fraction = grains % GRAINS_PER_COIN;
    if fraction == 0 {
        return whole.to_string();
    }
    let mut text = format!("{}.{:09}", whole, fraction);
    while text.ends_with('0') {
        text.pop();
    }
    text
}

/// A grain count wrapper for display contexts.
///
/// The wire format works in bare `u64` grains; this exists so log lines and
/// CLI output format consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(pub u64);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_amount(self.0), crate::config::COIN_SYMBOL)
    }
}
