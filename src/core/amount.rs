//! Monetary amounts and their decimal representation
//!
//! Amounts are plain `i64` counts of the smallest unit. One coin is
//! 100,000,000 base units, the same split Bitcoin uses.
//!
//! ## Range
//! Display code downstream may hold amounts in an `f64`, so every amount that
//! crosses a string boundary must stay within `±MAX_SAFE_VALUE` (2^53 - 1).
//!
//! ## String format
//! `[-]digits.digits` with the fractional part trimmed of trailing zeros but
//! never empty: `546.0`, `546.78`, `0.0000546`.

use crate::error::{PrimitivesError, Result};
use std::fmt;
use std::str::FromStr;

/// Number of base units in one coin
pub const COIN: i64 = 100_000_000;

/// Decimal places of the coin unit
pub const DECIMAL_PLACES: u32 = 8;

/// Largest integer an IEEE-754 double represents exactly (2^53 - 1)
pub const MAX_SAFE_VALUE: i64 = 9_007_199_254_740_991;

/// Total money supply cap in base units
pub const MAX_MONEY: i64 = 21_000_000 * COIN;

/// Block subsidy before the first halving (50 coins)
pub const BASE_REWARD: i64 = 50 * COIN;

/// Blocks between subsidy halvings
pub const HALVING_INTERVAL: u32 = 210_000;

/// Display units an amount can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// 10^8 base units
    Coin,
    /// 10^5 base units
    MilliCoin,
    /// 10^2 base units
    Bits,
    /// The indivisible base unit
    Base,
}

impl Unit {
    /// Number of decimal places the unit carries
    pub fn exponent(self) -> u32 {
        match self {
            Unit::Coin => DECIMAL_PLACES,
            Unit::MilliCoin => 5,
            Unit::Bits => 2,
            Unit::Base => 0,
        }
    }
}

impl FromStr for Unit {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "coin" => Ok(Unit::Coin),
            "mcoin" => Ok(Unit::MilliCoin),
            "bits" => Ok(Unit::Bits),
            "base" => Ok(Unit::Base),
            _ => Err(PrimitivesError::Value(format!(
                "Invalid unit: {s}. Valid options: coin, mcoin, bits, base"
            ))),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Coin => write!(f, "coin"),
            Unit::MilliCoin => write!(f, "mcoin"),
            Unit::Bits => write!(f, "bits"),
            Unit::Base => write!(f, "base"),
        }
    }
}

/// Format base units as a coin-denominated decimal string.
///
/// # Examples
/// ```
/// use architect_primitives::core::amount::to_decimal_string;
/// assert_eq!(to_decimal_string(5460), "0.0000546");
/// assert_eq!(to_decimal_string(54_678_000_000), "546.78");
/// assert_eq!(to_decimal_string(54_600_000_000), "546.0");
/// ```
pub fn to_decimal_string(units: i64) -> String {
    format_units(units, Unit::Coin)
}

/// Parse a coin-denominated decimal string into base units.
///
/// # Examples
/// ```
/// use architect_primitives::core::amount::from_decimal_string;
/// assert_eq!(from_decimal_string("546.0000").unwrap(), 54_600_000_000);
/// assert!(from_decimal_string("546.00000000000000001").is_err());
/// ```
pub fn from_decimal_string(text: &str) -> Result<i64> {
    parse_units(text, Unit::Coin)
}

/// Format base units in the given display unit.
pub fn format_units(units: i64, unit: Unit) -> String {
    let exp = unit.exponent();
    let sign = if units < 0 { "-" } else { "" };
    let magnitude = units.unsigned_abs();

    if exp == 0 {
        return format!("{sign}{magnitude}");
    }

    let mult = 10u64.pow(exp);
    let hi = magnitude / mult;
    let lo = format!("{:0width$}", magnitude % mult, width = exp as usize);
    let lo = lo.trim_end_matches('0');
    let lo = if lo.is_empty() { "0" } else { lo };

    format!("{sign}{hi}.{lo}")
}

/// Parse a decimal string expressed in `unit` into base units.
///
/// Fractional digits beyond the unit's precision are accepted only when they
/// are all zero. The result must stay within `±MAX_SAFE_VALUE`.
pub fn parse_units(text: &str, unit: Unit) -> Result<i64> {
    let exp = unit.exponent() as usize;

    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (hi, lo) = match body.split_once('.') {
        Some((hi, lo)) => (hi, lo),
        None => (body, ""),
    };

    if hi.is_empty() && lo.is_empty() {
        return Err(PrimitivesError::Value(format!(
            "No digits in fixed number string: {text:?}"
        )));
    }
    if !hi.bytes().all(|b| b.is_ascii_digit()) || !lo.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PrimitivesError::Value(format!(
            "Non-numeric characters in fixed number string: {text:?}"
        )));
    }

    let hi = hi.trim_start_matches('0');
    let lo = lo.trim_end_matches('0');

    if lo.len() > exp {
        return Err(PrimitivesError::Value(format!(
            "Too many decimal places in fixed number string: {text:?}"
        )));
    }
    // 2^53 has 16 decimal digits
    if hi.len() > 16 {
        return Err(exceeds_safe(text));
    }

    let hi: u64 = if hi.is_empty() {
        0
    } else {
        hi.parse().map_err(|_| exceeds_safe(text))?
    };
    let lo: u64 = if lo.is_empty() {
        0
    } else {
        let padded = format!("{lo:0<exp$}");
        padded.parse().map_err(|_| exceeds_safe(text))?
    };

    let total = hi
        .checked_mul(10u64.pow(exp as u32))
        .and_then(|v| v.checked_add(lo))
        .filter(|v| *v <= MAX_SAFE_VALUE as u64)
        .ok_or_else(|| exceeds_safe(text))?;

    let total = total as i64;
    Ok(if negative { -total } else { total })
}

fn exceeds_safe(text: &str) -> PrimitivesError {
    PrimitivesError::Value(format!("Fixed number string exceeds 2^53-1: {text:?}"))
}

/// Check that an amount is a valid output value
pub fn is_valid_money(units: i64) -> bool {
    (0..=MAX_MONEY).contains(&units)
}

/// Block subsidy at `height`, halving every `HALVING_INTERVAL` blocks.
pub fn block_reward(height: u32) -> i64 {
    let halvings = height / HALVING_INTERVAL;
    if halvings >= 64 {
        return 0;
    }
    BASE_REWARD >> halvings
}
