//! Base-unit conversions and display formatting.

use alloy::primitives::U256;
use chrono::{DateTime, Local, TimeZone};
use rust_decimal::Decimal;

use crate::ethereum::constants::ETHER_DECIMALS;

/// Layout of an en-US locale date string, e.g. `11/14/2023, 10:13:20 PM`.
const DISPLAY_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Format a U256 value with decimals to a human-readable string.
pub fn format_units(value: U256, decimals: u8) -> String {
    if value == U256::ZERO {
        return "0".to_string();
    }

    let value_str = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return value_str;
    }

    let len = value_str.len();
    if len <= decimals {
        // Value is less than 1, pad with zeros
        let zeros = decimals - len;
        let decimal_part = value_str.trim_end_matches('0');
        format!("0.{}{}", "0".repeat(zeros), decimal_part)
    } else {
        let (integer, decimal) = value_str.split_at(len - decimals);
        let decimal = decimal.trim_end_matches('0');
        if decimal.is_empty() {
            integer.to_string()
        } else {
            format!("{}.{}", integer, decimal)
        }
    }
}

/// Parse a human-readable amount string to U256 with decimals.
///
/// A fractional part longer than `decimals` is rejected, not truncated.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, String> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }

    if amount.starts_with('-') {
        return Err("Amount cannot be negative".to_string());
    }

    let (integer, fraction) = match amount.split_once('.') {
        Some((_, rest)) if rest.contains('.') => {
            return Err("Invalid amount format".to_string());
        }
        Some((integer, fraction)) => (integer, fraction),
        None => (amount, ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return Err("Invalid amount format".to_string());
    }

    if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(format!("Invalid amount: {}", amount));
    }

    let decimals = decimals as usize;
    if fraction.len() > decimals {
        return Err(format!("Too many decimal places: at most {} allowed", decimals));
    }

    let digits = format!("{}{}{}", integer, fraction, "0".repeat(decimals - fraction.len()));
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10).map_err(|_| format!("Amount out of range: {}", amount))
}

/// Convert a decimal ether amount (e.g. `"0.5"`) to wei.
pub fn parse_ether(amount: &str) -> Result<U256, String> {
    parse_units(amount, ETHER_DECIMALS)
}

/// Convert U256 to Decimal with proper scaling.
///
/// Returns `None` when the value does not fit a `Decimal`.
pub fn u256_to_decimal(value: U256, decimals: u8) -> Option<Decimal> {
    format_units(value, decimals).parse::<Decimal>().ok()
}

/// Render a Unix timestamp (seconds) in local time.
pub fn format_timestamp(seconds: u64) -> Option<String> {
    format_timestamp_in(seconds, &Local)
}

/// Render a Unix timestamp (seconds) in the given time zone.
pub fn format_timestamp_in<Tz>(seconds: u64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let seconds = i64::try_from(seconds).ok()?;
    let utc = DateTime::from_timestamp(seconds, 0)?;
    Some(utc.with_timezone(tz).format(DISPLAY_TIME_FORMAT).to_string())
}
