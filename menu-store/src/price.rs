//! Price formatting and parsing
//!
//! All helpers here are infallible: malformed input degrades to a zero
//! amount so rendering never has to deal with errors.

use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::MenuItem;
use std::str::FromStr;
use std::sync::LazyLock;

/// Currency prefix of formatted prices
pub const CURRENCY_PREFIX: &str = "R ";

/// Rendering of a missing or unreadable price
pub const ZERO_PRICE: &str = "R 0.00";

const DECIMAL_PLACES: u32 = 2;

/// Non-negative amount with at most two decimal places
static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").expect("valid price pattern"));

/// Format an amount as `R 12.50`; `None` formats as [`ZERO_PRICE`]
pub fn format_price(price: Option<Decimal>) -> String {
    match price {
        Some(value) => {
            let mut rounded = value
                .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(DECIMAL_PLACES);
            format!("{CURRENCY_PREFIX}{rounded}")
        }
        None => ZERO_PRICE.to_string(),
    }
}

/// Format a textual amount, non-numeric text formats as [`ZERO_PRICE`]
pub fn format_price_text(text: &str) -> String {
    format_price(leading_decimal(text))
}

/// Parse the leading number of `text`; unreadable input yields zero
pub fn parse_price(text: &str) -> Decimal {
    leading_decimal(text).unwrap_or(Decimal::ZERO)
}

/// `true` iff `text` is digits optionally followed by `.` and one or two digits
pub fn is_valid_price(text: &str) -> bool {
    PRICE_PATTERN.is_match(text)
}

/// Sum of prices, missing prices count as zero; saturates instead of overflowing
pub fn total(items: &[MenuItem]) -> Decimal {
    items
        .iter()
        .map(MenuItem::price_or_zero)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Beyond this many powers of ten any non-zero value has overflowed or rounded to zero
const MAX_EXPONENT_STEPS: u64 = 64;

/// Longest numeric prefix (`[+-]digits[.digits][e[+-]digits]`) after leading whitespace.
///
/// Values outside the `Decimal` range saturate to `Decimal::MAX` / `Decimal::MIN`.
fn leading_decimal(text: &str) -> Option<Decimal> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, after_int) = rest.split_at(int_len);

    let (frac_part, after_frac) = match after_int.strip_prefix('.') {
        Some(frac) => {
            let frac_len = frac.bytes().take_while(u8::is_ascii_digit).count();
            frac.split_at(frac_len)
        }
        None => ("", after_int),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mantissa = parse_mantissa(negative, int_part, frac_part);
    Some(scale_by_exponent(mantissa, parse_exponent(after_frac)))
}

fn parse_mantissa(negative: bool, int_part: &str, frac_part: &str) -> Decimal {
    let mut normalized = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }

    Decimal::from_str(&normalized)
        .ok()
        .or_else(|| normalized.parse::<f64>().ok().and_then(Decimal::from_f64))
        .unwrap_or(if negative { Decimal::MIN } else { Decimal::MAX })
}

/// `e[+-]digits` suffix; a suffix without digits is not part of the number
fn parse_exponent(text: &str) -> i64 {
    let Some(rest) = text.strip_prefix(|c: char| c == 'e' || c == 'E') else {
        return 0;
    };
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return 0;
    }
    let magnitude = rest[..len].parse::<i64>().unwrap_or(i64::MAX);
    if negative { -magnitude } else { magnitude }
}

fn scale_by_exponent(mut value: Decimal, exponent: i64) -> Decimal {
    if value.is_zero() || exponent == 0 {
        return value;
    }

    let steps = exponent.unsigned_abs().min(MAX_EXPONENT_STEPS);
    if exponent > 0 {
        let saturated = if value.is_sign_negative() { Decimal::MIN } else { Decimal::MAX };
        for _ in 0..steps {
            match value.checked_mul(Decimal::TEN) {
                Some(scaled) => value = scaled,
                None => return saturated,
            }
        }
    } else {
        for _ in 0..steps {
            value /= Decimal::TEN;
        }
    }
    value
}
