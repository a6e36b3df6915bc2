// Author: Dustin Pilgrim
// License: MIT

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Value;

static HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-)?0[xX]([0-9a-fA-F]+)[lL]?$").expect("valid regex"));

// sign, mantissa, exponent, suffix
static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?(?:\d+\.?\d*|\.\d+))([eE][+-]?\d+)?([fFdDlL])?$").expect("valid regex")
});

static LEADING_ZERO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?0\d+$").expect("valid regex"));

/// Type a fully decoded value. Numeric-looking text becomes an integer when
/// it has no fractional part, otherwise a float; everything else, and any
/// number that fails to parse, stays a string.
pub fn normalize(text: &str) -> Value {
    parse_number(text).unwrap_or_else(|| Value::String(text.to_string()))
}

/// Whether `text` is a creatable numeric literal: optional `-`, digits with
/// an optional decimal point and exponent, an optional `F`/`D`/`L` suffix
/// (`L` only for integers), or a `0x` hex integer. A leading zero followed
/// by more digits must be a valid octal literal.
pub fn is_numeric(text: &str) -> bool {
    if HEX.is_match(text) {
        return true;
    }
    let Some(caps) = DECIMAL.captures(text) else {
        return false;
    };
    let mantissa = &caps[1];
    let is_integer = !mantissa.contains('.') && caps.get(2).is_none();

    if let Some(suffix) = caps.get(3)
        && matches!(suffix.as_str(), "l" | "L")
        && !is_integer
    {
        return false;
    }

    if is_integer && LEADING_ZERO.is_match(mantissa) {
        return mantissa.trim_start_matches('-').bytes().all(|b| (b'0'..=b'7').contains(&b));
    }
    true
}

fn parse_number(text: &str) -> Option<Value> {
    if !is_numeric(text) {
        return None;
    }

    if let Some(caps) = HEX.captures(text) {
        let magnitude = i64::from_str_radix(&caps[2], 16).ok()?;
        return Some(Value::Integer(if caps.get(1).is_some() { -magnitude } else { magnitude }));
    }

    let caps = DECIMAL.captures(text)?;
    let mantissa = &caps[1];
    let exponent = caps.get(2).map_or("", |m| m.as_str());

    if !mantissa.contains('.') && exponent.is_empty() {
        if let Ok(n) = mantissa.parse::<i64>() {
            return Some(Value::Integer(n));
        }
    }

    let n: f64 = format!("{}{}", mantissa, exponent).parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    Some(collapse_integral(n))
}

/// Whole floats inside the `i64` range are stored as integers. Negative
/// zero has no integer form and stays a float.
fn collapse_integral(n: f64) -> Value {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if n.fract() == 0.0 && n >= -LIMIT && n < LIMIT && !(n == 0.0 && n.is_sign_negative()) {
        Value::Integer(n as i64)
    } else {
        Value::Float(n)
    }
}
