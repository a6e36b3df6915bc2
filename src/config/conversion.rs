// Author: Dustin Pilgrim
// License: MIT

//! Typed retrieval. Every (stored kind, target type) pair is defined here:
//!
//! - any value converts to `String` via its canonical text
//! - numbers convert to other numeric types with `as`-cast narrowing, so
//!   out-of-range integers wrap instead of failing
//! - strings convert to numbers only when the text is itself numeric
//! - `bool` is `true` exactly when the text is `true`, ignoring case
//! - `char` is the first character of the text

use crate::ast::Value;
use crate::parser::number;
use crate::IniError;

enum Number {
    Integer(i64),
    Float(f64),
}

/// Reduce a value to a number, re-typing numeric strings.
fn numeric(value: Value, target: &str) -> Result<Number, IniError> {
    let value = match value {
        Value::String(s) => number::normalize(&s),
        n => n,
    };
    match value {
        Value::Integer(n) => Ok(Number::Integer(n)),
        Value::Float(n) => Ok(Number::Float(n)),
        Value::String(s) => Err(IniError::TypeError {
            message: format!("Expected {}, got string {:?}", target, s),
            hint: Some("Use a numeric value in your config".into()),
            code: Some(402),
        }),
    }
}

impl TryFrom<Value> for String {
    type Error = IniError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Ok(other.to_string()),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = IniError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match numeric(value, "i64")? {
            Number::Integer(n) => Ok(n),
            Number::Float(n) => Ok(n as i64),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = IniError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match numeric(value, "f64")? {
            Number::Integer(n) => Ok(n as f64),
            Number::Float(n) => Ok(n),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = IniError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|n| n as f32)
    }
}

// Floats narrow through the 32-bit integer for small signed targets and
// through i64 for unsigned ones, then truncate like the integer path.
macro_rules! narrowing {
    ($($target:ty => $via:ty),* $(,)?) => {
        $(
            impl TryFrom<Value> for $target {
                type Error = IniError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match numeric(value, stringify!($target))? {
                        Number::Integer(n) => Ok(n as $target),
                        Number::Float(n) => Ok((n as $via) as $target),
                    }
                }
            }
        )*
    };
}

narrowing! {
    i32 => i32,
    i16 => i32,
    i8 => i32,
    u64 => i64,
    u32 => i64,
    u16 => i64,
    u8 => i64,
}

impl TryFrom<Value> for bool {
    type Error = IniError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(value.to_string().eq_ignore_ascii_case("true"))
    }
}

impl TryFrom<Value> for char {
    type Error = IniError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.to_string().chars().next().ok_or_else(|| IniError::TypeError {
            message: "Expected char, got an empty string".into(),
            hint: Some("Use a non-empty value in your config".into()),
            code: Some(405),
        })
    }
}
