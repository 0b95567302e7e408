//! Conversion of the interop suite's JSON test values into AMQP message
//! bodies of the declared type.
//!
//! The suite hands every scalar test value over as a string: integers as
//! `0x`-prefixed hex with an optional leading `-`, floats and decimals as the
//! hex of their full-width bit pattern, and so on. Lists and maps arrive as
//! JSON structures and convert recursively.

use fe2o3_amqp::types::primitives::{
    Binary, Dec128, Dec32, Dec64, OrderedMap, Symbol, Timestamp, Uuid, Value,
};
use serde_json::Value as JsonValue;

use crate::amqp_type::AmqpType;
use crate::error::Error;

/// Encode one JSON test value as an AMQP value of the declared type.
pub fn encode_test_value(amqp_type: AmqpType, test_value: &JsonValue) -> Result<Value, Error> {
    match amqp_type {
        AmqpType::Null => {
            let s = expect_str(amqp_type, test_value)?;
            if s != "None" {
                return Err(invalid(amqp_type, test_value));
            }
            Ok(Value::Null)
        }
        AmqpType::Boolean => match expect_str(amqp_type, test_value)? {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            _ => Err(invalid(amqp_type, test_value)),
        },
        AmqpType::UByte => {
            parse_unsigned(amqp_type, test_value, u8::MAX as u64).map(|v| Value::Ubyte(v as u8))
        }
        AmqpType::UShort => parse_unsigned(amqp_type, test_value, u16::MAX as u64)
            .map(|v| Value::Ushort(v as u16)),
        AmqpType::UInt => {
            parse_unsigned(amqp_type, test_value, u32::MAX as u64).map(|v| Value::Uint(v as u32))
        }
        AmqpType::ULong => parse_unsigned(amqp_type, test_value, u64::MAX).map(Value::Ulong),
        AmqpType::Byte => parse_signed(amqp_type, test_value, i8::MIN as i64, i8::MAX as i64)
            .map(|v| Value::Byte(v as i8)),
        AmqpType::Short => parse_signed(amqp_type, test_value, i16::MIN as i64, i16::MAX as i64)
            .map(|v| Value::Short(v as i16)),
        AmqpType::Int => parse_signed(amqp_type, test_value, i32::MIN as i64, i32::MAX as i64)
            .map(|v| Value::Int(v as i32)),
        AmqpType::Long => {
            parse_signed(amqp_type, test_value, i64::MIN, i64::MAX).map(Value::Long)
        }
        AmqpType::Float => parse_unsigned(amqp_type, test_value, u32::MAX as u64)
            .map(|bits| Value::Float(f32::from_bits(bits as u32).into())),
        AmqpType::Double => parse_unsigned(amqp_type, test_value, u64::MAX)
            .map(|bits| Value::Double(f64::from_bits(bits).into())),
        AmqpType::Decimal32 => parse_unsigned(amqp_type, test_value, u32::MAX as u64)
            .map(|bits| Value::Decimal32(Dec32::from((bits as u32).to_be_bytes()))),
        AmqpType::Decimal64 => parse_unsigned(amqp_type, test_value, u64::MAX)
            .map(|bits| Value::Decimal64(Dec64::from(bits.to_be_bytes()))),
        AmqpType::Decimal128 => {
            let s = expect_str(amqp_type, test_value)?;
            let bytes = parse_hex_bytes::<16>(s).ok_or_else(|| invalid(amqp_type, test_value))?;
            Ok(Value::Decimal128(Dec128::from(bytes)))
        }
        AmqpType::Char => {
            let s = expect_str(amqp_type, test_value)?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => {
                    let code = s
                        .strip_prefix("0x")
                        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                        .ok_or_else(|| invalid(amqp_type, test_value))?;
                    char::from_u32(code)
                        .map(Value::Char)
                        .ok_or_else(|| invalid(amqp_type, test_value))
                }
            }
        }
        AmqpType::Timestamp => parse_unsigned(amqp_type, test_value, u64::MAX)
            .map(|ms| Value::Timestamp(Timestamp::from_milliseconds(ms as i64))),
        AmqpType::Uuid => {
            let s = expect_str(amqp_type, test_value)?;
            // canonical hyphenated form only
            if s.len() != 36 {
                return Err(invalid(amqp_type, test_value));
            }
            let parsed =
                uuid::Uuid::parse_str(s).map_err(|_| invalid(amqp_type, test_value))?;
            Ok(Value::Uuid(Uuid::from(parsed.into_bytes())))
        }
        AmqpType::Binary => {
            let s = expect_str(amqp_type, test_value)?;
            Ok(Value::Binary(Binary::from(s.as_bytes().to_vec())))
        }
        AmqpType::String => {
            let s = expect_str(amqp_type, test_value)?;
            Ok(Value::String(s.to_string()))
        }
        AmqpType::Symbol => {
            let s = expect_str(amqp_type, test_value)?;
            Ok(Value::Symbol(Symbol::from(s)))
        }
        AmqpType::List => match test_value {
            JsonValue::Array(items) => json_list_to_value(items),
            _ => Err(invalid(amqp_type, test_value)),
        },
        AmqpType::Map => match test_value {
            JsonValue::Object(entries) => json_map_to_value(entries),
            _ => Err(invalid(amqp_type, test_value)),
        },
        AmqpType::Array => Err(Error::UnsupportedAmqpType("array")),
    }
}

fn invalid(amqp_type: AmqpType, test_value: &JsonValue) -> Error {
    Error::InvalidTestValue {
        amqp_type: amqp_type.as_str(),
        value: test_value.to_string(),
    }
}

fn expect_str<'a>(amqp_type: AmqpType, test_value: &'a JsonValue) -> Result<&'a str, Error> {
    test_value.as_str().ok_or_else(|| invalid(amqp_type, test_value))
}

/// Parse a `"0x.."` hex string with a bound on the magnitude.
fn parse_unsigned(amqp_type: AmqpType, test_value: &JsonValue, max: u64) -> Result<u64, Error> {
    let s = expect_str(amqp_type, test_value)?;
    s.strip_prefix("0x")
        .and_then(|hex| u64::from_str_radix(hex, 16).ok())
        .filter(|v| *v <= max)
        .ok_or_else(|| invalid(amqp_type, test_value))
}

/// Parse a `"-0x.."`/`"0x.."` hex string into a signed value within range.
fn parse_signed(
    amqp_type: AmqpType,
    test_value: &JsonValue,
    min: i64,
    max: i64,
) -> Result<i64, Error> {
    let s = expect_str(amqp_type, test_value)?;
    let (negative, magnitude) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let magnitude = magnitude
        .strip_prefix("0x")
        .and_then(|hex| u64::from_str_radix(hex, 16).ok())
        .ok_or_else(|| invalid(amqp_type, test_value))?;
    let value = if negative {
        -(magnitude as i128)
    } else {
        magnitude as i128
    };
    if value < min as i128 || value > max as i128 {
        return Err(invalid(amqp_type, test_value));
    }
    Ok(value as i64)
}

/// Parse `"0x"` followed by exactly `2 * N` hex digits.
fn parse_hex_bytes<const N: usize>(s: &str) -> Option<[u8; N]> {
    let hex = s.strip_prefix("0x")?;
    if hex.len() != N * 2 {
        return None;
    }
    let mut bytes = [0u8; N];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(bytes)
}

// JSON structures nested inside list and map test values convert on their
// natural JSON type, matching the reference sender.
fn json_to_value(json: &JsonValue) -> Result<Value, Error> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                if let Ok(v) = i32::try_from(i) {
                    Ok(Value::Int(v))
                } else {
                    Ok(Value::Long(i))
                }
            } else if let Some(u) = n.as_u64() {
                if let Ok(v) = u32::try_from(u) {
                    Ok(Value::Uint(v))
                } else {
                    Ok(Value::Ulong(u))
                }
            } else {
                // n is finite by construction
                Ok(Value::Double(n.as_f64().unwrap_or_default().into()))
            }
        }
        JsonValue::String(s) => Ok(Value::String(s.clone())),
        JsonValue::Array(items) => json_list_to_value(items),
        JsonValue::Object(entries) => json_map_to_value(entries),
    }
}

fn json_list_to_value(items: &[JsonValue]) -> Result<Value, Error> {
    let list = items
        .iter()
        .map(json_to_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::List(list))
}

fn json_map_to_value(entries: &serde_json::Map<String, JsonValue>) -> Result<Value, Error> {
    let mut map = OrderedMap::new();
    for (key, value) in entries {
        map.insert(Value::String(key.clone()), json_to_value(value)?);
    }
    Ok(Value::Map(map))
}
