//! Rendering of received AMQP message bodies into the textual form the
//! interop suite compares across client implementations.
//!
//! Integers render as `0x`-prefixed lowercase hex, zero padded to the type's
//! byte width, with signed types going through their two's-complement bit
//! pattern. Floating point and decimal types render their raw IEEE-754 bits.
//! Lists and maps recurse, but only over the narrow set the reference shims
//! handle: nested lists, nested maps and strings.

use fe2o3_amqp::types::messaging::{AmqpValue, Body, Data};
use fe2o3_amqp::types::primitives::{OrderedMap, Value};
use serde_json::Value as JsonValue;

use crate::amqp_type::AmqpType;
use crate::error::Error;

/// The wire type tag of a decoded value, used in mismatch diagnostics.
pub fn wire_type_name(value: &Value) -> &'static str {
    match value {
        Value::Described(_) => "described",
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Ubyte(_) => "ubyte",
        Value::Ushort(_) => "ushort",
        Value::Uint(_) => "uint",
        Value::Ulong(_) => "ulong",
        Value::Byte(_) => "byte",
        Value::Short(_) => "short",
        Value::Int(_) => "int",
        Value::Long(_) => "long",
        Value::Float(_) => "float",
        Value::Double(_) => "double",
        Value::Decimal32(_) => "decimal32",
        Value::Decimal64(_) => "decimal64",
        Value::Decimal128(_) => "decimal128",
        Value::Char(_) => "char",
        Value::Timestamp(_) => "timestamp",
        Value::Uuid(_) => "uuid",
        Value::Binary(_) => "binary",
        Value::String(_) => "string",
        Value::Symbol(_) => "symbol",
        Value::List(_) => "list",
        Value::Map(_) => "map",
        Value::Array(_) => "array",
    }
}

/// Collapse a message body section into a plain [`Value`].
///
/// This mirrors how the proton reference client exposes bodies to its shims:
/// a missing body section reads as null, a data section as binary, and a
/// sequence section as a list.
pub fn body_to_value(body: Body<Value>) -> Value {
    match body {
        Body::Value(AmqpValue(value)) => value,
        Body::Data(batch) => batch
            .into_inner()
            .into_iter()
            .next()
            .map(|Data(bytes)| Value::Binary(bytes))
            .unwrap_or(Value::Null),
        Body::Sequence(batch) => Value::List(
            batch
                .into_inner()
                .into_iter()
                .flat_map(|seq| seq.0)
                .collect(),
        ),
        Body::Empty => Value::Null,
    }
}

/// Render one message body against the declared type.
pub fn render_body(expected: AmqpType, body: Body<Value>) -> Result<JsonValue, Error> {
    render_value(expected, body_to_value(body))
}

/// Render a decoded value against the declared type.
///
/// Fails with [`Error::IncorrectMessageBodyType`] when the wire type differs
/// from the declared one, and with [`Error::UnsupportedAmqpType`] when the
/// declared type is `array`.
pub fn render_value(expected: AmqpType, value: Value) -> Result<JsonValue, Error> {
    let found = wire_type_name(&value);
    let rendered = match (expected, value) {
        (AmqpType::Null, Value::Null) => "None".to_string(),
        (AmqpType::Boolean, Value::Bool(b)) => if b { "True" } else { "False" }.to_string(),
        (AmqpType::UByte, Value::Ubyte(v)) => format!("0x{:02x}", v),
        (AmqpType::UShort, Value::Ushort(v)) => format!("0x{:04x}", v),
        (AmqpType::UInt, Value::Uint(v)) => format!("0x{:08x}", v),
        (AmqpType::ULong, Value::Ulong(v)) => format!("0x{:016x}", v),
        (AmqpType::Byte, Value::Byte(v)) => format!("0x{:02x}", v as u8),
        (AmqpType::Short, Value::Short(v)) => format!("0x{:04x}", v as u16),
        (AmqpType::Int, Value::Int(v)) => format!("0x{:08x}", v as u32),
        (AmqpType::Long, Value::Long(v)) => format!("0x{:016x}", v as u64),
        (AmqpType::Float, Value::Float(v)) => format!("0x{:08x}", v.into_inner().to_bits()),
        (AmqpType::Double, Value::Double(v)) => format!("0x{:016x}", v.into_inner().to_bits()),
        (AmqpType::Decimal32, Value::Decimal32(d)) => hex_of_bytes(&d.into_inner()),
        (AmqpType::Decimal64, Value::Decimal64(d)) => hex_of_bytes(&d.into_inner()),
        (AmqpType::Decimal128, Value::Decimal128(d)) => hex_of_bytes(&d.into_inner()),
        (AmqpType::Char, Value::Char(c)) => {
            // printable ASCII includes space but not DEL
            if c.is_ascii() && !c.is_ascii_control() {
                c.to_string()
            } else {
                format!("{:x}", c as u32)
            }
        }
        (AmqpType::Timestamp, Value::Timestamp(t)) => {
            format!("0x{:x}", t.milliseconds() as u64)
        }
        (AmqpType::Uuid, Value::Uuid(u)) => uuid::Uuid::from_bytes(u.into_inner()).to_string(),
        (AmqpType::Binary, Value::Binary(b)) => String::from_utf8_lossy(&b).into_owned(),
        (AmqpType::String, Value::String(s)) => s,
        (AmqpType::Symbol, Value::Symbol(s)) => s.into_inner(),
        (AmqpType::List, Value::List(items)) => {
            return Ok(JsonValue::Array(render_sequence(items)?))
        }
        (AmqpType::Map, Value::Map(map)) => return Ok(JsonValue::Object(render_map(map)?)),
        (AmqpType::Array, _) => return Err(Error::UnsupportedAmqpType("array")),
        (expected, _) => {
            return Err(Error::IncorrectMessageBodyType {
                expected: expected.as_str(),
                found,
            })
        }
    };
    Ok(JsonValue::String(rendered))
}

// Nested rendering is deliberately narrower than the top-level dispatch: the
// reference shims only pass lists, maps and strings through, silently skip
// arrays, and reject everything else.
fn render_sequence(items: Vec<Value>) -> Result<Vec<JsonValue>, Error> {
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::List(nested) => rendered.push(JsonValue::Array(render_sequence(nested)?)),
            Value::Map(nested) => rendered.push(JsonValue::Object(render_map(nested)?)),
            Value::String(s) => rendered.push(JsonValue::String(s)),
            Value::Array(_) => {}
            other => return Err(Error::IncorrectValueType(wire_type_name(&other))),
        }
    }
    Ok(rendered)
}

fn render_map(
    map: OrderedMap<Value, Value>,
) -> Result<serde_json::Map<String, JsonValue>, Error> {
    let mut rendered = serde_json::Map::new();
    for (key, value) in map {
        let key = match key {
            Value::String(s) => s,
            other => return Err(Error::IncorrectValueType(wire_type_name(&other))),
        };
        match value {
            Value::List(nested) => {
                rendered.insert(key, JsonValue::Array(render_sequence(nested)?));
            }
            Value::Map(nested) => {
                rendered.insert(key, JsonValue::Object(render_map(nested)?));
            }
            Value::String(s) => {
                rendered.insert(key, JsonValue::String(s));
            }
            Value::Array(_) => {}
            other => return Err(Error::IncorrectValueType(wire_type_name(&other))),
        }
    }
    Ok(rendered)
}

fn hex_of_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for byte in bytes {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

#[cfg(test)]
mod tests {
    use fe2o3_amqp::types::messaging::AmqpSequence;
    use fe2o3_amqp::types::primitives::{Binary, Dec128, Dec32, Dec64, Symbol, Timestamp, Uuid};
    use serde_json::json;

    use super::*;

    fn rendered(expected: AmqpType, value: Value) -> JsonValue {
        render_value(expected, value).unwrap()
    }

    #[test]
    fn null_renders_as_none_token() {
        assert_eq!(rendered(AmqpType::Null, Value::Null), json!("None"));
    }

    #[test]
    fn boolean_renders_as_literal_tokens() {
        assert_eq!(rendered(AmqpType::Boolean, Value::Bool(true)), json!("True"));
        assert_eq!(
            rendered(AmqpType::Boolean, Value::Bool(false)),
            json!("False")
        );
    }

    #[test]
    fn unsigned_integers_render_zero_padded_hex() {
        assert_eq!(rendered(AmqpType::UByte, Value::Ubyte(0)), json!("0x00"));
        assert_eq!(rendered(AmqpType::UByte, Value::Ubyte(0xff)), json!("0xff"));
        assert_eq!(
            rendered(AmqpType::UShort, Value::Ushort(0x7fff)),
            json!("0x7fff")
        );
        assert_eq!(rendered(AmqpType::UInt, Value::Uint(255)), json!("0x000000ff"));
        assert_eq!(
            rendered(AmqpType::ULong, Value::Ulong(u64::MAX)),
            json!("0xffffffffffffffff")
        );
    }

    #[test]
    fn signed_integers_render_via_bit_pattern() {
        assert_eq!(rendered(AmqpType::Byte, Value::Byte(-0x80)), json!("0x80"));
        assert_eq!(rendered(AmqpType::Short, Value::Short(-1)), json!("0xffff"));
        assert_eq!(rendered(AmqpType::Int, Value::Int(1)), json!("0x00000001"));
        assert_eq!(rendered(AmqpType::Int, Value::Int(-1)), json!("0xffffffff"));
        assert_eq!(
            rendered(AmqpType::Int, Value::Int(i32::MAX)),
            json!("0x7fffffff")
        );
        assert_eq!(
            rendered(AmqpType::Long, Value::Long(i64::MIN)),
            json!("0x8000000000000000")
        );
    }

    #[test]
    fn floats_render_their_ieee_bits() {
        let pi = f32::from_bits(0x40490fdb);
        assert_eq!(
            rendered(AmqpType::Float, Value::Float(pi.into())),
            json!("0x40490fdb")
        );
        let neg_e = f64::from_bits(0xc005bf0a8b145fcf);
        assert_eq!(
            rendered(AmqpType::Double, Value::Double(neg_e.into())),
            json!("0xc005bf0a8b145fcf")
        );
    }

    #[test]
    fn decimals_render_their_raw_bytes() {
        assert_eq!(
            rendered(
                AmqpType::Decimal32,
                Value::Decimal32(Dec32::from([0x40, 0x49, 0x0f, 0xdb]))
            ),
            json!("0x40490fdb")
        );
        assert_eq!(
            rendered(
                AmqpType::Decimal64,
                Value::Decimal64(Dec64::from([0x40, 0x09, 0x21, 0xfb, 0x54, 0x44, 0x2e, 0xea]))
            ),
            json!("0x400921fb54442eea")
        );
        let bytes = [
            0xff, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        assert_eq!(
            rendered(AmqpType::Decimal128, Value::Decimal128(Dec128::from(bytes))),
            json!("0xff0102030405060708090a0b0c0d0e0f")
        );
    }

    #[test]
    fn char_renders_literal_or_code_point() {
        assert_eq!(rendered(AmqpType::Char, Value::Char('a')), json!("a"));
        assert_eq!(rendered(AmqpType::Char, Value::Char('~')), json!("~"));
        assert_eq!(rendered(AmqpType::Char, Value::Char(' ')), json!(" "));
        // control chars fall back to the code point: '\n' is 0xa
        assert_eq!(rendered(AmqpType::Char, Value::Char('\n')), json!("a"));
        assert_eq!(
            rendered(AmqpType::Char, Value::Char('\u{7f}')),
            json!("7f")
        );
        assert_eq!(
            rendered(AmqpType::Char, Value::Char('\u{16b9}')),
            json!("16b9")
        );
    }

    #[test]
    fn timestamp_renders_unpadded_hex_milliseconds() {
        assert_eq!(
            rendered(
                AmqpType::Timestamp,
                Value::Timestamp(Timestamp::from_milliseconds(0x12345))
            ),
            json!("0x12345")
        );
    }

    #[test]
    fn uuid_renders_canonical_form() {
        let bytes = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        assert_eq!(
            rendered(AmqpType::Uuid, Value::Uuid(Uuid::from(bytes))),
            json!("00010203-0405-0607-0809-0a0b0c0d0e0f")
        );
    }

    #[test]
    fn text_types_pass_through() {
        assert_eq!(
            rendered(
                AmqpType::Binary,
                Value::Binary(Binary::from("hello".as_bytes().to_vec()))
            ),
            json!("hello")
        );
        assert_eq!(
            rendered(AmqpType::String, Value::String("hello".to_string())),
            json!("hello")
        );
        assert_eq!(
            rendered(AmqpType::Symbol, Value::Symbol(Symbol::from("hello"))),
            json!("hello")
        );
    }

    #[test]
    fn list_recurses_over_lists_maps_and_strings() {
        let mut map = OrderedMap::new();
        map.insert(
            Value::String("key".to_string()),
            Value::String("value".to_string()),
        );
        let list = Value::List(vec![
            Value::String("a".to_string()),
            Value::List(vec![Value::String("b".to_string())]),
            Value::Map(map),
        ]);
        assert_eq!(
            rendered(AmqpType::List, list),
            json!(["a", ["b"], { "key": "value" }])
        );
    }

    #[test]
    fn nested_scalar_in_list_is_rejected() {
        let list = Value::List(vec![Value::Int(1)]);
        let result = render_value(AmqpType::List, list);
        assert!(matches!(result, Err(Error::IncorrectValueType("int"))));
    }

    #[test]
    fn non_string_map_key_is_rejected() {
        let mut map = OrderedMap::new();
        map.insert(Value::Int(1), Value::String("one".to_string()));
        let result = render_value(AmqpType::Map, Value::Map(map));
        assert!(matches!(result, Err(Error::IncorrectValueType("int"))));
    }

    #[test]
    fn wire_type_mismatch_is_rejected() {
        let result = render_value(AmqpType::Int, Value::String("1".to_string()));
        match result {
            Err(Error::IncorrectMessageBodyType { expected, found }) => {
                assert_eq!(expected, "int");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn declared_array_is_unsupported() {
        let result = render_value(AmqpType::Array, Value::Null);
        assert!(matches!(result, Err(Error::UnsupportedAmqpType("array"))));
    }

    #[test]
    fn empty_body_counts_as_null() {
        assert_eq!(
            render_body(AmqpType::Null, Body::Empty).unwrap(),
            json!("None")
        );
    }

    #[test]
    fn data_section_counts_as_binary() {
        let body = Body::Data(vec![Data(Binary::from("abc".as_bytes().to_vec()))].into());
        assert_eq!(render_body(AmqpType::Binary, body).unwrap(), json!("abc"));
    }

    #[test]
    fn sequence_section_counts_as_list() {
        let body = Body::Sequence(
            vec![AmqpSequence(vec![Value::String("a".to_string())])].into(),
        );
        assert_eq!(render_body(AmqpType::List, body).unwrap(), json!(["a"]));
    }
}
