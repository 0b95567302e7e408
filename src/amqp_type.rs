//! The closed vocabulary of AMQP 1.0 types the interop suite tests.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Tag for the single AMQP type a test run is configured to carry.
///
/// `Array` is part of the vocabulary so that the suite can select it, but
/// both shims reject it with [`Error::UnsupportedAmqpType`] before opening a
/// connection. Any tag outside this set fails with
/// [`Error::UnknownAmqpType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmqpType {
    Null,
    Boolean,
    UByte,
    UShort,
    UInt,
    ULong,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal32,
    Decimal64,
    Decimal128,
    Char,
    Timestamp,
    Uuid,
    Binary,
    String,
    Symbol,
    List,
    Map,
    Array,
}

impl AmqpType {
    /// The tag as it appears on the command line and in the suite's output.
    pub fn as_str(&self) -> &'static str {
        match self {
            AmqpType::Null => "null",
            AmqpType::Boolean => "boolean",
            AmqpType::UByte => "ubyte",
            AmqpType::UShort => "ushort",
            AmqpType::UInt => "uint",
            AmqpType::ULong => "ulong",
            AmqpType::Byte => "byte",
            AmqpType::Short => "short",
            AmqpType::Int => "int",
            AmqpType::Long => "long",
            AmqpType::Float => "float",
            AmqpType::Double => "double",
            AmqpType::Decimal32 => "decimal32",
            AmqpType::Decimal64 => "decimal64",
            AmqpType::Decimal128 => "decimal128",
            AmqpType::Char => "char",
            AmqpType::Timestamp => "timestamp",
            AmqpType::Uuid => "uuid",
            AmqpType::Binary => "binary",
            AmqpType::String => "string",
            AmqpType::Symbol => "symbol",
            AmqpType::List => "list",
            AmqpType::Map => "map",
            AmqpType::Array => "array",
        }
    }
}

impl fmt::Display for AmqpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmqpType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(AmqpType::Null),
            "boolean" => Ok(AmqpType::Boolean),
            "ubyte" => Ok(AmqpType::UByte),
            "ushort" => Ok(AmqpType::UShort),
            "uint" => Ok(AmqpType::UInt),
            "ulong" => Ok(AmqpType::ULong),
            "byte" => Ok(AmqpType::Byte),
            "short" => Ok(AmqpType::Short),
            "int" => Ok(AmqpType::Int),
            "long" => Ok(AmqpType::Long),
            "float" => Ok(AmqpType::Float),
            "double" => Ok(AmqpType::Double),
            "decimal32" => Ok(AmqpType::Decimal32),
            "decimal64" => Ok(AmqpType::Decimal64),
            "decimal128" => Ok(AmqpType::Decimal128),
            "char" => Ok(AmqpType::Char),
            "timestamp" => Ok(AmqpType::Timestamp),
            "uuid" => Ok(AmqpType::Uuid),
            "binary" => Ok(AmqpType::Binary),
            "string" => Ok(AmqpType::String),
            "symbol" => Ok(AmqpType::Symbol),
            "list" => Ok(AmqpType::List),
            "map" => Ok(AmqpType::Map),
            "array" => Ok(AmqpType::Array),
            _ => Err(Error::UnknownAmqpType(s.to_string())),
        }
    }
}
