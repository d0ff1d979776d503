//! # Decoded Values
//!
//! `Value<'a>` is the materialized form of one decoded field, used by sinks
//! that collect rows instead of streaming them. Byte payloads use `Cow` so a
//! collector can borrow straight from the page buffer and only copy when the
//! caller asks for `into_owned`.
//!
//! ## Value Variants
//!
//! | Variant | Rust Type | Logical type |
//! |---------|-----------|--------------|
//! | Null | - | any |
//! | Boolean | bool | Boolean |
//! | Byte | i8 | Byte |
//! | Short | i16 | Short |
//! | Int | i32 | Int |
//! | Long | i64 | Long |
//! | Float | f32 | Float |
//! | Double | f64 | Double |
//! | Char | Cow<[u8]> | Char(n) |
//! | String | Cow<[u8]> | String |
//! | Timestamp | Timestamp | Timestamp |
//! | Binary | Cow<[u8]> | Binary |
//!
//! Text payloads stay as bytes: the page does not guarantee UTF-8, and
//! `as_str` is the place where validity is checked.
//!
//! There is no conversion between variants. A `Value::Int` is
//! never read back as a `Long`.

use std::borrow::Cow;

use crate::types::{LogicalType, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(Cow<'a, [u8]>),
    String(Cow<'a, [u8]>),
    Timestamp(Timestamp),
    Binary(Cow<'a, [u8]>),
}

impl<'a> Value<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn string(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s.as_bytes()))
    }

    pub fn char(s: &'a str) -> Self {
        Value::Char(Cow::Borrowed(s.as_bytes()))
    }

    pub fn binary(bytes: &'a [u8]) -> Self {
        Value::Binary(Cow::Borrowed(bytes))
    }

    /// Returns true if this value can be stored in a column of `ty`.
    /// `Null` fits every type.
    pub fn fits(&self, ty: LogicalType) -> bool {
        matches!(
            (self, ty),
            (Value::Null, _)
                | (Value::Boolean(_), LogicalType::Boolean)
                | (Value::Byte(_), LogicalType::Byte)
                | (Value::Short(_), LogicalType::Short)
                | (Value::Int(_), LogicalType::Int)
                | (Value::Long(_), LogicalType::Long)
                | (Value::Float(_), LogicalType::Float)
                | (Value::Double(_), LogicalType::Double)
                | (Value::Char(_), LogicalType::Char { .. })
                | (Value::String(_), LogicalType::String)
                | (Value::Timestamp(_), LogicalType::Timestamp)
                | (Value::Binary(_), LogicalType::Binary)
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Binary(_) => "binary",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Char(b) | Value::String(b) | Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the text of a `String` or `Char` value if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Char(b) | Value::String(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Detaches the value from the page buffer it was decoded from.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(v) => Value::Boolean(v),
            Value::Byte(v) => Value::Byte(v),
            Value::Short(v) => Value::Short(v),
            Value::Int(v) => Value::Int(v),
            Value::Long(v) => Value::Long(v),
            Value::Float(v) => Value::Float(v),
            Value::Double(v) => Value::Double(v),
            Value::Char(b) => Value::Char(Cow::Owned(b.into_owned())),
            Value::String(b) => Value::String(Cow::Owned(b.into_owned())),
            Value::Timestamp(ts) => Value::Timestamp(ts),
            Value::Binary(b) => Value::Binary(Cow::Owned(b.into_owned())),
        }
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(
            self,
            Value::Char(Cow::Borrowed(_))
                | Value::String(Cow::Borrowed(_))
                | Value::Binary(Cow::Borrowed(_))
        )
    }
}
