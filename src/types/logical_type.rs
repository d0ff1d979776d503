//! # Logical Types
//!
//! `LogicalType` is the closed set of value types a page can carry. The set
//! is exhaustive on purpose: the type reader dispatches with a single `match`
//! over this enum, so adding a variant is a compile error everywhere a decode
//! or encode path forgets to handle it.
//!
//! ## Slot Widths
//!
//! | Type | Slot (bytes) | Encoding |
//! |------|--------------|----------|
//! | Boolean | 1 | `0x01` = true, anything else = false |
//! | Byte | 1 | i8 |
//! | Short | 2 | i16 LE |
//! | Int | 4 | i32 LE |
//! | Long | 8 | i64 LE |
//! | Float | 4 | f32 LE |
//! | Double | 8 | f64 LE |
//! | Char(n) | n | NUL-padded bytes |
//! | String | 4 | u32 heap offset |
//! | Timestamp | 12 | i64 seconds + u32 nanos |
//! | Binary | 4 | u32 heap offset |
//!
//! ## Tags
//!
//! Each type has a stable one-byte tag so schema collaborators can serialize
//! column layouts. `Char` additionally needs its width, which travels next to
//! the tag rather than inside it.

use crate::config::{TIMESTAMP_SIZE, VAR_SLOT_SIZE};

/// The decoded value's semantic type, independent of its byte encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Fixed-width character data occupying exactly `width` bytes per row.
    Char {
        width: u16,
    },
    String,
    Timestamp,
    Binary,
}

impl LogicalType {
    pub const BOOLEAN_TAG: u8 = 0;
    pub const BYTE_TAG: u8 = 1;
    pub const SHORT_TAG: u8 = 2;
    pub const INT_TAG: u8 = 3;
    pub const LONG_TAG: u8 = 4;
    pub const FLOAT_TAG: u8 = 5;
    pub const DOUBLE_TAG: u8 = 6;
    pub const CHAR_TAG: u8 = 20;
    pub const STRING_TAG: u8 = 21;
    pub const BINARY_TAG: u8 = 22;
    pub const TIMESTAMP_TAG: u8 = 30;

    /// Returns the number of bytes one row of this type occupies in its
    /// column region.
    pub fn slot_width(&self) -> usize {
        match self {
            LogicalType::Boolean | LogicalType::Byte => 1,
            LogicalType::Short => 2,
            LogicalType::Int | LogicalType::Float => 4,
            LogicalType::Long | LogicalType::Double => 8,
            LogicalType::Char { width } => *width as usize,
            LogicalType::Timestamp => TIMESTAMP_SIZE,
            LogicalType::String | LogicalType::Binary => VAR_SLOT_SIZE,
        }
    }

    /// Returns true if the slot holds a heap reference instead of the value.
    pub fn is_variable(&self) -> bool {
        matches!(self, LogicalType::String | LogicalType::Binary)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            LogicalType::Byte | LogicalType::Short | LogicalType::Int | LogicalType::Long
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, LogicalType::Float | LogicalType::Double)
    }

    pub fn tag(&self) -> u8 {
        match self {
            LogicalType::Boolean => Self::BOOLEAN_TAG,
            LogicalType::Byte => Self::BYTE_TAG,
            LogicalType::Short => Self::SHORT_TAG,
            LogicalType::Int => Self::INT_TAG,
            LogicalType::Long => Self::LONG_TAG,
            LogicalType::Float => Self::FLOAT_TAG,
            LogicalType::Double => Self::DOUBLE_TAG,
            LogicalType::Char { .. } => Self::CHAR_TAG,
            LogicalType::String => Self::STRING_TAG,
            LogicalType::Binary => Self::BINARY_TAG,
            LogicalType::Timestamp => Self::TIMESTAMP_TAG,
        }
    }

    /// Rebuilds a type from its tag. `width` is only read for `Char` and
    /// must be non-zero there.
    pub fn from_tag(tag: u8, width: u16) -> eyre::Result<Self> {
        match tag {
            Self::BOOLEAN_TAG => Ok(LogicalType::Boolean),
            Self::BYTE_TAG => Ok(LogicalType::Byte),
            Self::SHORT_TAG => Ok(LogicalType::Short),
            Self::INT_TAG => Ok(LogicalType::Int),
            Self::LONG_TAG => Ok(LogicalType::Long),
            Self::FLOAT_TAG => Ok(LogicalType::Float),
            Self::DOUBLE_TAG => Ok(LogicalType::Double),
            Self::CHAR_TAG => {
                eyre::ensure!(width > 0, "char type requires a non-zero width");
                Ok(LogicalType::Char { width })
            }
            Self::STRING_TAG => Ok(LogicalType::String),
            Self::BINARY_TAG => Ok(LogicalType::Binary),
            Self::TIMESTAMP_TAG => Ok(LogicalType::Timestamp),
            _ => eyre::bail!("invalid LogicalType tag: {}", tag),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LogicalType::Boolean => "boolean",
            LogicalType::Byte => "byte",
            LogicalType::Short => "short",
            LogicalType::Int => "int",
            LogicalType::Long => "long",
            LogicalType::Float => "float",
            LogicalType::Double => "double",
            LogicalType::Char { .. } => "char",
            LogicalType::String => "string",
            LogicalType::Timestamp => "timestamp",
            LogicalType::Binary => "binary",
        }
    }
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalType::Char { width } => write!(f, "char({})", width),
            other => f.write_str(other.name()),
        }
    }
}
