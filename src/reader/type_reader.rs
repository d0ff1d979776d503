//! # TypeReader - Per-Type Decode Dispatch
//!
//! `TypeReader` decodes one cell (the bound column at the reader's current
//! row) and hands the result to a `RecordReader`. It is the only place where
//! the null contract, the slot layout and the logical type meet.
//!
//! ## Decode Protocol
//!
//! 1. Ask the `PageReader` whether the cell is null. If so, call
//!    `read_null(column)` and stop.
//! 2. Otherwise compute the slot offset, decode the slot with the function
//!    for the column's logical type, and call the matching typed method.
//!
//! Exactly one visitor method is invoked per successful `decode`. Slot bytes
//! are never touched for a null cell.
//!
//! ## Decoding Policy
//!
//! | Type | Rule |
//! |------|------|
//! | Boolean | `0x01` is true, every other byte is false |
//! | Integers, floats | little-endian reinterpretation of the slot |
//! | Char(n) | the n slot bytes with trailing `0x00` removed |
//! | String, Binary | heap entry referenced by the slot, not validated |
//! | Timestamp | i64 seconds + u32 nanos, surfaced unnormalized |
//!
//! The dispatch is a single `match` over `LogicalType`, so every type must
//! have a decode arm.

use eyre::Result;

use crate::config::{BOOLEAN_TRUE, CHAR_PAD_BYTE, TIMESTAMP_SIZE};
use crate::page::Page;
use crate::reader::{PageReader, RecordReader};
use crate::types::{Column, LogicalType, Timestamp};

#[derive(Debug, Clone, Copy)]
pub struct TypeReader<'r, 'a> {
    reader: &'r PageReader<'a>,
    column: &'r Column,
}

impl<'r, 'a> TypeReader<'r, 'a> {
    pub fn new(reader: &'r PageReader<'a>, column: &'r Column) -> Self {
        Self { reader, column }
    }

    pub fn column(&self) -> &'r Column {
        self.column
    }

    pub fn decode<V>(&self, visitor: &mut V) -> Result<()>
    where
        V: RecordReader<'a> + ?Sized,
    {
        let column = self.column;
        let index = column.index();

        if self.reader.is_null(index)? {
            return visitor.read_null(column);
        }

        let page = self.reader.page();
        let offset = self.reader.offset(index)?;

        match column.logical_type() {
            LogicalType::Boolean => visitor.read_boolean(column, decode_boolean(page, offset)?),
            LogicalType::Byte => visitor.read_byte(column, decode_byte(page, offset)?),
            LogicalType::Short => visitor.read_short(column, decode_short(page, offset)?),
            LogicalType::Int => visitor.read_int(column, decode_int(page, offset)?),
            LogicalType::Long => visitor.read_long(column, decode_long(page, offset)?),
            LogicalType::Float => visitor.read_float(column, decode_float(page, offset)?),
            LogicalType::Double => visitor.read_double(column, decode_double(page, offset)?),
            LogicalType::Char { width } => {
                visitor.read_char(column, decode_char(page, offset, width as usize)?)
            }
            LogicalType::String => visitor.read_string(column, decode_string(page, offset)?),
            LogicalType::Timestamp => {
                visitor.read_timestamp(column, decode_timestamp(page, offset)?)
            }
            LogicalType::Binary => visitor.read_binary(column, decode_binary(page, offset)?),
        }
    }
}

pub fn decode_boolean(page: &Page<'_>, offset: usize) -> Result<bool> {
    Ok(page.get_byte(offset)? == BOOLEAN_TRUE)
}

pub fn decode_byte(page: &Page<'_>, offset: usize) -> Result<i8> {
    page.get_i8(offset)
}

pub fn decode_short(page: &Page<'_>, offset: usize) -> Result<i16> {
    page.get_i16(offset)
}

pub fn decode_int(page: &Page<'_>, offset: usize) -> Result<i32> {
    page.get_i32(offset)
}

pub fn decode_long(page: &Page<'_>, offset: usize) -> Result<i64> {
    page.get_i64(offset)
}

pub fn decode_float(page: &Page<'_>, offset: usize) -> Result<f32> {
    page.get_f32(offset)
}

pub fn decode_double(page: &Page<'_>, offset: usize) -> Result<f64> {
    page.get_f64(offset)
}

pub fn decode_char<'a>(page: &Page<'a>, offset: usize, width: usize) -> Result<&'a [u8]> {
    let slot = page.get_bytes(offset, width)?;
    let len = slot
        .iter()
        .rposition(|&b| b != CHAR_PAD_BYTE)
        .map_or(0, |last| last + 1);
    Ok(&slot[..len])
}

pub fn decode_string<'a>(page: &Page<'a>, offset: usize) -> Result<&'a [u8]> {
    page.get_length_prefixed(offset)
}

pub fn decode_binary<'a>(page: &Page<'a>, offset: usize) -> Result<&'a [u8]> {
    page.get_length_prefixed(offset)
}

pub fn decode_timestamp(page: &Page<'_>, offset: usize) -> Result<Timestamp> {
    let bytes: [u8; TIMESTAMP_SIZE] = page.get_array(offset)?;
    Ok(Timestamp::from_le_bytes(bytes))
}
