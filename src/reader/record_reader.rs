//! # RecordReader - Decoded Value Visitor
//!
//! `RecordReader` is the only channel through which decoded values leave the
//! decoder. It has one method per logical type plus `read_null`, and every
//! `TypeReader::decode` call invokes exactly one of them.
//!
//! Byte payloads are passed as slices borrowed from the page buffer (`'a`),
//! so a sink can keep them for as long as the page lives without copying.
//! String and char payloads are not UTF-8 validated.
//!
//! ## Row Hooks
//!
//! `begin_row` and `end_row` bracket each row when a `PageDecoder` drives the
//! pass. `TypeReader::decode` never calls them. Both default to no-ops.
//!
//! ## Errors
//!
//! Every method returns `Result` so that a sink which forwards or buffers
//! values can fail. An error aborts the current decode pass.

use eyre::Result;

use crate::types::{Column, Timestamp};

pub trait RecordReader<'a> {
    fn read_null(&mut self, column: &Column) -> Result<()>;

    fn read_boolean(&mut self, column: &Column, value: bool) -> Result<()>;

    fn read_byte(&mut self, column: &Column, value: i8) -> Result<()>;

    fn read_short(&mut self, column: &Column, value: i16) -> Result<()>;

    fn read_int(&mut self, column: &Column, value: i32) -> Result<()>;

    fn read_long(&mut self, column: &Column, value: i64) -> Result<()>;

    fn read_float(&mut self, column: &Column, value: f32) -> Result<()>;

    fn read_double(&mut self, column: &Column, value: f64) -> Result<()>;

    /// Fixed-width character value with its NUL padding removed.
    fn read_char(&mut self, column: &Column, value: &'a [u8]) -> Result<()>;

    fn read_string(&mut self, column: &Column, value: &'a [u8]) -> Result<()>;

    fn read_timestamp(&mut self, column: &Column, value: Timestamp) -> Result<()>;

    fn read_binary(&mut self, column: &Column, value: &'a [u8]) -> Result<()>;

    fn begin_row(&mut self, _row: usize) -> Result<()> {
        Ok(())
    }

    fn end_row(&mut self, _row: usize) -> Result<()> {
        Ok(())
    }
}

impl<'a, R: RecordReader<'a> + ?Sized> RecordReader<'a> for &mut R {
    fn read_null(&mut self, column: &Column) -> Result<()> {
        (**self).read_null(column)
    }

    fn read_boolean(&mut self, column: &Column, value: bool) -> Result<()> {
        (**self).read_boolean(column, value)
    }

    fn read_byte(&mut self, column: &Column, value: i8) -> Result<()> {
        (**self).read_byte(column, value)
    }

    fn read_short(&mut self, column: &Column, value: i16) -> Result<()> {
        (**self).read_short(column, value)
    }

    fn read_int(&mut self, column: &Column, value: i32) -> Result<()> {
        (**self).read_int(column, value)
    }

    fn read_long(&mut self, column: &Column, value: i64) -> Result<()> {
        (**self).read_long(column, value)
    }

    fn read_float(&mut self, column: &Column, value: f32) -> Result<()> {
        (**self).read_float(column, value)
    }

    fn read_double(&mut self, column: &Column, value: f64) -> Result<()> {
        (**self).read_double(column, value)
    }

    fn read_char(&mut self, column: &Column, value: &'a [u8]) -> Result<()> {
        (**self).read_char(column, value)
    }

    fn read_string(&mut self, column: &Column, value: &'a [u8]) -> Result<()> {
        (**self).read_string(column, value)
    }

    fn read_timestamp(&mut self, column: &Column, value: Timestamp) -> Result<()> {
        (**self).read_timestamp(column, value)
    }

    fn read_binary(&mut self, column: &Column, value: &'a [u8]) -> Result<()> {
        (**self).read_binary(column, value)
    }

    fn begin_row(&mut self, row: usize) -> Result<()> {
        (**self).begin_row(row)
    }

    fn end_row(&mut self, row: usize) -> Result<()> {
        (**self).end_row(row)
    }
}
