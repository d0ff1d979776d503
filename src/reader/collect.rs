//! # ValueCollector - Materializing Sink
//!
//! A `RecordReader` that gathers decoded fields into rows of `Value`s. Byte
//! payloads are borrowed from the page, so collecting a page costs one
//! `SmallVec` per row and no payload copies.
//!
//! Values are appended in the order the visitor receives them. When a
//! `PageDecoder` drives the pass, each `begin_row` starts a new row; values
//! decoded outside of a row bracket are appended to the last row (one is
//! opened if none exists).

use std::borrow::Cow;

use eyre::Result;
use smallvec::{smallvec, SmallVec};

use crate::config::ROW_INLINE_CAPACITY;
use crate::reader::RecordReader;
use crate::types::{Column, Timestamp, Value};

pub type CollectedRow<'a> = SmallVec<[Value<'a>; ROW_INLINE_CAPACITY]>;

#[derive(Debug, Default)]
pub struct ValueCollector<'a> {
    rows: Vec<CollectedRow<'a>>,
}

impl<'a> ValueCollector<'a> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn with_capacity(rows: usize) -> Self {
        Self {
            rows: Vec::with_capacity(rows),
        }
    }

    pub fn rows(&self) -> &[CollectedRow<'a>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn into_rows(self) -> Vec<CollectedRow<'a>> {
        self.rows
    }

    /// All collected values in arrival order, ignoring row boundaries.
    pub fn values(&self) -> impl Iterator<Item = &Value<'a>> {
        self.rows.iter().flatten()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    fn push(&mut self, value: Value<'a>) {
        match self.rows.last_mut() {
            Some(row) => row.push(value),
            None => self.rows.push(smallvec![value]),
        }
    }
}

impl<'a> RecordReader<'a> for ValueCollector<'a> {
    fn read_null(&mut self, _column: &Column) -> Result<()> {
        self.push(Value::Null);
        Ok(())
    }

    fn read_boolean(&mut self, _column: &Column, value: bool) -> Result<()> {
        self.push(Value::Boolean(value));
        Ok(())
    }

    fn read_byte(&mut self, _column: &Column, value: i8) -> Result<()> {
        self.push(Value::Byte(value));
        Ok(())
    }

    fn read_short(&mut self, _column: &Column, value: i16) -> Result<()> {
        self.push(Value::Short(value));
        Ok(())
    }

    fn read_int(&mut self, _column: &Column, value: i32) -> Result<()> {
        self.push(Value::Int(value));
        Ok(())
    }

    fn read_long(&mut self, _column: &Column, value: i64) -> Result<()> {
        self.push(Value::Long(value));
        Ok(())
    }

    fn read_float(&mut self, _column: &Column, value: f32) -> Result<()> {
        self.push(Value::Float(value));
        Ok(())
    }

    fn read_double(&mut self, _column: &Column, value: f64) -> Result<()> {
        self.push(Value::Double(value));
        Ok(())
    }

    fn read_char(&mut self, _column: &Column, value: &'a [u8]) -> Result<()> {
        self.push(Value::Char(Cow::Borrowed(value)));
        Ok(())
    }

    fn read_string(&mut self, _column: &Column, value: &'a [u8]) -> Result<()> {
        self.push(Value::String(Cow::Borrowed(value)));
        Ok(())
    }

    fn read_timestamp(&mut self, _column: &Column, value: Timestamp) -> Result<()> {
        self.push(Value::Timestamp(value));
        Ok(())
    }

    fn read_binary(&mut self, _column: &Column, value: &'a [u8]) -> Result<()> {
        self.push(Value::Binary(Cow::Borrowed(value)));
        Ok(())
    }

    fn begin_row(&mut self, _row: usize) -> Result<()> {
        self.rows.push(SmallVec::new());
        Ok(())
    }
}
