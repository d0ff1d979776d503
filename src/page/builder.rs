//! # PageBuilder - Page Construction
//!
//! `PageBuilder` is the producer side of the page layout. Values are set one
//! row at a time with typed setters. Because the layout is column-major and
//! needs the final row count, committed rows are buffered per column and only
//! laid out in `build`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut builder = PageBuilder::new(&schema);
//! builder.set_long(0, 42)?;
//! builder.set_string(1, "hello")?;
//! builder.finish_row()?;
//!
//! if builder.is_full() {
//!     sink.write(builder.build()?);
//!     builder.reset();
//! }
//! ```
//!
//! ## Row State
//!
//! Every row starts all-NULL, so a column that is never set in a row is
//! encoded as NULL. Setting a column twice in the same row keeps the last
//! value. Values set after the last `finish_row` are not part of `build`.
//!
//! ## Page Size
//!
//! `max_page_size` is a flush threshold: `is_full` reports when the committed
//! rows reach it. The row that crosses it is still committed, so a built
//! page may be slightly larger. The hard limit is `MAX_PAGE_SIZE`, beyond
//! which heap offsets no longer fit their u32 slots.

use eyre::{ensure, Result};

use crate::config::{
    BOOLEAN_FALSE, BOOLEAN_TRUE, CHAR_PAD_BYTE, DEFAULT_MAX_PAGE_SIZE, MAX_PAGE_SIZE,
    NANOS_PER_SECOND, PAGE_HEADER_SIZE, VAR_LENGTH_PREFIX_SIZE,
};
use crate::page::{PageHeader, PageLayout, Schema};
use crate::types::{LogicalType, Timestamp, Value};

pub struct PageBuilder<'a> {
    schema: &'a Schema,
    max_page_size: usize,
    row_offsets: Vec<usize>,
    row_nulls: Vec<bool>,
    row_slots: Vec<u8>,
    row_var: Vec<Vec<u8>>,
    column_nulls: Vec<Vec<u8>>,
    column_slots: Vec<Vec<u8>>,
    heap: Vec<u8>,
    row_count: usize,
}

impl<'a> PageBuilder<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        let column_count = schema.column_count();
        let mut row_offsets = Vec::with_capacity(column_count);
        let mut offset = 0;
        for &width in &schema.slot_widths {
            row_offsets.push(offset);
            offset += width;
        }

        Self {
            schema,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            row_offsets,
            row_nulls: vec![true; column_count],
            row_slots: vec![0u8; schema.row_width()],
            row_var: vec![Vec::new(); column_count],
            column_nulls: vec![Vec::new(); column_count],
            column_slots: vec![Vec::new(); column_count],
            heap: Vec::new(),
            row_count: 0,
        }
    }

    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size.min(MAX_PAGE_SIZE);
        self
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Size in bytes the committed rows would occupy if built now.
    pub fn estimated_size(&self) -> usize {
        PAGE_HEADER_SIZE
            + self.schema.column_count() * Schema::null_bitmap_size(self.row_count)
            + self.row_count * self.schema.row_width()
            + self.heap.len()
    }

    pub fn is_full(&self) -> bool {
        self.estimated_size() >= self.max_page_size
    }

    pub fn reset(&mut self) {
        self.clear_row();
        for nulls in &mut self.column_nulls {
            nulls.clear();
        }
        for slots in &mut self.column_slots {
            slots.clear();
        }
        self.heap.clear();
        self.row_count = 0;
    }

    fn clear_row(&mut self) {
        self.row_nulls.fill(true);
        self.row_slots.fill(0);
        for var in &mut self.row_var {
            var.clear();
        }
    }

    fn column_type(&self, col_idx: usize) -> Result<LogicalType> {
        self.schema
            .column(col_idx)
            .map(|c| c.logical_type())
            .ok_or_else(|| {
                eyre::eyre!(
                    "column {} not found ({} columns)",
                    col_idx,
                    self.schema.column_count()
                )
            })
    }

    fn expect_type(&self, col_idx: usize, expected: LogicalType) -> Result<()> {
        let actual = self.column_type(col_idx)?;
        ensure!(
            actual == expected,
            "column {} is {}, cannot store {}",
            col_idx,
            actual,
            expected
        );
        Ok(())
    }

    pub fn set_null(&mut self, col_idx: usize) -> Result<()> {
        self.column_type(col_idx)?;
        self.row_nulls[col_idx] = true;
        let start = self.row_offsets[col_idx];
        let end = start + self.schema.slot_widths[col_idx];
        self.row_slots[start..end].fill(0);
        self.row_var[col_idx].clear();
        Ok(())
    }

    fn set_fixed_bytes(&mut self, col_idx: usize, bytes: &[u8]) {
        self.row_nulls[col_idx] = false;
        let offset = self.row_offsets[col_idx];
        self.row_slots[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn set_var_bytes(&mut self, col_idx: usize, bytes: &[u8]) {
        self.row_nulls[col_idx] = false;
        let var = &mut self.row_var[col_idx];
        var.clear();
        var.extend_from_slice(bytes);
    }

    pub fn set_boolean(&mut self, col_idx: usize, value: bool) -> Result<()> {
        self.expect_type(col_idx, LogicalType::Boolean)?;
        let byte = if value { BOOLEAN_TRUE } else { BOOLEAN_FALSE };
        self.set_fixed_bytes(col_idx, &[byte]);
        Ok(())
    }

    pub fn set_byte(&mut self, col_idx: usize, value: i8) -> Result<()> {
        self.expect_type(col_idx, LogicalType::Byte)?;
        self.set_fixed_bytes(col_idx, &value.to_le_bytes());
        Ok(())
    }

    pub fn set_short(&mut self, col_idx: usize, value: i16) -> Result<()> {
        self.expect_type(col_idx, LogicalType::Short)?;
        self.set_fixed_bytes(col_idx, &value.to_le_bytes());
        Ok(())
    }

    pub fn set_int(&mut self, col_idx: usize, value: i32) -> Result<()> {
        self.expect_type(col_idx, LogicalType::Int)?;
        self.set_fixed_bytes(col_idx, &value.to_le_bytes());
        Ok(())
    }

    pub fn set_long(&mut self, col_idx: usize, value: i64) -> Result<()> {
        self.expect_type(col_idx, LogicalType::Long)?;
        self.set_fixed_bytes(col_idx, &value.to_le_bytes());
        Ok(())
    }

    pub fn set_float(&mut self, col_idx: usize, value: f32) -> Result<()> {
        self.expect_type(col_idx, LogicalType::Float)?;
        self.set_fixed_bytes(col_idx, &value.to_le_bytes());
        Ok(())
    }

    pub fn set_double(&mut self, col_idx: usize, value: f64) -> Result<()> {
        self.expect_type(col_idx, LogicalType::Double)?;
        self.set_fixed_bytes(col_idx, &value.to_le_bytes());
        Ok(())
    }

    pub fn set_char(&mut self, col_idx: usize, text: &str) -> Result<()> {
        self.set_char_bytes(col_idx, text.as_bytes())
    }

    /// Stores `bytes` NUL-padded to the column width. Trailing NULs in the
    /// value itself are indistinguishable from padding once encoded.
    pub fn set_char_bytes(&mut self, col_idx: usize, bytes: &[u8]) -> Result<()> {
        let width = match self.column_type(col_idx)? {
            LogicalType::Char { width } => width as usize,
            other => eyre::bail!("column {} is {}, cannot store char", col_idx, other),
        };
        ensure!(
            bytes.len() <= width,
            "value length {} exceeds CHAR({}) limit for column {}",
            bytes.len(),
            width,
            col_idx
        );

        self.set_fixed_bytes(col_idx, bytes);
        let offset = self.row_offsets[col_idx];
        self.row_slots[offset + bytes.len()..offset + width].fill(CHAR_PAD_BYTE);
        Ok(())
    }

    pub fn set_string(&mut self, col_idx: usize, text: &str) -> Result<()> {
        self.set_string_bytes(col_idx, text.as_bytes())
    }

    /// Stores a string payload without UTF-8 validation.
    pub fn set_string_bytes(&mut self, col_idx: usize, bytes: &[u8]) -> Result<()> {
        self.expect_type(col_idx, LogicalType::String)?;
        self.set_var_bytes(col_idx, bytes);
        Ok(())
    }

    pub fn set_binary(&mut self, col_idx: usize, bytes: &[u8]) -> Result<()> {
        self.expect_type(col_idx, LogicalType::Binary)?;
        self.set_var_bytes(col_idx, bytes);
        Ok(())
    }

    pub fn set_timestamp(&mut self, col_idx: usize, value: Timestamp) -> Result<()> {
        self.expect_type(col_idx, LogicalType::Timestamp)?;
        ensure!(
            value.nanos() < NANOS_PER_SECOND,
            "timestamp nanoseconds out of range for column {}: {}",
            col_idx,
            value.nanos()
        );
        self.set_fixed_bytes(col_idx, &value.to_le_bytes());
        Ok(())
    }

    pub fn set_value(&mut self, col_idx: usize, value: &Value<'_>) -> Result<()> {
        match value {
            Value::Null => self.set_null(col_idx),
            Value::Boolean(v) => self.set_boolean(col_idx, *v),
            Value::Byte(v) => self.set_byte(col_idx, *v),
            Value::Short(v) => self.set_short(col_idx, *v),
            Value::Int(v) => self.set_int(col_idx, *v),
            Value::Long(v) => self.set_long(col_idx, *v),
            Value::Float(v) => self.set_float(col_idx, *v),
            Value::Double(v) => self.set_double(col_idx, *v),
            Value::Char(b) => self.set_char_bytes(col_idx, b),
            Value::String(b) => self.set_string_bytes(col_idx, b),
            Value::Timestamp(ts) => self.set_timestamp(col_idx, *ts),
            Value::Binary(b) => self.set_binary(col_idx, b),
        }
    }

    /// Bytes the current row adds to the page once committed, including the
    /// bitmap byte per column that every eighth row opens.
    pub(crate) fn pending_row_size(&self) -> usize {
        let bitmap = if self.row_count % 8 == 0 {
            self.schema.column_count()
        } else {
            0
        };
        let heap: usize = self
            .row_var
            .iter()
            .zip(&self.row_nulls)
            .filter(|(_, null)| !**null)
            .map(|(var, _)| VAR_LENGTH_PREFIX_SIZE + var.len())
            .sum();
        bitmap + self.schema.row_width() + heap
    }

    /// Commits the current row and starts a new all-NULL one.
    pub fn finish_row(&mut self) -> Result<()> {
        ensure!(
            self.row_count < u32::MAX as usize,
            "page row limit reached ({})",
            u32::MAX
        );

        ensure!(
            self.estimated_size() + self.pending_row_size() <= MAX_PAGE_SIZE,
            "row {} would grow the page past {} bytes",
            self.row_count,
            MAX_PAGE_SIZE
        );

        let bit = 1u8 << (self.row_count % 8);
        let new_bitmap_byte = self.row_count % 8 == 0;

        for col_idx in 0..self.schema.column_count() {
            let null = self.row_nulls[col_idx];
            let nulls = &mut self.column_nulls[col_idx];
            if new_bitmap_byte {
                nulls.push(0);
            }
            if null {
                if let Some(last) = nulls.last_mut() {
                    *last |= bit;
                }
            }

            let start = self.row_offsets[col_idx];
            let end = start + self.schema.slot_widths[col_idx];
            let slots = &mut self.column_slots[col_idx];

            if self.schema.columns[col_idx].logical_type().is_variable() && !null {
                let heap_offset = self.heap.len() as u32;
                let var = &self.row_var[col_idx];
                self.heap.extend((var.len() as u32).to_le_bytes());
                self.heap.extend_from_slice(var);
                slots.extend(heap_offset.to_le_bytes());
            } else {
                slots.extend_from_slice(&self.row_slots[start..end]);
            }
        }

        self.row_count += 1;
        self.clear_row();
        Ok(())
    }

    pub fn build(&self) -> Result<Vec<u8>> {
        let layout = PageLayout::new(self.schema, self.row_count)?;
        let page_len = layout.heap_start() + self.heap.len();
        ensure!(
            page_len <= MAX_PAGE_SIZE,
            "page of {} bytes exceeds {} byte limit",
            page_len,
            MAX_PAGE_SIZE
        );

        let mut out = vec![0u8; PAGE_HEADER_SIZE];
        out.reserve(page_len - PAGE_HEADER_SIZE);
        PageHeader::new(
            self.schema.column_count() as u16,
            self.row_count as u32,
            page_len as u32,
        )
        .write_to(&mut out)?;

        for nulls in &self.column_nulls {
            out.extend_from_slice(nulls);
        }
        for slots in &self.column_slots {
            out.extend_from_slice(slots);
        }
        ensure!(
            out.len() == layout.heap_start(),
            "built fixed region ends at {} but layout expects {}",
            out.len(),
            layout.heap_start()
        );
        out.extend_from_slice(&self.heap);

        tracing::debug!(
            rows = self.row_count,
            columns = self.schema.column_count(),
            page_len,
            heap_bytes = self.heap.len(),
            "built page"
        );

        Ok(out)
    }
}
