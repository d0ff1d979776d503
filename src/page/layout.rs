//! # Page Layout
//!
//! Maps `(column, row)` to byte offsets for one page. The layout depends on
//! the schema's slot widths and the page's row count, so it is derived once
//! when a page is opened (or built) and then shared by every reader.
//!
//! ```text
//! +----------------------------+ 0
//! | PageHeader                 |
//! +----------------------------+ PAGE_HEADER_SIZE
//! | null bitmap, column 0      |  ceil(rows / 8) bytes each
//! | ...                        |
//! | null bitmap, column C-1    |
//! +----------------------------+ fixed_start
//! | slots, column 0            |  rows * slot_width(0) bytes
//! | ...                        |
//! | slots, column C-1          |
//! +----------------------------+ heap_start
//! | variable heap              |
//! +----------------------------+ page_len
//! ```
//!
//! Offsets are computed with checked arithmetic; a row count that would
//! overflow `usize` is rejected when the layout is derived, so lookups on a
//! derived layout are plain additions and multiplications.

use eyre::{ensure, Result};

use crate::config::PAGE_HEADER_SIZE;
use crate::page::Schema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    row_count: usize,
    bitmap_size: usize,
    column_bases: Vec<usize>,
    slot_widths: Vec<usize>,
    fixed_start: usize,
    heap_start: usize,
}

impl PageLayout {
    pub fn new(schema: &Schema, row_count: usize) -> Result<Self> {
        let column_count = schema.column_count();
        let bitmap_size = Schema::null_bitmap_size(row_count);

        let fixed_start = column_count
            .checked_mul(bitmap_size)
            .and_then(|n| n.checked_add(PAGE_HEADER_SIZE))
            .ok_or_else(|| eyre::eyre!("null bitmap region overflows for {} rows", row_count))?;

        let mut column_bases = Vec::with_capacity(column_count);
        let mut base = fixed_start;
        for (idx, &width) in schema.slot_widths.iter().enumerate() {
            column_bases.push(base);
            let region = width.checked_mul(row_count).ok_or_else(|| {
                eyre::eyre!("column {} region overflows for {} rows", idx, row_count)
            })?;
            base = base
                .checked_add(region)
                .ok_or_else(|| eyre::eyre!("page layout overflows at column {}", idx))?;
        }

        Ok(Self {
            row_count,
            bitmap_size,
            column_bases,
            slot_widths: schema.slot_widths.clone(),
            fixed_start,
            heap_start: base,
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_bases.len()
    }

    pub fn bitmap_size(&self) -> usize {
        self.bitmap_size
    }

    pub fn fixed_start(&self) -> usize {
        self.fixed_start
    }

    pub fn heap_start(&self) -> usize {
        self.heap_start
    }

    pub fn column_base(&self, column_index: usize) -> Option<usize> {
        self.column_bases.get(column_index).copied()
    }

    pub fn slot_width(&self, column_index: usize) -> Option<usize> {
        self.slot_widths.get(column_index).copied()
    }

    /// Start of the null bitmap for `column_index`.
    pub fn null_bitmap_offset(&self, column_index: usize) -> Option<usize> {
        (column_index < self.column_count())
            .then(|| PAGE_HEADER_SIZE + column_index * self.bitmap_size)
    }

    /// Byte offset of the slot at `(column_index, row)`.
    pub fn slot_offset(&self, column_index: usize, row: usize) -> Result<usize> {
        self.check_cell(column_index, row)?;
        Ok(self.column_bases[column_index] + row * self.slot_widths[column_index])
    }

    /// Byte offset and bit mask of the null flag for `(column_index, row)`.
    pub fn null_bit(&self, column_index: usize, row: usize) -> Result<(usize, u8)> {
        self.check_cell(column_index, row)?;
        let offset = PAGE_HEADER_SIZE + column_index * self.bitmap_size + row / 8;
        Ok((offset, 1 << (row % 8)))
    }

    fn check_cell(&self, column_index: usize, row: usize) -> Result<()> {
        ensure!(
            column_index < self.column_count(),
            "column {} outside page layout ({} columns)",
            column_index,
            self.column_count()
        );
        ensure!(
            row < self.row_count,
            "row {} outside page layout ({} rows)",
            row,
            self.row_count
        );
        Ok(())
    }
}
