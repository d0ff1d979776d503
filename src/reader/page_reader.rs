//! # PageReader - Row Cursor
//!
//! A `PageReader` binds a shared `Page` to a current row. It translates a
//! column index into the byte offset of that column's slot for the current
//! row and answers the null test for it.
//!
//! The cursor is the only mutable state in a decode pass, and it is owned by
//! whoever drives the pass. Threads decoding the same page each create their
//! own reader; the page itself is shared by reference.
//!
//! ```ignore
//! let mut reader = PageReader::new(&page);
//! loop {
//!     if !reader.is_null(0)? {
//!         let id = reader.page().get_i64(reader.offset(0)?)?;
//!     }
//!     if !reader.advance() {
//!         break;
//!     }
//! }
//! ```

use eyre::{ensure, Result};

use crate::page::Page;

#[derive(Debug, Clone, Copy)]
pub struct PageReader<'a> {
    page: &'a Page<'a>,
    row: usize,
}

impl<'a> PageReader<'a> {
    /// Creates a reader positioned at row 0.
    pub fn new(page: &'a Page<'a>) -> Self {
        Self { page, row: 0 }
    }

    pub fn at_row(page: &'a Page<'a>, row: usize) -> Result<Self> {
        let mut reader = Self::new(page);
        reader.seek(row)?;
        Ok(reader)
    }

    pub fn page(&self) -> &'a Page<'a> {
        self.page
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn row_count(&self) -> usize {
        self.page.row_count()
    }

    pub fn seek(&mut self, row: usize) -> Result<()> {
        ensure!(
            row < self.page.row_count(),
            "cannot seek to row {} of {}",
            row,
            self.page.row_count()
        );
        self.row = row;
        Ok(())
    }

    /// Moves to the next row. Returns false, leaving the position unchanged,
    /// when the current row is the last one.
    pub fn advance(&mut self) -> bool {
        if self.row + 1 < self.page.row_count() {
            self.row += 1;
            true
        } else {
            false
        }
    }

    /// Null test for `column_index` at the current row. Must be checked
    /// before any raw read of that cell.
    pub fn is_null(&self, column_index: usize) -> Result<bool> {
        self.page.is_null(column_index, self.row)
    }

    /// Absolute offset of `column_index`'s slot at the current row.
    pub fn offset(&self, column_index: usize) -> Result<usize> {
        self.page.layout().slot_offset(column_index, self.row)
    }
}
