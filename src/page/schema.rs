//! # Schema Definition
//!
//! The ordered set of columns a page is laid out with. The schema pre-computes
//! slot widths so that the per-page layout (which also depends on the row
//! count) can be derived without re-walking the column types.
//!
//! ## Schema Internals
//!
//! - `columns`: Column descriptors; `columns[i].index() == i`
//! - `slot_widths`: Bytes per row for each column
//! - `row_width`: Sum of all slot widths
//! - `var_column_indices`: Columns whose slot points into the heap

use eyre::{ensure, Result};

use crate::config::{MAX_CHAR_WIDTH, MAX_COLUMN_COUNT};
use crate::types::{Column, LogicalType};

#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) columns: Vec<Column>,
    pub(crate) slot_widths: Vec<usize>,
    pub(crate) var_column_indices: Vec<usize>,
    pub(crate) row_width: usize,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        ensure!(!columns.is_empty(), "schema must declare at least one column");
        ensure!(
            columns.len() <= MAX_COLUMN_COUNT,
            "too many columns: {} > {}",
            columns.len(),
            MAX_COLUMN_COUNT
        );

        let mut slot_widths = Vec::with_capacity(columns.len());
        let mut var_column_indices = Vec::new();
        let mut row_width = 0;

        for (idx, col) in columns.iter().enumerate() {
            ensure!(
                col.index() == idx,
                "column {} declared at position {}",
                col.index(),
                idx
            );
            if let LogicalType::Char { width } = col.logical_type() {
                ensure!(
                    width > 0 && width as usize <= MAX_CHAR_WIDTH,
                    "column {} has invalid char width {}",
                    idx,
                    width
                );
            }

            let width = col.logical_type().slot_width();
            slot_widths.push(width);
            row_width += width;
            if col.logical_type().is_variable() {
                var_column_indices.push(idx);
            }
        }

        Ok(Self {
            columns,
            slot_widths,
            var_column_indices,
            row_width,
        })
    }

    /// Builds a schema from bare types, assigning indices in order.
    pub fn from_types(types: impl IntoIterator<Item = LogicalType>) -> Result<Self> {
        let columns = types
            .into_iter()
            .enumerate()
            .map(|(i, ty)| Column::new(i, ty))
            .collect();
        Self::new(columns)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, idx: usize) -> Option<&Column> {
        self.columns.get(idx)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn slot_width(&self, idx: usize) -> Option<usize> {
        self.slot_widths.get(idx).copied()
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    pub fn var_column_count(&self) -> usize {
        self.var_column_indices.len()
    }

    pub fn var_column_indices(&self) -> &[usize] {
        &self.var_column_indices
    }

    pub fn null_bitmap_size(row_count: usize) -> usize {
        row_count.div_ceil(8)
    }
}
