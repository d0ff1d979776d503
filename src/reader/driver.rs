//! # PageDecoder - Decode Pass Driver
//!
//! Walks the rows of a page and, for each row, runs a `TypeReader` over every
//! projected column in order. This is the loop a loader runs between reading
//! a page and handing records to its sink.
//!
//! ## Projection
//!
//! By default all columns are decoded in layout order. `with_projection`
//! selects a subset, in any order, and may repeat a column. The decoder
//! imposes no other ordering on visitor calls.
//!
//! ## Parallel Passes
//!
//! `decode_rows` decodes a row range with a private `PageReader`. Threads can
//! split one page into disjoint ranges and decode them concurrently, each
//! with its own visitor, since the page is only ever read.
//!
//! ```ignore
//! let decoder = PageDecoder::new(&schema);
//! std::thread::scope(|s| {
//!     s.spawn(|| decoder.decode_rows(&page, 0..half, &mut left));
//!     s.spawn(|| decoder.decode_rows(&page, half..rows, &mut right));
//! });
//! ```
//!
//! ## Failure
//!
//! The first error from the page or the visitor aborts the pass. The error
//! is returned with the failing row attached; rows already delivered to the
//! visitor stay delivered.

use std::ops::Range;

use eyre::{ensure, Result, WrapErr};
use smallvec::SmallVec;

use crate::config::PROJECTION_INLINE_CAPACITY;
use crate::page::{Page, Schema};
use crate::reader::{PageReader, RecordReader, TypeReader};

#[derive(Debug, Clone)]
pub struct PageDecoder<'s> {
    schema: &'s Schema,
    projection: SmallVec<[usize; PROJECTION_INLINE_CAPACITY]>,
}

impl<'s> PageDecoder<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            projection: (0..schema.column_count()).collect(),
        }
    }

    pub fn with_projection(
        schema: &'s Schema,
        projection: impl IntoIterator<Item = usize>,
    ) -> Result<Self> {
        let projection: SmallVec<[usize; PROJECTION_INLINE_CAPACITY]> =
            projection.into_iter().collect();
        for &idx in &projection {
            ensure!(
                idx < schema.column_count(),
                "projected column {} outside schema ({} columns)",
                idx,
                schema.column_count()
            );
        }
        Ok(Self { schema, projection })
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn projection(&self) -> &[usize] {
        &self.projection
    }

    /// Decodes the projected columns of the reader's current row.
    pub fn decode_row<'a, V>(&self, reader: &PageReader<'a>, visitor: &mut V) -> Result<()>
    where
        V: RecordReader<'a> + ?Sized,
    {
        let row = reader.row();
        visitor.begin_row(row)?;
        for &idx in &self.projection {
            TypeReader::new(reader, &self.schema.columns[idx]).decode(visitor)?;
        }
        visitor.end_row(row)
    }

    /// Decodes every row of the page. Returns the number of rows decoded.
    pub fn decode_page<'a, V>(&self, page: &'a Page<'a>, visitor: &mut V) -> Result<usize>
    where
        V: RecordReader<'a> + ?Sized,
    {
        self.decode_rows(page, 0..page.row_count(), visitor)
    }

    pub fn decode_rows<'a, V>(
        &self,
        page: &'a Page<'a>,
        rows: Range<usize>,
        visitor: &mut V,
    ) -> Result<usize>
    where
        V: RecordReader<'a> + ?Sized,
    {
        ensure!(
            page.column_count() == self.schema.column_count(),
            "page has {} columns but decoder schema declares {}",
            page.column_count(),
            self.schema.column_count()
        );
        ensure!(
            rows.start <= rows.end && rows.end <= page.row_count(),
            "row range {:?} outside page ({} rows)",
            rows,
            page.row_count()
        );

        tracing::debug!(
            rows = rows.len(),
            first_row = rows.start,
            columns = self.projection.len(),
            "decode pass started"
        );

        let mut reader = PageReader::new(page);
        let mut decoded = 0;
        for row in rows {
            let result = reader
                .seek(row)
                .and_then(|()| self.decode_row(&reader, visitor))
                .wrap_err_with(|| format!("failed to decode row {}", row));
            if let Err(err) = result {
                tracing::debug!(row, decoded, error = %err, "decode pass aborted");
                return Err(err);
            }
            decoded += 1;
        }

        tracing::debug!(decoded, "decode pass finished");
        Ok(decoded)
    }
}
