//! # Page - Zero-Copy Page Access
//!
//! `Page` wraps a borrowed byte buffer holding one encoded batch and exposes
//! the null test plus raw, bounds-checked accessors at arbitrary offsets.
//! Every accessor returns either a copy of a fixed-width scalar or a slice
//! borrowed from the underlying buffer.
//!
//! ## Usage
//!
//! ```ignore
//! let page = Page::new(&bytes, &schema)?;
//! if !page.is_null(0, 3)? {
//!     let offset = page.layout().slot_offset(0, 3)?;
//!     let id = page.get_i64(offset)?;
//! }
//! ```
//!
//! ## Bounds
//!
//! `Page::new` verifies the header against the schema and checks that the
//! fixed region lies inside `page_len`. Heap reads are checked on each access
//! because heap offsets come from slot contents, not from the layout. Any
//! read past `page_len` is an error and aborts the decode pass.
//!
//! ## Thread Safety
//!
//! `Page` borrows immutably and holds no interior mutability. It is `Sync`,
//! so any number of readers on any number of threads can share one page.

use eyre::{ensure, Result};

use crate::config::VAR_LENGTH_PREFIX_SIZE;
use crate::page::{PageHeader, PageLayout, Schema};

#[derive(Debug, Clone)]
pub struct Page<'a> {
    data: &'a [u8],
    layout: PageLayout,
}

impl<'a> Page<'a> {
    pub fn new(data: &'a [u8], schema: &Schema) -> Result<Self> {
        let header = PageHeader::from_bytes(data)?;
        header.validate()?;

        ensure!(
            header.column_count() as usize == schema.column_count(),
            "page has {} columns but schema declares {}",
            header.column_count(),
            schema.column_count()
        );

        let page_len = header.page_len() as usize;
        ensure!(
            page_len <= data.len(),
            "page_len {} exceeds buffer length {}",
            page_len,
            data.len()
        );

        let layout = PageLayout::new(schema, header.row_count() as usize)?;
        ensure!(
            layout.heap_start() <= page_len,
            "page_len {} too small for {} rows (fixed region ends at {})",
            page_len,
            layout.row_count(),
            layout.heap_start()
        );

        tracing::trace!(
            rows = layout.row_count(),
            columns = layout.column_count(),
            page_len,
            heap_start = layout.heap_start(),
            "opened page"
        );

        Ok(Self {
            data: &data[..page_len],
            layout,
        })
    }

    /// The page bytes, truncated to `page_len`.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn row_count(&self) -> usize {
        self.layout.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.layout.column_count()
    }

    pub fn heap_start(&self) -> usize {
        self.layout.heap_start()
    }

    pub fn page_len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.row_count() == 0
    }

    pub fn is_null(&self, column_index: usize, row: usize) -> Result<bool> {
        let (offset, mask) = self.layout.null_bit(column_index, row)?;
        Ok(self.get_byte(offset)? & mask != 0)
    }

    pub fn get_byte(&self, offset: usize) -> Result<u8> {
        self.data.get(offset).copied().ok_or_else(|| {
            eyre::eyre!(
                "read of 1 byte at offset {} past page end {}",
                offset,
                self.data.len()
            )
        })
    }

    pub fn get_bytes(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| eyre::eyre!("read range at offset {} overflows", offset))?;
        self.data.get(offset..end).ok_or_else(|| {
            eyre::eyre!(
                "read of {} bytes at offset {} past page end {}",
                len,
                offset,
                self.data.len()
            )
        })
    }

    pub fn get_array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let bytes = self.get_bytes(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn get_i8(&self, offset: usize) -> Result<i8> {
        Ok(self.get_byte(offset)? as i8)
    }

    pub fn get_i16(&self, offset: usize) -> Result<i16> {
        Ok(i16::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_i32(&self, offset: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_i64(&self, offset: usize) -> Result<i64> {
        Ok(i64::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_u32(&self, offset: usize) -> Result<u32> {
        Ok(u32::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_f32(&self, offset: usize) -> Result<f32> {
        Ok(f32::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_f64(&self, offset: usize) -> Result<f64> {
        Ok(f64::from_le_bytes(self.get_array(offset)?))
    }

    /// Follows a variable slot at `slot_offset` into the heap and returns the
    /// length-prefixed byte run stored there.
    pub fn get_length_prefixed(&self, slot_offset: usize) -> Result<&'a [u8]> {
        let heap_offset = self.get_u32(slot_offset)? as usize;
        let entry = self
            .heap_start()
            .checked_add(heap_offset)
            .ok_or_else(|| eyre::eyre!("heap offset {} overflows", heap_offset))?;
        let len = self.get_u32(entry)? as usize;
        self.get_bytes(entry + VAR_LENGTH_PREFIX_SIZE, len)
    }
}
