//! # Page Header
//!
//! Every page begins with a 16-byte header identifying the format and the
//! shape of the batch it holds.
//!
//! ## Header Layout (16 bytes)
//!
//! ```text
//! Offset  Size  Field         Description
//! ------  ----  ------------  ----------------------------------------
//! 0       4     magic         PAGE_MAGIC ("QLPG")
//! 4       2     version       PAGE_FORMAT_VERSION
//! 6       2     column_count  Columns in the layout
//! 8       4     row_count     Rows in the batch
//! 12      4     page_len      Used bytes including the variable heap
//! ```
//!
//! All fields are little-endian. The struct is built from `zerocopy`
//! little-endian wrappers, so it has alignment 1 and can be read in place
//! from any byte slice.

use eyre::{ensure, Result};
use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::config::{PAGE_FORMAT_VERSION, PAGE_HEADER_SIZE, PAGE_MAGIC};

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PageHeader {
    magic: U32,
    version: U16,
    column_count: U16,
    row_count: U32,
    page_len: U32,
}

const _: () = assert!(
    size_of::<PageHeader>() == PAGE_HEADER_SIZE,
    "PageHeader must be exactly PAGE_HEADER_SIZE bytes"
);

impl PageHeader {
    pub fn new(column_count: u16, row_count: u32, page_len: u32) -> Self {
        Self {
            magic: U32::new(PAGE_MAGIC),
            version: U16::new(PAGE_FORMAT_VERSION),
            column_count: U16::new(column_count),
            row_count: U32::new(row_count),
            page_len: U32::new(page_len),
        }
    }

    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        ensure!(
            data.len() >= PAGE_HEADER_SIZE,
            "buffer too small for PageHeader: {} < {}",
            data.len(),
            PAGE_HEADER_SIZE
        );

        Self::ref_from_bytes(&data[..PAGE_HEADER_SIZE])
            .map_err(|e| eyre::eyre!("failed to read PageHeader: {:?}", e))
    }

    pub fn write_to(&self, data: &mut [u8]) -> Result<()> {
        ensure!(
            data.len() >= PAGE_HEADER_SIZE,
            "buffer too small for PageHeader: {} < {}",
            data.len(),
            PAGE_HEADER_SIZE
        );

        data[..PAGE_HEADER_SIZE].copy_from_slice(self.as_bytes());
        Ok(())
    }

    /// Checks the fields that do not depend on the schema.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.magic() == PAGE_MAGIC,
            "bad page magic: {:#010x} (expected {:#010x})",
            self.magic(),
            PAGE_MAGIC
        );
        ensure!(
            self.version() == PAGE_FORMAT_VERSION,
            "unsupported page version: {} (expected {})",
            self.version(),
            PAGE_FORMAT_VERSION
        );
        ensure!(
            self.page_len() as usize >= PAGE_HEADER_SIZE,
            "page_len {} is smaller than the header",
            self.page_len()
        );
        Ok(())
    }

    crate::le_accessors! {
        magic: u32,
        version: u16,
        column_count: u16,
        row_count: u32,
        page_len: u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_little_endian_on_the_wire() {
        let header = PageHeader::new(3, 0x0102_0304, 64);
        let mut buf = [0u8; PAGE_HEADER_SIZE];
        header.write_to(&mut buf).unwrap();

        assert_eq!(&buf[0..4], &PAGE_MAGIC.to_le_bytes());
        assert_eq!(&buf[4..6], &PAGE_FORMAT_VERSION.to_le_bytes());
        assert_eq!(&buf[6..8], &[3, 0]);
        assert_eq!(&buf[8..12], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&buf[12..16], &[64, 0, 0, 0]);
    }

    #[test]
    fn header_reads_in_place_from_unaligned_offset() {
        let header = PageHeader::new(2, 9, 40);
        let mut buf = vec![0u8; PAGE_HEADER_SIZE + 1];
        header.write_to(&mut buf[1..]).unwrap();

        let read = PageHeader::from_bytes(&buf[1..]).unwrap();
        assert_eq!(read.column_count(), 2);
        assert_eq!(read.row_count(), 9);
        assert_eq!(read.page_len(), 40);
        read.validate().unwrap();
    }

    #[test]
    fn from_bytes_rejects_short_buffer() {
        let err = PageHeader::from_bytes(&[0u8; 8]).unwrap_err();
        assert!(err.to_string().contains("too small"));
    }

    #[test]
    fn validate_rejects_bad_magic_and_version() {
        let mut header = PageHeader::new(1, 1, 32);
        header.set_magic(0xdead_beef);
        assert!(header.validate().unwrap_err().to_string().contains("magic"));

        let mut header = PageHeader::new(1, 1, 32);
        header.set_version(PAGE_FORMAT_VERSION + 1);
        assert!(header.validate().unwrap_err().to_string().contains("version"));
    }

    #[test]
    fn validate_rejects_page_len_inside_header() {
        let header = PageHeader::new(1, 0, 4);
        assert!(header.validate().unwrap_err().to_string().contains("page_len"));
    }
}
