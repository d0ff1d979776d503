//! # Page Decoding
//!
//! Turns `(page, column, row)` triples into typed visitor callbacks.
//!
//! ```text
//!   PageDecoder ── for each row ──> PageReader (row cursor)
//!        │                               │ is_null / offset
//!        └── for each column ──> TypeReader ──> RecordReader::read_*
//! ```
//!
//! ## Module Structure
//!
//! - `page_reader`: `PageReader` cursor over a shared `Page`
//! - `type_reader`: `TypeReader` dispatch and the per-type decode functions
//! - `record_reader`: `RecordReader` visitor trait
//! - `driver`: `PageDecoder` row/column loop with projection
//! - `collect`: `ValueCollector` sink that materializes rows

pub mod collect;
pub mod driver;
pub mod page_reader;
pub mod record_reader;
pub mod type_reader;

#[cfg(test)]
mod tests;

pub use collect::{CollectedRow, ValueCollector};
pub use driver::PageDecoder;
pub use page_reader::PageReader;
pub use record_reader::RecordReader;
pub use type_reader::TypeReader;
