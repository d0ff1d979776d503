//! # quickload - Column-Major Page Decoding
//!
//! quickload reads typed fields out of column-major data pages. A page holds
//! a fixed number of rows for a fixed schema; each column owns a contiguous
//! run of equal-width slots, with variable-length payloads kept in a heap at
//! the end of the page. Decoding hands every field to a caller-supplied
//! visitor without copying the page.
//!
//! - **Zero-copy**: byte payloads are borrowed straight from the page buffer
//! - **Closed type set**: one `match` over `LogicalType` drives decoding
//! - **Shareable pages**: a `Page` is immutable, so any number of threads can
//!   decode disjoint rows of it concurrently
//!
//! ## Quick Start
//!
//! ```ignore
//! use quickload::{LogicalType, Page, PageBuilder, PageDecoder, Schema, ValueCollector};
//!
//! let schema = Schema::from_types([LogicalType::Long, LogicalType::String])?;
//!
//! let mut builder = PageBuilder::new(&schema);
//! builder.set_long(0, 42)?;
//! builder.set_string(1, "hello")?;
//! builder.finish_row()?;
//! let bytes = builder.build()?;
//!
//! let page = Page::new(&bytes, &schema)?;
//! let mut rows = ValueCollector::new();
//! PageDecoder::new(&schema).decode_page(&page, &mut rows)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   RecordReader (caller's visitor)    │
//! ├─────────────────────────────────────┤
//! │   PageDecoder → TypeReader dispatch  │
//! ├─────────────────────────────────────┤
//! │     PageReader (row cursor)          │
//! ├─────────────────────────────────────┤
//! │  Page view │ PageLayout │ PageBuilder│
//! ├─────────────────────────────────────┤
//! │   Schema, Column, LogicalType        │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: layout constants and limits
//! - [`types`]: logical types, columns, timestamps, values
//! - [`page`]: page header, layout arithmetic, read-only view, builder
//! - [`reader`]: row cursor, per-type decoding, visitor trait, decode driver
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` for page builds and decode
//! passes, `trace` for page opens) and never installs a subscriber.

#[macro_use]
mod macros;

pub mod config;
pub mod page;
pub mod reader;
pub mod types;

pub use page::{Page, PageBuilder, PageHeader, PageLayout, Schema};
pub use reader::{PageDecoder, PageReader, RecordReader, TypeReader, ValueCollector};
pub use types::{Column, LogicalType, Timestamp, Value};
