//! # Column-Major Record Pages
//!
//! A page is a contiguous, read-only buffer holding one batch of records laid
//! out column by column. Each column owns a null bitmap and a region of
//! fixed-width slots; variable-length payloads live in a heap at the end of
//! the page and are reached through their slot.
//!
//! ## Page Binary Layout
//!
//! ```text
//! +--------------+------------------+------------------+------------------+
//! | PageHeader   | Null Bitmaps     | Column Regions   | Variable Heap    |
//! | (16 bytes)   | C x ceil(R/8) B  | sum(R x width_c) | len-prefixed     |
//! +--------------+------------------+------------------+------------------+
//! ```
//!
//! | Component | Description |
//! |-----------|-------------|
//! | **Header** | magic, version, column count, row count, page length |
//! | **Null Bitmaps** | 1 bit per row per column. `1` = NULL, `0` = has data |
//! | **Column Regions** | `offset(c, r) = column_base(c) + r * slot_width(c)` |
//! | **Variable Heap** | `[u32 length][bytes]` entries addressed by u32 slots |
//!
//! ## Design Goals
//!
//! 1. **O(1) cell access**: offsets are a pure function of column and row
//! 2. **Zero-copy reads**: byte payloads are slices of the page buffer
//! 3. **Schema-dependent**: types come from the schema, never from the page
//! 4. **Shareable**: a `Page` is immutable and `Sync`
//!
//! ## Module Structure
//!
//! - `header`: `PageHeader` zerocopy struct
//! - `schema`: `Schema` with pre-computed slot widths
//! - `layout`: `PageLayout` mapping `(column, row)` to offsets
//! - `view`: `Page` for bounds-checked zero-copy reading
//! - `builder`: `PageBuilder` for construction

pub mod builder;
pub mod header;
pub mod layout;
pub mod schema;
pub mod view;


pub use builder::PageBuilder;
pub use header::PageHeader;
pub use layout::PageLayout;
pub use schema::Schema;
pub use view::Page;
