//! # Page Format Constants
//!
//! Every value that the on-wire page layout depends on lives here. Producers
//! (`PageBuilder`) and consumers (`Page`, `PageReader`, the type decoders) both
//! import from this module so the two sides can never disagree on a width.
//!
//! ## Dependency Graph
//!
//! ```text
//! PAGE_HEADER_SIZE (16 bytes)
//!       │
//!       └─> null bitmaps start right after the header
//!
//! VAR_SLOT_SIZE (4 bytes, u32 heap offset)
//!       │
//!       ├─> MAX_PAGE_SIZE (must fit in a u32 offset)
//!       │
//!       └─> VAR_LENGTH_PREFIX_SIZE (4 bytes, u32 length before each heap entry)
//!
//! TIMESTAMP_SIZE (12 bytes) = 8 (epoch seconds) + 4 (nanoseconds)
//!
//! DEFAULT_MAX_PAGE_SIZE (1MB)
//!       │
//!       └─> must be <= MAX_PAGE_SIZE
//! ```
//!
//! ## Critical Invariants
//!
//! Enforced by compile-time assertions:
//!
//! 1. `DEFAULT_MAX_PAGE_SIZE <= MAX_PAGE_SIZE`
//! 2. `MAX_PAGE_SIZE` is addressable by a `VAR_SLOT_SIZE`-byte offset
//! 3. `TIMESTAMP_SIZE == 8 + 4`

// ============================================================================
// PAGE HEADER
// ============================================================================

/// Size of the page header in bytes. Null bitmaps begin at this offset.
pub const PAGE_HEADER_SIZE: usize = 16;

/// Magic number at offset 0 of every page ("QLPG" read as little-endian).
pub const PAGE_MAGIC: u32 = 0x4750_4C51;

/// Current page format version. Pages with any other version are rejected.
pub const PAGE_FORMAT_VERSION: u16 = 1;

// ============================================================================
// SLOT ENCODING
// These define how each logical type occupies its per-row slot
// ============================================================================

/// Width of the slot for variable-length types (string, binary).
/// The slot holds a u32 offset relative to the start of the heap.
pub const VAR_SLOT_SIZE: usize = 4;

/// Width of the length prefix that precedes every heap entry.
pub const VAR_LENGTH_PREFIX_SIZE: usize = 4;

/// Width of a timestamp slot: i64 epoch seconds followed by u32 nanoseconds.
pub const TIMESTAMP_SIZE: usize = 12;

/// The only boolean byte that decodes to `true`.
pub const BOOLEAN_TRUE: u8 = 1;

/// Byte written by producers for `false`. Readers treat every byte other
/// than [`BOOLEAN_TRUE`] as false.
pub const BOOLEAN_FALSE: u8 = 0;

/// Padding byte for fixed-width character slots.
pub const CHAR_PAD_BYTE: u8 = 0;

pub const NANOS_PER_SECOND: u32 = 1_000_000_000;

const _: () = assert!(TIMESTAMP_SIZE == 8 + 4, "TIMESTAMP_SIZE must be i64 + u32");

// ============================================================================
// LIMITS
// ============================================================================

/// Maximum number of columns; the header stores the count as u16.
pub const MAX_COLUMN_COUNT: usize = u16::MAX as usize;

/// Maximum width of a fixed-width character column.
pub const MAX_CHAR_WIDTH: usize = u16::MAX as usize;

/// Hard upper bound on page size: every offset must fit in a u32.
pub const MAX_PAGE_SIZE: usize = u32::MAX as usize;

/// Page size at which `PageBuilder::is_full` starts reporting true.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 1024 * 1024;

const _: () = assert!(
    DEFAULT_MAX_PAGE_SIZE <= MAX_PAGE_SIZE,
    "DEFAULT_MAX_PAGE_SIZE must be <= MAX_PAGE_SIZE"
);

const _: () = assert!(
    VAR_SLOT_SIZE == size_of::<u32>() && MAX_PAGE_SIZE <= u32::MAX as usize,
    "heap offsets must be addressable by a VAR_SLOT_SIZE-byte slot"
);

// ============================================================================
// INLINE CAPACITIES
// SmallVec sizes for the hot decode path
// ============================================================================

/// Values kept inline per collected row before spilling to the heap.
pub const ROW_INLINE_CAPACITY: usize = 16;

/// Column indices kept inline in a decoder projection.
pub const PROJECTION_INLINE_CAPACITY: usize = 16;
