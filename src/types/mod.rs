//! # Type System
//!
//! The closed set of logical types a page can carry, the column descriptor
//! that binds a type to a position, and the value forms that decoded fields
//! take when a sink materializes them.
//!
//! ## Module Structure
//!
//! - `logical_type`: `LogicalType` enum, slot widths and stable tags
//! - `column`: `Column` descriptor (index + logical type)
//! - `timestamp`: `Timestamp` (epoch seconds + nanoseconds)
//! - `value`: `Value<'a>` with zero-copy byte payloads
//!
//! ## Usage
//!
//! ```ignore
//! use quickload::types::{Column, LogicalType};
//!
//! let col = Column::named(0, "id", LogicalType::Long);
//! assert_eq!(col.logical_type().slot_width(), 8);
//! ```

mod column;
mod logical_type;
mod timestamp;
mod value;

pub use column::Column;
pub use logical_type::LogicalType;
pub use timestamp::Timestamp;
pub use value::Value;
