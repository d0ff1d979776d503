//! # Configuration Module
//!
//! Centralizes the constants that define the page format and the limits the
//! producer and decoder enforce. Interdependent values are co-located and
//! checked with compile-time assertions.
//!
//! Runtime knobs (such as the maximum page size a producer emits) are set
//! through builder methods, not here.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency documentation

pub mod constants;
pub use constants::*;
