//! # Column Descriptors
//!
//! A `Column` identifies one field slot in a page's row layout: its position
//! and its logical type. Columns are created by the schema collaborator and
//! borrowed, never owned, by the readers.

use crate::types::LogicalType;

/// Immutable column descriptor.
///
/// `name` is only used in diagnostics; decoding never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    index: usize,
    logical_type: LogicalType,
    name: Option<Box<str>>,
}

impl Column {
    pub fn new(index: usize, logical_type: LogicalType) -> Self {
        Self {
            index,
            logical_type,
            name: None,
        }
    }

    pub fn named(index: usize, name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            index,
            logical_type,
            name: Some(name.into().into_boxed_str()),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} #{} ({})", name, self.index, self.logical_type),
            None => write!(f, "#{} ({})", self.index, self.logical_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_name_when_present() {
        let col = Column::named(2, "active", LogicalType::Boolean);
        assert_eq!(col.to_string(), "active #2 (boolean)");

        let col = Column::new(0, LogicalType::Char { width: 4 });
        assert_eq!(col.to_string(), "#0 (char(4))");
    }

    #[test]
    fn name_does_not_affect_identity_accessors() {
        let col = Column::named(5, "ts", LogicalType::Timestamp);
        assert_eq!(col.index(), 5);
        assert_eq!(col.logical_type(), LogicalType::Timestamp);
        assert_eq!(col.name(), Some("ts"));
    }
}
