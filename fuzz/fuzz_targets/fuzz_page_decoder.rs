//! Fuzz testing for the page decoder.
//!
//! Feeds arbitrary bytes, interpreted against an arbitrary schema, through
//! `Page::new` and a full decode pass. Malformed pages must be rejected with
//! an error; nothing may panic or read outside the buffer.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use quickload::{LogicalType, Page, PageDecoder, Schema, ValueCollector};

#[derive(Debug, Arbitrary)]
struct DecoderInput {
    column_types: Vec<FuzzType>,
    projection: Vec<u8>,
    data: Vec<u8>,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char(u8),
    String,
    Timestamp,
    Binary,
}

impl From<FuzzType> for LogicalType {
    fn from(ft: FuzzType) -> Self {
        match ft {
            FuzzType::Boolean => LogicalType::Boolean,
            FuzzType::Byte => LogicalType::Byte,
            FuzzType::Short => LogicalType::Short,
            FuzzType::Int => LogicalType::Int,
            FuzzType::Long => LogicalType::Long,
            FuzzType::Float => LogicalType::Float,
            FuzzType::Double => LogicalType::Double,
            FuzzType::Char(w) => LogicalType::Char {
                width: u16::from(w.max(1)),
            },
            FuzzType::String => LogicalType::String,
            FuzzType::Timestamp => LogicalType::Timestamp,
            FuzzType::Binary => LogicalType::Binary,
        }
    }
}

fuzz_target!(|input: DecoderInput| {
    if input.column_types.len() > 64 {
        return;
    }

    let Ok(schema) = Schema::from_types(input.column_types.iter().map(|&t| t.into())) else {
        return;
    };
    let Ok(page) = Page::new(&input.data, &schema) else {
        return;
    };

    let mut collector = ValueCollector::new();
    if let Ok(rows) = PageDecoder::new(&schema).decode_page(&page, &mut collector) {
        assert_eq!(rows, page.row_count());
        assert_eq!(collector.row_count(), rows);
    }

    let projection = input
        .projection
        .iter()
        .map(|&i| i as usize % schema.column_count());
    if let Ok(decoder) = PageDecoder::with_projection(&schema, projection) {
        let mut collector = ValueCollector::new();
        let _ = decoder.decode_page(&page, &mut collector);
    }
});
