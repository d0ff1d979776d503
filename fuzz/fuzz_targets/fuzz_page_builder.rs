//! Fuzz testing for the page builder.
//!
//! Applies arbitrary setter sequences to a `PageBuilder`, then checks that
//! whatever it builds opens as a valid `Page` and decodes to one collected
//! row per finished row.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use quickload::{LogicalType, Page, PageBuilder, PageDecoder, Schema, Timestamp, ValueCollector};

#[derive(Debug, Arbitrary)]
struct BuilderInput {
    schema: Vec<FuzzType>,
    operations: Vec<SetOperation>,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzType {
    Boolean,
    Int,
    Long,
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
            FuzzType::Int => LogicalType::Int,
            FuzzType::Long => LogicalType::Long,
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

#[derive(Debug, Arbitrary)]
enum SetOperation {
    SetNull(u8),
    SetBoolean(u8, bool),
    SetInt(u8, i32),
    SetLong(u8, i64),
    SetDouble(u8, f64),
    SetChar(u8, Vec<u8>),
    SetString(u8, Vec<u8>),
    SetTimestamp(u8, i64, u32),
    SetBinary(u8, Vec<u8>),
    FinishRow,
}

fuzz_target!(|input: BuilderInput| {
    if input.schema.is_empty() || input.schema.len() > 32 {
        return;
    }

    let Ok(schema) = Schema::from_types(input.schema.iter().map(|&t| t.into())) else {
        return;
    };
    let mut builder = PageBuilder::new(&schema);
    let col_count = schema.column_count();

    for op in &input.operations {
        match op {
            SetOperation::SetNull(idx) => {
                let _ = builder.set_null(*idx as usize % col_count);
            }
            SetOperation::SetBoolean(idx, val) => {
                let _ = builder.set_boolean(*idx as usize % col_count, *val);
            }
            SetOperation::SetInt(idx, val) => {
                let _ = builder.set_int(*idx as usize % col_count, *val);
            }
            SetOperation::SetLong(idx, val) => {
                let _ = builder.set_long(*idx as usize % col_count, *val);
            }
            SetOperation::SetDouble(idx, val) => {
                let _ = builder.set_double(*idx as usize % col_count, *val);
            }
            SetOperation::SetChar(idx, val) => {
                let _ = builder.set_char_bytes(*idx as usize % col_count, val);
            }
            SetOperation::SetString(idx, val) => {
                if val.len() <= 1024 {
                    let _ = builder.set_string_bytes(*idx as usize % col_count, val);
                }
            }
            SetOperation::SetTimestamp(idx, seconds, nanos) => {
                let ts = Timestamp::from_raw_parts(*seconds, *nanos);
                let _ = builder.set_timestamp(*idx as usize % col_count, ts);
            }
            SetOperation::SetBinary(idx, val) => {
                if val.len() <= 1024 {
                    let _ = builder.set_binary(*idx as usize % col_count, val);
                }
            }
            SetOperation::FinishRow => {
                let _ = builder.finish_row();
            }
        }
    }

    let Ok(data) = builder.build() else {
        return;
    };
    let page = Page::new(&data, &schema).expect("built page must open");
    assert_eq!(page.row_count(), builder.row_count());

    let mut collector = ValueCollector::new();
    let rows = PageDecoder::new(&schema)
        .decode_page(&page, &mut collector)
        .expect("built page must decode");
    assert_eq!(rows, builder.row_count());
});
