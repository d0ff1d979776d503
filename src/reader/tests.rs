//! Tests for the reader module

use std::borrow::Cow;

use super::*;
use crate::page::{Page, PageBuilder, Schema};
use crate::types::{Column, LogicalType, Timestamp, Value};
use eyre::Result;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Null(usize),
    Boolean(usize, bool),
    Byte(usize, i8),
    Short(usize, i16),
    Int(usize, i32),
    Long(usize, i64),
    Float(usize, f32),
    Double(usize, f64),
    Char(usize, Vec<u8>),
    String(usize, Vec<u8>),
    Timestamp(usize, Timestamp),
    Binary(usize, Vec<u8>),
    BeginRow(usize),
    EndRow(usize),
}

#[derive(Debug, Default)]
struct CallLog {
    calls: Vec<Call>,
    fail_on_column: Option<usize>,
}

impl CallLog {
    fn record(&mut self, column: &Column, call: Call) -> Result<()> {
        if self.fail_on_column == Some(column.index()) {
            eyre::bail!("sink rejected column {}", column.index());
        }
        self.calls.push(call);
        Ok(())
    }
}

impl<'a> RecordReader<'a> for CallLog {
    fn read_null(&mut self, column: &Column) -> Result<()> {
        self.record(column, Call::Null(column.index()))
    }

    fn read_boolean(&mut self, column: &Column, value: bool) -> Result<()> {
        self.record(column, Call::Boolean(column.index(), value))
    }

    fn read_byte(&mut self, column: &Column, value: i8) -> Result<()> {
        self.record(column, Call::Byte(column.index(), value))
    }

    fn read_short(&mut self, column: &Column, value: i16) -> Result<()> {
        self.record(column, Call::Short(column.index(), value))
    }

    fn read_int(&mut self, column: &Column, value: i32) -> Result<()> {
        self.record(column, Call::Int(column.index(), value))
    }

    fn read_long(&mut self, column: &Column, value: i64) -> Result<()> {
        self.record(column, Call::Long(column.index(), value))
    }

    fn read_float(&mut self, column: &Column, value: f32) -> Result<()> {
        self.record(column, Call::Float(column.index(), value))
    }

    fn read_double(&mut self, column: &Column, value: f64) -> Result<()> {
        self.record(column, Call::Double(column.index(), value))
    }

    fn read_char(&mut self, column: &Column, value: &'a [u8]) -> Result<()> {
        self.record(column, Call::Char(column.index(), value.to_vec()))
    }

    fn read_string(&mut self, column: &Column, value: &'a [u8]) -> Result<()> {
        self.record(column, Call::String(column.index(), value.to_vec()))
    }

    fn read_timestamp(&mut self, column: &Column, value: Timestamp) -> Result<()> {
        self.record(column, Call::Timestamp(column.index(), value))
    }

    fn read_binary(&mut self, column: &Column, value: &'a [u8]) -> Result<()> {
        self.record(column, Call::Binary(column.index(), value.to_vec()))
    }

    fn begin_row(&mut self, row: usize) -> Result<()> {
        self.calls.push(Call::BeginRow(row));
        Ok(())
    }

    fn end_row(&mut self, row: usize) -> Result<()> {
        self.calls.push(Call::EndRow(row));
        Ok(())
    }
}

fn build_page(schema: &Schema, rows: &[Vec<Value<'_>>]) -> Vec<u8> {
    let mut builder = PageBuilder::new(schema);
    for row in rows {
        for (idx, value) in row.iter().enumerate() {
            builder.set_value(idx, value).unwrap();
        }
        builder.finish_row().unwrap();
    }
    builder.build().unwrap()
}

fn slot_offset(data: &[u8], schema: &Schema, column: usize, row: usize) -> usize {
    let page = Page::new(data, schema).unwrap();
    page.layout().slot_offset(column, row).unwrap()
}

fn decode_cell(data: &[u8], schema: &Schema, column: usize, row: usize) -> Vec<Call> {
    let page = Page::new(data, schema).unwrap();
    let reader = PageReader::at_row(&page, row).unwrap();
    let mut log = CallLog::default();
    TypeReader::new(&reader, &schema.columns()[column])
        .decode(&mut log)
        .unwrap();
    log.calls
}

#[test]
fn page_reader_starts_at_first_row_and_advances() {
    let schema = Schema::from_types([LogicalType::Int]).unwrap();
    let data = build_page(&schema, &[vec![Value::Int(1)], vec![Value::Int(2)]]);
    let page = Page::new(&data, &schema).unwrap();

    let mut reader = PageReader::new(&page);
    assert_eq!(reader.row(), 0);
    assert_eq!(reader.row_count(), 2);
    assert!(reader.advance());
    assert_eq!(reader.row(), 1);
    assert!(!reader.advance());
    assert_eq!(reader.row(), 1, "advance past the end keeps position");
}

#[test]
fn page_reader_seek_rejects_rows_outside_page() {
    let schema = Schema::from_types([LogicalType::Int]).unwrap();
    let data = build_page(&schema, &[vec![Value::Int(1)]]);
    let page = Page::new(&data, &schema).unwrap();

    let err = PageReader::at_row(&page, 1).unwrap_err();
    assert!(err.to_string().contains("cannot seek to row 1 of 1"));

    let mut reader = PageReader::new(&page);
    assert!(reader.seek(5).is_err());
    assert_eq!(reader.row(), 0);
}

#[test]
fn page_reader_offset_is_pure_for_a_fixed_row() {
    let schema = Schema::from_types([LogicalType::Long, LogicalType::Short]).unwrap();
    let rows = vec![vec![Value::Long(1), Value::Short(1)]; 3];
    let data = build_page(&schema, &rows);
    let page = Page::new(&data, &schema).unwrap();

    let mut reader = PageReader::new(&page);
    let first = reader.offset(1).unwrap();
    assert_eq!(reader.offset(1).unwrap(), first);
    assert_eq!(reader.offset(1).unwrap(), first);

    reader.advance();
    assert_eq!(reader.offset(1).unwrap(), first + 2);
}

#[test]
fn page_reader_rejects_column_outside_layout() {
    let schema = Schema::from_types([LogicalType::Int]).unwrap();
    let data = build_page(&schema, &[vec![Value::Int(1)]]);
    let page = Page::new(&data, &schema).unwrap();
    let reader = PageReader::new(&page);

    assert!(reader.is_null(1).is_err());
    assert!(reader.offset(1).is_err());
}

#[test]
fn boolean_decodes_true_only_for_one() {
    let schema = Schema::from_types([LogicalType::Boolean]).unwrap();
    let mut data = build_page(&schema, &[vec![Value::Boolean(false)]]);
    let offset = slot_offset(&data, &schema, 0, 0);

    for (byte, expected) in [(0x01, true), (0x00, false), (0x7F, false), (0xFF, false), (0x02, false)] {
        data[offset] = byte;
        assert_eq!(
            decode_cell(&data, &schema, 0, 0),
            vec![Call::Boolean(0, expected)],
            "byte {:#04x}",
            byte
        );
    }
}

#[test]
fn null_cell_calls_only_read_null_whatever_the_slot_holds() {
    let schema = Schema::from_types([LogicalType::Boolean, LogicalType::String]).unwrap();
    let mut data = build_page(&schema, &[vec![Value::Null, Value::Null]]);

    let bool_slot = slot_offset(&data, &schema, 0, 0);
    let string_slot = slot_offset(&data, &schema, 1, 0);
    data[bool_slot] = 0x01;
    data[string_slot..string_slot + 4].copy_from_slice(&u32::MAX.to_le_bytes());

    assert_eq!(decode_cell(&data, &schema, 0, 0), vec![Call::Null(0)]);
    assert_eq!(decode_cell(&data, &schema, 1, 0), vec![Call::Null(1)]);
}

#[test]
fn every_type_dispatches_to_its_own_method() {
    let schema = Schema::from_types([
        LogicalType::Boolean,
        LogicalType::Byte,
        LogicalType::Short,
        LogicalType::Int,
        LogicalType::Long,
        LogicalType::Float,
        LogicalType::Double,
        LogicalType::Char { width: 5 },
        LogicalType::String,
        LogicalType::Timestamp,
        LogicalType::Binary,
    ])
    .unwrap();
    let ts = Timestamp::new(1_700_000_000, 123_456_789).unwrap();
    let data = build_page(
        &schema,
        &[vec![
            Value::Boolean(true),
            Value::Byte(-8),
            Value::Short(-300),
            Value::Int(70_000),
            Value::Long(-5_000_000_000),
            Value::Float(1.5),
            Value::Double(-0.25),
            Value::char("abc"),
            Value::string("héllo"),
            Value::Timestamp(ts),
            Value::binary(&[0, 1, 2]),
        ]],
    );

    let expected = [
        Call::Boolean(0, true),
        Call::Byte(1, -8),
        Call::Short(2, -300),
        Call::Int(3, 70_000),
        Call::Long(4, -5_000_000_000),
        Call::Float(5, 1.5),
        Call::Double(6, -0.25),
        Call::Char(7, b"abc".to_vec()),
        Call::String(8, "héllo".as_bytes().to_vec()),
        Call::Timestamp(9, ts),
        Call::Binary(10, vec![0, 1, 2]),
    ];

    for (idx, call) in expected.into_iter().enumerate() {
        assert_eq!(decode_cell(&data, &schema, idx, 0), vec![call]);
    }
}

#[test]
fn char_decode_strips_only_trailing_padding() {
    let schema = Schema::from_types([LogicalType::Char { width: 6 }]).unwrap();
    let data = build_page(
        &schema,
        &[
            vec![Value::Char(Cow::Borrowed(&b"a\0b"[..]))],
            vec![Value::char("")],
            vec![Value::char("full!!")],
        ],
    );

    assert_eq!(decode_cell(&data, &schema, 0, 0), vec![Call::Char(0, b"a\0b".to_vec())]);
    assert_eq!(decode_cell(&data, &schema, 0, 1), vec![Call::Char(0, vec![])]);
    assert_eq!(decode_cell(&data, &schema, 0, 2), vec![Call::Char(0, b"full!!".to_vec())]);
}

#[test]
fn invalid_utf8_string_is_surfaced_as_is() {
    let schema = Schema::from_types([LogicalType::String]).unwrap();
    let mut builder = PageBuilder::new(&schema);
    builder.set_string_bytes(0, &[0xC3, 0x28, 0xFF]).unwrap();
    builder.finish_row().unwrap();
    let data = builder.build().unwrap();

    assert_eq!(
        decode_cell(&data, &schema, 0, 0),
        vec![Call::String(0, vec![0xC3, 0x28, 0xFF])]
    );
}

#[test]
fn unnormalized_timestamp_is_surfaced_as_is() {
    let schema = Schema::from_types([LogicalType::Timestamp]).unwrap();
    let mut data = build_page(
        &schema,
        &[vec![Value::Timestamp(Timestamp::from_epoch_second(4))]],
    );
    let offset = slot_offset(&data, &schema, 0, 0);
    data[offset + 8..offset + 12].copy_from_slice(&u32::MAX.to_le_bytes());

    let calls = decode_cell(&data, &schema, 0, 0);
    assert_eq!(
        calls,
        vec![Call::Timestamp(0, Timestamp::from_raw_parts(4, u32::MAX))]
    );
}

#[test]
fn column_outside_layout_fails_without_visitor_call() {
    let schema = Schema::from_types([LogicalType::Int]).unwrap();
    let data = build_page(&schema, &[vec![Value::Int(3)]]);
    let page = Page::new(&data, &schema).unwrap();
    let reader = PageReader::new(&page);

    let stray = Column::new(4, LogicalType::Int);
    let mut log = CallLog::default();
    let err = TypeReader::new(&reader, &stray).decode(&mut log).unwrap_err();

    assert!(err.to_string().contains("column 4 outside page layout"));
    assert!(log.calls.is_empty());
}

#[test]
fn corrupt_heap_slot_aborts_decode() {
    let schema = Schema::from_types([LogicalType::Binary]).unwrap();
    let mut data = build_page(&schema, &[vec![Value::binary(b"abc")]]);
    let offset = slot_offset(&data, &schema, 0, 0);
    data[offset..offset + 4].copy_from_slice(&1000u32.to_le_bytes());

    let page = Page::new(&data, &schema).unwrap();
    let reader = PageReader::new(&page);
    let mut log = CallLog::default();
    let result = TypeReader::new(&reader, &schema.columns()[0]).decode(&mut log);

    assert!(result.is_err());
    assert!(log.calls.is_empty());
}

#[test]
fn decoder_brackets_each_row() {
    let schema = Schema::from_types([LogicalType::Int, LogicalType::Boolean]).unwrap();
    let data = build_page(
        &schema,
        &[
            vec![Value::Int(1), Value::Boolean(true)],
            vec![Value::Null, Value::Boolean(false)],
        ],
    );
    let page = Page::new(&data, &schema).unwrap();

    let mut log = CallLog::default();
    let decoded = PageDecoder::new(&schema).decode_page(&page, &mut log).unwrap();

    assert_eq!(decoded, 2);
    assert_eq!(
        log.calls,
        vec![
            Call::BeginRow(0),
            Call::Int(0, 1),
            Call::Boolean(1, true),
            Call::EndRow(0),
            Call::BeginRow(1),
            Call::Null(0),
            Call::Boolean(1, false),
            Call::EndRow(1),
        ]
    );
}

#[test]
fn decoder_follows_projection_order() {
    let schema =
        Schema::from_types([LogicalType::Int, LogicalType::Long, LogicalType::Short]).unwrap();
    let data = build_page(&schema, &[vec![Value::Int(1), Value::Long(2), Value::Short(3)]]);
    let page = Page::new(&data, &schema).unwrap();

    let decoder = PageDecoder::with_projection(&schema, [2, 0, 2]).unwrap();
    assert_eq!(decoder.projection(), &[2, 0, 2]);

    let mut log = CallLog::default();
    decoder.decode_page(&page, &mut log).unwrap();
    assert_eq!(
        log.calls,
        vec![
            Call::BeginRow(0),
            Call::Short(2, 3),
            Call::Int(0, 1),
            Call::Short(2, 3),
            Call::EndRow(0),
        ]
    );
}

#[test]
fn decoder_rejects_projection_outside_schema() {
    let schema = Schema::from_types([LogicalType::Int]).unwrap();
    let err = PageDecoder::with_projection(&schema, [0, 1]).unwrap_err();
    assert!(err.to_string().contains("projected column 1 outside schema"));
}

#[test]
fn decoder_rejects_row_range_outside_page() {
    let schema = Schema::from_types([LogicalType::Int]).unwrap();
    let data = build_page(&schema, &[vec![Value::Int(1)]]);
    let page = Page::new(&data, &schema).unwrap();

    let mut log = CallLog::default();
    let err = PageDecoder::new(&schema)
        .decode_rows(&page, 0..2, &mut log)
        .unwrap_err();
    assert!(err.to_string().contains("outside page"));
    assert!(log.calls.is_empty());
}

#[test]
fn decoder_decodes_empty_page() {
    let schema = Schema::from_types([LogicalType::String]).unwrap();
    let data = build_page(&schema, &[]);
    let page = Page::new(&data, &schema).unwrap();

    let mut log = CallLog::default();
    assert_eq!(PageDecoder::new(&schema).decode_page(&page, &mut log).unwrap(), 0);
    assert!(log.calls.is_empty());
}

#[test]
fn sink_error_aborts_pass_with_row_context() {
    let schema = Schema::from_types([LogicalType::Int, LogicalType::Int]).unwrap();
    let data = build_page(
        &schema,
        &[
            vec![Value::Int(1), Value::Int(2)],
            vec![Value::Int(3), Value::Int(4)],
        ],
    );
    let page = Page::new(&data, &schema).unwrap();

    let mut log = CallLog {
        fail_on_column: Some(1),
        ..CallLog::default()
    };
    let err = PageDecoder::new(&schema)
        .decode_page(&page, &mut log)
        .unwrap_err();

    assert!(err.to_string().contains("failed to decode row 0"));
    assert!(format!("{:?}", err).contains("sink rejected column 1"));
    assert_eq!(log.calls, vec![Call::BeginRow(0), Call::Int(0, 1)]);
}

#[test]
fn collector_gathers_rows_zero_copy() {
    let schema = Schema::from_types([LogicalType::String, LogicalType::Long]).unwrap();
    let data = build_page(
        &schema,
        &[
            vec![Value::string("a"), Value::Long(1)],
            vec![Value::Null, Value::Long(2)],
        ],
    );
    let page = Page::new(&data, &schema).unwrap();

    let mut collector = ValueCollector::new();
    PageDecoder::new(&schema)
        .decode_page(&page, &mut collector)
        .unwrap();

    assert_eq!(collector.row_count(), 2);
    assert_eq!(collector.rows()[0].as_slice(), &[Value::string("a"), Value::Long(1)]);
    assert_eq!(collector.rows()[1].as_slice(), &[Value::Null, Value::Long(2)]);
    assert!(collector.rows()[0][0].is_borrowed());

    let bytes = collector.rows()[0][0].as_bytes().unwrap();
    let range = data.as_ptr_range();
    assert!(range.contains(&bytes.as_ptr()), "payload points into the page");
}

#[test]
fn collector_opens_a_row_for_unbracketed_values() {
    let schema = Schema::from_types([LogicalType::Byte]).unwrap();
    let data = build_page(&schema, &[vec![Value::Byte(9)]]);
    let page = Page::new(&data, &schema).unwrap();
    let reader = PageReader::new(&page);

    let mut collector = ValueCollector::new();
    let column = &schema.columns()[0];
    TypeReader::new(&reader, column).decode(&mut collector).unwrap();
    TypeReader::new(&reader, column).decode(&mut collector).unwrap();

    assert_eq!(collector.row_count(), 1);
    assert_eq!(collector.values().count(), 2);
}

#[test]
fn visitor_can_be_passed_as_trait_object() {
    let schema = Schema::from_types([LogicalType::Short]).unwrap();
    let data = build_page(&schema, &[vec![Value::Short(7)]]);
    let page = Page::new(&data, &schema).unwrap();

    let mut log = CallLog::default();
    {
        let visitor: &mut dyn RecordReader<'_> = &mut log;
        PageDecoder::new(&schema).decode_page(&page, visitor).unwrap();
    }
    assert!(log.calls.contains(&Call::Short(0, 7)));
}
