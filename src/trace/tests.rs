//! Tests for trace parsing and record classification.

use std::io;

use rstest::{fixture, rstest};

use super::{RawChunk, SkipReason, TraceError, TraceLayout, TraceReader, TraceRecord, sanitize_hex};
use crate::direction::Direction;

#[fixture]
fn layout() -> TraceLayout { TraceLayout::default() }

#[rstest]
fn classifies_payload_record(layout: TraceLayout) {
    let record = TraceRecord::new("DATA", "0.001", "tx", "55 00 0a\t01");

    let chunk = RawChunk::from_record(&record, &layout).expect("payload record");

    assert_eq!(chunk.timestamp, "0.001");
    assert_eq!(chunk.direction, Direction::Tx);
    assert_eq!(chunk.payload.as_ref(), &[0x55, 0x00, 0x0A, 0x01]);
}

#[rstest]
#[case::control_record(TraceRecord::new("CTRL", "1", "RX", "55"), "not_payload")]
#[case::unknown_direction(TraceRecord::new("DATA", "1", "SIDEWAYS", "55"), "unknown_direction")]
#[case::blank_payload(TraceRecord::new("DATA", "1", "RX", "  \t "), "empty_payload")]
#[case::odd_length(TraceRecord::new("DATA", "1", "RX", "55 0"), "invalid_hex")]
#[case::non_hex(TraceRecord::new("DATA", "1", "RX", "zz"), "invalid_hex")]
fn skips_unusable_records(layout: TraceLayout, #[case] record: TraceRecord, #[case] label: &str) {
    let reason = RawChunk::from_record(&record, &layout).expect_err("record must be skipped");
    assert_eq!(reason.label(), label);
}

#[test]
fn layout_without_marker_column_accepts_every_row() {
    let layout = TraceLayout::default().marker_column(None);
    let record = TraceRecord::new("", "1", "IN", "55");

    assert!(RawChunk::from_record(&record, &layout).is_ok());
}

#[test]
fn sanitize_removes_all_whitespace() {
    assert_eq!(sanitize_hex(" 55\tAA\r\n0 1 "), "55AA01");
}

#[rstest]
fn reader_maps_configured_columns(layout: TraceLayout) {
    let text = "type,time,dir,data\nDATA,0.5,RX,55 01\nEVENT,0.6,,\n";

    let records = TraceReader::new(text.as_bytes(), &layout)
        .expect("valid layout")
        .collect::<Result<Vec<_>, _>>()
        .expect("rows parse");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].marker, "DATA");
    assert_eq!(records[0].timestamp, "0.5");
    assert_eq!(records[0].direction, "RX");
    assert_eq!(records[0].payload, "55 01");
    assert_eq!(records[0].line, 2);
    assert_eq!(records[1].marker, "EVENT");
    assert!(records[1].payload.is_empty());
}

#[test]
fn reader_fills_missing_columns_with_empty_strings() {
    let layout = TraceLayout::default().has_headers(false);

    let records = TraceReader::new("DATA,0.5\n".as_bytes(), &layout)
        .expect("valid layout")
        .collect::<Result<Vec<_>, _>>()
        .expect("rows parse");

    assert_eq!(records[0].direction, "");
    assert_eq!(records[0].payload, "");
}

#[test]
fn reader_honours_custom_delimiter_and_columns() {
    let layout = TraceLayout::default()
        .delimiter(';')
        .has_headers(false)
        .marker_column(None)
        .columns(0, 2, 1);

    let records = TraceReader::new("12:00;55 AA;OUT\n".as_bytes(), &layout)
        .expect("valid layout")
        .collect::<Result<Vec<_>, _>>()
        .expect("rows parse");

    assert_eq!(records[0].timestamp, "12:00");
    assert_eq!(records[0].payload, "55 AA");
    assert_eq!(records[0].direction, "OUT");
}

#[test]
fn reader_rejects_non_ascii_delimiter() {
    let layout = TraceLayout::default().delimiter('§');

    let Err(err) = TraceReader::new(io::empty(), &layout) else {
        panic!("non-ASCII delimiter must be rejected");
    };
    assert!(matches!(err, TraceError::InvalidDelimiter('§')));
    assert!(err.is_fatal());
}

#[test]
fn invalid_utf8_row_is_not_fatal() {
    let layout = TraceLayout::default().has_headers(false);
    let bytes: &[u8] = b"DATA,1,RX,55\nDATA,2,RX,\xff\xfe\n";

    let items: Vec<_> = TraceReader::new(bytes, &layout).expect("valid layout").collect();

    assert!(items[0].is_ok());
    let err = items[1].as_ref().expect_err("invalid UTF-8 row");
    assert!(!err.is_fatal());
}

#[test]
fn skip_reason_labels_are_stable() {
    assert_eq!(SkipReason::NoSync.label(), "no_sync");
    assert_eq!(SkipReason::MalformedRow { line: Some(3) }.label(), "malformed_row");
}
