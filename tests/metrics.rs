//! Tests for `busframe` metrics helpers.
//!
//! These tests verify that counters update as expected using
//! `metrics_util::debugging::DebuggingRecorder`.
use busframe::{
    AnalyzerConfig,
    Direction,
    analyze_reader,
    metrics::{self as bus_metrics, PacketClass},
};
use busframe_testing::{FrameSpec, TraceBuilder};
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use rstest::rstest;

/// Creates a debugging recorder and snapshotter for metrics testing.
fn debugging_recorder_setup() -> (Snapshotter, DebuggingRecorder) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    (snapshotter, recorder)
}

/// Sum of the counter `name` whose `label` equals `value`.
fn counter_value(snapshotter: &Snapshotter, name: &str, label: &str, value: &str) -> u64 {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter(|(k, _, _, _)| {
            k.key().name() == name && k.key().labels().any(|l| l.key() == label && l.value() == value)
        })
        .map(|(_, _, _, v)| match v {
            DebugValue::Counter(c) => c,
            _ => 0,
        })
        .sum()
}

#[rstest]
#[case::rx(Direction::Rx, "RX")]
#[case::tx(Direction::Tx, "TX")]
fn packet_metric_is_labelled_by_direction(#[case] direction: Direction, #[case] label: &str) {
    let (snapshotter, recorder) = debugging_recorder_setup();
    metrics::with_local_recorder(&recorder, || bus_metrics::inc_packets(direction));

    assert_eq!(
        counter_value(&snapshotter, bus_metrics::PACKETS_EXTRACTED, "direction", label),
        1
    );
}

#[test]
fn classified_metric_adds_counts() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    metrics::with_local_recorder(&recorder, || {
        bus_metrics::add_classified(PacketClass::Paired, 4);
        bus_metrics::add_classified(PacketClass::Paired, 2);
    });

    assert_eq!(
        counter_value(&snapshotter, bus_metrics::PACKETS_CLASSIFIED, "class", "paired"),
        6
    );
}

#[test]
fn analysis_reports_through_metrics() {
    let trace = TraceBuilder::new()
        .row("MARKER", "0", "", "")
        .data("1", Direction::Tx, &FrameSpec::request(1).encode())
        .data("2", Direction::Rx, &FrameSpec::response(1).encode())
        .data("3", Direction::Rx, &FrameSpec::notification(2).encode())
        .row("DATA", "4", "RX", "zz")
        .build();

    let (snapshotter, recorder) = debugging_recorder_setup();
    metrics::with_local_recorder(&recorder, || {
        analyze_reader(trace.as_bytes(), &AnalyzerConfig::default()).expect("analysis succeeds");
    });

    let skipped = |reason| counter_value(&snapshotter, bus_metrics::RECORDS_SKIPPED, "reason", reason);
    assert_eq!(skipped("not_payload"), 1);
    assert_eq!(skipped("invalid_hex"), 1);
    let extracted = |label| counter_value(&snapshotter, bus_metrics::PACKETS_EXTRACTED, "direction", label);
    assert_eq!(extracted("TX"), 1);
    assert_eq!(extracted("RX"), 2);
    let classified = |class| counter_value(&snapshotter, bus_metrics::PACKETS_CLASSIFIED, "class", class);
    assert_eq!(classified("paired"), 2);
    assert_eq!(classified("singular"), 1);
}
