//! Tests for diagnostics emitted while analysing a trace.

use busframe::{
    AnalyzerConfig,
    Direction,
    analyze_reader,
    reassembly::ReassemblyConfig,
};
use busframe_testing::{FrameSpec, LoggerHandle, TraceBuilder, assert_logged, logger};
use log::Level;
use rstest::rstest;
use serial_test::serial;

#[rstest]
#[serial(logging)]
fn buffer_overflow_is_warned(mut logger: LoggerHandle) {
    let mut oversized = vec![0x55, 0xFF, 0xFF];
    oversized.resize(100, 0);
    let config = AnalyzerConfig::default().reassembly(ReassemblyConfig::default().max_buffer_len(64));
    let trace = TraceBuilder::new().data("1", Direction::Rx, &oversized).build();

    let analysis = analyze_reader(trace.as_bytes(), &config).expect("analysis succeeds");

    assert_eq!(analysis.stats.overflow_flushes, 1);
    assert_logged(&mut logger, Level::Warn, "direction buffer exceeded limit");
}

#[rstest]
#[case::marker("NOTE,0,,", "not a payload record")]
#[case::direction("DATA,0,UP,55", "unclassifiable direction")]
#[serial(logging)]
fn skipped_records_are_logged(mut logger: LoggerHandle, #[case] row: &str, #[case] reason: &str) {
    let trace = format!("marker,timestamp,direction,payload\n{row}\n");

    analyze_reader(trace.as_bytes(), &AnalyzerConfig::default()).expect("analysis succeeds");

    let messages = logger.drain_messages(Level::Debug);
    assert!(
        messages
            .iter()
            .any(|message| message.contains("skipped trace record") && message.contains(reason)),
        "missing skip record for {reason:?}: {messages:?}",
    );
}

#[rstest]
#[serial(logging)]
fn completed_analysis_is_summarised(mut logger: LoggerHandle) {
    let trace = TraceBuilder::new()
        .data("1", Direction::Tx, &FrameSpec::request(4).encode())
        .build();

    analyze_reader(trace.as_bytes(), &AnalyzerConfig::default()).expect("analysis succeeds");

    assert_logged(&mut logger, Level::Info, "analysis complete");
}
