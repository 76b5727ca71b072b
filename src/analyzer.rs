//! End-to-end analysis: trace records in, classified packets out.

use std::{io, path::Path};

use tracing::info;

use crate::{
    codec::{PacketCodec, SyncFrameCodec},
    config::AnalyzerConfig,
    error::Result,
    pairing::{ClassifiedOutput, classify},
    reassembly::{ReassemblyStats, StreamReassembler},
    trace::{TraceError, TraceReader, TraceRecord},
};

/// Outcome of analysing one trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    /// Rendered pairing result.
    pub output: ClassifiedOutput,
    /// Reassembly counters.
    pub stats: ReassemblyStats,
}

/// Reassemble and classify `records` with a caller-supplied codec.
///
/// # Errors
///
/// Returns the first fatal [`TraceError`] raised by `records`.
pub fn analyze_records<C, I>(codec: C, config: &AnalyzerConfig, records: I) -> Result<Analysis>
where
    C: PacketCodec,
    I: IntoIterator<Item = std::result::Result<TraceRecord, TraceError>>,
{
    let reassembled = StreamReassembler::new(codec, config.trace.clone())
        .with_config(config.reassembly.clone())
        .run(records)?;
    let output = classify(reassembled.packets).render();
    let summary = output.summary();
    info!(
        paired = summary.paired,
        unpaired = summary.unpaired,
        singular = summary.singular,
        "analysis complete"
    );
    Ok(Analysis {
        output,
        stats: reassembled.stats,
    })
}

/// Analyse a delimited trace from any byte source using [`SyncFrameCodec`].
///
/// # Errors
///
/// Returns a [`BusframeError::Trace`](crate::BusframeError::Trace) when the
/// layout is unusable or the source fails.
pub fn analyze_reader<R: io::Read>(source: R, config: &AnalyzerConfig) -> Result<Analysis> {
    let reader = TraceReader::new(source, &config.trace)?;
    analyze_records(SyncFrameCodec::new(&config.codec), config, reader)
}

/// Analyse a trace file using [`SyncFrameCodec`].
///
/// # Errors
///
/// Returns a [`BusframeError::Trace`](crate::BusframeError::Trace) when the
/// file cannot be opened or read.
pub fn analyze_path(path: impl AsRef<Path>, config: &AnalyzerConfig) -> Result<Analysis> {
    let path = path.as_ref();
    info!(path = %path.display(), "analysing trace");
    let reader = TraceReader::open(path, &config.trace)?;
    analyze_records(SyncFrameCodec::new(&config.codec), config, reader)
}
