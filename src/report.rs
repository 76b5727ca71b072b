//! Text and JSON reports of an [`Analysis`].

use std::io::Write;

use serde::Serialize;

use crate::{
    analyzer::Analysis,
    direction::Direction,
    error::Result,
    pairing::{ClassifiedOutput, RenderedPacket, Summary},
    reassembly::ReassemblyStats,
};

/// Output format of [`write_report`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable sections.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    stats: &'a ReassemblyStats,
    #[serde(flatten)]
    output: &'a ClassifiedOutput,
}

/// Write `analysis` to `writer` in `format`.
///
/// # Errors
///
/// Returns an error if writing or JSON encoding fails.
pub fn write_report<W: Write>(writer: &mut W, analysis: &Analysis, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => write_text(writer, analysis)?,
        ReportFormat::Json => {
            let report = JsonReport {
                summary: analysis.output.summary(),
                stats: &analysis.stats,
                output: &analysis.output,
            };
            serde_json::to_writer_pretty(&mut *writer, &report)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn write_text<W: Write>(writer: &mut W, analysis: &Analysis) -> std::io::Result<()> {
    let stats = &analysis.stats;
    let summary = analysis.output.summary();

    writeln!(writer, "records:   {} ({} skipped)", stats.records, stats.skipped_total())?;
    for (reason, count) in &stats.skipped {
        writeln!(writer, "  {reason}: {count}")?;
    }
    for direction in Direction::ALL {
        writeln!(
            writer,
            "{direction}:        {} packets, {} bytes left over",
            stats.packets.get(direction),
            stats.residual_bytes.get(direction),
        )?;
    }
    writeln!(
        writer,
        "invalid:   {}\ndiscarded: {} bytes ({} buffer flushes)",
        stats.invalid_packets, stats.discarded_bytes, stats.overflow_flushes,
    )?;
    writeln!(
        writer,
        "paired:    {}\nunpaired:  {}\nsingular:  {}",
        summary.paired, summary.unpaired, summary.singular,
    )?;

    writeln!(writer, "\n== paired ==")?;
    for pair in &analysis.output.paired {
        writeln!(writer, "{}\n  -> {}", line(&pair.request), line(&pair.response))?;
    }
    writeln!(writer, "\n== unpaired ==")?;
    for packet in &analysis.output.unpaired {
        writeln!(writer, "{}", line(packet))?;
    }
    writeln!(writer, "\n== singular ==")?;
    for packet in &analysis.output.singular {
        writeln!(writer, "{}", line(packet))?;
    }
    Ok(())
}

fn line(packet: &RenderedPacket) -> String { format!("[{}] {} {}", packet.timestamp, packet.direction, packet.packet) }
