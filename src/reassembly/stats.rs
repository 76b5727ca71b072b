//! Counters collected during a reassembly run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{direction::Direction, trace::SkipReason};

/// A pair of counters, one per direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirectionCounts {
    /// Inbound count.
    pub rx: u64,
    /// Outbound count.
    pub tx: u64,
}

impl DirectionCounts {
    /// Counter for `direction`.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> u64 {
        match direction {
            Direction::Rx => self.rx,
            Direction::Tx => self.tx,
        }
    }

    /// Mutable counter for `direction`.
    pub fn get_mut(&mut self, direction: Direction) -> &mut u64 {
        match direction {
            Direction::Rx => &mut self.rx,
            Direction::Tx => &mut self.tx,
        }
    }

    /// Sum of both directions.
    #[must_use]
    pub const fn total(&self) -> u64 { self.rx + self.tx }
}

/// Summary of what happened to the records of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReassemblyStats {
    /// Records offered to the reassembler.
    pub records: u64,
    /// Records skipped, keyed by [`SkipReason::label`].
    pub skipped: BTreeMap<&'static str, u64>,
    /// Packets extracted per direction.
    pub packets: DirectionCounts,
    /// Extracted packets the codec reported invalid.
    pub invalid_packets: u64,
    /// Noise bytes dropped while aligning or after losing sync.
    pub discarded_bytes: u64,
    /// Buffers flushed for exceeding the configured cap.
    pub overflow_flushes: u64,
    /// Bytes still buffered per direction when the run finished.
    pub residual_bytes: DirectionCounts,
}

impl ReassemblyStats {
    /// Count one skipped record.
    pub fn record_skip(&mut self, reason: &SkipReason) {
        *self.skipped.entry(reason.label()).or_default() += 1;
    }

    /// Total number of skipped records.
    #[must_use]
    pub fn skipped_total(&self) -> u64 { self.skipped.values().sum() }

    /// Skipped records for one reason label.
    #[must_use]
    pub fn skipped_for(&self, label: &str) -> u64 { self.skipped.get(label).copied().unwrap_or(0) }
}
