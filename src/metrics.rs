//! Metric helpers for `busframe`.
//!
//! This module defines metric names and simple helper functions
//! wrapping the [`metrics`](https://docs.rs/metrics) crate. Nothing is
//! exported unless the embedding application installs a recorder.

use metrics::counter;

use crate::direction::Direction;

/// Name of the counter tracking skipped trace records.
pub const RECORDS_SKIPPED: &str = "busframe_records_skipped_total";
/// Name of the counter tracking packets extracted from the byte streams.
pub const PACKETS_EXTRACTED: &str = "busframe_packets_extracted_total";
/// Name of the counter tracking packets per pairing outcome.
pub const PACKETS_CLASSIFIED: &str = "busframe_packets_classified_total";

/// Pairing outcome of a packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketClass {
    /// Half of a matched request/response pair.
    Paired,
    /// Expected a counterpart but none was found.
    Unpaired,
    /// No reply expected.
    Singular,
}

impl PacketClass {
    fn as_str(self) -> &'static str {
        match self {
            PacketClass::Paired => "paired",
            PacketClass::Unpaired => "unpaired",
            PacketClass::Singular => "singular",
        }
    }
}

/// Record a skipped trace record under its reason label.
pub fn inc_skipped(reason: &'static str) { counter!(RECORDS_SKIPPED, "reason" => reason).increment(1); }

/// Record an extracted packet for the given direction.
pub fn inc_packets(direction: Direction) {
    counter!(PACKETS_EXTRACTED, "direction" => direction.as_str()).increment(1);
}

/// Record `count` packets ending up in `class`.
pub fn add_classified(class: PacketClass, count: u64) {
    counter!(PACKETS_CLASSIFIED, "class" => class.as_str()).increment(count);
}
