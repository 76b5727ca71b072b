//! The per-direction buffering state machine.

use std::mem;

use tracing::{debug, info, warn};

use super::{ReassemblyConfig, ReassemblyStats};
use crate::{
    codec::{BusPacket, PacketCodec},
    direction::Direction,
    frame::{AppendOutcome, DirectionBuffer, extract_frames},
    metrics,
    trace::{RawChunk, SkipReason, TraceError, TraceLayout, TraceRecord},
};

/// A decoded packet with the metadata of the chunk that completed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimestampedPacket<P> {
    /// Timestamp of the completing chunk.
    pub timestamp: String,
    /// Direction the packet travelled.
    pub direction: Direction,
    /// The decoded packet.
    pub packet: P,
}

impl<P> TimestampedPacket<P> {
    /// Tag `packet` with its timestamp and direction.
    #[must_use]
    pub fn new(timestamp: impl Into<String>, direction: Direction, packet: P) -> Self {
        Self {
            timestamp: timestamp.into(),
            direction,
            packet,
        }
    }
}

/// Output of a finished reassembly run.
#[derive(Debug)]
pub struct Reassembled<P> {
    /// Packets in arrival order.
    pub packets: Vec<TimestampedPacket<P>>,
    /// Counters collected along the way.
    pub stats: ReassemblyStats,
}

/// Turns trace records into an ordered sequence of decoded packets.
///
/// Each direction owns an independent [`DirectionBuffer`]. A chunk arriving
/// while its buffer is empty is aligned on its first sync byte; later chunks
/// are appended whole. Every append runs [`extract_frames`] and keeps its
/// remainder for the next chunk of the same direction.
pub struct StreamReassembler<C: PacketCodec> {
    codec: C,
    layout: TraceLayout,
    config: ReassemblyConfig,
    rx: DirectionBuffer,
    tx: DirectionBuffer,
    packets: Vec<TimestampedPacket<C::Packet>>,
    stats: ReassemblyStats,
}

impl<C: PacketCodec> StreamReassembler<C> {
    /// Create a reassembler decoding with `codec` and classifying records
    /// according to `layout`.
    #[must_use]
    pub fn new(codec: C, layout: TraceLayout) -> Self {
        Self {
            codec,
            layout,
            config: ReassemblyConfig::default(),
            rx: DirectionBuffer::new(),
            tx: DirectionBuffer::new(),
            packets: Vec::new(),
            stats: ReassemblyStats::default(),
        }
    }

    /// Replace the buffering limits.
    #[must_use]
    pub fn with_config(mut self, config: ReassemblyConfig) -> Self {
        self.config = config;
        self
    }

    /// Packets emitted so far, in arrival order.
    #[must_use]
    pub fn packets(&self) -> &[TimestampedPacket<C::Packet>] { &self.packets }

    /// Counters collected so far.
    #[must_use]
    pub fn stats(&self) -> &ReassemblyStats { &self.stats }

    /// Bytes currently buffered for `direction`.
    #[must_use]
    pub fn buffered(&self, direction: Direction) -> &DirectionBuffer {
        match direction {
            Direction::Rx => &self.rx,
            Direction::Tx => &self.tx,
        }
    }

    /// Classify and feed one trace record.
    ///
    /// Returns the number of packets the record completed.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] when the record contributed nothing. The
    /// skip is already counted in [`stats`](Self::stats); callers may ignore
    /// it.
    pub fn push_record(&mut self, record: &TraceRecord) -> Result<usize, SkipReason> {
        self.stats.records += 1;
        let outcome = RawChunk::from_record(record, &self.layout).and_then(|chunk| self.feed(&chunk));
        if let Err(reason) = &outcome {
            debug!(line = record.line, %reason, "skipped trace record");
            self.note_skip(reason);
        }
        outcome
    }

    /// Feed an already classified chunk.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason::NoSync`] when the direction's buffer is empty and
    /// the chunk contains no sync byte.
    pub fn push_chunk(&mut self, chunk: &RawChunk) -> Result<usize, SkipReason> {
        self.stats.records += 1;
        let outcome = self.feed(chunk);
        if let Err(reason) = &outcome {
            debug!(timestamp = %chunk.timestamp, %reason, "skipped chunk");
            self.note_skip(reason);
        }
        outcome
    }

    /// Drive the reassembler over a whole trace and finish it.
    ///
    /// Malformed rows are counted and skipped.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`TraceError`]; no partial result is kept.
    pub fn run<I>(mut self, records: I) -> Result<Reassembled<C::Packet>, TraceError>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
    {
        for item in records {
            match item {
                Ok(record) => {
                    // Skips are counted by `push_record`.
                    let _ = self.push_record(&record);
                }
                Err(TraceError::Malformed { line, message }) => {
                    self.stats.records += 1;
                    debug!(?line, %message, "skipped malformed trace row");
                    self.note_skip(&SkipReason::MalformedRow { line });
                }
                Err(error) => return Err(error),
            }
        }
        Ok(self.finish())
    }

    /// Stop feeding and return the collected packets and counters.
    ///
    /// Bytes still buffered are reported as residual; they never formed a
    /// complete frame.
    #[must_use]
    pub fn finish(mut self) -> Reassembled<C::Packet> {
        for direction in Direction::ALL {
            *self.stats.residual_bytes.get_mut(direction) = self.buffered(direction).len() as u64;
        }
        info!(
            records = self.stats.records,
            skipped = self.stats.skipped_total(),
            packets = self.packets.len(),
            residual = self.stats.residual_bytes.total(),
            "reassembly finished"
        );
        Reassembled {
            packets: self.packets,
            stats: self.stats,
        }
    }

    fn feed(&mut self, chunk: &RawChunk) -> Result<usize, SkipReason> {
        let buffer = match chunk.direction {
            Direction::Rx => &mut self.rx,
            Direction::Tx => &mut self.tx,
        };
        match buffer.append(&chunk.payload) {
            AppendOutcome::NoSync => return Err(SkipReason::NoSync),
            AppendOutcome::Appended { dropped } => self.stats.discarded_bytes += dropped as u64,
        }
        if buffer.is_empty() {
            return Ok(0);
        }

        let extraction = extract_frames(&self.codec, mem::take(buffer));
        *buffer = extraction.remainder;
        self.stats.discarded_bytes += extraction.discarded as u64;

        let stalled = buffer.len() > self.config.max_buffer_len
            && self
                .codec
                .decode(buffer.as_bytes())
                .is_err_and(|error| !error.is_incomplete());
        if stalled {
            let flushed = buffer.clear();
            warn!(
                direction = %chunk.direction,
                flushed,
                limit = self.config.max_buffer_len,
                "direction buffer exceeded limit; flushed"
            );
            self.stats.discarded_bytes += flushed as u64;
            self.stats.overflow_flushes += 1;
        }

        let emitted = extraction.packets.len();
        for packet in extraction.packets {
            if !packet.is_valid() {
                self.stats.invalid_packets += 1;
            }
            *self.stats.packets.get_mut(chunk.direction) += 1;
            metrics::inc_packets(chunk.direction);
            self.packets.push(TimestampedPacket::new(
                chunk.timestamp.clone(),
                chunk.direction,
                packet,
            ));
        }
        Ok(emitted)
    }

    fn note_skip(&mut self, reason: &SkipReason) {
        self.stats.record_skip(reason);
        metrics::inc_skipped(reason.label());
    }
}
