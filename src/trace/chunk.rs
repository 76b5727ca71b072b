//! Classification of trace records into direction-tagged byte chunks.

use bytes::Bytes;

use super::{SkipReason, TraceLayout, TraceRecord};
use crate::direction::Direction;

/// Payload bytes of one transfer, ready for reassembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawChunk {
    /// Timestamp exactly as the trace spelled it.
    pub timestamp: String,
    /// Direction the bytes travelled.
    pub direction: Direction,
    /// Decoded payload bytes.
    pub payload: Bytes,
}

impl RawChunk {
    /// Build a chunk from already decoded bytes.
    #[must_use]
    pub fn new(timestamp: impl Into<String>, direction: Direction, payload: impl Into<Bytes>) -> Self {
        Self {
            timestamp: timestamp.into(),
            direction,
            payload: payload.into(),
        }
    }

    /// Classify a trace record.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] when the record is not a payload transfer,
    /// carries an unknown direction token, or has an empty or non-hex payload.
    pub fn from_record(record: &TraceRecord, layout: &TraceLayout) -> Result<Self, SkipReason> {
        if !layout.is_payload_marker(&record.marker) {
            return Err(SkipReason::NotPayload {
                marker: record.marker.clone(),
            });
        }
        let direction =
            layout
                .classify_direction(&record.direction)
                .ok_or_else(|| SkipReason::UnknownDirection {
                    token: record.direction.clone(),
                })?;
        let hex_text = sanitize_hex(&record.payload);
        if hex_text.is_empty() {
            return Err(SkipReason::EmptyPayload);
        }
        let payload = hex::decode(hex_text)?;

        Ok(Self::new(record.timestamp.clone(), direction, payload))
    }
}

/// Strip whitespace from a hex payload column.
#[must_use]
pub fn sanitize_hex(text: &str) -> String { text.chars().filter(|c| !c.is_whitespace()).collect() }
