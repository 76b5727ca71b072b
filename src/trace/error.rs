//! Trace source failures and per-record skip reasons.

use std::io;

use thiserror::Error;

/// Errors raised by a trace source.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Reading the underlying source failed. Fatal for the run.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A row could not be parsed. The row is skipped.
    #[error("malformed trace row: {message}")]
    Malformed {
        /// Line the row started on, when known.
        line: Option<u64>,
        /// Parser diagnostic.
        message: String,
    },

    /// The configured delimiter is not a single ASCII character.
    #[error("trace delimiter {0:?} is not an ASCII character")]
    InvalidDelimiter(char),
}

impl TraceError {
    /// Returns `true` when the run cannot continue past this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool { !matches!(self, Self::Malformed { .. }) }
}

/// Why a trace record did not contribute bytes to a direction buffer.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SkipReason {
    /// The record marker does not denote a payload transfer.
    #[error("not a payload record: marker {marker:?}")]
    NotPayload {
        /// Marker found on the record.
        marker: String,
    },

    /// The direction token matches neither RX nor TX.
    #[error("unclassifiable direction {token:?}")]
    UnknownDirection {
        /// Token found on the record.
        token: String,
    },

    /// Nothing is left of the payload once whitespace is removed.
    #[error("empty payload")]
    EmptyPayload,

    /// The payload is not an even-length hex string.
    #[error("invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The direction buffer was empty and the chunk held no sync byte.
    #[error("no sync byte to start a frame")]
    NoSync,

    /// The row itself could not be parsed.
    #[error("malformed trace row")]
    MalformedRow {
        /// Line the row started on, when known.
        line: Option<u64>,
    },
}

impl SkipReason {
    /// Stable label used for counters and metric labels.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotPayload { .. } => "not_payload",
            Self::UnknownDirection { .. } => "unknown_direction",
            Self::EmptyPayload => "empty_payload",
            Self::InvalidHex(_) => "invalid_hex",
            Self::NoSync => "no_sync",
            Self::MalformedRow { .. } => "malformed_row",
        }
    }
}
