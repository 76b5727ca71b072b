//! Decode failures reported by packet codecs.
//!
//! None of these are fatal. The frame extractor stops at the first failure,
//! keeps the buffer as it is and waits for the next chunk of the same
//! direction.

use thiserror::Error;

/// Reasons a codec could not start a packet at the head of a buffer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Not enough bytes for the header or for the declared frame.
    #[error("incomplete frame: have {have} bytes, need {need}")]
    Incomplete {
        /// Bytes currently available.
        have: usize,
        /// Bytes required to continue decoding.
        need: usize,
    },

    /// The first byte is not the synchronization byte.
    #[error("missing sync byte: found {found:#04x}")]
    MissingSync {
        /// Byte found where the sync byte was expected.
        found: u8,
    },

    /// Declared frame length is too small to hold a header and checksum.
    #[error("invalid frame length {declared}, minimum is {min}")]
    InvalidLength {
        /// Length taken from the header.
        declared: usize,
        /// Smallest length the layout allows.
        min: usize,
    },

    /// Declared frame length exceeds the configured maximum.
    #[error("frame exceeds max length: {declared} > {max}")]
    Oversized {
        /// Length taken from the header.
        declared: usize,
        /// Configured maximum frame length.
        max: usize,
    },
}

impl DecodeError {
    /// Returns `true` when more data could turn this failure into a packet.
    #[must_use]
    pub fn is_incomplete(&self) -> bool { matches!(self, Self::Incomplete { .. }) }
}
