//! Sync-aligned byte accumulator for one transfer direction.

use bytes::{Buf, BytesMut};

use crate::codec::SYNC_BYTE;

/// Outcome of appending a chunk to a [`DirectionBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The chunk was appended; `dropped` leading bytes preceded the sync byte.
    Appended {
        /// Bytes discarded while aligning an empty buffer.
        dropped: usize,
    },
    /// The buffer was empty and the chunk held no sync byte.
    NoSync,
}

/// Accumulated, not yet decoded bytes of one direction.
///
/// A non-empty buffer always starts with [`SYNC_BYTE`]: appending to an empty
/// buffer skips everything before the first sync byte of the chunk, and
/// [`retain_synchronized`](Self::retain_synchronized) drops remainders that
/// lost alignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectionBuffer {
    bytes: BytesMut,
}

impl DirectionBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Number of buffered bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.bytes.len() }

    /// Returns `true` when nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Borrow the buffered bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    /// Returns `true` when the buffer opens with the sync byte.
    #[must_use]
    pub fn starts_with_sync(&self) -> bool { self.bytes.first() == Some(&SYNC_BYTE) }

    /// Append a newly arrived chunk.
    ///
    /// While the buffer is empty a frame can only start at a sync byte, so the
    /// chunk is trimmed to its first occurrence or rejected when it has none.
    pub fn append(&mut self, chunk: &[u8]) -> AppendOutcome {
        if !self.bytes.is_empty() {
            self.bytes.extend_from_slice(chunk);
            return AppendOutcome::Appended { dropped: 0 };
        }
        match chunk.iter().position(|&byte| byte == SYNC_BYTE) {
            Some(start) => {
                self.bytes.extend_from_slice(&chunk[start..]);
                AppendOutcome::Appended { dropped: start }
            }
            None => AppendOutcome::NoSync,
        }
    }

    /// Consume up to `count` bytes from the front, returning how many were
    /// removed.
    pub fn consume(&mut self, count: usize) -> usize {
        let count = count.min(self.bytes.len());
        self.bytes.advance(count);
        count
    }

    /// Drop the remainder unless it still starts with the sync byte.
    ///
    /// Returns the number of bytes discarded.
    pub fn retain_synchronized(&mut self) -> usize {
        if self.bytes.is_empty() || self.starts_with_sync() {
            return 0;
        }
        self.clear()
    }

    /// Discard everything, returning the number of bytes dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.bytes.len();
        self.bytes.clear();
        dropped
    }
}
