//! Limits applied while buffering chunks.

use serde::Deserialize;

/// Configuration for [`StreamReassembler`](super::StreamReassembler).
///
/// # Examples
///
/// ```
/// use busframe::reassembly::ReassemblyConfig;
///
/// let config = ReassemblyConfig::default().max_buffer_len(1024);
/// assert_eq!(config.max_buffer_len, 1024);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReassemblyConfig {
    /// Upper bound on bytes held for one direction after extraction.
    ///
    /// A buffer still holding more than this once its packets have been
    /// extracted is flushed, so a corrupt length field cannot stall a
    /// direction for the rest of the trace. A buffer the codec reports as an
    /// incomplete frame is never flushed; the codec's own length limit bounds
    /// it instead.
    ///
    /// Default: 65536.
    pub max_buffer_len: usize,
}

impl Default for ReassemblyConfig {
    fn default() -> Self {
        Self {
            max_buffer_len: 64 * 1024,
        }
    }
}

impl ReassemblyConfig {
    /// Set the per-direction buffer cap.
    #[must_use]
    pub fn max_buffer_len(mut self, len: usize) -> Self {
        self.max_buffer_len = len;
        self
    }
}
