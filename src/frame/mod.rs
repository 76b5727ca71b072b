//! Per-direction buffering and frame extraction.
//!
//! [`DirectionBuffer`] accumulates the bytes seen for one direction and keeps
//! them aligned on the synchronization byte. [`extract_frames`] is the pure
//! step that turns such a buffer into decoded packets and hands back whatever
//! could not be consumed yet.

pub mod buffer;
pub mod extractor;

pub use buffer::{AppendOutcome, DirectionBuffer};
pub use extractor::{Extraction, extract_frames};

#[cfg(test)]
mod tests;
