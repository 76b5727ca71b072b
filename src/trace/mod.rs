//! Reading bus-capture traces.
//!
//! A trace is a delimited text export of a bus analyser: one row per captured
//! transfer with a record marker, a timestamp, a direction token and a hex
//! payload. [`TraceReader`] turns rows into [`TraceRecord`]s; [`RawChunk`]
//! classifies a record into a direction-tagged byte chunk or a
//! [`SkipReason`].

pub mod chunk;
pub mod error;
pub mod layout;
pub mod reader;

pub use chunk::{RawChunk, sanitize_hex};
pub use error::{SkipReason, TraceError};
pub use layout::TraceLayout;
pub use reader::{TraceReader, TraceRecord};

#[cfg(test)]
mod tests;
