//! Direction-keyed stream reassembly.
//!
//! [`StreamReassembler`] consumes trace records in arrival order, keeps one
//! [`DirectionBuffer`](crate::frame::DirectionBuffer) for each direction and
//! runs the frame extractor every time a chunk lands. Packets come out tagged
//! with the timestamp of the chunk that completed them.

pub mod config;
pub mod reassembler;
pub mod stats;

pub use config::ReassemblyConfig;
pub use reassembler::{Reassembled, StreamReassembler, TimestampedPacket};
pub use stats::{DirectionCounts, ReassemblyStats};
