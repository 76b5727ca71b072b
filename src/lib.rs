//! Public API for the `busframe` library.
//!
//! `busframe` extracts a protocol's framed packets from bus-capture traces,
//! reassembling chunked transfers per direction, and pairs request packets
//! with the responses that answer them.
//!
//! The pipeline is:
//!
//! 1. [`trace::TraceReader`] yields raw records from a delimited export.
//! 2. [`reassembly::StreamReassembler`] keeps one sync-aligned buffer per
//!    [`Direction`] and runs [`frame::extract_frames`] after each chunk.
//! 3. [`pairing::classify`] sorts the decoded packets into paired, unpaired
//!    and singular sets.
//!
//! [`analyzer`] wires the three together and [`report`] renders the result.

pub mod analyzer;
pub mod codec;
pub mod config;
pub mod direction;
pub mod error;
pub mod frame;
pub mod metrics;
pub mod pairing;
pub mod reassembly;
pub mod report;
pub mod trace;

pub use analyzer::{Analysis, analyze_path, analyze_reader, analyze_records};
pub use codec::{BusPacket, CommandType, DecodeError, PacketCodec, SYNC_BYTE, SyncFrame, SyncFrameCodec};
pub use config::AnalyzerConfig;
pub use direction::Direction;
pub use error::{BusframeError, Result};
pub use pairing::{ClassifiedOutput, PairedResult, RenderedPacket, classify};
pub use reassembly::{StreamReassembler, TimestampedPacket};
