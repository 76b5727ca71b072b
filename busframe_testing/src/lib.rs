//! Test support for `busframe`.
//!
//! Builders for wire frames and trace exports, plus a serialized log capture
//! fixture, so integration tests can describe a capture in a few lines:
//!
//! ```rust
//! use busframe::Direction;
//! use busframe_testing::{FrameSpec, TraceBuilder};
//!
//! let request = FrameSpec::request(7).payload([0x01]).encode();
//! let csv = TraceBuilder::new()
//!     .data("0.001", Direction::Tx, &request)
//!     .build();
//! assert!(csv.starts_with("marker,timestamp,direction,payload\n"));
//! ```

pub mod frames;
pub mod logging;
pub mod trace;

pub use frames::{FrameSpec, hex_spaced};
pub use logging::{LoggerHandle, assert_logged, logger};
pub use trace::TraceBuilder;
