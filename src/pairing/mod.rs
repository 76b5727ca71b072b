//! Request/response pairing over a reassembled packet sequence.
//!
//! Packets are split by their acknowledgement semantics: those expecting no
//! reply are singular, the rest are requests or responses. Requests are then
//! matched, in order, to the earliest unclaimed response with the same
//! sequence identifier travelling the opposite way.

pub mod engine;
pub mod result;

pub use engine::classify;
pub use result::{Classification, ClassifiedOutput, Exchange, PairedResult, RenderedPacket, Summary};
