//! Packet codec boundary used by the reassembly engine.
//!
//! The engine never interprets frame bytes itself. It hands the accumulated
//! buffer of one direction to a [`PacketCodec`] and reacts to the outcome:
//! a [`DecodeError`] means "wait for more data", while a decoded packet exposes
//! just enough through [`BusPacket`] to advance the buffer and to pair requests
//! with responses.
//!
//! [`SyncFrameCodec`] is the bundled implementation for the default wire
//! layout. Other protocols plug in by implementing the two traits.

use std::fmt;

use serde::Serialize;

pub mod error;
pub mod sync_frame;

pub use error::DecodeError;
pub use sync_frame::{CodecConfig, SyncFrame, SyncFrameCodec};

/// Synchronization byte opening every frame.
pub const SYNC_BYTE: u8 = 0x55;

/// Role of a packet within an exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CommandType {
    /// A request or command initiating an exchange (wire value 0).
    Command,
    /// An acknowledgement or response to an earlier request (wire value 1).
    Acknowledgement,
}

impl CommandType {
    /// Map the single command-type bit onto the enum.
    #[must_use]
    pub const fn from_bit(set: bool) -> Self {
        if set {
            CommandType::Acknowledgement
        } else {
            CommandType::Command
        }
    }

    /// Numeric wire value of the command type.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            CommandType::Command => 0,
            CommandType::Acknowledgement => 1,
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandType::Command => f.write_str("CMD"),
            CommandType::Acknowledgement => f.write_str("ACK"),
        }
    }
}

/// Attributes of a decoded packet the engine relies on.
pub trait BusPacket {
    /// Byte length of the wire frame as declared by its header.
    fn length(&self) -> usize;

    /// Whether the packet initiates or answers an exchange.
    fn command_type(&self) -> CommandType;

    /// Reply expectation; zero means no reply will ever follow.
    fn ack_type(&self) -> u8;

    /// Correlation key shared by a request and its response.
    fn sequence_id(&self) -> u64;

    /// Whether the frame passed the codec's integrity checks.
    fn is_valid(&self) -> bool;

    /// Compact human-readable rendering used in reports.
    fn short_string(&self) -> String;

    /// Returns `true` when the sender expects a reply.
    fn expects_reply(&self) -> bool { self.ack_type() != 0 }
}

/// Decoder turning raw frame bytes into packets.
pub trait PacketCodec {
    /// Packet type produced by this codec.
    type Packet: BusPacket;

    /// Decode a packet starting at the first byte of `bytes`.
    ///
    /// Implementations may be handed more bytes than one frame occupies. They
    /// should still decode the leading frame and report through
    /// [`BusPacket::is_valid`] whether the slice matched its declared length.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when `bytes` cannot even start a packet, for
    /// example because the header or the declared frame is incomplete.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Packet, DecodeError>;
}

impl<C: PacketCodec + ?Sized> PacketCodec for &C {
    type Packet = C::Packet;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Packet, DecodeError> { (**self).decode(bytes) }
}
