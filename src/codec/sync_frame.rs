//! Default codec for sync-byte delimited, CRC-protected frames.
//!
//! Frames use the following big-endian layout:
//!
//! ```text
//! +------+--------+---------+-----+-----+---------+--------+
//! | 0x55 | len:16 | control | seq | cmd | payload | crc:32 |
//! +------+--------+---------+-----+-----+---------+--------+
//! ```
//!
//! `len` counts every byte of the frame including the sync byte and the
//! trailing CRC-32. Bit 7 of `control` carries the command type and bits 0-3
//! the ack type.

use std::fmt;

use bytes::Bytes;
use serde::Deserialize;

use super::{BusPacket, CommandType, DecodeError, PacketCodec, SYNC_BYTE};

/// Bytes preceding the payload.
pub const HEADER_LEN: usize = 6;
/// Size of the trailing checksum.
pub const CRC_LEN: usize = 4;
/// Smallest frame the layout can express: header plus checksum.
pub const MIN_FRAME_LEN: usize = HEADER_LEN + CRC_LEN;
/// Largest frame the 16-bit length field can express.
pub const MAX_FRAME_LEN: usize = u16::MAX as usize;

const COMMAND_TYPE_BIT: u8 = 0x80;
const ACK_TYPE_MASK: u8 = 0x0F;

/// Codec limits.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Frames declaring a longer length are rejected as oversized.
    ///
    /// Values are clamped to the range the layout can express.
    ///
    /// Default: 4096.
    pub max_frame_length: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_frame_length: 4096,
        }
    }
}

impl CodecConfig {
    /// Set the maximum accepted frame length.
    #[must_use]
    pub fn max_frame_length(mut self, length: usize) -> Self {
        self.max_frame_length = length;
        self
    }
}

/// A decoded sync frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncFrame {
    length: usize,
    command_type: CommandType,
    ack_type: u8,
    sequence_id: u8,
    command_id: u8,
    payload: Bytes,
    valid: bool,
}

impl SyncFrame {
    /// Build a well-formed frame ready for [`encode`](Self::encode).
    ///
    /// Only the low four bits of `ack_type` are representable on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Oversized`] when the payload does not fit the
    /// 16-bit length field.
    pub fn new(
        command_type: CommandType,
        ack_type: u8,
        sequence_id: u8,
        command_id: u8,
        payload: impl Into<Bytes>,
    ) -> Result<Self, DecodeError> {
        let payload = payload.into();
        let length = payload.len() + MIN_FRAME_LEN;
        if length > MAX_FRAME_LEN {
            return Err(DecodeError::Oversized {
                declared: length,
                max: MAX_FRAME_LEN,
            });
        }
        Ok(Self {
            length,
            command_type,
            ack_type: ack_type & ACK_TYPE_MASK,
            sequence_id,
            command_id,
            payload,
            valid: true,
        })
    }

    /// Command identifier carried in the header.
    #[must_use]
    pub const fn command_id(&self) -> u8 { self.command_id }

    /// Borrow the payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Serialize the frame, computing its length field and checksum.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let length = self.payload.len() + MIN_FRAME_LEN;
        let mut out = Vec::with_capacity(length);
        out.push(SYNC_BYTE);
        // `new` bounds the payload so the length always fits.
        out.extend_from_slice(&u16::try_from(length).unwrap_or(u16::MAX).to_be_bytes());
        out.push(self.control_byte());
        out.push(self.sequence_id);
        out.push(self.command_id);
        out.extend_from_slice(&self.payload);
        let crc = crc32fast::hash(&out);
        out.extend_from_slice(&crc.to_be_bytes());
        out
    }

    fn control_byte(&self) -> u8 {
        let command = match self.command_type {
            CommandType::Command => 0,
            CommandType::Acknowledgement => COMMAND_TYPE_BIT,
        };
        command | (self.ack_type & ACK_TYPE_MASK)
    }
}

impl BusPacket for SyncFrame {
    fn length(&self) -> usize { self.length }

    fn command_type(&self) -> CommandType { self.command_type }

    fn ack_type(&self) -> u8 { self.ack_type }

    fn sequence_id(&self) -> u64 { u64::from(self.sequence_id) }

    fn is_valid(&self) -> bool { self.valid }

    fn short_string(&self) -> String { self.to_string() }
}

impl fmt::Display for SyncFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} seq={} ack={} cmd={:#04x} len={} data={} [{}]",
            self.command_type,
            self.sequence_id,
            self.ack_type,
            self.command_id,
            self.length,
            hex::encode_upper(self.payload()),
            if self.valid { "crc ok" } else { "invalid" },
        )
    }
}

/// Decoder for [`SyncFrame`]s.
#[derive(Clone, Debug)]
pub struct SyncFrameCodec {
    max_frame_length: usize,
}

impl Default for SyncFrameCodec {
    fn default() -> Self { Self::new(&CodecConfig::default()) }
}

impl SyncFrameCodec {
    /// Construct a codec from its configuration.
    #[must_use]
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            max_frame_length: config.max_frame_length.clamp(MIN_FRAME_LEN, MAX_FRAME_LEN),
        }
    }

    /// Maximum frame length this codec accepts.
    #[must_use]
    pub fn max_frame_length(&self) -> usize { self.max_frame_length }

    fn declared_length(&self, bytes: &[u8]) -> Result<usize, DecodeError> {
        let Some(&first) = bytes.first() else {
            return Err(DecodeError::Incomplete {
                have: 0,
                need: HEADER_LEN,
            });
        };
        if first != SYNC_BYTE {
            return Err(DecodeError::MissingSync { found: first });
        }
        let Some(&[_, high, low, ..]) = bytes.get(..HEADER_LEN) else {
            return Err(DecodeError::Incomplete {
                have: bytes.len(),
                need: HEADER_LEN,
            });
        };
        let declared = usize::from(u16::from_be_bytes([high, low]));
        if declared < MIN_FRAME_LEN {
            return Err(DecodeError::InvalidLength {
                declared,
                min: MIN_FRAME_LEN,
            });
        }
        if declared > self.max_frame_length {
            return Err(DecodeError::Oversized {
                declared,
                max: self.max_frame_length,
            });
        }
        if bytes.len() < declared {
            return Err(DecodeError::Incomplete {
                have: bytes.len(),
                need: declared,
            });
        }
        Ok(declared)
    }
}

impl PacketCodec for SyncFrameCodec {
    type Packet = SyncFrame;

    /// Decode the frame at the head of `bytes`.
    ///
    /// A slice longer than the declared length is an over-read: the frame is
    /// built from the declared prefix but reported invalid without checking
    /// its checksum, so callers re-decode exactly that prefix.
    fn decode(&self, bytes: &[u8]) -> Result<SyncFrame, DecodeError> {
        let length = self.declared_length(bytes)?;
        let (body, crc_bytes) = bytes[..length].split_at(length - CRC_LEN);
        let control = body[3];
        let valid = bytes.len() == length && {
            let crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
            crc32fast::hash(body) == crc
        };

        Ok(SyncFrame {
            length,
            command_type: CommandType::from_bit(control & COMMAND_TYPE_BIT != 0),
            ack_type: control & ACK_TYPE_MASK,
            sequence_id: body[4],
            command_id: body[5],
            payload: Bytes::copy_from_slice(&body[HEADER_LEN..]),
            valid,
        })
    }
}
