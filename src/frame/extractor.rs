//! Pure frame extraction over a [`DirectionBuffer`].

use tracing::debug;

use super::DirectionBuffer;
use crate::codec::{BusPacket, PacketCodec};

/// Result of one [`extract_frames`] call.
#[derive(Debug)]
pub struct Extraction<P> {
    /// Packets decoded from the head of the buffer, in wire order.
    pub packets: Vec<P>,
    /// Carry-over state for the next chunk of the same direction.
    pub remainder: DirectionBuffer,
    /// Bytes dropped because the remainder lost sync alignment.
    pub discarded: usize,
}

/// Decode as many packets as possible from the head of `buffer`.
///
/// Extraction stops at the first decode failure, leaving the buffer intact
/// for more data, and after any invalid packet. An invalid packet whose
/// declared length is shorter than the buffer is re-decoded from exactly that
/// many bytes before it is accepted, so an over-read into the next frame does
/// not corrupt it. Whatever remains afterwards is kept only if it begins with
/// the sync byte.
///
/// # Examples
///
/// ```
/// use busframe::{
///     codec::{CommandType, SyncFrame, SyncFrameCodec},
///     frame::{DirectionBuffer, extract_frames},
/// };
///
/// let frame = SyncFrame::new(CommandType::Command, 1, 7, 0x01, vec![0xAB]).unwrap();
/// let mut buffer = DirectionBuffer::new();
/// buffer.append(&frame.encode());
///
/// let extraction = extract_frames(&SyncFrameCodec::default(), buffer);
/// assert_eq!(extraction.packets, vec![frame]);
/// assert!(extraction.remainder.is_empty());
/// ```
pub fn extract_frames<C: PacketCodec>(codec: &C, mut buffer: DirectionBuffer) -> Extraction<C::Packet> {
    let mut packets = Vec::new();

    while !buffer.is_empty() {
        let available = buffer.len();
        let mut packet = match codec.decode(buffer.as_bytes()) {
            Ok(packet) => packet,
            Err(error) => {
                debug!(%error, buffered = available, "extraction halted awaiting more data");
                break;
            }
        };

        let declared = packet.length();
        if !packet.is_valid() && declared < available {
            match codec.decode(&buffer.as_bytes()[..declared]) {
                Ok(truncated) => packet = truncated,
                Err(error) => {
                    debug!(%error, declared, "re-decode of declared length failed");
                }
            }
        }

        let consumed = buffer.consume(packet.length());
        let valid = packet.is_valid();
        packets.push(packet);
        if !valid || consumed == 0 {
            break;
        }
    }

    let discarded = buffer.retain_synchronized();
    if discarded > 0 {
        debug!(discarded, "dropped unsynchronized remainder");
    }

    Extraction {
        packets,
        remainder: buffer,
        discarded,
    }
}
