//! Tests for sync alignment and frame extraction.
//!
//! Extraction is exercised with a tiny scripted codec so each case can spell
//! out its frames byte by byte: `[0x55, tag, length, ..]`, where a tag of
//! `0xEE` marks a corrupt frame.

use rstest::rstest;

use super::{AppendOutcome, DirectionBuffer, extract_frames};
use crate::codec::{BusPacket, CommandType, DecodeError, PacketCodec};

const CORRUPT_TAG: u8 = 0xEE;

#[derive(Clone, Debug, PartialEq, Eq)]
struct ScriptedPacket {
    tag: u8,
    length: usize,
    valid: bool,
}

impl BusPacket for ScriptedPacket {
    fn length(&self) -> usize { self.length }

    fn command_type(&self) -> CommandType { CommandType::Command }

    fn ack_type(&self) -> u8 { 0 }

    fn sequence_id(&self) -> u64 { u64::from(self.tag) }

    fn is_valid(&self) -> bool { self.valid }

    fn short_string(&self) -> String { format!("tag={:#04x}", self.tag) }
}

struct ScriptedCodec;

impl PacketCodec for ScriptedCodec {
    type Packet = ScriptedPacket;

    fn decode(&self, bytes: &[u8]) -> Result<ScriptedPacket, DecodeError> {
        match bytes {
            [0x55, tag, length, ..] if bytes.len() >= usize::from(*length) => Ok(ScriptedPacket {
                tag: *tag,
                length: usize::from(*length),
                valid: bytes.len() == usize::from(*length) && *tag != CORRUPT_TAG,
            }),
            [0x55, _, length, ..] => Err(DecodeError::Incomplete {
                have: bytes.len(),
                need: usize::from(*length),
            }),
            [0x55, ..] | [] => Err(DecodeError::Incomplete {
                have: bytes.len(),
                need: 3,
            }),
            [found, ..] => Err(DecodeError::MissingSync { found: *found }),
        }
    }
}

fn buffer_of(bytes: &[u8]) -> DirectionBuffer {
    let mut buffer = DirectionBuffer::new();
    assert_eq!(buffer.append(bytes), AppendOutcome::Appended { dropped: 0 });
    buffer
}

fn packet(tag: u8, length: usize) -> ScriptedPacket {
    ScriptedPacket {
        tag,
        length,
        valid: true,
    }
}

#[test]
fn empty_buffer_aligns_on_first_sync_byte() {
    let mut buffer = DirectionBuffer::new();

    let outcome = buffer.append(&[0x01, 0x02, 0x55, 0x03]);

    assert_eq!(outcome, AppendOutcome::Appended { dropped: 2 });
    assert_eq!(buffer.as_bytes(), &[0x55, 0x03]);
}

#[test]
fn empty_buffer_rejects_chunk_without_sync_byte() {
    let mut buffer = DirectionBuffer::new();

    assert_eq!(buffer.append(&[0x01, 0x02]), AppendOutcome::NoSync);
    assert!(buffer.is_empty());
}

#[test]
fn non_empty_buffer_appends_whole_chunk() {
    let mut buffer = buffer_of(&[0x55, 0x01]);

    let outcome = buffer.append(&[0x02, 0x55]);

    assert_eq!(outcome, AppendOutcome::Appended { dropped: 0 });
    assert_eq!(buffer.as_bytes(), &[0x55, 0x01, 0x02, 0x55]);
}

#[test]
fn extracts_back_to_back_frames() {
    let buffer = buffer_of(&[0x55, 0xAA, 4, 0x00, 0x55, 0xBB, 6, 0x01, 0x02, 0x03]);

    let extraction = extract_frames(&ScriptedCodec, buffer);

    assert_eq!(extraction.packets, vec![packet(0xAA, 4), packet(0xBB, 6)]);
    assert!(extraction.remainder.is_empty());
    assert_eq!(extraction.discarded, 0);
}

#[test]
fn discards_garbage_after_valid_frame() {
    let buffer = buffer_of(&[0x55, 0xAA, 4, 0x00, 0x13, 0x37]);

    let extraction = extract_frames(&ScriptedCodec, buffer);

    assert_eq!(extraction.packets, vec![packet(0xAA, 4)]);
    assert!(extraction.remainder.is_empty());
    assert_eq!(extraction.discarded, 2);
}

#[test]
fn incomplete_frame_is_left_in_place() {
    let buffer = buffer_of(&[0x55, 0xAA, 6, 0x00]);

    let extraction = extract_frames(&ScriptedCodec, buffer.clone());

    assert!(extraction.packets.is_empty());
    assert_eq!(extraction.remainder, buffer);
}

#[test]
fn over_read_is_redecoded_from_declared_length() {
    let buffer = buffer_of(&[0x55, 0xAA, 4, 0x00, 0x55, 0xBB, 6]);

    let extraction = extract_frames(&ScriptedCodec, buffer);

    assert_eq!(extraction.packets, vec![packet(0xAA, 4)]);
    assert_eq!(extraction.remainder.as_bytes(), &[0x55, 0xBB, 6]);
}

#[rstest]
#[case::followed_by_frame(&[0x55, CORRUPT_TAG, 4, 0x00, 0x55, 0xBB, 3], &[0x55, 0xBB, 3])]
#[case::followed_by_noise(&[0x55, CORRUPT_TAG, 4, 0x00, 0x01, 0x02], &[])]
fn invalid_frame_stops_extraction(#[case] input: &[u8], #[case] remainder: &[u8]) {
    let extraction = extract_frames(&ScriptedCodec, buffer_of(input));

    assert_eq!(
        extraction.packets,
        vec![ScriptedPacket {
            tag: CORRUPT_TAG,
            length: 4,
            valid: false,
        }]
    );
    assert_eq!(extraction.remainder.as_bytes(), remainder);
}

#[test]
fn zero_length_packet_does_not_spin() {
    let buffer = buffer_of(&[0x55, 0xAA, 0]);

    let extraction = extract_frames(&ScriptedCodec, buffer);

    assert_eq!(extraction.packets.len(), 1);
    assert_eq!(extraction.remainder.as_bytes(), &[0x55, 0xAA, 0]);
}
