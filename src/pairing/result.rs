//! Result sets produced by the pairing engine.

use serde::Serialize;

use crate::{codec::BusPacket, direction::Direction, reassembly::TimestampedPacket};

/// A request together with the response it was matched to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange<P> {
    /// The request or command.
    pub request: TimestampedPacket<P>,
    /// The acknowledgement or response.
    pub response: TimestampedPacket<P>,
}

/// Typed pairing outcome; every input packet sits in exactly one place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification<P> {
    /// Matched exchanges in request encounter order.
    pub paired: Vec<Exchange<P>>,
    /// Requests without a response, then responses without a request.
    pub unpaired: Vec<TimestampedPacket<P>>,
    /// Packets that expect no reply, in encounter order.
    pub singular: Vec<TimestampedPacket<P>>,
}

impl<P> Default for Classification<P> {
    fn default() -> Self {
        Self {
            paired: Vec::new(),
            unpaired: Vec::new(),
            singular: Vec::new(),
        }
    }
}

impl<P: BusPacket> Classification<P> {
    /// Total number of packets across all three sets.
    #[must_use]
    pub fn packet_count(&self) -> usize { self.paired.len() * 2 + self.unpaired.len() + self.singular.len() }

    /// Render every packet through its short form.
    #[must_use]
    pub fn render(&self) -> ClassifiedOutput {
        ClassifiedOutput {
            paired: self
                .paired
                .iter()
                .map(|exchange| PairedResult {
                    request: RenderedPacket::from_packet(&exchange.request),
                    response: RenderedPacket::from_packet(&exchange.response),
                })
                .collect(),
            unpaired: self.unpaired.iter().map(RenderedPacket::from_packet).collect(),
            singular: self.singular.iter().map(RenderedPacket::from_packet).collect(),
        }
    }
}

/// A packet reduced to its report form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedPacket {
    /// Timestamp of the completing chunk.
    pub timestamp: String,
    /// Direction the packet travelled.
    pub direction: Direction,
    /// Short rendering produced by the codec.
    pub packet: String,
}

impl RenderedPacket {
    /// Render a timestamped packet.
    #[must_use]
    pub fn from_packet<P: BusPacket>(packet: &TimestampedPacket<P>) -> Self {
        Self {
            timestamp: packet.timestamp.clone(),
            direction: packet.direction,
            packet: packet.packet.short_string(),
        }
    }
}

/// A rendered request/response pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PairedResult {
    /// Rendered request.
    pub request: RenderedPacket,
    /// Rendered response.
    pub response: RenderedPacket,
}

/// Rendered pairing outcome handed to report writers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedOutput {
    /// Matched pairs.
    pub paired: Vec<PairedResult>,
    /// Packets whose counterpart is missing.
    pub unpaired: Vec<RenderedPacket>,
    /// Packets expecting no reply.
    pub singular: Vec<RenderedPacket>,
}

impl ClassifiedOutput {
    /// Count the members of each set.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            paired: self.paired.len(),
            unpaired: self.unpaired.len(),
            singular: self.singular.len(),
            packets: self.paired.len() * 2 + self.unpaired.len() + self.singular.len(),
        }
    }
}

/// Set sizes of a [`ClassifiedOutput`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of pairs.
    pub paired: usize,
    /// Number of unpaired packets.
    pub unpaired: usize,
    /// Number of singular packets.
    pub singular: usize,
    /// Packets across all sets, counting both halves of each pair.
    pub packets: usize,
}
