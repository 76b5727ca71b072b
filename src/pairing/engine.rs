//! The matching algorithm.

use tracing::debug;

use super::{Classification, Exchange};
use crate::{
    codec::{BusPacket, CommandType},
    metrics::{self, PacketClass},
    reassembly::TimestampedPacket,
};

/// Partition `packets` into paired, unpaired and singular sets.
///
/// - Packets with an ack type of zero are singular whatever their command
///   type.
/// - Each remaining command claims the earliest unclaimed acknowledgement with
///   the same sequence identifier and the opposite direction. A response is
///   claimed at most once; later responses with the same identifier stay
///   available to later requests.
/// - Unclaimed commands are unpaired in encounter order, followed by
///   unclaimed acknowledgements.
///
/// Identifiers are compared as raw values with no time window, so unrelated
/// exchanges reusing an identifier can pair with each other.
#[must_use]
pub fn classify<P, I>(packets: I) -> Classification<P>
where
    P: BusPacket,
    I: IntoIterator<Item = TimestampedPacket<P>>,
{
    let mut result = Classification::default();
    let mut requests = Vec::new();
    let mut responses = Vec::new();

    for packet in packets {
        if !packet.packet.expects_reply() {
            result.singular.push(packet);
            continue;
        }
        match packet.packet.command_type() {
            CommandType::Command => requests.push(packet),
            CommandType::Acknowledgement => responses.push(packet),
        }
    }

    let mut claimed = vec![false; responses.len()];
    let matches: Vec<Option<usize>> = requests
        .iter()
        .map(|request| {
            let found = responses.iter().enumerate().position(|(index, response)| {
                !claimed[index]
                    && response.packet.sequence_id() == request.packet.sequence_id()
                    && response.direction == request.direction.opposite()
            });
            if let Some(index) = found {
                claimed[index] = true;
            }
            found
        })
        .collect();

    let mut responses: Vec<Option<TimestampedPacket<P>>> = responses.into_iter().map(Some).collect();
    for (request, matched) in requests.into_iter().zip(matches) {
        match matched.and_then(|index| responses[index].take()) {
            Some(response) => result.paired.push(Exchange { request, response }),
            None => result.unpaired.push(request),
        }
    }
    result.unpaired.extend(responses.into_iter().flatten());

    debug!(
        paired = result.paired.len(),
        unpaired = result.unpaired.len(),
        singular = result.singular.len(),
        "classified packets"
    );
    metrics::add_classified(PacketClass::Paired, 2 * result.paired.len() as u64);
    metrics::add_classified(PacketClass::Unpaired, result.unpaired.len() as u64);
    metrics::add_classified(PacketClass::Singular, result.singular.len() as u64);

    result
}
