//! Transfer direction of a captured chunk.
//!
//! Bus analysers label every transfer with the side that produced it. The
//! engine only distinguishes two directions and keeps one reassembly buffer for
//! each of them.

use std::fmt;

use serde::Serialize;

/// Direction of a captured transfer relative to the analysed device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Inbound data received by the host.
    #[serde(rename = "RX")]
    Rx,
    /// Outbound data sent by the host.
    #[serde(rename = "TX")]
    Tx,
}

impl Direction {
    /// Both directions, in the order reports list them.
    pub const ALL: [Direction; 2] = [Direction::Rx, Direction::Tx];

    /// The direction a reply to traffic in `self` travels.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Rx => Direction::Tx,
            Direction::Tx => Direction::Rx,
        }
    }

    /// Short label used in reports, logs and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Rx => "RX",
            Direction::Tx => "TX",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn opposite_flips_direction() {
        assert_eq!(Direction::Rx.opposite(), Direction::Tx);
        assert_eq!(Direction::Tx.opposite(), Direction::Rx);
    }

    #[test]
    fn serializes_as_short_label() {
        let json = serde_json::to_string(&Direction::ALL).expect("serialize directions");
        assert_eq!(json, r#"["RX","TX"]"#);
    }
}
