//! Builders for sync frames.

use busframe::{CommandType, SyncFrame};

/// Declarative description of a frame to put on the wire.
#[derive(Clone, Debug)]
pub struct FrameSpec {
    command_type: CommandType,
    ack_type: u8,
    sequence_id: u8,
    command_id: u8,
    payload: Vec<u8>,
}

impl FrameSpec {
    /// A command expecting a reply.
    #[must_use]
    pub fn request(sequence_id: u8) -> Self { Self::new(CommandType::Command, 1, sequence_id) }

    /// An acknowledgement answering `sequence_id`.
    #[must_use]
    pub fn response(sequence_id: u8) -> Self { Self::new(CommandType::Acknowledgement, 1, sequence_id) }

    /// A command that expects no reply.
    #[must_use]
    pub fn notification(sequence_id: u8) -> Self { Self::new(CommandType::Command, 0, sequence_id) }

    fn new(command_type: CommandType, ack_type: u8, sequence_id: u8) -> Self {
        Self {
            command_type,
            ack_type,
            sequence_id,
            command_id: 0x01,
            payload: Vec::new(),
        }
    }

    /// Override the ack type.
    #[must_use]
    pub fn ack_type(mut self, ack_type: u8) -> Self {
        self.ack_type = ack_type;
        self
    }

    /// Override the command identifier.
    #[must_use]
    pub fn command_id(mut self, command_id: u8) -> Self {
        self.command_id = command_id;
        self
    }

    /// Set the payload bytes.
    #[must_use]
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Build the decoded form of the frame.
    ///
    /// # Panics
    ///
    /// Panics if the payload does not fit a frame.
    #[must_use]
    pub fn frame(&self) -> SyncFrame {
        SyncFrame::new(
            self.command_type,
            self.ack_type,
            self.sequence_id,
            self.command_id,
            self.payload.clone(),
        )
        .expect("test payload fits a frame")
    }

    /// Encode the frame to wire bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> { self.frame().encode() }
}

/// Render bytes as space-separated upper-case hex pairs, as analysers export
/// them.
#[must_use]
pub fn hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
