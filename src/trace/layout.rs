//! Column layout and vocabulary of a trace export.

use serde::Deserialize;

use crate::direction::Direction;

/// Describes where a trace keeps the fields the engine needs.
///
/// Column indices are zero-based. Markers and direction tokens are compared
/// case-insensitively after trimming.
///
/// # Examples
///
/// ```
/// use busframe::{Direction, trace::TraceLayout};
///
/// let layout = TraceLayout::default()
///     .delimiter(';')
///     .marker_column(None)
///     .rx_tokens(["host<-dev"]);
///
/// assert_eq!(layout.classify_direction(" HOST<-DEV "), Some(Direction::Rx));
/// assert!(layout.is_payload_marker("anything"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TraceLayout {
    /// Field delimiter. Must be ASCII.
    ///
    /// Default: `,`.
    pub delimiter: char,

    /// Whether the first row names the columns and should be skipped.
    ///
    /// Default: true.
    pub has_headers: bool,

    /// Column holding the record marker, or `None` when every row carries
    /// payload.
    ///
    /// Default: 0.
    pub marker_column: Option<usize>,

    /// Column holding the timestamp. Default: 1.
    pub timestamp_column: usize,

    /// Column holding the direction token. Default: 2.
    pub direction_column: usize,

    /// Column holding the hex payload. Default: 3.
    pub payload_column: usize,

    /// Markers identifying payload records.
    ///
    /// Default: `DATA`.
    pub payload_markers: Vec<String>,

    /// Direction tokens classified as inbound.
    ///
    /// Default: `RX`, `IN`, `READ`.
    pub rx_tokens: Vec<String>,

    /// Direction tokens classified as outbound.
    ///
    /// Default: `TX`, `OUT`, `WRITE`.
    pub tx_tokens: Vec<String>,
}

impl Default for TraceLayout {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
            marker_column: Some(0),
            timestamp_column: 1,
            direction_column: 2,
            payload_column: 3,
            payload_markers: vec!["DATA".to_owned()],
            rx_tokens: ["RX", "IN", "READ"].map(str::to_owned).to_vec(),
            tx_tokens: ["TX", "OUT", "WRITE"].map(str::to_owned).to_vec(),
        }
    }
}

impl TraceLayout {
    /// Set the field delimiter.
    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether the first row is a header row.
    #[must_use]
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Set the marker column, or `None` to treat every row as payload.
    #[must_use]
    pub fn marker_column(mut self, column: Option<usize>) -> Self {
        self.marker_column = column;
        self
    }

    /// Set the timestamp, direction and payload columns.
    #[must_use]
    pub fn columns(mut self, timestamp: usize, direction: usize, payload: usize) -> Self {
        self.timestamp_column = timestamp;
        self.direction_column = direction;
        self.payload_column = payload;
        self
    }

    /// Replace the accepted payload markers.
    #[must_use]
    pub fn payload_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payload_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the inbound direction tokens.
    #[must_use]
    pub fn rx_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rx_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the outbound direction tokens.
    #[must_use]
    pub fn tx_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tx_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` when `marker` denotes a payload record.
    ///
    /// Always `true` when the layout has no marker column.
    #[must_use]
    pub fn is_payload_marker(&self, marker: &str) -> bool {
        self.marker_column.is_none() || matches_any(&self.payload_markers, marker)
    }

    /// Map a direction token onto a [`Direction`].
    #[must_use]
    pub fn classify_direction(&self, token: &str) -> Option<Direction> {
        if matches_any(&self.rx_tokens, token) {
            Some(Direction::Rx)
        } else if matches_any(&self.tx_tokens, token) {
            Some(Direction::Tx)
        } else {
            None
        }
    }
}

fn matches_any(candidates: &[String], value: &str) -> bool {
    let value = value.trim();
    candidates
        .iter()
        .any(|candidate| candidate.trim().eq_ignore_ascii_case(value))
}
