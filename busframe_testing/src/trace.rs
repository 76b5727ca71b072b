//! Builder for delimited trace exports.

use busframe::{Direction, trace::TraceRecord};

use crate::frames::hex_spaced;

/// Accumulates trace rows in the default [`TraceLayout`](busframe::trace::TraceLayout).
#[derive(Clone, Debug, Default)]
pub struct TraceBuilder {
    rows: Vec<TraceRecord>,
}

impl TraceBuilder {
    /// Start an empty trace.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Append a raw row.
    #[must_use]
    pub fn row(mut self, marker: &str, timestamp: &str, direction: &str, payload: &str) -> Self {
        self.rows.push(TraceRecord::new(marker, timestamp, direction, payload));
        self
    }

    /// Append one payload record carrying `bytes`.
    #[must_use]
    pub fn data(self, timestamp: &str, direction: Direction, bytes: &[u8]) -> Self {
        self.row("DATA", timestamp, direction.as_str(), &hex_spaced(bytes))
    }

    /// Append `bytes` split into several payload records at `cuts`.
    ///
    /// Cut offsets are clamped to the byte length; every part is tagged with
    /// the timestamp suffixed by its index.
    #[must_use]
    pub fn data_split(mut self, timestamp: &str, direction: Direction, bytes: &[u8], cuts: &[usize]) -> Self {
        let mut start = 0;
        let mut bounds: Vec<usize> = cuts.iter().map(|&cut| cut.min(bytes.len())).collect();
        bounds.sort_unstable();
        bounds.push(bytes.len());
        for (index, end) in bounds.into_iter().enumerate() {
            if end <= start {
                continue;
            }
            self = self.data(&format!("{timestamp}.{index}"), direction, &bytes[start..end]);
            start = end;
        }
        self
    }

    /// Rows added so far.
    #[must_use]
    pub fn records(&self) -> Vec<TraceRecord> { self.rows.clone() }

    /// Render the trace as CSV with a header row.
    #[must_use]
    pub fn build(&self) -> String {
        let mut out = String::from("marker,timestamp,direction,payload\n");
        for row in &self.rows {
            out.push_str(&format!(
                "{},{},{},{}\n",
                row.marker, row.timestamp, row.direction, row.payload
            ));
        }
        out
    }
}
