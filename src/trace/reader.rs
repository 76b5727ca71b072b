//! Delimited-text trace reader backed by the `csv` crate.

use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};

use super::{TraceError, TraceLayout};

/// One row of a trace, reduced to the fields the engine reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceRecord {
    /// Line the row started on; 0 when unknown.
    pub line: u64,
    /// Record-type marker.
    pub marker: String,
    /// Timestamp text.
    pub timestamp: String,
    /// Direction token.
    pub direction: String,
    /// Raw hex payload text.
    pub payload: String,
}

impl TraceRecord {
    /// Build a record from its four fields.
    #[must_use]
    pub fn new(
        marker: impl Into<String>,
        timestamp: impl Into<String>,
        direction: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            line: 0,
            marker: marker.into(),
            timestamp: timestamp.into(),
            direction: direction.into(),
            payload: payload.into(),
        }
    }
}

/// Iterator over the records of a delimited trace.
///
/// Rows shorter than the layout expects read missing columns as empty
/// strings. Parse failures surface as non-fatal [`TraceError::Malformed`]
/// items; I/O failures as fatal [`TraceError::Io`].
pub struct TraceReader<R> {
    rows: StringRecordsIntoIter<R>,
    layout: TraceLayout,
}

impl TraceReader<File> {
    /// Open a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] if the file cannot be opened and
    /// [`TraceError::InvalidDelimiter`] for a non-ASCII delimiter.
    pub fn open(path: impl AsRef<Path>, layout: &TraceLayout) -> Result<Self, TraceError> {
        Self::new(File::open(path)?, layout)
    }
}

impl<R: io::Read> TraceReader<R> {
    /// Wrap any byte source.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidDelimiter`] for a non-ASCII delimiter.
    pub fn new(source: R, layout: &TraceLayout) -> Result<Self, TraceError> {
        let delimiter =
            u8::try_from(layout.delimiter).map_err(|_| TraceError::InvalidDelimiter(layout.delimiter))?;
        if !delimiter.is_ascii() {
            return Err(TraceError::InvalidDelimiter(layout.delimiter));
        }
        let rows = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(layout.has_headers)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source)
            .into_records();
        Ok(Self {
            rows,
            layout: layout.clone(),
        })
    }

    fn record_from_row(&self, row: &StringRecord) -> TraceRecord {
        let field = |column: usize| row.get(column).unwrap_or_default().to_owned();
        TraceRecord {
            line: row.position().map_or(0, csv::Position::line),
            marker: self.layout.marker_column.map(field).unwrap_or_default(),
            timestamp: field(self.layout.timestamp_column),
            direction: field(self.layout.direction_column),
            payload: field(self.layout.payload_column),
        }
    }
}

impl<R: io::Read> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.rows.next()? {
            Ok(row) => Ok(self.record_from_row(&row)),
            Err(error) => Err(classify_csv_error(error)),
        };
        Some(item)
    }
}

fn classify_csv_error(error: csv::Error) -> TraceError {
    let line = error.position().map(csv::Position::line);
    if !error.is_io_error() {
        return TraceError::Malformed {
            line,
            message: error.to_string(),
        };
    }
    match error.into_kind() {
        csv::ErrorKind::Io(source) => TraceError::Io(source),
        kind => TraceError::Malformed {
            line,
            message: format!("{kind:?}"),
        },
    }
}
