//! Analyzer configuration.
//!
//! Every section is optional in a configuration file; missing fields fall back
//! to their defaults. A complete file looks like:
//!
//! ```toml
//! [trace]
//! delimiter = ";"
//! has_headers = false
//! marker_column = 4
//! timestamp_column = 0
//! direction_column = 2
//! payload_column = 6
//! payload_markers = ["DATA", "BULK"]
//! rx_tokens = ["IN"]
//! tx_tokens = ["OUT"]
//!
//! [reassembly]
//! max_buffer_len = 8192
//!
//! [codec]
//! max_frame_length = 1024
//! ```

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{codec::CodecConfig, reassembly::ReassemblyConfig, trace::TraceLayout};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that failed to load.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid TOML for [`AnalyzerConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for one analysis run.
///
/// # Examples
///
/// ```
/// use busframe::{config::AnalyzerConfig, reassembly::ReassemblyConfig};
///
/// let config = AnalyzerConfig::from_toml_str("[codec]\nmax_frame_length = 512\n")
///     .unwrap()
///     .reassembly(ReassemblyConfig::default().max_buffer_len(2048));
///
/// assert_eq!(config.codec.max_frame_length, 512);
/// assert_eq!(config.reassembly.max_buffer_len, 2048);
/// assert!(config.trace.has_headers);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Trace column layout and vocabulary.
    pub trace: TraceLayout,
    /// Buffering limits.
    pub reassembly: ReassemblyConfig,
    /// Codec limits.
    pub codec: CodecConfig,
}

impl AnalyzerConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown sections.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> { Ok(toml::from_str(text)?) }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Replace the trace layout.
    #[must_use]
    pub fn trace(mut self, layout: TraceLayout) -> Self {
        self.trace = layout;
        self
    }

    /// Replace the buffering limits.
    #[must_use]
    pub fn reassembly(mut self, config: ReassemblyConfig) -> Self {
        self.reassembly = config;
        self
    }

    /// Replace the codec limits.
    #[must_use]
    pub fn codec(mut self, config: CodecConfig) -> Self {
        self.codec = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{AnalyzerConfig, ConfigError};

    #[test]
    fn empty_config_uses_defaults() {
        let config = AnalyzerConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AnalyzerConfig::from_toml_str("[trace]\ndelimiter = \";\"\nrx_tokens = [\"IN\"]\n")
            .expect("partial config parses");

        assert_eq!(config.trace.delimiter, ';');
        assert_eq!(config.trace.rx_tokens, vec!["IN".to_owned()]);
        assert_eq!(config.trace.payload_column, 3);
        assert_eq!(config.codec.max_frame_length, 4096);
    }

    #[test]
    fn unknown_section_is_rejected() {
        let err = AnalyzerConfig::from_toml_str("[transport]\nport = 1\n").expect_err("unknown section");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[reassembly]\nmax_buffer_len = 99").expect("write config");

        let config = AnalyzerConfig::load(file.path()).expect("config loads");
        assert_eq!(config.reassembly.max_buffer_len, 99);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AnalyzerConfig::load("/nonexistent/busframe.toml").expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/busframe.toml"));
    }
}
