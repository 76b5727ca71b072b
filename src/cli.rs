//! Command line interface for the `busframe` binary.
//!
//! Kept free of crate-internal imports so the build script can render a man
//! page from it.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Report formats selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Command line arguments for the `busframe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "busframe",
    version,
    about = "Extract framed packets from a bus-capture trace and pair requests with responses"
)]
pub struct Cli {
    /// Trace file to analyse.
    pub trace: PathBuf,

    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to this file instead of standard output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter of the trace.
    #[arg(long)]
    pub delimiter: Option<char>,

    /// The trace has no header row.
    #[arg(long)]
    pub no_headers: bool,

    /// Treat every row as a payload record.
    #[arg(long)]
    pub no_marker: bool,

    /// Largest frame length the codec accepts.
    #[arg(long)]
    pub max_frame_length: Option<usize>,

    /// Increase log verbosity (repeat for more).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, OutputFormat};

    #[test]
    fn parses_trace_and_defaults() {
        let cli = Cli::parse_from(["busframe", "capture.csv"]);
        assert_eq!(cli.trace.to_str(), Some("capture.csv"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "busframe",
            "capture.csv",
            "--format",
            "json",
            "--delimiter",
            ";",
            "--no-headers",
            "--no-marker",
            "--max-frame-length",
            "512",
            "-vv",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.delimiter, Some(';'));
        assert!(cli.no_headers);
        assert!(cli.no_marker);
        assert_eq!(cli.max_frame_length, Some(512));
        assert_eq!(cli.verbose, 2);
    }
}
