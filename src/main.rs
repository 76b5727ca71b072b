//! `busframe` command line entry point.
//!
//! Reads a trace, runs reassembly and pairing, and prints the report.

mod cli;

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use busframe::{
    analyzer::analyze_path,
    config::AnalyzerConfig,
    report::{ReportFormat, write_report},
};
use clap::Parser;
use tracing::{Level, error};

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "analysis failed");
            eprintln!("busframe: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &cli::Cli) -> busframe::Result<()> {
    let config = configure(cli)?;
    let analysis = analyze_path(&cli.trace, &config)?;
    let format = match cli.format {
        cli::OutputFormat::Text => ReportFormat::Text,
        cli::OutputFormat::Json => ReportFormat::Json,
    };

    if let Some(path) = &cli.output {
        let mut writer = BufWriter::new(File::create(path)?);
        write_report(&mut writer, &analysis, format)?;
        writer.flush()?;
    } else {
        let mut stdout = io::stdout().lock();
        write_report(&mut stdout, &analysis, format)?;
    }
    Ok(())
}

fn configure(cli: &cli::Cli) -> busframe::Result<AnalyzerConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(delimiter) = cli.delimiter {
        config.trace.delimiter = delimiter;
    }
    if cli.no_headers {
        config.trace.has_headers = false;
    }
    if cli.no_marker {
        config.trace.marker_column = None;
    }
    if let Some(length) = cli.max_frame_length {
        config.codec.max_frame_length = length;
    }
    Ok(config)
}
