//! Canonical error and result types for the crate.
//!
//! Per-layer errors ([`ConfigError`], [`TraceError`]) convert into
//! [`BusframeError`] so whole-run entry points can use `?` throughout. Record
//! skips and decode failures never reach this level; they are counted and the
//! run continues.

use std::io;

use thiserror::Error;

use crate::{config::ConfigError, trace::TraceError};

/// Top-level error type exposed by `busframe`.
#[derive(Debug, Error)]
pub enum BusframeError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace source failed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Writing a report failed.
    #[error("report output failed: {0}")]
    Io(#[from] io::Error),

    /// Serializing a JSON report failed.
    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Canonical result alias used by `busframe` public APIs.
pub type Result<T> = std::result::Result<T, BusframeError>;
