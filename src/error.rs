//! Error types
//!
//! Per-frame conditions (missing target, vanished placement, degenerate quad)
//! are absorbed where they occur and never surface as errors. The only
//! fallible paths are construction-time ones: loading or storing the
//! persisted configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from filter configuration persistence.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("failed to read settings from {path}: {source}")]
    ReadSettings {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write settings to {path}: {source}")]
    WriteSettings {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings format: {0}")]
    ParseSettings(#[from] serde_json::Error),
}
