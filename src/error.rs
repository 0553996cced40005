use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single listing file produced no row
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {} as JSON: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("no data found under `{key}` in {}", .path.display())]
    MissingTopLevelKey { path: PathBuf, key: String },

    #[error("lookup of `{segment}` failed for column `{field}` in {}", .path.display())]
    FieldLookup {
        path: PathBuf,
        field: String,
        segment: String,
    },
}

impl ExtractError {
    pub fn path(&self) -> &Path {
        match self {
            ExtractError::Read { path, .. }
            | ExtractError::Parse { path, .. }
            | ExtractError::MissingTopLevelKey { path, .. }
            | ExtractError::FieldLookup { path, .. } => path,
        }
    }
}

/// Rejected run settings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("worker count must be at least 1")]
    ZeroWorkers,
}
