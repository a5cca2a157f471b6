//! FILENAME: core/persistence/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Spreadsheet not found: {}", display_paths(.paths))]
    MissingFile { paths: Vec<PathBuf> },

    #[error("Missing column '{column}' in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("Cannot read {}: {reason}", .path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    #[error("Invalid settings file {}: {reason}", .path.display())]
    InvalidSettings { path: PathBuf, reason: String },
}

impl LoadError {
    /// Short tag for the frontend, independent of the message text.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::MissingFile { .. } => "missingFile",
            LoadError::MissingColumn { .. } => "missingColumn",
            LoadError::UnreadableFile { .. } => "unreadableFile",
            LoadError::InvalidSettings { .. } => "invalidSettings",
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
