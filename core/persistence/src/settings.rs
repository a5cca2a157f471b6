//! FILENAME: core/persistence/src/settings.rs
//! PURPOSE: Read the optional painel.json next to the executable.

use crate::LoadError;
use engine::BoardConfig;
use std::path::Path;

pub const SETTINGS_FILE_NAME: &str = "painel.json";

/// Load settings from `path`. An absent file means defaults.
pub fn load_settings(path: &Path) -> Result<BoardConfig, LoadError> {
    if !path.exists() {
        return Ok(BoardConfig::default());
    }

    let invalid = |reason: String| LoadError::InvalidSettings {
        path: path.to_path_buf(),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))
}
