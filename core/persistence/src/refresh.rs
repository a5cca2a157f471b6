//! FILENAME: core/persistence/src/refresh.rs
//! PURPOSE: Change detection for the two source spreadsheets.
//! CONTEXT: The UI timer calls `tick()` every poll interval. A tick reloads
//! when nothing has been loaded yet, when the previous attempt failed, or
//! when either file's modification time moved. Everything else is a no-op.
//!
//! Idle -> (tick) -> checking stamps -> reload -> Ready | Failed -> Idle

use crate::loader::{load_orders, DataSource, LoadedBoard};
use crate::LoadError;
use engine::BoardConfig;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Modification times of both source files at the last successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStamps {
    pub priority: SystemTime,
    pub status: SystemTime,
}

impl SourceStamps {
    /// Stat both files. Absent files are reported together.
    pub fn read(priority: &Path, status: &Path) -> Result<Self, LoadError> {
        let mut missing: Vec<PathBuf> = Vec::new();
        let mut stamp = |path: &Path| match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(time) => Ok(Some(time)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                missing.push(path.to_path_buf());
                Ok(None)
            }
            Err(e) => Err(LoadError::UnreadableFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        };

        let priority_time = stamp(priority)?;
        let status_time = stamp(status)?;

        match (priority_time, status_time) {
            (Some(priority), Some(status)) => Ok(SourceStamps { priority, status }),
            _ => Err(LoadError::MissingFile { paths: missing }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Sources unchanged since the last good load; nothing to redraw.
    Unchanged,
    /// A new relation is available.
    Reloaded,
    /// The load failed; the board should show the error.
    Failed,
}

/// What the board should currently display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardState<'a> {
    /// Nothing attempted yet.
    Idle,
    Ready(&'a LoadedBoard),
    Failed(&'a LoadError),
}

/// Refresh state: last known stamps and the last good relation.
#[derive(Debug)]
pub struct RefreshMonitor {
    source: DataSource,
    last_stamps: Option<SourceStamps>,
    last_good: Option<LoadedBoard>,
    last_error: Option<LoadError>,
}

impl RefreshMonitor {
    pub fn new(source: DataSource) -> Self {
        RefreshMonitor {
            source,
            last_stamps: None,
            last_good: None,
            last_error: None,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn last_stamps(&self) -> Option<SourceStamps> {
        self.last_stamps
    }

    /// The last relation that loaded cleanly, even if a later load failed.
    pub fn last_good(&self) -> Option<&LoadedBoard> {
        self.last_good.as_ref()
    }

    pub fn state(&self) -> BoardState<'_> {
        match (&self.last_error, &self.last_good) {
            (Some(error), _) => BoardState::Failed(error),
            (None, Some(board)) => BoardState::Ready(board),
            (None, None) => BoardState::Idle,
        }
    }

    /// One polling step.
    pub fn tick(&mut self, config: &BoardConfig) -> RefreshOutcome {
        let needs_first_load = self.last_good.is_none() || self.last_error.is_some();

        let (priority, status) = match &self.source {
            DataSource::Sample => {
                return if needs_first_load {
                    self.reload(config, None)
                } else {
                    RefreshOutcome::Unchanged
                };
            }
            DataSource::Files { priority, status } => (priority.clone(), status.clone()),
        };

        let stamps = match SourceStamps::read(&priority, &status) {
            Ok(stamps) => stamps,
            Err(error) => return self.fail(error),
        };

        if !needs_first_load && self.last_stamps == Some(stamps) {
            return RefreshOutcome::Unchanged;
        }

        log::debug!(
            "reloading sources (first_load={}, stamps_changed={})",
            needs_first_load,
            self.last_stamps != Some(stamps)
        );
        self.reload(config, Some(stamps))
    }

    /// Manual refresh: reload regardless of stamps.
    pub fn force_reload(&mut self, config: &BoardConfig) -> RefreshOutcome {
        let stamps = match &self.source {
            DataSource::Sample => None,
            DataSource::Files { priority, status } => match SourceStamps::read(priority, status) {
                Ok(stamps) => Some(stamps),
                Err(error) => return self.fail(error),
            },
        };
        self.reload(config, stamps)
    }

    fn reload(&mut self, config: &BoardConfig, stamps: Option<SourceStamps>) -> RefreshOutcome {
        match load_orders(&self.source, config) {
            Ok(board) => {
                self.last_good = Some(board);
                self.last_error = None;
                self.last_stamps = stamps;
                RefreshOutcome::Reloaded
            }
            Err(error) => self.fail(error),
        }
    }

    fn fail(&mut self, error: LoadError) -> RefreshOutcome {
        log::warn!("load failed: {}", error);
        self.last_error = Some(error);
        self.last_stamps = None;
        RefreshOutcome::Failed
    }
}
