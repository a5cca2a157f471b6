//! FILENAME: core/persistence/src/loader.rs
//! PURPOSE: Load both spreadsheets (or the sample data) and reconcile them.

use crate::xlsx_reader::read_table;
use crate::LoadError;
use engine::{
    parse_priorities, parse_statuses, reconcile, sample_orders, BoardConfig, ColumnError,
    MergedOrder, ValueWarning,
};
use std::path::{Path, PathBuf};

/// Where the board's orders come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Sample,
    Files { priority: PathBuf, status: PathBuf },
}

impl DataSource {
    /// Resolve the configured source. Relative paths are taken from `base_dir`
    /// (the executable's directory in the app).
    pub fn from_config(config: &BoardConfig, base_dir: &Path) -> Self {
        if config.use_sample_data {
            DataSource::Sample
        } else {
            DataSource::Files {
                priority: resolve_path(base_dir, &config.priority_path),
                status: resolve_path(base_dir, &config.status_path),
            }
        }
    }
}

pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedBoard {
    pub orders: Vec<MergedOrder>,
    pub warnings: Vec<ValueWarning>,
    pub dropped_rows: usize,
}

/// Fails with `MissingFile` listing every absent path.
pub fn ensure_files_exist(paths: &[&Path]) -> Result<(), LoadError> {
    let missing: Vec<PathBuf> = paths
        .iter()
        .filter(|p| !p.exists())
        .map(|p| p.to_path_buf())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingFile { paths: missing })
    }
}

/// Run the full load. Nothing is returned unless every structural check passes.
pub fn load_orders(source: &DataSource, config: &BoardConfig) -> Result<LoadedBoard, LoadError> {
    match source {
        DataSource::Sample => Ok(LoadedBoard {
            orders: sample_orders(config),
            ..Default::default()
        }),
        DataSource::Files { priority, status } => load_files(priority, status, config),
    }
}

fn load_files(priority_path: &Path, status_path: &Path, config: &BoardConfig) -> Result<LoadedBoard, LoadError> {
    ensure_files_exist(&[priority_path, status_path])?;

    let priority_table = read_table(priority_path)?;
    let status_table = read_table(status_path)?;

    let parsed = parse_priorities(&priority_table, &config.priority_columns, config.rank_source)
        .map_err(|e| column_error(e, priority_path))?;
    let statuses = parse_statuses(&status_table, &config.status_columns)
        .map_err(|e| column_error(e, status_path))?;

    let report = reconcile(parsed, &statuses, config);
    for warning in &report.warnings {
        log::warn!("{}: {}", priority_path.display(), warning);
    }
    log::debug!(
        "loaded {} orders ({} status rows, {} rows dropped)",
        report.orders.len(),
        statuses.len(),
        report.dropped_rows
    );

    Ok(LoadedBoard {
        orders: report.orders,
        warnings: report.warnings,
        dropped_rows: report.dropped_rows,
    })
}

fn column_error(error: ColumnError, path: &Path) -> LoadError {
    let column = match error {
        ColumnError::Missing(name) => name,
        ColumnError::Unconfigured(what) => format!("<{} not configured>", what),
    };
    LoadError::MissingColumn {
        column,
        path: path.to_path_buf(),
    }
}
