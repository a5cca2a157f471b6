//! FILENAME: core/persistence/src/lib.rs
//! Painel Persistence Module
//!
//! Reads the priority and status spreadsheets, loads board settings, and
//! tracks source modification times for the polling refresh.

mod error;
mod loader;
mod refresh;
mod settings;
mod xlsx_reader;

#[cfg(test)]
mod test_support;

pub use error::LoadError;
pub use loader::{ensure_files_exist, load_orders, resolve_path, DataSource, LoadedBoard};
pub use refresh::{BoardState, RefreshMonitor, RefreshOutcome, SourceStamps};
pub use settings::{load_settings, SETTINGS_FILE_NAME};
pub use xlsx_reader::read_table;
