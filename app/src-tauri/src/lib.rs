//! FILENAME: app/src-tauri/src/lib.rs
// PURPOSE: Main library entry point (Tauri Bridge).
// CONTEXT: Owns the refresh monitor and the operator's selection; the frontend
// polls through `poll_sources` on its own timer.

use engine::BoardConfig;
use persistence::{load_settings, DataSource, LoadError, RefreshMonitor, SETTINGS_FILE_NAME};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub mod api_types;
pub mod board;
pub mod commands;
pub mod logging;

pub use api_types::{BoardResponse, CancelledResponse, PollResponse, ThemeData, UiSettings};
pub use logging::{get_log_path, init_log_file, next_seq, write_log};

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct AppState {
    /// Settings in effect (defaults when painel.json is absent or invalid).
    pub config: BoardConfig,
    /// Directory relative settings paths resolve against.
    pub base_dir: PathBuf,
    /// Why painel.json was rejected, if it was.
    pub settings_error: Option<LoadError>,
    pub monitor: Mutex<RefreshMonitor>,
    /// Order whose detail card the operator opened.
    pub selected_order: Mutex<Option<String>>,
    /// Local time of the last successful reload.
    pub last_updated: Mutex<Option<String>>,
}

/// Directory holding the executable; data paths and painel.json are relative to it.
pub fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// State for the desktop app: settings and spreadsheets beside the executable.
pub fn create_app_state() -> AppState {
    let base_dir = executable_dir();
    let settings_path = base_dir.join(SETTINGS_FILE_NAME);

    match load_settings(&settings_path) {
        Ok(config) => create_app_state_with(config, &base_dir),
        Err(error) => {
            log_warn!("SYS", "{}; using default settings", error);
            let mut state = create_app_state_with(BoardConfig::default(), &base_dir);
            state.settings_error = Some(error);
            state
        }
    }
}

pub fn create_app_state_with(config: BoardConfig, base_dir: &Path) -> AppState {
    let source = DataSource::from_config(&config, base_dir);
    match &source {
        DataSource::Sample => log_info!("SYS", "Creating AppState (sample data)"),
        DataSource::Files { priority, status } => log_info!(
            "SYS",
            "Creating AppState (priority={}, status={})",
            priority.display(),
            status.display()
        ),
    }

    AppState {
        config,
        base_dir: base_dir.to_path_buf(),
        settings_error: None,
        monitor: Mutex::new(RefreshMonitor::new(source)),
        selected_order: Mutex::new(None),
        last_updated: Mutex::new(None),
    }
}

// ============================================================================
// TAURI ENTRY POINT
// ============================================================================

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    match init_log_file() {
        Ok(path) => log_info!("SYS", "Logging to {}", path.display()),
        Err(e) => eprintln!("[LOG_ERROR] {}", e),
    }

    let state = create_app_state();

    let result = tauri::Builder::default()
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            commands::poll_sources,
            commands::refresh_sources,
            commands::get_board,
            commands::get_cancelled_orders,
            commands::select_order,
            commands::get_ui_settings,
            logging::log_frontend,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        log_error!("SYS", "error while running tauri application: {}", e);
    }
}
