//! FILENAME: app/src-tauri/src/board.rs
// PURPOSE: Board operations on AppState, shared by the Tauri commands and the tests.

use crate::api_types::{outcome_name, BoardResponse, CancelledResponse, PollResponse, ThemeData, UiSettings};
use crate::AppState;
use crate::{log_info, log_warn};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use engine::{build_board, cancelled_orders, order_card};
use persistence::{resolve_path, BoardState, RefreshMonitor, RefreshOutcome};
use std::path::Path;

const NO_CANCELLED_MESSAGE: &str = "Nenhum pedido cancelado.";

// ============================================================================
// REFRESH
// ============================================================================

/// One timer tick: reload if the spreadsheets changed (or the last load failed).
pub fn poll(state: &AppState) -> Result<PollResponse, String> {
    let mut monitor = state.monitor.lock().map_err(|e| e.to_string())?;
    let outcome = monitor.tick(&state.config);
    finish_refresh(state, &monitor, outcome)
}

/// Manual refresh button: reload unconditionally.
pub fn refresh(state: &AppState) -> Result<PollResponse, String> {
    let mut monitor = state.monitor.lock().map_err(|e| e.to_string())?;
    let outcome = monitor.force_reload(&state.config);
    finish_refresh(state, &monitor, outcome)
}

fn finish_refresh(
    state: &AppState,
    monitor: &RefreshMonitor,
    outcome: RefreshOutcome,
) -> Result<PollResponse, String> {
    match outcome {
        RefreshOutcome::Reloaded => {
            let now = chrono::Local::now().format("%H:%M:%S").to_string();
            log_info!("BOARD", "sources reloaded at {}", now);
            *state.last_updated.lock().map_err(|e| e.to_string())? = Some(now);
        }
        RefreshOutcome::Failed => log_warn!("BOARD", "board is showing the error view"),
        RefreshOutcome::Unchanged => {}
    }

    Ok(PollResponse {
        outcome: outcome_name(outcome).to_string(),
        changed: outcome != RefreshOutcome::Unchanged,
        board: snapshot(state, monitor)?,
    })
}

// ============================================================================
// VIEWS
// ============================================================================

/// Current board without touching the filesystem.
pub fn current(state: &AppState) -> Result<BoardResponse, String> {
    let monitor = state.monitor.lock().map_err(|e| e.to_string())?;
    snapshot(state, &monitor)
}

fn snapshot(state: &AppState, monitor: &RefreshMonitor) -> Result<BoardResponse, String> {
    let loaded = match monitor.state() {
        BoardState::Idle => return Ok(BoardResponse::Loading),
        BoardState::Failed(error) => return Ok(BoardResponse::from_error(error)),
        BoardState::Ready(loaded) => loaded,
    };

    let config = &state.config;
    let selected_id = state.selected_order.lock().map_err(|e| e.to_string())?.clone();
    let selected = selected_id.and_then(|id| {
        loaded
            .orders
            .iter()
            .find(|o| o.order_id == id && config.status_filter.is_active(&o.status))
            .map(|o| order_card(o, config))
    });

    Ok(BoardResponse::Ready {
        board: build_board(&loaded.orders, config),
        selected,
        warnings: loaded.warnings.iter().map(|w| w.to_string()).collect(),
        updated_at: state.last_updated.lock().map_err(|e| e.to_string())?.clone(),
        notice: state.settings_error.as_ref().map(|e| e.to_string()),
    })
}

/// Cancelled orders for the modal; empty while nothing is loaded.
pub fn cancelled(state: &AppState) -> Result<CancelledResponse, String> {
    let monitor = state.monitor.lock().map_err(|e| e.to_string())?;
    let items = match monitor.state() {
        BoardState::Ready(loaded) => cancelled_orders(&loaded.orders),
        BoardState::Idle | BoardState::Failed(_) => Vec::new(),
    };

    Ok(CancelledResponse {
        items,
        empty_message: NO_CANCELLED_MESSAGE.to_string(),
    })
}

/// Open (or with `None`, close) an order's detail card.
pub fn select(state: &AppState, order_id: Option<String>) -> Result<BoardResponse, String> {
    let order_id = order_id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty());
    *state.selected_order.lock().map_err(|e| e.to_string())? = order_id;
    current(state)
}

pub fn ui_settings(state: &AppState) -> UiSettings {
    let config = &state.config;
    UiSettings {
        title: config.title.clone(),
        logo_image: config
            .logo_path
            .as_ref()
            .and_then(|path| logo_data_url(&resolve_path(&state.base_dir, path))),
        logo_text: config.logo_text.clone(),
        poll_interval_ms: config.poll_interval().as_millis() as u64,
        sample_mode: config.use_sample_data,
        theme: ThemeData::from(&config.theme),
    }
}

/// Inline the logo image for the webview. Unreadable or unknown files fall
/// back to the logo text.
pub fn logo_data_url(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => {
            log_warn!("UI", "unsupported logo format: {}", path.display());
            return None;
        }
    };

    match std::fs::read(path) {
        Ok(bytes) => Some(format!("data:{};base64,{}", mime, STANDARD.encode(bytes))),
        Err(e) => {
            log_info!("UI", "no logo image at {} ({}); using text", path.display(), e);
            None
        }
    }
}
