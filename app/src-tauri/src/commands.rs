//! FILENAME: app/src-tauri/src/commands.rs
// PURPOSE: Tauri commands invoked by the board frontend.

use crate::api_types::{BoardResponse, CancelledResponse, PollResponse, UiSettings};
use crate::{board, AppState};
use crate::{log_enter_info, log_exit_info};
use tauri::State;

// ============================================================================
// REFRESH COMMANDS
// ============================================================================

/// Called by the frontend timer every poll interval.
#[tauri::command]
pub fn poll_sources(state: State<AppState>) -> Result<PollResponse, String> {
    board::poll(&state)
}

/// Manual refresh button on the error view.
#[tauri::command]
pub fn refresh_sources(state: State<AppState>) -> Result<PollResponse, String> {
    log_enter_info!("CMD", "refresh_sources");
    let response = board::refresh(&state)?;
    log_exit_info!("CMD", "refresh_sources", "outcome={}", response.outcome);
    Ok(response)
}

// ============================================================================
// VIEW COMMANDS
// ============================================================================

#[tauri::command]
pub fn get_board(state: State<AppState>) -> Result<BoardResponse, String> {
    board::current(&state)
}

#[tauri::command]
pub fn get_cancelled_orders(state: State<AppState>) -> Result<CancelledResponse, String> {
    log_enter_info!("CMD", "get_cancelled_orders");
    let response = board::cancelled(&state)?;
    log_exit_info!("CMD", "get_cancelled_orders", "count={}", response.items.len());
    Ok(response)
}

/// Select an order for the detail view; `null` clears the selection.
#[tauri::command]
pub fn select_order(state: State<AppState>, order_id: Option<String>) -> Result<BoardResponse, String> {
    log_enter_info!("CMD", "select_order", "order_id={:?}", order_id);
    board::select(&state, order_id)
}

#[tauri::command]
pub fn get_ui_settings(state: State<AppState>) -> UiSettings {
    board::ui_settings(&state)
}
