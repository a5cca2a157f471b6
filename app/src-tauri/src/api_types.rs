//! FILENAME: app/src-tauri/src/api_types.rs
// PURPOSE: Shared type definitions for Tauri API communication.
// CONTEXT: All structs use camelCase serialization for JavaScript interoperability.

use engine::{BoardView, CancelledItem, OrderCard, Theme};
use persistence::{LoadError, RefreshOutcome};
use serde::{Deserialize, Serialize};

/// What the board should render right now.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum BoardResponse {
    /// No load attempted yet.
    Loading,
    #[serde(rename_all = "camelCase")]
    Ready {
        board: BoardView,
        /// Detail card of the order the operator clicked, if it is still on the board.
        selected: Option<OrderCard>,
        warnings: Vec<String>,
        /// Local time of the last successful load (HH:MM:SS).
        updated_at: Option<String>,
        /// Non-fatal problem to show above the board (bad settings file).
        notice: Option<String>,
    },
    /// Full-screen error view with a manual refresh button.
    #[serde(rename_all = "camelCase")]
    Error { error_kind: String, message: String },
}

impl BoardResponse {
    pub fn from_error(error: &LoadError) -> Self {
        BoardResponse::Error {
            error_kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BoardResponse::Ready { .. })
    }
}

/// Result of one polling tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    /// "unchanged", "reloaded" or "failed"
    pub outcome: String,
    /// True when the frontend must redraw.
    pub changed: bool,
    pub board: BoardResponse,
}

pub fn outcome_name(outcome: RefreshOutcome) -> &'static str {
    match outcome {
        RefreshOutcome::Unchanged => "unchanged",
        RefreshOutcome::Reloaded => "reloaded",
        RefreshOutcome::Failed => "failed",
    }
}

/// Cancelled orders modal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CancelledResponse {
    pub items: Vec<CancelledItem>,
    pub empty_message: String,
}

/// Colour palette for the frontend stylesheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeData {
    pub accent: String,
    pub accent_hover: String,
    pub background: String,
    pub surface: String,
    pub divider: String,
    pub text: String,
    pub muted_text: String,
    pub error: String,
}

impl From<&Theme> for ThemeData {
    fn from(theme: &Theme) -> Self {
        ThemeData {
            accent: theme.accent.clone(),
            accent_hover: theme.accent_hover.clone(),
            background: theme.background.clone(),
            surface: theme.surface.clone(),
            divider: theme.divider.clone(),
            text: theme.text.clone(),
            muted_text: theme.muted_text.clone(),
            error: theme.error.clone(),
        }
    }
}

/// Static UI settings, fetched once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiSettings {
    pub title: String,
    /// `data:` URL of the logo image; `None` means show `logo_text`.
    pub logo_image: Option<String>,
    pub logo_text: String,
    pub poll_interval_ms: u64,
    pub sample_mode: bool,
    pub theme: ThemeData,
}
