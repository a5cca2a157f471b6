//! FILENAME: core/engine/src/config.rs
//! PURPOSE: Board configuration: where the sheets live, which headers to read,
//! how ranks are derived, which statuses count as active, and the theme.
//! CONTEXT: Built once at startup (defaults or painel.json) and never mutated.
//! The view builder and the frontend both receive it by reference.

use crate::order::{MergedOrder, OrderStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Lower bound for the polling interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 1000;

// ============================================================================
// RANKING
// ============================================================================

/// Where the priority rank of each order comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankSource {
    /// Explicit rank column on the priority sheet.
    #[default]
    Column,
    /// Ascending due date; ties keep sheet order.
    DueDate,
    /// Sheet order, top row is rank 1.
    RowOrder,
}

// ============================================================================
// COLUMN NAMES
// ============================================================================

/// Header text of the priority sheet columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityColumns {
    pub order_id: String,
    pub quantity: String,
    pub service: String,
    pub transfer_ref: String,
    pub rank: Option<String>,
    pub due_date: Option<String>,
    pub value: Option<String>,
    pub item_code: Option<String>,
}

impl Default for PriorityColumns {
    fn default() -> Self {
        PriorityColumns {
            order_id: "Cotação de Venda  ↑".to_string(),
            quantity: "Quantidade Solicitada".to_string(),
            service: "Produto / Serviço: Descrição do Produto/Serviço".to_string(),
            transfer_ref: "Pv de Transferência".to_string(),
            rank: Some("Prioridade".to_string()),
            due_date: None,
            value: None,
            item_code: None,
        }
    }
}

/// Header text of the status sheet columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusColumns {
    pub order_id: String,
    pub status: String,
}

impl Default for StatusColumns {
    fn default() -> Self {
        StatusColumns {
            order_id: "Pedido".to_string(),
            status: "Status".to_string(),
        }
    }
}

// ============================================================================
// STATUS FILTER
// ============================================================================

/// Statuses hidden from the active views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusFilter {
    pub excluded: Vec<OrderStatus>,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter {
            excluded: vec![OrderStatus::Completed, OrderStatus::Cancelled],
        }
    }
}

impl StatusFilter {
    pub fn is_active(&self, status: &OrderStatus) -> bool {
        !self.excluded.contains(status)
    }

    pub fn active<'a>(&'a self, orders: &'a [MergedOrder]) -> impl Iterator<Item = &'a MergedOrder> + 'a {
        orders.iter().filter(move |o| self.is_active(&o.status))
    }
}

// ============================================================================
// THEME
// ============================================================================

/// Colours used by the board. Hex strings, handed to the frontend as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub accent: String,
    pub accent_hover: String,
    pub background: String,
    pub surface: String,
    pub divider: String,
    pub text: String,
    pub muted_text: String,
    pub error: String,
    /// Keyed by lower-cased status label.
    pub status_colors: BTreeMap<String, String>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut status_colors = BTreeMap::new();
        status_colors.insert("pendente".to_string(), "#D4AC0D".to_string());
        status_colors.insert("aguardando montagem".to_string(), "#3498DB".to_string());

        Theme {
            accent: "#FF6600".to_string(),
            accent_hover: "#D15600".to_string(),
            background: "#1C1C1C".to_string(),
            surface: "#2E2E2E".to_string(),
            divider: "#424242".to_string(),
            text: "#FFFFFF".to_string(),
            muted_text: "#9E9E9E".to_string(),
            error: "#FF4D4D".to_string(),
            status_colors,
        }
    }
}

impl Theme {
    /// Colour for a status label, falling back to the text colour.
    pub fn status_color(&self, status: &OrderStatus) -> &str {
        self.status_colors
            .get(&status.label().to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.text)
    }
}

// ============================================================================
// BOARD CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub title: String,
    /// Header logo image. Relative paths resolve against the executable's directory.
    pub logo_path: Option<PathBuf>,
    /// Text shown in the header when the logo image is unset or unreadable.
    pub logo_text: String,
    /// Serve the built-in sample orders instead of reading spreadsheets.
    pub use_sample_data: bool,
    /// Relative paths resolve against the executable's directory.
    pub priority_path: PathBuf,
    pub status_path: PathBuf,
    pub priority_columns: PriorityColumns,
    pub status_columns: StatusColumns,
    pub rank_source: RankSource,
    pub status_filter: StatusFilter,
    /// Drop inactive orders while loading instead of only hiding them.
    pub filter_on_load: bool,
    pub poll_interval_ms: u64,
    /// Entries in the "top priorities" list.
    pub top_n: usize,
    /// Detail cards in the grid.
    pub card_count: usize,
    pub theme: Theme,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            title: "Painel de Produção MTEC".to_string(),
            logo_path: Some(PathBuf::from("logoMtec.jpeg")),
            logo_text: "MTEC".to_string(),
            use_sample_data: false,
            priority_path: PathBuf::from("Dados/Fila de prioridades do laboratório.xlsx"),
            status_path: PathBuf::from("Dados/Status dos Pedidos.xlsx"),
            priority_columns: PriorityColumns::default(),
            status_columns: StatusColumns::default(),
            rank_source: RankSource::default(),
            status_filter: StatusFilter::default(),
            filter_on_load: false,
            poll_interval_ms: 5000,
            top_n: 5,
            card_count: 4,
            theme: Theme::default(),
        }
    }
}

impl BoardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    /// Config for the built-in sample orders.
    pub fn sample() -> Self {
        BoardConfig {
            use_sample_data: true,
            ..Default::default()
        }
    }
}
