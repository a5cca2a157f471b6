//! FILENAME: core/engine/src/board.rs
//! PURPOSE: View model for the production board: ranked list sections,
//! detail cards, and the cancelled-orders list.
//! CONTEXT: Derived entirely from the merged orders plus the immutable
//! `BoardConfig`. The frontend renders these structs without further logic.

use crate::config::BoardConfig;
use crate::order::{MergedOrder, OrderStatus};
use crate::value::format_number;
use serde::{Deserialize, Serialize};

/// Characters of the service description shown in the cancelled list.
pub const CANCELLED_PREVIEW_CHARS: usize = 50;

/// One line in a list section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub order_id: String,
    pub rank: i64,
    pub label: String,
    pub status: String,
    pub color: String,
}

/// A titled block of the left-hand list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSection {
    pub title: String,
    pub color: String,
    pub items: Vec<ListItem>,
    /// Shown instead of the items when there are none.
    pub empty_message: String,
}

/// A detail card in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCard {
    pub order_id: String,
    pub rank: i64,
    pub title: String,
    pub status_label: String,
    pub status_color: String,
    pub description: String,
    pub quantity_label: String,
    pub transfer_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_label: Option<String>,
}

/// An entry of the cancelled-orders dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledItem {
    pub order_id: String,
    pub text: String,
}

/// Everything the main window shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub top: ListSection,
    /// "Pendentes" first, then the other active status categories.
    pub sections: Vec<ListSection>,
    pub cards: Vec<OrderCard>,
    pub active_count: usize,
    pub cancelled_count: usize,
}

/// Build the board for the given orders (already ranked, in rank order).
pub fn build_board(orders: &[MergedOrder], config: &BoardConfig) -> BoardView {
    let theme = &config.theme;
    let active: Vec<&MergedOrder> = config.status_filter.active(orders).collect();

    let top = ListSection {
        title: format!("TOP {} PRIORIDADES", config.top_n),
        color: theme.accent.clone(),
        items: active
            .iter()
            .take(config.top_n)
            .map(|o| list_item(o, format!("{}. {}", o.rank, o.order_id), config))
            .collect(),
        empty_message: "Nenhum pedido ativo.".to_string(),
    };

    let mut sections = Vec::new();
    if config.status_filter.is_active(&OrderStatus::Pending) {
        sections.push(status_section(
            orders,
            &OrderStatus::Pending,
            "PENDENTES",
            "Nenhum pedido pendente.",
            config,
        ));
    }
    if config.status_filter.is_active(&OrderStatus::AwaitingAssembly) {
        sections.push(status_section(
            orders,
            &OrderStatus::AwaitingAssembly,
            "AGUARDANDO MONTAGEM",
            "Nenhum pedido aguardando montagem.",
            config,
        ));
    }
    for status in other_statuses(&active) {
        let title = status.label().to_uppercase();
        sections.push(status_section(orders, &status, &title, "", config));
    }

    BoardView {
        top,
        sections,
        cards: active
            .iter()
            .take(config.card_count)
            .map(|o| order_card(o, config))
            .collect(),
        active_count: active.len(),
        cancelled_count: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Cancelled)
            .count(),
    }
}

/// Detail card for a single order.
pub fn order_card(order: &MergedOrder, config: &BoardConfig) -> OrderCard {
    OrderCard {
        order_id: order.order_id.clone(),
        rank: order.rank,
        title: format!("{}º: {}", order.rank, order.order_id),
        status_label: order.status.label().to_uppercase(),
        status_color: config.theme.status_color(&order.status).to_string(),
        description: order.service.clone(),
        quantity_label: format!("QTD: {}", order.quantity),
        transfer_label: format!("PV: {}", order.transfer_ref),
        value_label: order.value.map(format_currency),
        item_code_label: order.item_code.as_ref().map(|c| format!("Código: {}", c)),
        due_label: order
            .due_date
            .map(|d| format!("Entrega: {}", d.format("%d/%m/%Y"))),
    }
}

/// Cancelled orders in rank order.
pub fn cancelled_orders(orders: &[MergedOrder]) -> Vec<CancelledItem> {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Cancelled)
        .map(|o| CancelledItem {
            order_id: o.order_id.clone(),
            text: format!(
                "Pedido: {}  |  Serviço: {}...",
                o.order_id,
                truncate_chars(&o.service, CANCELLED_PREVIEW_CHARS)
            ),
        })
        .collect()
}

/// First `max` characters of `text` (not bytes; descriptions are Portuguese).
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// "R$ 1.234,50"
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = format_number((cents / 100) as f64);

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

fn list_item(order: &MergedOrder, label: String, config: &BoardConfig) -> ListItem {
    ListItem {
        order_id: order.order_id.clone(),
        rank: order.rank,
        label,
        status: order.status.label().to_string(),
        color: config.theme.status_color(&order.status).to_string(),
    }
}

fn status_section(
    orders: &[MergedOrder],
    status: &OrderStatus,
    title: &str,
    empty_message: &str,
    config: &BoardConfig,
) -> ListSection {
    let color = config.theme.status_color(status).to_string();
    ListSection {
        title: title.to_string(),
        items: orders
            .iter()
            .filter(|o| &o.status == status)
            .map(|o| {
                let mut item = list_item(o, format!("P{}: {}", o.rank, o.order_id), config);
                item.color = config.theme.muted_text.clone();
                item
            })
            .collect(),
        color,
        empty_message: empty_message.to_string(),
    }
}

/// Unknown labels among the active orders, in first-seen order.
fn other_statuses(active: &[&MergedOrder]) -> Vec<OrderStatus> {
    let mut seen: Vec<OrderStatus> = Vec::new();
    for order in active {
        if matches!(order.status, OrderStatus::Other(_)) && !seen.contains(&order.status) {
            seen.push(order.status.clone());
        }
    }
    seen
}
