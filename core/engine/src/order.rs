//! FILENAME: core/engine/src/order.rs
//! PURPOSE: Work-order records: the two input relations and the merged one.
//! CONTEXT: `MergedOrder` serializes with the column names the floor uses
//! (Prioridade, Pedido, Maquinas, ...) so the frontend and any JSON dumps
//! read the same as the spreadsheets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STATUS_PENDING: &str = "Pendente";
pub const STATUS_AWAITING_ASSEMBLY: &str = "Aguardando Montagem";
pub const STATUS_COMPLETED: &str = "Concluído";
pub const STATUS_CANCELLED: &str = "Cancelado";

/// Status label of an order. Labels outside the known set are carried
/// verbatim in `Other` and never filtered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    AwaitingAssembly,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            STATUS_PENDING => OrderStatus::Pending,
            STATUS_AWAITING_ASSEMBLY => OrderStatus::AwaitingAssembly,
            STATUS_COMPLETED => OrderStatus::Completed,
            STATUS_CANCELLED => OrderStatus::Cancelled,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => STATUS_PENDING,
            OrderStatus::AwaitingAssembly => STATUS_AWAITING_ASSEMBLY,
            OrderStatus::Completed => STATUS_COMPLETED,
            OrderStatus::Cancelled => STATUS_CANCELLED,
            OrderStatus::Other(label) => label,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        OrderStatus::from_label(&label)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the priority sheet after column selection and coercion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriorityEntry {
    pub order_id: String,
    pub quantity: u32,
    pub service: String,
    pub transfer_ref: String,
    /// Explicit rank from the sheet, when the rank column is in use.
    pub rank: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub value: Option<f64>,
    pub item_code: Option<String>,
}

impl PriorityEntry {
    pub fn new(order_id: impl Into<String>, quantity: u32) -> Self {
        PriorityEntry {
            order_id: order_id.into(),
            quantity,
            ..Default::default()
        }
    }
}

/// One row of the status sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub order_id: String,
    pub status: OrderStatus,
}

impl StatusEntry {
    pub fn new(order_id: impl Into<String>, status: OrderStatus) -> Self {
        StatusEntry {
            order_id: order_id.into(),
            status,
        }
    }
}

/// A priority row with its status attached. Rebuilt on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedOrder {
    #[serde(rename = "Prioridade")]
    pub rank: i64,
    #[serde(rename = "Pedido")]
    pub order_id: String,
    #[serde(rename = "Maquinas")]
    pub quantity: u32,
    #[serde(rename = "Servico", default)]
    pub service: String,
    #[serde(rename = "PV", default)]
    pub transfer_ref: String,
    #[serde(rename = "Status")]
    pub status: OrderStatus,
    #[serde(rename = "Valor", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(rename = "Codigo", default, skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(rename = "Entrega", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl MergedOrder {
    pub fn from_entry(entry: &PriorityEntry, rank: i64, status: OrderStatus) -> Self {
        MergedOrder {
            rank,
            order_id: entry.order_id.clone(),
            quantity: entry.quantity,
            service: entry.service.clone(),
            transfer_ref: entry.transfer_ref.clone(),
            status,
            value: entry.value,
            item_code: entry.item_code.clone(),
            due_date: entry.due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip() {
        for label in [
            STATUS_PENDING,
            STATUS_AWAITING_ASSEMBLY,
            STATUS_COMPLETED,
            STATUS_CANCELLED,
        ] {
            assert_eq!(OrderStatus::from_label(label).label(), label);
        }
    }

    #[test]
    fn test_unknown_status_is_passed_through() {
        let status = OrderStatus::from_label("Em Teste");
        assert_eq!(status, OrderStatus::Other("Em Teste".to_string()));
        assert_eq!(status.to_string(), "Em Teste");
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&OrderStatus::AwaitingAssembly).unwrap();
        assert_eq!(json, "\"Aguardando Montagem\"");
        let back: OrderStatus = serde_json::from_str("\"Cancelado\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_merged_order_uses_floor_column_names() {
        let entry = PriorityEntry::new("CV-001", 5);
        let order = MergedOrder::from_entry(&entry, 1, OrderStatus::Pending);
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["Pedido"], "CV-001");
        assert_eq!(json["Maquinas"], 5);
        assert_eq!(json["Status"], "Pendente");
        assert_eq!(json["Prioridade"], 1);
        assert!(json.get("Valor").is_none());
        assert!(json.get("Entrega").is_none());
    }
}
