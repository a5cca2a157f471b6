//! FILENAME: core/engine/src/sample.rs
//! PURPOSE: Built-in sample orders used when the board runs without
//! spreadsheets (`use_sample_data`). Goes through the same merge as real data.

use crate::config::BoardConfig;
use crate::merge::{reconcile, ParsedPriorities};
use crate::order::{MergedOrder, OrderStatus, PriorityEntry, StatusEntry};

pub fn sample_priorities() -> Vec<PriorityEntry> {
    let rows: [(&str, u32, &str, &str); 7] = [
        (
            "CV-2025-001",
            5,
            "Montagem de painel elétrico completo com disjuntores Siemens para cliente industrial.",
            "PV-T101",
        ),
        ("PV-10580", 1, "Usinagem de flange de precisão em aço inox 316.", "PV-T102"),
        (
            "OP-98765",
            10,
            "Calibração e ajuste de 10 sensores de pressão modelo XPT-5.",
            "PV-T103",
        ),
        (
            "CV-2025-002",
            2,
            "Desenvolvimento de firmware para CLP de controle de esteira.",
            "PV-T104",
        ),
        ("OP-98770", 1, "Manutenção corretiva em sistema de bombeamento.", "PV-T105"),
        ("PV-10588", 3, "Corte e dobra de 3 chapas de alumínio.", "PV-T106"),
        (
            "CV-2025-003",
            8,
            "Impressão 3D de protótipo de carcaça para dispositivo eletrônico.",
            "PV-T107",
        ),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (id, quantity, service, pv))| PriorityEntry {
            order_id: id.to_string(),
            quantity: *quantity,
            service: service.to_string(),
            transfer_ref: pv.to_string(),
            rank: Some(i as i64 + 1),
            ..Default::default()
        })
        .collect()
}

pub fn sample_statuses() -> Vec<StatusEntry> {
    vec![
        StatusEntry::new("CV-2025-001", OrderStatus::AwaitingAssembly),
        StatusEntry::new("OP-98765", OrderStatus::Cancelled),
        StatusEntry::new("CV-2025-002", OrderStatus::Completed),
        StatusEntry::new("PV-10588", OrderStatus::Pending),
        StatusEntry::new("OP-98770", OrderStatus::AwaitingAssembly),
        StatusEntry::new("PV-10580", OrderStatus::Pending),
    ]
}

/// The sample relation, ranked and filtered as `config` says.
pub fn sample_orders(config: &BoardConfig) -> Vec<MergedOrder> {
    let parsed = ParsedPriorities {
        entries: sample_priorities(),
        ..Default::default()
    };
    reconcile(parsed, &sample_statuses(), config).orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankSource;

    #[test]
    fn test_sample_orders_keep_every_row() {
        let orders = sample_orders(&BoardConfig::sample());
        assert_eq!(orders.len(), 7);
        assert_eq!(orders[6].order_id, "CV-2025-003");
        assert_eq!(orders[6].status, OrderStatus::Pending);
        assert_eq!(orders[2].status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_sample_orders_respect_load_filter() {
        let config = BoardConfig {
            filter_on_load: true,
            rank_source: RankSource::RowOrder,
            ..BoardConfig::sample()
        };
        let orders = sample_orders(&config);
        let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["CV-2025-001", "PV-10580", "OP-98770", "PV-10588", "CV-2025-003"]);
    }
}
