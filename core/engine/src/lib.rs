//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the order reconciliation engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod board;
pub mod config;
pub mod merge;
pub mod order;
pub mod sample;
pub mod table;
pub mod value;

// Re-export commonly used types at the crate root
pub use board::{build_board, cancelled_orders, order_card, BoardView, CancelledItem, ListItem, ListSection, OrderCard};
pub use config::{BoardConfig, PriorityColumns, RankSource, StatusColumns, StatusFilter, Theme};
pub use merge::{
    merge_orders, parse_priorities, parse_statuses, rank_entries, reconcile, reconcile_tables,
    MergeReport, ParsedPriorities, ValueWarning, WarningAction,
};
pub use order::{
    MergedOrder, OrderStatus, PriorityEntry, StatusEntry, STATUS_AWAITING_ASSEMBLY, STATUS_CANCELLED,
    STATUS_COMPLETED, STATUS_PENDING,
};
pub use sample::sample_orders;
pub use table::{ColumnError, Table};
pub use value::SheetValue;

pub use chrono::NaiveDate;
