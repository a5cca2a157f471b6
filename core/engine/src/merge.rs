//! FILENAME: core/engine/src/merge.rs
//! PURPOSE: The reconciliation routine: select and coerce priority rows,
//! read status rows, rank, left-join, default missing status, filter.
//! CONTEXT: Pure functions over `Table`. Structural problems (missing
//! headers) are errors; bad cell values are replaced by a default and
//! reported as `ValueWarning`s.

use crate::config::{BoardConfig, PriorityColumns, RankSource, StatusColumns};
use crate::order::{MergedOrder, OrderStatus, PriorityEntry, StatusEntry};
use crate::table::{ColumnError, Table};
use crate::value::SheetValue;
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// REPORTS
// ============================================================================

/// A cell that could not be coerced and was replaced by a default
/// (or caused its row to be skipped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueWarning {
    /// Row number as shown by the spreadsheet program.
    pub row: usize,
    pub column: String,
    pub raw: String,
    pub action: WarningAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningAction {
    DefaultedToZero,
    Ignored,
    RowDropped,
}

impl fmt::Display for ValueWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            WarningAction::DefaultedToZero => "using 0",
            WarningAction::Ignored => "ignored",
            WarningAction::RowDropped => "row dropped",
        };
        write!(
            f,
            "row {}, column '{}': unusable value '{}' ({})",
            self.row, self.column, self.raw, action
        )
    }
}

/// Priority rows that survived column selection and coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPriorities {
    pub entries: Vec<PriorityEntry>,
    pub warnings: Vec<ValueWarning>,
    /// Rows skipped because the order id, rank or due date was unusable.
    /// A configured due-date column makes the date mandatory in every rank mode.
    pub dropped_rows: usize,
}

/// Result of one full reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    pub orders: Vec<MergedOrder>,
    pub warnings: Vec<ValueWarning>,
    pub dropped_rows: usize,
}

// ============================================================================
// PRIORITY SHEET
// ============================================================================

struct PriorityLayout {
    order_id: usize,
    quantity: usize,
    service: usize,
    transfer_ref: usize,
    rank: Option<usize>,
    due_date: Option<usize>,
    value: Option<usize>,
    item_code: Option<usize>,
}

impl PriorityLayout {
    /// Resolve every configured header, failing on the first one absent.
    /// The rank (or due date) column is required only when it drives ranking.
    fn resolve(
        table: &Table,
        columns: &PriorityColumns,
        rank_source: RankSource,
    ) -> Result<Self, ColumnError> {
        let rank = match (&columns.rank, rank_source) {
            (Some(name), _) => Some(table.require_column(name)?),
            (None, RankSource::Column) => return Err(ColumnError::Unconfigured("the priority rank")),
            (None, _) => None,
        };
        let due_date = match (&columns.due_date, rank_source) {
            (Some(name), _) => Some(table.require_column(name)?),
            (None, RankSource::DueDate) => return Err(ColumnError::Unconfigured("the due date")),
            (None, _) => None,
        };

        Ok(PriorityLayout {
            rank,
            order_id: table.require_column(&columns.order_id)?,
            quantity: table.require_column(&columns.quantity)?,
            service: table.require_column(&columns.service)?,
            transfer_ref: table.require_column(&columns.transfer_ref)?,
            due_date,
            value: optional_column(table, &columns.value)?,
            item_code: optional_column(table, &columns.item_code)?,
        })
    }
}

fn optional_column(table: &Table, name: &Option<String>) -> Result<Option<usize>, ColumnError> {
    name.as_deref()
        .map(|n| table.require_column(n))
        .transpose()
}

/// Select, rename and coerce the priority sheet.
pub fn parse_priorities(
    table: &Table,
    columns: &PriorityColumns,
    rank_source: RankSource,
) -> Result<ParsedPriorities, ColumnError> {
    let layout = PriorityLayout::resolve(table, columns, rank_source)?;
    let mut parsed = ParsedPriorities::default();

    for row in 0..table.row_count() {
        let sheet_row = table.sheet_row(row);
        let mut warn = |column: &str, value: &SheetValue, action: WarningAction| {
            parsed.warnings.push(ValueWarning {
                row: sheet_row,
                column: column.to_string(),
                raw: value.raw_display(),
                action,
            });
        };

        if table.rows[row].iter().all(SheetValue::is_blank) {
            continue;
        }

        let id_cell = table.cell(row, layout.order_id);
        let order_id = match id_cell.as_text() {
            Some(id) => id,
            None => {
                parsed.dropped_rows += 1;
                continue;
            }
        };

        let rank = match layout.rank {
            Some(col) => {
                let cell = table.cell(row, col);
                let rank = cell.as_integer();
                if rank.is_none() && rank_source == RankSource::Column {
                    if !cell.is_blank() {
                        warn(&columns.rank.clone().unwrap_or_default(), cell, WarningAction::RowDropped);
                    }
                    parsed.dropped_rows += 1;
                    continue;
                }
                rank
            }
            None => None,
        };

        let due_date = match layout.due_date {
            Some(col) => {
                let cell = table.cell(row, col);
                let date = cell.as_date();
                if date.is_none() {
                    if !cell.is_blank() {
                        let name = columns.due_date.clone().unwrap_or_default();
                        warn(&name, cell, WarningAction::RowDropped);
                    }
                    parsed.dropped_rows += 1;
                    continue;
                }
                date
            }
            None => None,
        };

        let quantity_cell = table.cell(row, layout.quantity);
        let quantity = match quantity_cell.as_number() {
            Some(n) if n >= 0.0 => n.trunc().min(u32::MAX as f64) as u32,
            _ if quantity_cell.is_blank() => 0,
            _ => {
                warn(&columns.quantity, quantity_cell, WarningAction::DefaultedToZero);
                0
            }
        };

        let value = layout.value.and_then(|col| {
            let cell = table.cell(row, col);
            let value = cell.as_number();
            if value.is_none() && !cell.is_blank() {
                warn(
                    columns.value.as_deref().unwrap_or_default(),
                    cell,
                    WarningAction::Ignored,
                );
            }
            value
        });

        parsed.entries.push(PriorityEntry {
            order_id,
            quantity,
            service: table.cell(row, layout.service).as_text().unwrap_or_default(),
            transfer_ref: table.cell(row, layout.transfer_ref).as_text().unwrap_or_default(),
            rank,
            due_date,
            value,
            item_code: layout.item_code.and_then(|col| table.cell(row, col).as_text()),
        });
    }

    Ok(parsed)
}

// ============================================================================
// STATUS SHEET
// ============================================================================

/// Read the status sheet. Rows without an order id are skipped; a blank
/// status cell reads as pending.
pub fn parse_statuses(table: &Table, columns: &StatusColumns) -> Result<Vec<StatusEntry>, ColumnError> {
    let id_col = table.require_column(&columns.order_id)?;
    let status_col = table.require_column(&columns.status)?;

    Ok((0..table.row_count())
        .filter_map(|row| {
            let order_id = table.cell(row, id_col).as_text()?;
            let status = table
                .cell(row, status_col)
                .as_text()
                .map(|label| OrderStatus::from_label(&label))
                .unwrap_or_default();
            Some(StatusEntry { order_id, status })
        })
        .collect())
}

// ============================================================================
// RANK + JOIN
// ============================================================================

/// Order the entries and give each a rank. Every entry is kept.
///
/// - `Column`: stable ascending sort on the explicit rank, entries without
///   one go last and are numbered after the highest rank seen.
/// - `DueDate`: stable ascending sort on the due date (undated last), ranks 1..n.
/// - `RowOrder`: input order, ranks 1..n.
pub fn rank_entries(entries: &[PriorityEntry], rank_source: RankSource) -> Vec<(i64, &PriorityEntry)> {
    let mut ordered: Vec<&PriorityEntry> = entries.iter().collect();

    match rank_source {
        RankSource::Column => {
            ordered.sort_by_key(|e| (e.rank.is_none(), e.rank));
            let mut next = ordered.iter().filter_map(|e| e.rank).max().unwrap_or(0);
            ordered
                .into_iter()
                .map(|e| {
                    let rank = e.rank.unwrap_or_else(|| {
                        next += 1;
                        next
                    });
                    (rank, e)
                })
                .collect()
        }
        RankSource::DueDate => {
            ordered.sort_by_key(|e| (e.due_date.is_none(), e.due_date));
            number_in_order(ordered)
        }
        RankSource::RowOrder => number_in_order(ordered),
    }
}

fn number_in_order(ordered: Vec<&PriorityEntry>) -> Vec<(i64, &PriorityEntry)> {
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, e)| (i as i64 + 1, e))
        .collect()
}

/// Left join of the ranked priority entries onto the status rows.
///
/// Status rows whose id has no priority row are dropped. When an id appears
/// more than once in the status rows the first occurrence is used, so every
/// priority entry yields exactly one merged order.
pub fn merge_orders(
    entries: &[PriorityEntry],
    statuses: &[StatusEntry],
    rank_source: RankSource,
) -> Vec<MergedOrder> {
    let mut by_id: HashMap<&str, &OrderStatus> = HashMap::with_capacity(statuses.len());
    for entry in statuses {
        by_id.entry(entry.order_id.as_str()).or_insert(&entry.status);
    }

    rank_entries(entries, rank_source)
        .into_iter()
        .map(|(rank, entry)| {
            let status = by_id
                .get(entry.order_id.as_str())
                .map(|s| (*s).clone())
                .unwrap_or_default();
            MergedOrder::from_entry(entry, rank, status)
        })
        .collect()
}

/// Join already-parsed inputs and apply the load-time filter when enabled.
pub fn reconcile(parsed: ParsedPriorities, statuses: &[StatusEntry], config: &BoardConfig) -> MergeReport {
    let mut orders = merge_orders(&parsed.entries, statuses, config.rank_source);
    if config.filter_on_load {
        orders.retain(|o| config.status_filter.is_active(&o.status));
    }

    MergeReport {
        orders,
        warnings: parsed.warnings,
        dropped_rows: parsed.dropped_rows,
    }
}

/// Full routine over two in-memory sheets.
pub fn reconcile_tables(
    priority_table: &Table,
    status_table: &Table,
    config: &BoardConfig,
) -> Result<MergeReport, ColumnError> {
    let parsed = parse_priorities(priority_table, &config.priority_columns, config.rank_source)?;
    let statuses = parse_statuses(status_table, &config.status_columns)?;
    Ok(reconcile(parsed, &statuses, config))
}
