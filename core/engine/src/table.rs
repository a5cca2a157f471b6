//! FILENAME: core/engine/src/table.rs
//! PURPOSE: In-memory form of one source sheet: a header row plus data rows.
//! CONTEXT: Header names are matched exactly, embedded whitespace and arrows
//! included. No trimming or case folding happens here.

use crate::value::SheetValue;
use thiserror::Error;

static EMPTY_CELL: SheetValue = SheetValue::Empty;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Missing column: '{0}'")]
    Missing(String),

    #[error("No column configured for {0}")]
    Unconfigured(&'static str),
}

/// Sheet row of the first data row when the header sits on row 1.
pub const FIRST_DATA_ROW: usize = 2;

/// A fully materialized sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<SheetValue>>,
    /// 1-based sheet row of each entry in `rows`, as the spreadsheet program shows it.
    pub sheet_rows: Vec<usize>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
            sheet_rows: Vec::new(),
        }
    }

    /// Build a table from string headers, mostly for fixtures.
    pub fn with_headers(headers: &[&str]) -> Self {
        Self::new(headers.iter().map(|h| h.to_string()).collect())
    }

    /// Append a row directly below the previous one.
    pub fn push_row(&mut self, row: Vec<SheetValue>) {
        let sheet_row = self
            .sheet_rows
            .last()
            .map_or(FIRST_DATA_ROW, |last| last + 1);
        self.push_row_at(sheet_row, row);
    }

    /// Append a row that sits on `sheet_row` in the source (rows in between were skipped).
    pub fn push_row_at(&mut self, sheet_row: usize, row: Vec<SheetValue>) {
        self.sheet_rows.push(sheet_row);
        self.rows.push(row);
    }

    /// Sheet row number of data row `row`.
    pub fn sheet_row(&self, row: usize) -> usize {
        self.sheet_rows
            .get(row)
            .copied()
            .unwrap_or(row + FIRST_DATA_ROW)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, ColumnError> {
        self.column_index(name)
            .ok_or_else(|| ColumnError::Missing(name.to_string()))
    }

    /// Cell at (row, col). Short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &SheetValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}
