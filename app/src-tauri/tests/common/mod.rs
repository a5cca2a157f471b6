//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for the board's backend integration tests.

#![allow(dead_code)]

use app_lib::{board, create_app_state_with, AppState, BoardResponse, PollResponse};
use engine::{BoardConfig, BoardView};
use filetime::{set_file_mtime, FileTime};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PRIORITY_HEADERS: [&str; 5] = [
    "Prioridade",
    "Cotação de Venda  ↑",
    "Quantidade Solicitada",
    "Produto / Serviço: Descrição do Produto/Serviço",
    "Pv de Transferência",
];

pub const STATUS_HEADERS: [&str; 2] = ["Pedido", "Status"];

/// Priority fixture row: (rank, order id, quantity, description, PV).
pub type PriorityRow<'a> = (i64, &'a str, f64, &'a str, &'a str);

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
    /// Holds the spreadsheets for file-backed harnesses.
    pub dir: TempDir,
}

impl TestHarness {
    /// Harness running on the built-in sample orders.
    pub fn with_sample_data() -> Self {
        let dir = tempfile::tempdir().unwrap();
        TestHarness {
            state: create_app_state_with(BoardConfig::sample(), dir.path()),
            dir,
        }
    }

    /// Harness reading the default relative paths under a fresh temp directory.
    /// No spreadsheets are written.
    pub fn with_files() -> Self {
        Self::with_config(BoardConfig::default())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Dados")).unwrap();
        TestHarness {
            state: create_app_state_with(config, dir.path()),
            dir,
        }
    }

    pub fn priority_path(&self) -> PathBuf {
        self.dir.path().join(&self.state.config.priority_path)
    }

    pub fn status_path(&self) -> PathBuf {
        self.dir.path().join(&self.state.config.status_path)
    }

    pub fn write_priorities(&self, rows: &[PriorityRow]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &PRIORITY_HEADERS);
        for (i, (rank, id, quantity, service, pv)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_number(r, 0, *rank as f64).unwrap();
            sheet.write_string(r, 1, *id).unwrap();
            sheet.write_number(r, 2, *quantity).unwrap();
            sheet.write_string(r, 3, *service).unwrap();
            sheet.write_string(r, 4, *pv).unwrap();
        }
        workbook.save(self.priority_path()).unwrap();
    }

    pub fn write_statuses(&self, rows: &[(&str, &str)]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &STATUS_HEADERS);
        for (i, (id, status)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_string(r, 0, *id).unwrap();
            sheet.write_string(r, 1, *status).unwrap();
        }
        workbook.save(self.status_path()).unwrap();
    }

    /// Pin a file's modification time so reload decisions are deterministic.
    pub fn touch(&self, path: &Path, unix_seconds: i64) {
        set_file_mtime(path, FileTime::from_unix_time(unix_seconds, 0)).unwrap();
    }

    pub fn poll(&self) -> PollResponse {
        board::poll(&self.state).unwrap()
    }

    pub fn refresh(&self) -> PollResponse {
        board::refresh(&self.state).unwrap()
    }

    pub fn current(&self) -> BoardResponse {
        board::current(&self.state).unwrap()
    }

    /// The rendered board, panicking when the state is not Ready.
    pub fn board(&self) -> BoardView {
        match self.current() {
            BoardResponse::Ready { board, .. } => board,
            other => panic!("expected a ready board, got {:?}", other),
        }
    }

    pub fn top_labels(&self) -> Vec<String> {
        self.board().top.items.into_iter().map(|i| i.label).collect()
    }
}

fn write_headers(sheet: &mut rust_xlsxwriter::Worksheet, headers: &[&str]) {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
}
