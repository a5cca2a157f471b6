//! FILENAME: core/persistence/src/test_support.rs
//! Workbook fixtures for the persistence tests.

use engine::SheetValue;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;

pub const PRIORITY_HEADERS: [&str; 5] = [
    "Prioridade",
    "Cotação de Venda  ↑",
    "Quantidade Solicitada",
    "Produto / Serviço: Descrição do Produto/Serviço",
    "Pv de Transferência",
];

pub const STATUS_HEADERS: [&str; 2] = ["Pedido", "Status"];

/// Write a single-sheet workbook with a header row.
pub fn write_workbook(path: &Path, headers: &[&str], rows: &[Vec<SheetValue>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }

    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, value) in row.iter().enumerate() {
            let c = c as u16;
            match value {
                SheetValue::Empty => {}
                SheetValue::Text(s) => {
                    worksheet.write_string(r, c, s.as_str()).unwrap();
                }
                SheetValue::Number(n) => {
                    worksheet.write_number(r, c, *n).unwrap();
                }
                SheetValue::Boolean(b) => {
                    worksheet.write_boolean(r, c, *b).unwrap();
                }
                SheetValue::Date(d) => {
                    let text = d.format("%Y-%m-%d").to_string();
                    let date = ExcelDateTime::parse_from_str(&text).unwrap();
                    worksheet.write_datetime_with_format(r, c, &date, &date_format).unwrap();
                }
                SheetValue::Error(e) => {
                    worksheet.write_string(r, c, format!("#{}", e)).unwrap();
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Priority row in the default column layout.
pub fn priority_row(rank: i64, order_id: &str, quantity: SheetValue, service: &str, pv: &str) -> Vec<SheetValue> {
    vec![
        SheetValue::Number(rank as f64),
        SheetValue::from(order_id),
        quantity,
        SheetValue::from(service),
        SheetValue::from(pv),
    ]
}

pub fn status_row(order_id: &str, status: &str) -> Vec<SheetValue> {
    vec![SheetValue::from(order_id), SheetValue::from(status)]
}
