// FILENAME: core\persistence\src\xlsx_reader.rs

use crate::LoadError;
use calamine::{open_workbook_auto, Data, Reader};
use engine::{SheetValue, Table};
use std::path::Path;

/// Read the first worksheet of a workbook (xlsx, xlsm, xls or ods).
/// The first row of the used range is the header row; fully blank rows
/// below it are skipped.
pub fn read_table(path: &Path) -> Result<Table, LoadError> {
    let unreadable = |reason: String| LoadError::UnreadableFile {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    let sheet_names = workbook.sheet_names().to_vec();

    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| unreadable("Workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| unreadable(e.to_string()))?;

    // The used range may start below row 1; sheet rows are 1-based.
    let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header) => header.iter().map(header_text).collect(),
        None => Vec::new(),
    };

    let mut table = Table::new(headers);
    for (offset, row) in rows.enumerate() {
        let values: Vec<SheetValue> = row.iter().map(convert_cell).collect();
        if values.iter().all(SheetValue::is_blank) {
            continue;
        }
        table.push_row_at(header_row + 1 + offset, values);
    }

    Ok(table)
}

/// Header cells are kept verbatim; numeric headers are formatted.
fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => convert_cell(other).as_text().unwrap_or_default(),
    }
}

pub(crate) fn convert_cell(cell: &Data) -> SheetValue {
    match cell {
        Data::Empty => SheetValue::Empty,
        Data::String(s) => SheetValue::Text(s.clone()),
        Data::Float(f) => SheetValue::Number(*f),
        Data::Int(i) => SheetValue::Number(*i as f64),
        Data::Bool(b) => SheetValue::Boolean(*b),
        Data::Error(e) => SheetValue::Error(format!("{:?}", e)),
        // as_datetime honours the workbook's 1900/1904 date system.
        Data::DateTime(dt) if dt.is_duration() => SheetValue::Number(dt.as_f64()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| SheetValue::Date(d.date()))
            .unwrap_or(SheetValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => SheetValue::Text(s.clone()),
        Data::DurationIso(s) => SheetValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_workbook;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};
    use engine::NaiveDate;

    #[test]
    fn test_reads_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.xlsx");
        write_workbook(
            &path,
            &["Pedido", "Status"],
            &[
                vec![SheetValue::from("CV-001"), SheetValue::from("Concluído")],
                vec![SheetValue::Empty, SheetValue::Empty],
                vec![SheetValue::Number(10580.0), SheetValue::from("Pendente")],
            ],
        );

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["Pedido".to_string(), "Status".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.sheet_rows, vec![2, 4]);
        assert_eq!(table.cell(0, 1), &SheetValue::from("Concluído"));
        assert_eq!(table.cell(1, 0).as_text().as_deref(), Some("10580"));
    }

    #[test]
    fn test_header_whitespace_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prioridades.xlsx");
        write_workbook(&path, &["Cotação de Venda  ↑"], &[vec![SheetValue::from("A")]]);

        let table = read_table(&path).unwrap();
        assert_eq!(table.column_index("Cotação de Venda  ↑"), Some(0));
    }

    #[test]
    fn test_garbage_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        match read_table(&path) {
            Err(LoadError::UnreadableFile { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected UnreadableFile, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_cell_variants() {
        assert_eq!(convert_cell(&Data::Int(3)), SheetValue::Number(3.0));
        assert_eq!(convert_cell(&Data::Bool(true)), SheetValue::Boolean(true));
        assert_eq!(convert_cell(&Data::Empty), SheetValue::Empty);
        assert_eq!(
            convert_cell(&Data::Error(CellErrorType::NA)),
            SheetValue::Error("NA".to_string())
        );
    }

    #[test]
    fn test_date_cells_become_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datas.xlsx");
        let due = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        write_workbook(&path, &["Entrega"], &[vec![SheetValue::Date(due)]]);

        let table = read_table(&path).unwrap();
        assert_eq!(table.cell(0, 0), &SheetValue::Date(due));
    }

    #[test]
    fn test_date_systems_are_honoured() {
        let in_1900 = Data::DateTime(ExcelDateTime::new(45658.5, ExcelDateTimeType::DateTime, false));
        let in_1904 = Data::DateTime(ExcelDateTime::new(0.0, ExcelDateTimeType::DateTime, true));
        let duration = Data::DateTime(ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false));

        assert_eq!(convert_cell(&in_1900), SheetValue::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert_eq!(convert_cell(&in_1904), SheetValue::Date(NaiveDate::from_ymd_opt(1904, 1, 1).unwrap()));
        assert_eq!(convert_cell(&duration), SheetValue::Number(1.5));
    }

    #[test]
    fn test_sheet_rows_survive_blank_rows_and_offset_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prioridades.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        // Header on row 2, data on rows 3 and 6.
        sheet.write_string(1, 0, "Pedido").unwrap();
        sheet.write_string(2, 0, "A").unwrap();
        sheet.write_string(5, 0, "B").unwrap();
        workbook.save(&path).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["Pedido".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.sheet_row(0), 3);
        assert_eq!(table.sheet_row(1), 6);
    }
}
