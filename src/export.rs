//! Excel export of table rows.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::table::Column;

/// Worksheet names are limited to 31 characters and a few forbidden symbols.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') { '-' } else { c })
        .take(31)
        .collect();
    if cleaned.trim().is_empty() { "Export".to_string() } else { cleaned }
}

/// Column width from the longest cell, within sensible bounds.
fn column_width<T>(column: &Column<T>, rows: &[&T]) -> f64 {
    let longest = rows
        .iter()
        .map(|row| column.cell(row).chars().count())
        .chain(std::iter::once(column.title.chars().count()))
        .max()
        .unwrap_or(10);
    (longest as f64 + 2.0).clamp(8.0, 50.0)
}

/// Write `rows` with the given columns to an Excel file.
///
/// Cells contain the same text the table shows. Callers pass the visible
/// columns and the filtered rows so the file matches what is on screen.
pub fn export_rows_to_excel<T>(title: &str, columns: &[&Column<T>], rows: &[&T], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(sheet_name(title))?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    for (col, column) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, column.title, &header_format)?;
        worksheet.set_column_width(col, column_width(column, rows))?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        for (col, column) in columns.iter().enumerate() {
            worksheet.write_string(r, col as u16, column.cell(row))?;
        }
    }

    // Autofilter
    if !rows.is_empty() && !columns.is_empty() {
        worksheet.autofilter(0, 0, rows.len() as u32, (columns.len() - 1) as u16)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    tracing::info!("Exported {} rows to {:?}", rows.len(), path);
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        code: &'static str,
        name: &'static str,
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("code", "Code", |r: &Row| r.code.to_string()),
            Column::new("name", "Full name", |r: &Row| r.name.to_string()),
        ]
    }

    #[test]
    fn test_sheet_name_sanitized() {
        assert_eq!(sheet_name("Bank / non-bank"), "Bank - non-bank");
        assert_eq!(sheet_name(""), "Export");
        assert_eq!(sheet_name(&"x".repeat(40)).chars().count(), 31);
    }

    #[test]
    fn test_column_width_bounds() {
        let cols = columns();
        let long = Row {
            code: "A",
            name: "A very long name that keeps going well past any reasonable column width",
        };
        let short = Row { code: "B", name: "Li" };
        assert_eq!(column_width(&cols[1], &[&long]), 50.0);
        assert_eq!(column_width(&cols[0], &[&short]), 8.0);
        assert_eq!(column_width(&cols[1], &[&short]), 11.0);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheets.xlsx");
        let cols = columns();
        let col_refs: Vec<&Column<Row>> = cols.iter().collect();
        let data = [
            Row { code: "M00001", name: "BENALI Karim" },
            Row { code: "M00002", name: "HADDAD Samia" },
        ];
        let rows: Vec<&Row> = data.iter().collect();

        export_rows_to_excel("Information sheets", &col_refs, &rows, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_filename() {
        let name = generate_export_filename("information_sheets");
        assert!(name.starts_with("information_sheets_"));
        assert!(name.ends_with(".xlsx"));
    }
}
