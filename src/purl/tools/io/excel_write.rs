use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::purl::tools::error::{Result, ToolError};

/// Sheet name used for association workbooks.
pub const ASSOCIATIONS_SHEET: &str = "Associations";

/// Writes a single-sheet workbook with a header row and an autofilter table.
pub fn write_sheet(
    path: &Path,
    sheet_name: &str,
    columns: &[&str],
    rows: &[Vec<String>],
) -> Result<()> {
    build_and_save(path, sheet_name, columns, rows).map_err(|source| ToolError::ExcelWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn build_and_save(
    path: &Path,
    sheet_name: &str,
    columns: &[&str],
    rows: &[Vec<String>],
) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col_idx, header) in columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }

    if !rows.is_empty() {
        let mut table = rust_xlsxwriter::Table::new();
        table.set_autofilter(true);
        let col_end = (columns.len() as u16).saturating_sub(1);
        worksheet.add_table(0, 0, rows.len() as u32, col_end, &table)?;
    }

    workbook.save(path)?;
    Ok(())
}
