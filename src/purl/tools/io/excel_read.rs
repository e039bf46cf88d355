use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::purl::tools::error::{Result, ToolError};
use crate::purl::tools::io::table::Table;

/// Reads the first worksheet of a workbook as a [`Table`]. The first row is
/// the header; trailing empty rows are dropped.
pub fn read_first_sheet(path: &Path) -> Result<Table> {
    let read_error = |source: calamine::XlsxError| ToolError::ExcelRead {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_error)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            ToolError::InvalidWorkbook(format!("{} has no worksheets", path.display()))
        })?;
    let range = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| {
            ToolError::InvalidWorkbook(format!("{} is missing sheet '{sheet}'", path.display()))
        })?
        .map_err(read_error)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_to_string(Some(cell)))
            .collect(),
        None => Vec::new(),
    };

    let rows = rows
        .map(|row| {
            row.iter()
                .map(|cell| cell_to_string(Some(cell)))
                .collect::<Vec<_>>()
        })
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect();

    Ok(Table {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
