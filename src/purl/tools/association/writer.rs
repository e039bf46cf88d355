use std::fs::File;
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::purl::tools::association::store::AssociationStore;
use crate::purl::tools::error::{Result, ToolError};
use crate::purl::tools::io::excel_write::{self, ASSOCIATIONS_SHEET};
use crate::purl::tools::io::table::is_workbook;
use crate::purl::tools::model::ASSOCIATION_HEADER;

/// Writes every column of `store` to `path` under the fixed association
/// header. `.xlsx` paths produce a workbook, anything else tab-delimited text.
/// A failure part way through leaves whatever was already written.
pub fn write_associations(path: &Path, store: &AssociationStore) -> Result<()> {
    if is_workbook(path) {
        let rows: Vec<Vec<String>> = store
            .rows()
            .iter()
            .map(|row| row.cells().iter().map(|cell| cell.to_string()).collect())
            .collect();
        excel_write::write_sheet(path, ASSOCIATIONS_SHEET, &ASSOCIATION_HEADER, &rows)?;
    } else {
        let file = File::create(path).map_err(|err| ToolError::file(path, err))?;
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(file);
        writer
            .write_record(ASSOCIATION_HEADER)
            .map_err(|err| ToolError::delimited(path, err))?;
        for row in store.rows() {
            writer
                .write_record(row.cells())
                .map_err(|err| ToolError::delimited(path, err))?;
        }
        writer.flush().map_err(|err| ToolError::file(path, err))?;
    }

    info!(
        path = %path.display(),
        columns = store.len(),
        associated = store.associated_count(),
        "wrote association table"
    );
    Ok(())
}
