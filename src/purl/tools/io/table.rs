use std::fs::File;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::purl::tools::error::{Result, ToolError};
use crate::purl::tools::io::excel_read;

/// Field separator of a delimited text table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// `,` for `.csv` files, tab for everything else.
    pub fn for_path(path: &Path) -> Self {
        match extension(path).as_deref() {
            Some("csv") => Delimiter::Comma,
            _ => Delimiter::Tab,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

/// A fully loaded table: header row plus string cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Position of the first header with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Fails with [`ToolError::MalformedCatalog`] when any required header is absent.
    pub fn require(&self, required: &[&str]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ToolError::malformed(&self.path, missing))
        }
    }

    /// Iterates rows as header-addressable records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |cells| Record {
            table: self,
            cells: cells.as_slice(),
        })
    }
}

/// One data row of a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a Table,
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// Cell under the named header; short rows and unknown headers yield `""`.
    pub fn get(&self, name: &str) -> &'a str {
        self.table
            .column_index(name)
            .and_then(|index| self.cells.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Iterates `(header, value)` pairs, skipping cells beyond the header.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let cells = self.cells;
        self.table
            .headers
            .iter()
            .enumerate()
            .map(move |(index, header)| {
                let value = cells.get(index).map(String::as_str).unwrap_or("");
                (header.as_str(), value)
            })
    }
}

/// Reads an association table. Association files are tab-delimited whatever
/// their extension, except `.xlsx` workbooks.
pub fn read_association_table(path: &Path) -> Result<Table> {
    if is_workbook(path) {
        excel_read::read_first_sheet(path)
    } else {
        read_delimited(path, Delimiter::Tab)
    }
}

/// Reads only the header row of a table.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    if is_workbook(path) {
        return Ok(excel_read::read_first_sheet(path)?.headers);
    }

    let file = File::open(path).map_err(|err| ToolError::file(path, err))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(Delimiter::for_path(path).as_byte())
        .flexible(true)
        .from_reader(file);
    let headers = reader
        .headers()
        .map_err(|err| ToolError::delimited(path, err))?
        .iter()
        .map(str::to_string)
        .collect();
    Ok(headers)
}

/// Reads a delimited text table with a header row.
pub fn read_delimited(path: &Path, delimiter: Delimiter) -> Result<Table> {
    let file = File::open(path).map_err(|err| ToolError::file(path, err))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| ToolError::delimited(path, err))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| ToolError::delimited(path, err))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read delimited table"
    );

    Ok(Table {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

/// True for paths with an `.xlsx` extension.
pub fn is_workbook(path: &Path) -> bool {
    extension(path).as_deref() == Some("xlsx")
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
