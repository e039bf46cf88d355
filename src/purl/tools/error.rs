use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads catalogs, associates columns, or enriches a data package.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Raised when an ontology or association table lacks required columns.
    #[error("{} missing required columns: {}", path.display(), missing.join(", "))]
    MalformedCatalog { path: PathBuf, missing: Vec<String> },

    /// Raised when a specific file cannot be opened, read, or written.
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for IO failures not tied to a single file, e.g. the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a delimited table cannot be parsed or written.
    #[error("delimited table error in {}: {source}", path.display())]
    Delimited {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error in {}: {source}", path.display())]
    ExcelWrite {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error in {}: {source}", path.display())]
    ExcelRead {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// Raised when a workbook has no usable worksheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a data package descriptor does not follow the expected shape.
    #[error("invalid data package: {0}")]
    InvalidPackage(String),

    /// Raised when a resource is replaced that the package does not contain.
    #[error("data package has no resource named '{0}'")]
    UnknownResource(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when an output would be overwritten without `--force`.
    #[error("output file {0} exists, use --force to overwrite")]
    OutputExists(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    /// Builds a [`ToolError::FileAccess`] for the given path.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn delimited(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        ToolError::Delimited {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, missing: Vec<String>) -> Self {
        ToolError::MalformedCatalog {
            path: path.into(),
            missing,
        }
    }
}
