use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::purl::tools::error::{Result, ToolError};
use crate::purl::tools::io::table::Delimiter;
use crate::purl::tools::package::{RESOURCE_PROFILE, Resource, Schema, SchemaField};

/// Rows sampled per table when no other limit is configured.
pub const DEFAULT_SAMPLE_ROWS: usize = 100;

/// Produces a draft resource descriptor, with typed schema fields, for a
/// data file.
pub trait SchemaInferrer {
    fn infer(&self, path: &Path) -> Result<Resource>;
}

/// Infers `integer`, `number`, `boolean` or `string` fields from the first
/// rows of a delimited table. Blank cells and `missing_values` tokens carry no
/// type information.
#[derive(Debug, Clone)]
pub struct CsvSchemaInferrer {
    pub sample_rows: usize,
    pub missing_values: Vec<String>,
}

impl Default for CsvSchemaInferrer {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
            missing_values: Vec::new(),
        }
    }
}

impl SchemaInferrer for CsvSchemaInferrer {
    fn infer(&self, path: &Path) -> Result<Resource> {
        let file = File::open(path).map_err(|err| ToolError::file(path, err))?;
        let delimiter = Delimiter::for_path(path);
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
        let mut kinds = vec![FieldKind::Unknown; headers.len()];

        for record in reader.records().take(self.sample_rows) {
            let record = record.map_err(|err| ToolError::delimited(path, err))?;
            for (kind, value) in kinds.iter_mut().zip(record.iter()) {
                let value = value.trim();
                if !value.is_empty() && !self.missing_values.iter().any(|token| token == value) {
                    *kind = kind.widen(FieldKind::of(value));
                }
            }
        }

        let fields = headers
            .into_iter()
            .zip(kinds)
            .map(|(name, kind)| SchemaField {
                format: Some("default".to_string()),
                ..SchemaField::new(name, kind.as_str())
            })
            .collect::<Vec<_>>();

        debug!(path = %path.display(), fields = fields.len(), "inferred schema");

        Ok(Resource {
            name: resource_name(path),
            path: Some(path.to_string_lossy().into_owned()),
            profile: Some(RESOURCE_PROFILE.to_string()),
            format: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase),
            encoding: Some("utf-8".to_string()),
            schema: Schema {
                fields,
                missing_values: vec![String::new()],
                ..Schema::default()
            },
            ..Resource::default()
        })
    }
}

/// Resource name derived from the file stem: lowercased, with characters
/// outside `[a-z0-9._-]` replaced by `-`.
pub fn resource_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let name: String = stem
        .chars()
        .map(|ch| {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '-'
            }
        })
        .collect();
    if name.is_empty() {
        "resource".to_string()
    } else {
        name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Unknown,
    Integer,
    Number,
    Boolean,
    String,
}

impl FieldKind {
    fn of(value: &str) -> Self {
        if value.parse::<i64>().is_ok() {
            FieldKind::Integer
        } else if value.parse::<f64>().is_ok_and(f64::is_finite) {
            FieldKind::Number
        } else if matches!(
            value.to_ascii_lowercase().as_str(),
            "true" | "false" | "yes" | "no"
        ) {
            FieldKind::Boolean
        } else {
            FieldKind::String
        }
    }

    fn widen(self, other: FieldKind) -> FieldKind {
        use FieldKind::*;
        match (self, other) {
            (Unknown, kind) | (kind, Unknown) => kind,
            (a, b) if a == b => a,
            (Integer, Number) | (Number, Integer) => Number,
            _ => String,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Unknown | FieldKind::String => "string",
        }
    }
}
