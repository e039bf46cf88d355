//! Applies parameter catalog attributes to data package schemas.
//!
//! Each attribute is merged on its own: a non-blank catalog value replaces the
//! field's value, otherwise the field keeps whatever inference gave it.

use serde_json::Value;
use tracing::{debug, info};

use crate::purl::tools::catalog::{ParameterCatalog, ParameterEntry};
use crate::purl::tools::error::Result;
use crate::purl::tools::package::{DataPackage, Resource, SchemaField};

pub const FIELD_RDF_TYPE: &str = "rdftype";
pub const FIELD_UNIT_RDF_TYPE: &str = "pm:unitRdfType";
pub const FIELD_SOURCE_URL: &str = "pm:sourceUrl";
pub const FIELD_MEASUREMENT_SOURCE_RDF_TYPE: &str = "pm:measurementSourceRdfType";
pub const FIELD_MEASUREMENT_SOURCE_PROTOCOL_URL: &str = "pm:measurementSourceProtocolUrl";
pub const FIELD_SEARCHABLE: &str = "pm:searchable";

/// Summary of an enrichment pass over a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Resources swapped for their enriched descriptor, in package order.
    pub replaced: Vec<String>,
    /// Fields that had a catalog entry.
    pub fields_matched: usize,
}

/// Merges catalog attributes into one field. Returns `false`, leaving the
/// field untouched, when the field is unnamed or has no catalog entry.
pub fn enrich_field(field: &mut SchemaField, catalog: &ParameterCatalog) -> bool {
    if field.name.is_empty() {
        return false;
    }
    let Some(entry) = catalog.get(&field.name) else {
        return false;
    };
    apply_entry(field, entry);
    true
}

/// Merges catalog attributes into every field; returns how many matched.
pub fn enrich_fields(fields: &mut [SchemaField], catalog: &ParameterCatalog) -> usize {
    fields
        .iter_mut()
        .map(|field| enrich_field(field, catalog))
        .filter(|&matched| matched)
        .count()
}

/// Returns an enriched copy of `resource`. Missing-value tokens are appended
/// once to the resource schema, skipping tokens already listed.
pub fn enrich_resource<S: AsRef<str>>(
    resource: &Resource,
    catalog: &ParameterCatalog,
    missing_values: &[S],
) -> (Resource, usize) {
    let mut updated = resource.clone();
    updated.schema.extend_missing_values(missing_values);
    let matched = enrich_fields(&mut updated.schema.fields, catalog);
    (updated, matched)
}

/// Enriches every resource of `package` and commits each by replacing the
/// resource of the same name.
pub fn enrich_package<S: AsRef<str>>(
    package: &mut DataPackage,
    catalog: &ParameterCatalog,
    missing_values: &[S],
) -> Result<EnrichReport> {
    let mut report = EnrichReport::default();

    for name in package.resource_names() {
        let Some(resource) = package.resource(&name) else {
            continue;
        };
        let (updated, matched) = enrich_resource(resource, catalog, missing_values);
        debug!(resource = %name, matched, "enriched resource schema");
        package.replace_resource(updated)?;
        report.fields_matched += matched;
        report.replaced.push(name);
    }

    info!(
        resources = report.replaced.len(),
        fields = report.fields_matched,
        "applied ontology attributes"
    );
    Ok(report)
}

fn apply_entry(field: &mut SchemaField, entry: &ParameterEntry) {
    if let Some(value) = entry.frictionless_type() {
        field.field_type = Some(value.to_string());
    }
    if let Some(value) = entry.frictionless_format() {
        field.format = Some(value.to_string());
    }

    let attributes = [
        (FIELD_RDF_TYPE, entry.rdf_type()),
        (FIELD_UNIT_RDF_TYPE, entry.units_purl()),
        (FIELD_SOURCE_URL, entry.source_url()),
        (
            FIELD_MEASUREMENT_SOURCE_RDF_TYPE,
            entry.measurement_source_purl(),
        ),
        (
            FIELD_MEASUREMENT_SOURCE_PROTOCOL_URL,
            entry.measurement_source_protocol(),
        ),
    ];
    for (key, value) in attributes {
        if let Some(value) = value {
            field.set_attribute(key, Value::String(value.to_string()));
        }
    }

    if let Some(value) = entry.searchable() {
        field.set_attribute(FIELD_SEARCHABLE, searchable_value(value));
    }
}

fn searchable_value(raw: &str) -> Value {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Value::Bool(true),
        "false" | "no" | "n" | "0" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}
