use std::fs;
use std::path::PathBuf;

use purl_tools::ToolError;
use purl_tools::catalog::{OntologyCatalog, ParameterCatalog, extract_accession};
use purl_tools::io::Table;
use tempfile::tempdir;

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table {
        path: PathBuf::from("terms.tsv"),
        headers: headers.iter().map(|header| header.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    }
}

const TERM_HEADER: [&str; 4] = ["PURL", "PURL LABEL", "UNIT LABEL", "STANDARD UNIT PURL"];

#[test]
fn accession_is_extracted_from_purl() {
    assert_eq!(extract_accession("http://x/PO_0000003"), Some("PO_0000003"));
    assert_eq!(
        extract_accession("http://purl.obolibrary.org/obo/PATO_0000146"),
        Some("PATO_0000146")
    );
    assert_eq!(extract_accession("http://x/no-accession"), None);
    assert_eq!(extract_accession("http://x/po_0000003"), None);
}

#[test]
fn rows_without_accession_are_dropped() {
    let table = table(
        &TERM_HEADER,
        &[
            &["http://x/PO_0000003", "whole plant", "", ""],
            &["http://x/plant-height", "plant height", "cm", "http://x/UO_0000015"],
            &["http://x/PATO_0000146", "color", "degree", "http://x/UO_0000185"],
        ],
    );

    let catalog = OntologyCatalog::parse(&table).expect("catalog parsed");

    let accessions: Vec<&str> = catalog
        .terms()
        .iter()
        .map(|term| term.accession.as_str())
        .collect();
    assert_eq!(accessions, vec!["PO_0000003", "PATO_0000146"]);

    let color = catalog.by_purl("http://x/PATO_0000146").expect("color term");
    assert_eq!(color.label, "color");
    assert_eq!(color.unit_label, "degree");
    assert_eq!(color.unit_purl, "http://x/UO_0000185");
    assert!(catalog.by_purl("http://x/plant-height").is_none());
}

#[test]
fn duplicate_purl_resolves_to_last_row() {
    let table = table(
        &TERM_HEADER,
        &[
            &["http://x/PO_0000003", "first", "", ""],
            &["http://x/PO_0000003", "second", "", ""],
        ],
    );

    let catalog = OntologyCatalog::parse(&table).expect("catalog parsed");

    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.by_purl("http://x/PO_0000003").map(|term| term.label.as_str()),
        Some("second")
    );
}

#[test]
fn missing_term_columns_are_reported() {
    let table = table(&["PURL", "UNIT LABEL"], &[&["http://x/PO_0000003", ""]]);

    let error = OntologyCatalog::parse(&table).expect_err("catalog rejected");

    match error {
        ToolError::MalformedCatalog { path, missing } => {
            assert_eq!(path, PathBuf::from("terms.tsv"));
            assert_eq!(missing, vec!["PURL LABEL", "STANDARD UNIT PURL"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn term_catalog_loads_from_tab_delimited_file() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("terms.tsv");
    fs::write(
        &path,
        "PURL\tPURL LABEL\tUNIT LABEL\tSTANDARD UNIT PURL\n\
         http://purl.obolibrary.org/obo/PO_0000003\twhole plant\t\t\n\
         http://purl.obolibrary.org/obo/TO_0000207\tplant height\tcentimeter\thttp://purl.obolibrary.org/obo/UO_0000015\n",
    )
    .expect("terms written");

    let catalog = OntologyCatalog::load(&path).expect("catalog loaded");

    assert_eq!(catalog.len(), 2);
    let height = catalog.get(1).expect("second term");
    assert_eq!(height.accession, "TO_0000207");
    assert_eq!(height.unit_label, "centimeter");
}

#[test]
fn missing_catalog_file_names_the_path() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("absent.tsv");

    let error = OntologyCatalog::load(&path).expect_err("load fails");

    match error {
        ToolError::FileAccess { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parameter_catalog_keys_rows_by_parameter() {
    let table = table(
        &["parameter", "frictionless type", "rdftype", "pm:searchable"],
        &[
            &["temp", "number", "http://x/PATO_0000146", "true"],
            &["", "string", "", ""],
            &["site", "  ", "", ""],
            &["temp", "integer", "", ""],
        ],
    );

    let catalog = ParameterCatalog::parse(&table).expect("catalog parsed");

    assert_eq!(catalog.len(), 2);
    let temp = catalog.get("temp").expect("temp entry");
    assert_eq!(temp.frictionless_type(), Some("integer"));
    assert_eq!(temp.rdf_type(), None);
    let site = catalog.get("site").expect("site entry");
    assert_eq!(site.frictionless_type(), None);
    assert_eq!(site.units_purl(), None);
}

#[test]
fn parameter_catalog_requires_parameter_column() {
    let table = table(&["name", "frictionless type"], &[&["temp", "number"]]);

    let error = ParameterCatalog::parse(&table).expect_err("catalog rejected");

    assert!(matches!(
        error,
        ToolError::MalformedCatalog { ref missing, .. } if missing == &vec!["parameter".to_string()]
    ));
}
