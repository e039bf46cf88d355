//! Offline ontology lookup tables.
//!
//! Two shapes of lookup table exist. The term catalog is keyed by PURL and
//! feeds the interactive association engine; the parameter catalog is keyed
//! by column name and carries the raw attribute strings applied to a data
//! package schema.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::purl::tools::error::Result;
use crate::purl::tools::io::table::{Delimiter, Table, read_delimited};
use crate::purl::tools::model::{
    FRICTIONLESS_FORMAT, FRICTIONLESS_TYPE, MEASUREMENT_SOURCE_PROTOCOL, MEASUREMENT_SOURCE_PURL,
    PARAMETER, SOURCE_URL, Term, UNITS_PURL,
};

pub const PURL: &str = "PURL";
pub const PURL_LABEL: &str = "PURL LABEL";
pub const UNIT_LABEL: &str = "UNIT LABEL";
pub const STANDARD_UNIT_PURL: &str = "STANDARD UNIT PURL";

/// Columns a term catalog must declare.
pub const TERM_COLUMNS: [&str; 4] = [PURL, PURL_LABEL, UNIT_LABEL, STANDARD_UNIT_PURL];

pub const RDF_TYPE: &str = "rdftype";
pub const SEARCHABLE: &str = "pm:searchable";

static ACCESSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+_\d+").expect("accession pattern is valid"));

/// Extracts the first `LETTERS_DIGITS` accession embedded in a PURL.
pub fn extract_accession(purl: &str) -> Option<&str> {
    ACCESSION_RE.find(purl).map(|found| found.as_str())
}

/// Ordered set of ontology terms with a PURL index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OntologyCatalog {
    terms: Vec<Term>,
    by_purl: HashMap<String, usize>,
}

impl OntologyCatalog {
    /// Loads a tab-delimited term catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let table = read_delimited(path, Delimiter::Tab)?;
        let catalog = Self::parse(&table)?;
        info!(
            path = %path.display(),
            terms = catalog.len(),
            "loaded ontology terms"
        );
        Ok(catalog)
    }

    /// Builds the catalog from a table. Rows whose PURL carries no accession
    /// are skipped.
    pub fn parse(table: &Table) -> Result<Self> {
        table.require(&TERM_COLUMNS)?;

        let terms = table
            .records()
            .filter_map(|record| {
                let purl = record.get(PURL);
                match extract_accession(purl) {
                    Some(accession) => Some(Term {
                        accession: accession.to_string(),
                        purl: purl.to_string(),
                        label: record.get(PURL_LABEL).to_string(),
                        unit_label: record.get(UNIT_LABEL).to_string(),
                        unit_purl: record.get(STANDARD_UNIT_PURL).to_string(),
                    }),
                    None => {
                        debug!(purl, "skipping catalog row without accession");
                        None
                    }
                }
            })
            .collect();

        Ok(Self::from_terms(terms))
    }

    /// Builds the catalog from already parsed terms. A repeated PURL resolves
    /// to its last occurrence.
    pub fn from_terms(terms: Vec<Term>) -> Self {
        let by_purl = terms
            .iter()
            .enumerate()
            .map(|(index, term)| (term.purl.clone(), index))
            .collect();
        Self { terms, by_purl }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn get(&self, index: usize) -> Option<&Term> {
        self.terms.get(index)
    }

    pub fn by_purl(&self, purl: &str) -> Option<&Term> {
        self.by_purl.get(purl).map(|&index| &self.terms[index])
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Raw attribute strings for one parameter, keyed by catalog header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterEntry {
    values: BTreeMap<String, String>,
}

impl ParameterEntry {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Trimmed value under `key`, or `None` when absent or blank.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn frictionless_type(&self) -> Option<&str> {
        self.value(FRICTIONLESS_TYPE)
    }

    pub fn frictionless_format(&self) -> Option<&str> {
        self.value(FRICTIONLESS_FORMAT)
    }

    pub fn rdf_type(&self) -> Option<&str> {
        self.value(RDF_TYPE)
    }

    pub fn units_purl(&self) -> Option<&str> {
        self.value(UNITS_PURL)
    }

    pub fn source_url(&self) -> Option<&str> {
        self.value(SOURCE_URL)
    }

    pub fn measurement_source_purl(&self) -> Option<&str> {
        self.value(MEASUREMENT_SOURCE_PURL)
    }

    pub fn measurement_source_protocol(&self) -> Option<&str> {
        self.value(MEASUREMENT_SOURCE_PROTOCOL)
    }

    pub fn searchable(&self) -> Option<&str> {
        self.value(SEARCHABLE)
    }
}

/// Parameter-keyed catalog used for schema enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterCatalog {
    entries: HashMap<String, ParameterEntry>,
}

impl ParameterCatalog {
    /// Loads a tab-delimited parameter catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let table = read_delimited(path, Delimiter::Tab)?;
        let catalog = Self::parse(&table)?;
        info!(
            path = %path.display(),
            parameters = catalog.len(),
            "loaded parameter catalog"
        );
        Ok(catalog)
    }

    /// Builds the catalog from a table with a `parameter` column. Rows with an
    /// empty parameter are ignored; a repeated parameter keeps its last row.
    pub fn parse(table: &Table) -> Result<Self> {
        table.require(&[PARAMETER])?;

        let mut entries = HashMap::new();
        for record in table.records() {
            let parameter = record.get(PARAMETER);
            if parameter.is_empty() {
                continue;
            }
            let values = record
                .pairs()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            entries.insert(parameter.to_string(), ParameterEntry::new(values));
        }

        Ok(Self { entries })
    }

    pub fn insert(&mut self, parameter: impl Into<String>, entry: ParameterEntry) {
        self.entries.insert(parameter.into(), entry);
    }

    pub fn get(&self, parameter: &str) -> Option<&ParameterEntry> {
        self.entries.get(parameter)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
