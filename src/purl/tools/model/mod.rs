/// Header of the association table, in the order it is written.
pub const ASSOCIATION_HEADER: [&str; 11] = [
    PARAMETER,
    RDF_TYPE_LABEL,
    RDF_TYPE_PURL,
    UNITS_LABEL,
    UNITS_PURL,
    MEASUREMENT_SOURCE_LABEL,
    MEASUREMENT_SOURCE_PURL,
    MEASUREMENT_SOURCE_PROTOCOL,
    SOURCE_URL,
    FRICTIONLESS_TYPE,
    FRICTIONLESS_FORMAT,
];

pub const PARAMETER: &str = "parameter";
pub const RDF_TYPE_LABEL: &str = "rdf type purl label";
pub const RDF_TYPE_PURL: &str = "rdf type purl";
pub const UNITS_LABEL: &str = "units label";
pub const UNITS_PURL: &str = "units purl";
pub const MEASUREMENT_SOURCE_LABEL: &str = "measurement source purl label";
pub const MEASUREMENT_SOURCE_PURL: &str = "measurement source purl";
pub const MEASUREMENT_SOURCE_PROTOCOL: &str = "pm:measurement source protocol";
pub const SOURCE_URL: &str = "pm:source url";
pub const FRICTIONLESS_TYPE: &str = "frictionless type";
pub const FRICTIONLESS_FORMAT: &str = "frictionless format";

/// An ontology concept addressed by its PURL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Short code extracted from the PURL, e.g. `PO_0000003`.
    pub accession: String,
    /// Full PURL, unique within a catalog.
    pub purl: String,
    /// Human-readable name.
    pub label: String,
    /// Unit label, possibly empty.
    pub unit_label: String,
    /// Unit PURL, possibly empty.
    pub unit_purl: String,
}

/// A table column under annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub term: Option<Term>,
}

impl Column {
    /// Creates an unassociated column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            term: None,
        }
    }

    /// Associates the column with a term, replacing any previous one.
    pub fn associate(&mut self, term: Term) {
        self.term = Some(term);
    }

    /// Converts the column into its persisted association row.
    pub fn to_row(&self) -> AssociationRow {
        let mut row = AssociationRow {
            parameter: self.name.clone(),
            ..AssociationRow::default()
        };
        if let Some(term) = &self.term {
            row.rdf_type_label = term.label.clone();
            row.rdf_type_purl = term.purl.clone();
            row.units_label = term.unit_label.clone();
            row.units_purl = term.unit_purl.clone();
        }
        row
    }
}

/// A single persisted association. Absent values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationRow {
    pub parameter: String,
    pub rdf_type_label: String,
    pub rdf_type_purl: String,
    pub units_label: String,
    pub units_purl: String,
    pub measurement_source_label: String,
    pub measurement_source_purl: String,
    pub measurement_source_protocol: String,
    pub source_url: String,
    pub frictionless_type: String,
    pub frictionless_format: String,
}

impl AssociationRow {
    /// Cells in [`ASSOCIATION_HEADER`] order.
    pub fn cells(&self) -> [&str; 11] {
        [
            self.parameter.as_str(),
            self.rdf_type_label.as_str(),
            self.rdf_type_purl.as_str(),
            self.units_label.as_str(),
            self.units_purl.as_str(),
            self.measurement_source_label.as_str(),
            self.measurement_source_purl.as_str(),
            self.measurement_source_protocol.as_str(),
            self.source_url.as_str(),
            self.frictionless_type.as_str(),
            self.frictionless_format.as_str(),
        ]
    }
}
