use std::collections::HashMap;

use tracing::debug;

use crate::purl::tools::catalog::OntologyCatalog;
use crate::purl::tools::error::Result;
use crate::purl::tools::io::table::Table;
use crate::purl::tools::model::{AssociationRow, Column, PARAMETER, RDF_TYPE_PURL, Term};

/// Columns a prior association table must declare.
pub const PRIOR_COLUMNS: [&str; 2] = [PARAMETER, RDF_TYPE_PURL];

/// The columns of one data table in header order, each optionally associated
/// with an ontology term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssociationStore {
    columns: Vec<Column>,
}

impl AssociationStore {
    /// Creates a store of unassociated columns.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: headers.into_iter().map(Column::new).collect(),
        }
    }

    /// Builds the store for a table header, seeding associations from a prior
    /// association table when one is given.
    ///
    /// Prior rows whose `rdf type purl` is not in `catalog` are ignored, so a
    /// column whose term has since left the catalog starts unassociated.
    pub fn build(
        headers: &[String],
        prior: Option<&Table>,
        catalog: &OntologyCatalog,
    ) -> Result<Self> {
        let seeded = match prior {
            Some(table) => seed_from_prior(table, catalog)?,
            None => HashMap::new(),
        };

        let columns = headers
            .iter()
            .map(|name| Column {
                name: name.clone(),
                term: seeded.get(name.as_str()).cloned(),
            })
            .collect();

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Associates the column at `index` with `term`, replacing any previous
    /// term. Returns `false` when the index is out of range.
    pub fn associate(&mut self, index: usize, term: Term) -> bool {
        match self.columns.get_mut(index) {
            Some(column) => {
                column.associate(term);
                true
            }
            None => false,
        }
    }

    /// Number of columns that currently carry a term.
    pub fn associated_count(&self) -> usize {
        self.columns.iter().filter(|column| column.term.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Persisted rows in column order.
    pub fn rows(&self) -> Vec<AssociationRow> {
        self.columns.iter().map(Column::to_row).collect()
    }
}

fn seed_from_prior(table: &Table, catalog: &OntologyCatalog) -> Result<HashMap<String, Term>> {
    table.require(&PRIOR_COLUMNS)?;

    let mut seeded: HashMap<String, Term> = HashMap::new();
    for record in table.records() {
        let parameter = record.get(PARAMETER);
        let purl = record.get(RDF_TYPE_PURL);
        match catalog.by_purl(purl) {
            Some(term) => {
                seeded.insert(parameter.to_string(), term.clone());
            }
            None if !purl.is_empty() => {
                debug!(parameter, purl, "prior association refers to unknown PURL");
            }
            None => {}
        }
    }

    Ok(seeded)
}
