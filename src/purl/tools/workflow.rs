use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::purl::tools::association::{AssociationStore, write_associations};
use crate::purl::tools::catalog::{OntologyCatalog, ParameterCatalog};
use crate::purl::tools::enrich::{EnrichReport, enrich_package};
use crate::purl::tools::error::Result;
use crate::purl::tools::infer::SchemaInferrer;
use crate::purl::tools::io::table::{is_workbook, read_association_table, read_header};
use crate::purl::tools::package::DataPackage;
use crate::purl::tools::select::{Presenter, SelectionController};

/// Default association output for a data file: `<stem>_ontology.tsv` beside
/// it, or `<stem>_ontology.xlsx` for workbooks.
pub fn default_association_output(data: &Path) -> PathBuf {
    let stem = data
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = if is_workbook(data) { "xlsx" } else { "tsv" };
    data.with_file_name(format!("{stem}_ontology.{extension}"))
}

/// Loads the term catalog and the data table header, seeds prior
/// associations, lets the operator edit them through `presenter`, and writes
/// the result to `output`.
#[instrument(
    level = "info",
    skip_all,
    fields(data = %data.display(), ontology = %ontology.display(), output = %output.display())
)]
pub fn associate<P: Presenter>(
    data: &Path,
    ontology: &Path,
    prior: Option<&Path>,
    output: &Path,
    presenter: P,
) -> Result<AssociationStore> {
    let catalog = OntologyCatalog::load(ontology)?;
    let headers = read_header(data)?;
    let prior_table = prior.map(read_association_table).transpose()?;

    let mut store = AssociationStore::build(&headers, prior_table.as_ref(), &catalog)?;
    info!(
        columns = store.len(),
        seeded = store.associated_count(),
        "prepared associations"
    );

    SelectionController::new(presenter, &catalog).run(&mut store)?;
    write_associations(output, &store)?;
    Ok(store)
}

/// Infers a resource for every data file, applies the parameter catalog to
/// their schemas, and saves the package descriptor to `output`.
#[instrument(
    level = "info",
    skip_all,
    fields(files = data.len(), ontology = %ontology.display(), output = %output.display())
)]
pub fn build_package<I: SchemaInferrer + ?Sized>(
    data: &[PathBuf],
    ontology: &Path,
    missing_values: &[String],
    inferrer: &I,
    output: &Path,
) -> Result<EnrichReport> {
    let catalog = ParameterCatalog::load(ontology)?;

    let mut names = ResourceNameRegistry::default();
    let mut package = DataPackage::new();
    for path in data {
        let mut resource = inferrer.infer(path)?;
        resource.name = names.assign(&resource.name);
        info!(resource = %resource.name, path = %path.display(), "inferred resource");
        package.add_resource(resource);
    }

    let report = enrich_package(&mut package, &catalog, missing_values)?;
    package.save(output)?;
    Ok(report)
}

#[derive(Debug, Default)]
struct ResourceNameRegistry {
    used: HashSet<String>,
}

impl ResourceNameRegistry {
    fn assign(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let mut counter = 1;
        loop {
            let candidate = format!("{base}_{counter}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}
