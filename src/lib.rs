//! Core library for the purl-tools command line application.
//!
//! The library associates data table columns with ontology terms and applies
//! ontology attributes to data package schemas. Lookup tables are parsed in
//! [`purl::tools::catalog`], column associations live in
//! [`purl::tools::association`], the interactive selection loop in
//! [`purl::tools::select`], schema merging in [`purl::tools::enrich`], and the
//! file-level orchestration under [`purl::tools::workflow`].

pub mod purl;

pub use purl::tools::{
    Result, ToolError, association, catalog, enrich, error, infer, io, model, package, select,
    workflow,
};
