//! Column-to-term associations for a single data table.

pub mod store;
pub mod writer;

pub use store::AssociationStore;
pub use writer::write_associations;
