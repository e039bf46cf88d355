pub mod association;
pub mod catalog;
pub mod enrich;
pub mod error;
pub mod infer;
pub mod io;
pub mod model;
pub mod package;
pub mod select;
pub mod workflow;

pub use error::{Result, ToolError};
