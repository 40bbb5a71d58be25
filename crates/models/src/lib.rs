//! Project records managed by the two services.
//!
//! - `project::AdminProject`: the authenticated in-memory registry entry.
//! - `project::CatalogProject`: the file-backed catalog entry with an optional image.

pub mod errors;
pub mod project;

pub use project::{AdminProject, CatalogProject, CatalogProjectInput};
