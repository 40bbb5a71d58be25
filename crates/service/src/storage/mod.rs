//! Storage abstractions for service layer
//!
//! File-backed helpers shared by the catalog: a JSON array rewritten as a
//! whole on every change, and a directory of uploaded blobs.

pub mod json_list_store;
pub mod upload_store;
