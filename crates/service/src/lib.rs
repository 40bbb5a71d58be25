//! Service layer for the two project services.
//! - `registry`: in-memory admin registry behind Basic auth.
//! - `catalog`: JSON-file catalog with image uploads.
//! - `storage`: whole-file JSON list persistence and upload storage.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod registry;
pub mod catalog;
