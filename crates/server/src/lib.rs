pub mod auth;
pub mod bootstrap;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{run_catalog, run_registry};
