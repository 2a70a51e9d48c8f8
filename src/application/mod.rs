// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the command line and the services
// - Wires configuration, storage and catalogs into services once
// - Translates AppError into user-facing ErrorResponse values

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType};
pub use state::{AppState, CatalogSource};
