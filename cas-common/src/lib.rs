// cas-common/src/lib.rs
pub mod config;
pub mod error;
pub mod model;
pub mod process;
pub mod registry;

// Re-export key types
pub use config::{Config, KeySource};
pub use error::{CasError, Result};
pub use model::{Chemical, CoreChemical, ExperimentalProperty, PropertyCitations, SearchResults};
pub use registry::{is_valid, RegistryNumber};
