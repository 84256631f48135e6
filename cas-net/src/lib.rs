// cas-net/src/lib.rs
pub mod api;
pub mod blocking;
pub mod http;
pub mod validation;

pub use api::{fetch_chemical, search, CasClient};
pub use cas_common::{
    config::KeySource,
    error::{CasError, Result},
    model::{Chemical, CoreChemical, ExperimentalProperty, PropertyCitations, SearchResults},
    registry::{is_valid, RegistryNumber},
    Config,
};
pub use http::API_KEY_HEADER;
pub use validation::validate_base_url;
