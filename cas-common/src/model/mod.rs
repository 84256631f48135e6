// cas-common/src/model/mod.rs
// Typed records returned by the Common Chemistry API.
use std::fmt;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};

pub mod chemical;
pub mod search;

// Re-export
pub use chemical::{Chemical, CoreChemical, ExperimentalProperty, PropertyCitations};
pub use search::SearchResults;

/// (wire key, field name) pairs.
pub type AliasTable = &'static [(&'static str, &'static str)];

/// A record deserialized from API JSON after its wire keys are renamed.
pub trait WireRecord: DeserializeOwned {
    const NAME: &'static str;
    const ALIASES: AliasTable;
    /// List fields (by field name) whose object elements have their own aliases.
    const NESTED: &'static [(&'static str, AliasTable)] = &[];
}

/// Accepts `90.12` as well as `"90.12"`; the API is not consistent about it.
pub(crate) fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<N> {
        Number(N),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid number '{s}': {e}"))),
    }
}

/// Optional text fields treat `""` the same as a missing key.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
