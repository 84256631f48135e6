use serde::{Deserialize, Serialize};

use super::{AliasTable, CoreChemical, WireRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Total matches on the server, not the length of `results`.
    pub count: u64,
    pub results: Vec<CoreChemical>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl WireRecord for SearchResults {
    const NAME: &'static str = "SearchResults";
    const ALIASES: AliasTable = &[];
    const NESTED: &'static [(&'static str, AliasTable)] = &[("results", CoreChemical::ALIASES)];
}
