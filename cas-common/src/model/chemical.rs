use serde::{Deserialize, Serialize};

use super::{empty_as_none, number_or_string, AliasTable, WireRecord};
use crate::registry::RegistryNumber;

/// The subset of a chemical returned by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreChemical {
    pub cas: RegistryNumber,
    pub name: String,
    /// SVG markup
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
}

impl WireRecord for CoreChemical {
    const NAME: &'static str = "CoreChemical";
    const ALIASES: AliasTable = &[("rn", "cas")];
}

/// A full chemical record from the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chemical {
    pub cas: RegistryNumber,
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    pub uri: String,
    pub inchi: String,
    pub inchi_key: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub smiles: Option<String>,
    pub canonical_smiles: String,
    /// May contain HTML markup such as `<sub>`.
    pub molecular_formula: String,
    #[serde(deserialize_with = "number_or_string")]
    pub molecular_mass: f64,
    pub experimental_properties: Vec<ExperimentalProperty>,
    pub property_citations: Vec<PropertyCitations>,
    /// May contain HTML markup.
    pub synonyms: Vec<String>,
    /// Registry numbers superseded by this one.
    pub replaces: Vec<String>,
    #[serde(default)]
    pub has_mol_file: bool,
}

impl From<Chemical> for CoreChemical {
    fn from(chemical: Chemical) -> Self {
        CoreChemical {
            cas: chemical.cas,
            name: chemical.name,
            image: chemical.image,
        }
    }
}

impl WireRecord for Chemical {
    const NAME: &'static str = "Chemical";
    const ALIASES: AliasTable = &[
        ("rn", "cas"),
        ("inchiKey", "inchi_key"),
        ("smile", "smiles"),
        ("canonicalSmile", "canonical_smiles"),
        ("molecularFormula", "molecular_formula"),
        ("molecularMass", "molecular_mass"),
        ("experimentalProperties", "experimental_properties"),
        ("propertyCitations", "property_citations"),
        ("replacedRns", "replaces"),
        ("hasMolFile", "has_mol_file"),
    ];
    const NESTED: &'static [(&'static str, AliasTable)] = &[
        ("experimental_properties", ExperimentalProperty::ALIASES),
        ("property_citations", PropertyCitations::ALIASES),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentalProperty {
    pub name: String,
    pub property: String,
    #[serde(deserialize_with = "number_or_string")]
    pub source_number: u32,
}

impl WireRecord for ExperimentalProperty {
    const NAME: &'static str = "ExperimentalProperty";
    const ALIASES: AliasTable = &[("sourceNumber", "source_number")];
}

/// Where an experimental property value was published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCitations {
    #[serde(deserialize_with = "number_or_string")]
    pub source_number: u32,
    pub source: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub document_uri: Option<String>,
}

impl WireRecord for PropertyCitations {
    const NAME: &'static str = "PropertyCitations";
    const ALIASES: AliasTable = &[("sourceNumber", "source_number"), ("docUri", "document_uri")];
}
