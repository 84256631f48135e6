use std::process::ExitCode;

use cas_common::error::Result;
use cas_common::model::Chemical;
use cas_common::registry::is_valid;
use cas_net::CasClient;
use clap::Args;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

use super::search::strip_markup;

#[derive(Args, Debug)]
pub struct Get {
    /// Registry number, e.g. 110-63-4
    pub cas_rn: String,
    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

impl Get {
    pub async fn run(&self, api_key: Option<&str>) -> Result<ExitCode> {
        if !is_valid(&self.cas_rn) {
            tracing::warn!(
                "'{}' is not a valid registry number; asking the API anyway",
                self.cas_rn
            );
        }
        let client = CasClient::from_env(api_key)?;
        let chemical = client.fetch_chemical(&self.cas_rn).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&chemical)?);
        } else {
            print_chemical(&chemical);
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn field(label: &str, value: &str) {
    println!("{:<18} {}", format!("{label}:").bold(), value);
}

pub fn print_chemical(chemical: &Chemical) {
    println!(
        "{} {}",
        "==>".bold().blue(),
        format!("{} ({})", strip_markup(&chemical.name), chemical.cas).bold()
    );
    field("Formula", &strip_markup(&chemical.molecular_formula));
    field("Molecular mass", &chemical.molecular_mass.to_string());
    field("InChI", &chemical.inchi);
    field("InChIKey", &chemical.inchi_key);
    field("Canonical SMILES", &chemical.canonical_smiles);
    if let Some(smiles) = &chemical.smiles {
        field("SMILES", smiles);
    }
    field("URI", &chemical.uri);
    field(
        "Mol file",
        if chemical.has_mol_file { "available" } else { "none" },
    );
    if !chemical.replaces.is_empty() {
        field("Replaces", &chemical.replaces.join(", "));
    }
    field("Synonyms", &chemical.synonyms.len().to_string());
    for synonym in chemical.synonyms.iter().take(10) {
        println!("{:<18} {}", "", strip_markup(synonym));
    }
    if chemical.synonyms.len() > 10 {
        println!("{:<18} {}", "", "…".dimmed());
    }

    if chemical.experimental_properties.is_empty() {
        return;
    }
    println!();
    println!("{}", "Experimental properties".bold());
    let mut tbl = Table::new();
    tbl.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    for prop in &chemical.experimental_properties {
        tbl.add_row(Row::new(vec![
            Cell::new(&prop.name).style_spec("Fb"),
            Cell::new(&strip_markup(&prop.property)),
            Cell::new(&format!("[{}]", prop.source_number)),
        ]));
    }
    tbl.printstd();

    for citation in &chemical.property_citations {
        let uri = citation.document_uri.as_deref().unwrap_or("");
        println!(
            "  [{}] {} {}",
            citation.source_number,
            strip_markup(&citation.source),
            uri.dimmed()
        );
    }
}
