use cas_common::registry::{checksum, is_valid, RegistryNumber};
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct Validate {
    /// Registry numbers such as 110-63-4
    #[arg(required = true)]
    pub numbers: Vec<String>,
}

impl Validate {
    /// Returns false when any number is invalid.
    pub fn run(&self) -> bool {
        let mut all_valid = true;
        for number in &self.numbers {
            let valid = is_valid(number);
            tracing::debug!("{} -> {}", number, valid);
            all_valid &= valid;
            println!("{number}\t{}", describe(number, valid));
        }
        all_valid
    }
}

fn describe(number: &str, valid: bool) -> String {
    if valid {
        return "valid".green().to_string();
    }
    match RegistryNumber::parse(number) {
        Some(rn) => {
            let (first, rest) = rn.as_str().split_once('-').unwrap_or_default();
            let (middle, _) = rest.split_once('-').unwrap_or_default();
            format!(
                "{} (check digit should be {})",
                "invalid".red(),
                checksum(first, middle) % 10
            )
        }
        None => format!("{} (expected NNNNNNN-NN-N)", "malformed".red()),
    }
}
