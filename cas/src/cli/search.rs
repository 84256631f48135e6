use std::process::ExitCode;

use cas_common::error::Result;
use cas_common::model::SearchResults;
use cas_net::CasClient;
use clap::Args;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use terminal_size::{terminal_size, Width};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Args, Debug)]
pub struct Search {
    pub query: String,
    /// Index of the first result to return
    #[arg(long)]
    pub offset: Option<u32>,
    /// Number of results per page (server default is 50)
    #[arg(long)]
    pub size: Option<u32>,
    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Search {
    pub async fn run(&self, api_key: Option<&str>) -> Result<ExitCode> {
        tracing::debug!("Searching for records matching: {}", self.query);
        let client = CasClient::from_env(api_key)?;
        let results = client.search(&self.query, self.offset, self.size).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            print_search_results(&self.query, &results);
        }
        Ok(ExitCode::SUCCESS)
    }
}

/// Removes HTML tags such as `<sub>` and `<em>` for terminal output.
pub(crate) fn strip_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

pub(crate) fn truncate_vis(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut w = 0;
    let mut out = String::new();
    let effective_max = if max > 0 { max } else { 1 };

    for ch in s.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w + cw > effective_max.saturating_sub(1) {
            break;
        }
        out.push(ch);
        w += cw;
    }
    out.push('…');
    out
}

pub fn print_search_results(query: &str, results: &SearchResults) {
    if results.is_empty() {
        println!("{}", format!("No matches found for '{query}'").yellow());
        return;
    }
    println!(
        "{}",
        format!(
            "Showing {} of {} result(s) for '{query}'",
            results.len(),
            results.count
        )
        .bold()
    );

    let term_cols = terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(120);

    let rn_col = 12;
    let sep_width = 2 * 3;
    let name_max = std::cmp::max(20, term_cols.saturating_sub(rn_col + sep_width));

    let mut tbl = Table::new();
    tbl.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

    for hit in &results.results {
        let name = truncate_vis(&strip_markup(&hit.name), name_max);
        tbl.add_row(Row::new(vec![
            Cell::new(hit.cas.as_str()).style_spec("Fg"),
            Cell::new(&name).style_spec("Fb"),
        ]));
    }

    tbl.printstd();
}
