//! Command-line interface for the Bias Lens terminal client.
//!
//! The API base address can be given as a flag or through the
//! `BIASLENS_API_BASE_URL` environment variable.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "biaslens", author, version, about = "Search news coverage and inspect article bias")]
pub struct Cli {
    /// Base address of the Bias Lens API, e.g. http://localhost:8000
    #[arg(long, env = "BIASLENS_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    /// Abort requests that take longer than this many seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Also write logs to ./biaslens.log
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search for articles and print the accumulated results
    Search {
        query: String,
        /// Number of result pages to load
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Interactive search: each line is a query, `:more` loads the next page,
    /// `:retry` repeats a failed fetch, `:quit` exits
    Browse,
    /// Analyze an article: extraction, summary, bias and related fact checks
    Analyze { url: String },
    /// Extract article metadata and body text
    Extract { url: String },
    /// Summarize the text in a file
    Summarize { file: PathBuf },
    /// Look up fact checks for a headline
    Factcheck {
        #[arg(long)]
        headline: String,
        #[arg(long)]
        source_domain: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        max_age_months: Option<u32>,
    },
    /// Resolve a client route such as /analyze/abc?url=...
    Route { path: String },
}
