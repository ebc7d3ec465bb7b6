//! CLI commands and argument parsing

use crate::types::Strategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through Elasticsearch / OpenSearch result sets
#[derive(Parser, Debug)]
#[command(name = "es-pagination")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Search definition file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream every hit of the query, one JSON document per line
    Hits {
        /// Inline query JSON, replaces the definition's query
        #[arg(long)]
        query_json: Option<String>,

        /// Pagination strategy (from, scroll, search_after)
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Hits per page
        #[arg(long)]
        size: Option<u32>,

        /// Index to search
        #[arg(long)]
        index: Option<String>,

        /// Write hits to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only print hit ids
        #[arg(long)]
        ids_only: bool,

        /// Stop after this many hits
        #[arg(long)]
        max_hits: Option<usize>,
    },

    /// Validate the search definition
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per line
    Json,
    /// Pretty-printed JSON
    Pretty,
}
