//! CLI module
//!
//! Command-line interface for paging through search results.
//!
//! # Commands
//!
//! - `hits` - Stream every hit of a query
//! - `validate` - Check a search definition without searching

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
