//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_definition, SearchDefinition};
use crate::error::{Error, Result};
use crate::pagination::accessor;
use crate::types::{OptionStringExt, Strategy};
use futures::StreamExt;
use serde_json::{json, Value};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Overrides and output settings of the `hits` command
#[derive(Debug, Default)]
struct HitsOptions<'a> {
    query_json: Option<&'a str>,
    strategy: Option<Strategy>,
    size: Option<u32>,
    index: Option<&'a str>,
    output: Option<&'a Path>,
    ids_only: bool,
    max_hits: Option<usize>,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Hits {
                query_json,
                strategy,
                size,
                index,
                output,
                ids_only,
                max_hits,
            } => {
                let options = HitsOptions {
                    query_json: query_json.as_deref(),
                    strategy: *strategy,
                    size: *size,
                    index: index.as_deref(),
                    output: output.as_deref(),
                    ids_only: *ids_only,
                    max_hits: *max_hits,
                };
                self.hits(&options).await
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Load the search definition
    fn load_definition(&self) -> Result<SearchDefinition> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Search definition not specified (use -c flag)"))?;
        load_definition(path)
    }

    /// Stream all hits to stdout or a file
    async fn hits(&self, options: &HitsOptions<'_>) -> Result<()> {
        let def = apply_overrides(self.load_definition()?, options)?;
        let query = match options.query_json {
            Some(json_str) => serde_json::from_str(json_str)
                .map_err(|e| Error::config(format!("Invalid query JSON: {e}")))?,
            None => def.query.clone(),
        };

        let cursor = def.build_cursor()?;
        info!(
            "Paging {} with {} strategy, {} hits per page",
            def.index.as_deref().unwrap_or("all indices"),
            def.pagination.strategy,
            def.pagination.size
        );

        let mut out = open_output(options.output)?;
        let start = Instant::now();

        let mut hits = match options.max_hits {
            Some(max) => cursor.hits(query).take(max).boxed(),
            None => cursor.hits(query),
        };

        let mut count = 0usize;
        while let Some(hit) = hits.next().await {
            let hit = hit?;
            let line = if options.ids_only {
                accessor::extract_id(&hit).cloned().unwrap_or(Value::Null)
            } else {
                hit
            };
            self.write_line(&mut out, &line)?;
            count += 1;
        }
        out.flush()?;

        info!(
            "Wrote {} hits in {:.2}s",
            count,
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Validate the search definition
    fn validate(&self) -> Result<()> {
        let def = self.load_definition()?;
        def.build_cursor()?;

        let summary = json!({
            "endpoint": def.endpoint,
            "index": def.index,
            "auth": def.auth.kind(),
            "strategy": def.pagination.strategy,
            "size": def.pagination.size,
        });
        info!("Search definition is valid");

        let mut out = open_output(None)?;
        self.write_line(&mut out, &summary)?;
        out.flush()?;
        Ok(())
    }

    /// Write one value in the selected format
    fn write_line(&self, out: &mut dyn Write, value: &Value) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => serde_json::to_writer(&mut *out, value)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, value)?,
        }
        out.write_all(b"\n")?;
        Ok(())
    }
}

/// Apply command line overrides on top of the loaded definition
fn apply_overrides(mut def: SearchDefinition, options: &HitsOptions<'_>) -> Result<SearchDefinition> {
    if let Some(strategy) = options.strategy {
        def.pagination.strategy = strategy;
    }
    if let Some(size) = options.size {
        def.pagination.size = size;
    }
    if let Some(index) = options.index {
        def.index = Some(index.to_string()).none_if_empty();
    }
    def.validate()?;
    Ok(def)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("config", &self.cli.config.as_ref().map(PathBuf::as_path))
            .finish_non_exhaustive()
    }
}
