//! Schema subcommand implementation.
//!
//! Handles `portgrid schema`, which shows how the configured column labels
//! map onto report columns and tracked ports.

use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output;
use clap::Parser;

/// Show the report column layout.
#[derive(Parser, Debug)]
pub struct SchemaCommand {
    /// Print the layout as JSON
    #[arg(long)]
    pub json: bool,
}

impl SchemaCommand {
    /// Execute the schema command.
    pub fn execute(&self, settings: &AppSettings) -> CliResult<()> {
        let schema = settings.schema()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&schema)?);
        } else {
            output::print_schema(&schema);
        }

        Ok(())
    }
}
