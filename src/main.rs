use anyhow::Context;
use clap::{CommandFactory, Parser};
use portgrid::cli::{Cli, Commands, ConvertCommand};
use portgrid::config::AppSettings;
use portgrid::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => AppSettings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => AppSettings::load().context("loading settings")?,
    };

    match cli.command {
        Some(Commands::Convert(cmd)) => cmd
            .execute(&settings, cli.quiet)
            .with_context(|| format!("converting {}", cmd.input.display()))?,
        Some(Commands::Schema(cmd)) => cmd.execute(&settings)?,
        None => match cli.input {
            Some(input) => ConvertCommand::from_input(input.clone())
                .execute(&settings, cli.quiet)
                .with_context(|| format!("converting {}", input.display()))?,
            None => Cli::command().print_help()?,
        },
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the verbosity flags pick the level.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
