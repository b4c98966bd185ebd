//! Convert subcommand implementation.
//!
//! Handles `portgrid convert <scan.gnmap>`: parse the scan, sort the hosts
//! and write the report.

use crate::cli::{confirm, OutputFormat};
use crate::config::AppSettings;
use crate::error::{CliError, CliResult, ConfigError};
use crate::output;
use crate::parser::{GnmapParser, MalformedLinePolicy, ParseOptions, ParseOutcome};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Convert a grepable scan file into a report.
#[derive(Parser, Debug)]
pub struct ConvertCommand {
    /// Nmap grepable (-oG) result file, or '-' for stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file path
    ///
    /// Defaults to the input path with the format's extension. Plain
    /// output and stdin input go to stdout unless this is set.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Output format [default: from settings, csv]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Overwrite existing files and accept any extension without asking
    #[arg(long)]
    pub force: bool,

    /// Skip malformed host lines with a warning instead of aborting
    #[arg(long)]
    pub skip_malformed: bool,

    /// List each untracked open port only once per host
    #[arg(long)]
    pub dedup_ports: bool,
}

/// Where the report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Stdout,
    File(PathBuf),
}

impl ConvertCommand {
    /// Command with default flags for a single input file.
    pub fn from_input(input: PathBuf) -> Self {
        Self {
            input,
            output_file: None,
            format: None,
            force: false,
            skip_malformed: false,
            dedup_ports: false,
        }
    }

    /// Execute the convert command.
    pub fn execute(&self, settings: &AppSettings, quiet: bool) -> CliResult<()> {
        let schema = settings.schema()?;
        let format = self.resolve_format(settings)?;
        let options = self.parse_options(settings);

        let from_stdin = self.input.as_os_str() == "-";
        if !from_stdin && !self.input.is_file() {
            return Err(CliError::InputNotFound(self.input.clone()));
        }

        let destination = self.destination(format, from_stdin);
        if let Destination::File(path) = &destination {
            if self.output_file.is_none() && !quiet {
                output::print_info(&format!(
                    "Output filename generated from input filename: {}",
                    path.display()
                ));
            }
            if !from_stdin && is_same_file(&self.input, path) {
                return Err(CliError::OutputIsInput(path.clone()));
            }
            // stdin carries the scan, so it cannot answer prompts too
            self.confirm_destination(path, format, !from_stdin)?;
        }

        let parser = GnmapParser::new(&schema).with_options(options);
        let outcome = if from_stdin {
            parser.parse_reader(io::stdin().lock())?
        } else {
            read_scan_file(&parser, &self.input, quiet)?
        };

        match &destination {
            Destination::Stdout => {
                let mut out = io::stdout().lock();
                output::write_report(&mut out, &schema, &outcome.hosts, format)?;
                out.flush()?;
            }
            Destination::File(path) => {
                replace_file(path, |out| {
                    output::write_report(out, &schema, &outcome.hosts, format)
                })?;
                info!(path = %path.display(), hosts = outcome.hosts.len(), "report written");

                if !quiet {
                    output::print_success(&format!(
                        "Wrote {} hosts to {}",
                        outcome.hosts.len(),
                        path.display()
                    ));
                }
            }
        }

        if !outcome.skipped.is_empty() {
            output::print_warning(&format!(
                "{} malformed host line(s) skipped (first at line {})",
                outcome.skipped.len(),
                outcome.skipped[0].line()
            ));
        }

        Ok(())
    }

    fn resolve_format(&self, settings: &AppSettings) -> CliResult<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => settings
                .default_output_format
                .parse()
                .map_err(|_| ConfigError::UnknownFormat(settings.default_output_format.clone()).into()),
        }
    }

    fn parse_options(&self, settings: &AppSettings) -> ParseOptions {
        let mut options = settings.parse_options();
        if self.skip_malformed {
            options.policy = MalformedLinePolicy::Skip;
        }
        if self.dedup_ports {
            options.dedup_other_ports = true;
        }
        options
    }

    fn destination(&self, format: OutputFormat, from_stdin: bool) -> Destination {
        if let Some(path) = &self.output_file {
            return Destination::File(path.clone());
        }
        match format.extension() {
            Some(ext) if !from_stdin => Destination::File(self.input.with_extension(ext)),
            _ => Destination::Stdout,
        }
    }

    /// Ask before writing to an unexpected extension or over an existing file.
    ///
    /// Without `interactive` nothing is read from the user and any question
    /// counts as declined.
    fn confirm_destination(
        &self,
        path: &Path,
        format: OutputFormat,
        interactive: bool,
    ) -> CliResult<()> {
        if self.force {
            return Ok(());
        }

        let ask = |question: &str| -> CliResult<bool> {
            if interactive {
                return Ok(confirm(question, false)?);
            }
            warn!(path = %path.display(), "{} (pass --force to accept)", question);
            Ok(false)
        };

        if let Some(ext) = format.extension() {
            if !has_extension(path, ext) && !ask(&format!("Output file not .{}. Continue?", ext))? {
                return Err(CliError::Aborted);
            }
        }

        if path.exists() && !ask("Output file exists. Overwrite?")? {
            return Err(CliError::Aborted);
        }

        Ok(())
    }
}

/// Parse a scan file, showing a byte progress bar on stderr.
fn read_scan_file(parser: &GnmapParser<'_>, path: &Path, quiet: bool) -> CliResult<ParseOutcome> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(len)
    };
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {bar:40.cyan/blue} {bytes}/{total_bytes}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let outcome = parser.parse_reader(BufReader::new(pb.wrap_read(file)));
    pb.finish_and_clear();
    Ok(outcome?)
}

/// Write through a temporary file in the target's directory, then rename it
/// over `path`. A failed write leaves any existing file untouched.
fn replace_file<F>(path: &Path, write: F) -> CliResult<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> CliResult<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_defaults_to_input_stem() {
        let cmd = ConvertCommand::from_input(PathBuf::from("scans/office.gnmap"));
        assert_eq!(
            cmd.destination(OutputFormat::Csv, false),
            Destination::File(PathBuf::from("scans/office.csv"))
        );
        assert_eq!(
            cmd.destination(OutputFormat::Json, false),
            Destination::File(PathBuf::from("scans/office.json"))
        );
        assert_eq!(cmd.destination(OutputFormat::Plain, false), Destination::Stdout);
    }

    #[test]
    fn test_destination_from_stdin() {
        let cmd = ConvertCommand::from_input(PathBuf::from("-"));
        assert_eq!(cmd.destination(OutputFormat::Csv, true), Destination::Stdout);

        let cmd = ConvertCommand {
            output_file: Some(PathBuf::from("out.csv")),
            ..ConvertCommand::from_input(PathBuf::from("-"))
        };
        assert_eq!(
            cmd.destination(OutputFormat::Csv, true),
            Destination::File(PathBuf::from("out.csv"))
        );
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = AppSettings::default();
        let cmd = ConvertCommand {
            skip_malformed: true,
            dedup_ports: true,
            ..ConvertCommand::from_input(PathBuf::from("scan.gnmap"))
        };
        let options = cmd.parse_options(&settings);
        assert_eq!(options.policy, MalformedLinePolicy::Skip);
        assert!(options.dedup_other_ports);
    }

    #[test]
    fn test_format_falls_back_to_settings() {
        let cmd = ConvertCommand::from_input(PathBuf::from("scan.gnmap"));
        let settings = AppSettings {
            default_output_format: "json".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(cmd.resolve_format(&settings).unwrap(), OutputFormat::Json);

        let settings = AppSettings {
            default_output_format: "xlsx".to_string(),
            ..AppSettings::default()
        };
        assert!(matches!(
            cmd.resolve_format(&settings),
            Err(CliError::Config(ConfigError::UnknownFormat(_)))
        ));
    }

    #[test]
    fn test_stdin_input_never_prompts() {
        let dir = tempfile::TempDir::new().unwrap();
        let existing = dir.path().join("report.csv");
        fs::write(&existing, "old").unwrap();

        let cmd = ConvertCommand {
            output_file: Some(existing.clone()),
            ..ConvertCommand::from_input(PathBuf::from("-"))
        };
        assert!(matches!(
            cmd.confirm_destination(&existing, OutputFormat::Csv, false),
            Err(CliError::Aborted)
        ));
        assert!(matches!(
            cmd.confirm_destination(&dir.path().join("report.txt"), OutputFormat::Csv, false),
            Err(CliError::Aborted)
        ));
        // a fresh path with the right extension needs no answer
        assert!(cmd
            .confirm_destination(&dir.path().join("new.csv"), OutputFormat::Csv, false)
            .is_ok());

        let forced = ConvertCommand { force: true, ..cmd };
        assert!(forced
            .confirm_destination(&existing, OutputFormat::Csv, false)
            .is_ok());
    }

    #[test]
    fn test_failed_write_keeps_existing_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("report.csv");
        fs::write(&target, "previous report\n").unwrap();

        let result = replace_file(&target, |out| {
            out.write_all(b"IP Address,Fully-qualified")?;
            Err(CliError::Io(io::Error::other("disk full")))
        });
        assert!(matches!(result, Err(CliError::Io(_))));
        assert_eq!(fs::read_to_string(&target).unwrap(), "previous report\n");

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_replace_file_overwrites() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("report.csv");
        fs::write(&target, "previous report\n").unwrap();

        replace_file(&target, |out| Ok(out.write_all(b"a,b\n")?)).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "a,b\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("report.CSV"), "csv"));
        assert!(!has_extension(Path::new("report.xlsx"), "csv"));
        assert!(!has_extension(Path::new("report"), "csv"));
    }
}
