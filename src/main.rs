// snapsift - main.rs
//
// CLI entry point. Handles:
// 1. Argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Dispatch to the analysis core, single-file or batch
// 4. Result presentation (terminal tables, CSV/JSON export, cleaned files)

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use snapsift::app::config::AppConfig;
use snapsift::app::dispatch::{self, Action};
use snapsift::app::fs::{self, DiscoveryConfig};
use snapsift::core::export;
use snapsift::core::model::{AnalysisOutput, Table};
use snapsift::util::error::Result;
use snapsift::util::{constants, logging};

/// snapsift - extract diagnostics and strip hex noise from vendor dumps.
///
/// Point snapsift at an errpt report, a snap capture, or an event log to
/// get label/FRU/metadata summaries, or run one of the cleaning actions
/// to produce a de-noised copy of the file. A directory input processes
/// every report found beneath it.
#[derive(Parser, Debug)]
#[command(name = "snapsift", version, about)]
struct Cli {
    /// Report file or directory to analyse.
    input: PathBuf,

    /// Analysis action to run.
    #[arg(short, long, value_enum, default_value_t = CliAction::Auto)]
    action: CliAction,

    /// Output format for extraction tables.
    #[arg(short, long, value_enum, default_value_t = CliFormat::Table)]
    format: CliFormat,

    /// Directory for cleaned reports and exports (default: next to input).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short, long)]
    debug: bool,
}

/// CLI-facing action names. Kept separate from `dispatch::Action` so the
/// app layer stays free of clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliAction {
    /// Snap files get metadata; everything else gets labels + FRUs.
    Auto,
    /// Error-label frequency table.
    Labels,
    /// FRU/location frequency table.
    Fru,
    /// Snap metadata table.
    Metadata,
    /// Strip detail/sense-data hex blocks.
    CleanErrpt,
    /// Strip ADDITIONAL HEX DATA blocks.
    CleanPower,
    /// Strip Log Hex Dump sections and collapse blank lines.
    CleanEvent,
}

impl From<CliAction> for Action {
    fn from(a: CliAction) -> Self {
        match a {
            CliAction::Auto => Action::Auto,
            CliAction::Labels => Action::Labels,
            CliAction::Fru => Action::Fru,
            CliAction::Metadata => Action::Metadata,
            CliAction::CleanErrpt => Action::CleanErrpt,
            CliAction::CleanPower => Action::CleanPower,
            CliAction::CleanEvent => Action::CleanEvent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliFormat {
    /// Column-aligned text on stdout.
    Table,
    /// One CSV file per result table.
    Csv,
    /// A single JSON document of all result tables.
    Json,
}

fn main() {
    let cli = Cli::parse();

    let (config, config_warnings) = snapsift::app::config::load_config(Path::new("."));
    logging::init(cli.debug, config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!(
        version = constants::APP_VERSION,
        input = %cli.input.display(),
        "snapsift starting"
    );

    let result = if cli.input.is_dir() {
        run_batch(&cli, &config)
    } else {
        run_single(&cli, &config)
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Analysis failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Analyse one report file and present the result.
fn run_single(cli: &Cli, config: &AppConfig) -> Result<()> {
    let action = Action::from(cli.action);
    let output = dispatch::analyze_file(&cli.input, action)?;
    let out_dir = cli.output.as_deref().or(config.output_dir.as_deref());

    match output {
        AnalysisOutput::Tables(tables) => present_tables(&cli.input, &tables, cli.format, out_dir),
        AnalysisOutput::Cleaned(text) => {
            let path = fs::cleaned_output_path(&cli.input, out_dir);
            fs::write_cleaned(&path, &text)?;
            println!("Cleaned report written to {}", path.display());
            Ok(())
        }
    }
}

/// Analyse every report under a directory.
///
/// Files are processed in parallel; each holds only its own text, so the
/// transformers need no coordination. Per-file failures are reported and
/// counted but do not abort the remaining files.
fn run_batch(cli: &Cli, config: &AppConfig) -> Result<()> {
    let action = Action::from(cli.action);
    let discovery = DiscoveryConfig {
        max_depth: config.max_depth,
        max_files: config.max_files,
    };
    let (files, warnings) = fs::discover_reports(&cli.input, &discovery)?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!(files = files.len(), "Batch analysis starting");

    let out_dir = cli.output.as_deref().or(config.output_dir.as_deref());
    let outcomes: Vec<(PathBuf, Result<AnalysisOutput>)> = files
        .par_iter()
        .map(|path| (path.clone(), dispatch::analyze_file(path, action)))
        .collect();

    let mut failures = 0usize;
    for (path, outcome) in outcomes {
        // Presentation and write errors are per-file failures too: a
        // report whose output cannot be written must not abort the rest
        // of the batch.
        let presented = outcome.and_then(|output| match output {
            AnalysisOutput::Tables(tables) => {
                println!("== {}", path.display());
                present_tables(&path, &tables, cli.format, out_dir)
            }
            AnalysisOutput::Cleaned(text) => {
                let out_path = fs::cleaned_output_path(&path, out_dir);
                fs::write_cleaned(&out_path, &text)?;
                println!("Cleaned {} -> {}", path.display(), out_path.display());
                Ok(())
            }
        });
        if let Err(e) = presented {
            failures += 1;
            tracing::warn!(path = %path.display(), error = %e, "Skipped report");
            eprintln!("Skipped {}: {e}", path.display());
        }
    }

    tracing::info!(failures, "Batch analysis complete");
    Ok(())
}

/// Render extraction tables in the requested format.
fn present_tables(
    input: &Path,
    tables: &[Table],
    format: CliFormat,
    out_dir: Option<&Path>,
) -> Result<()> {
    match format {
        CliFormat::Table => {
            for table in tables {
                println!("{}", export::render_text(table));
            }
            Ok(())
        }
        CliFormat::Csv => {
            for table in tables {
                let path = table_export_path(input, table, "csv", out_dir);
                let file = std::fs::File::create(&path).map_err(|e| {
                    snapsift::util::error::ExportError::Io {
                        path: path.clone(),
                        source: e,
                    }
                })?;
                let rows = export::export_csv(table, file, &path)?;
                println!("Wrote {rows} rows to {}", path.display());
            }
            Ok(())
        }
        CliFormat::Json => {
            let name = json_export_name(input);
            let path = match out_dir {
                Some(dir) => dir.join(name),
                None => input.with_file_name(name),
            };
            let file =
                std::fs::File::create(&path).map_err(|e| snapsift::util::error::ExportError::Io {
                    path: path.clone(),
                    source: e,
                })?;
            let rows = export::export_json(tables, file, &path)?;
            println!("Wrote {rows} rows to {}", path.display());
            Ok(())
        }
    }
}

/// Per-table export file name: `<stem>.<slug>.<ext>`.
fn table_export_path(input: &Path, table: &Table, ext: &str, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    let slug = table
        .title
        .to_lowercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "_");
    let name = format!("{stem}.{slug}.{ext}");
    match out_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

fn json_export_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    format!("{stem}.analysis.json")
}
