//! sheetsync: move flat JSON records into and out of a spreadsheet tab.
//!
//! # Usage
//!
//! ```text
//! sheetsync --sheet-id <ID|URL> [--sheet-name <NAME>] [--new-sheet]
//!           [--in-json <PATH|->] [--overwrite]
//!           [--sort-columns <NAME>...]
//!           [--out-json <PATH|->]
//! ```
//!
//! Steps run in a fixed order: target check, import, sort, export.

mod io;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;

use sheetsync_core::extract_id;
use sheetsync_sync::{pipeline, Export, SyncError, SyncReport, SyncRequest, Target, TargetMode};

use settings::Settings;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "sheetsync",
    version,
    about = "Append JSON records to a spreadsheet tab and/or export the tab as JSON",
    long_about = None,
)]
struct Cli {
    /// Spreadsheet ID or full spreadsheet URL.
    #[arg(long, value_name = "ID|URL")]
    sheet_id: String,

    /// Tab to work on [default: `default_sheet_name` from config, else Sheet1]
    #[arg(long, value_name = "NAME")]
    sheet_name: Option<String>,

    /// JSON array of flat objects to append, or `-` for stdin.
    #[arg(long, value_name = "PATH|-")]
    in_json: Option<PathBuf>,

    /// Where to write the tab's rows as JSON, or `-` for stdout.
    #[arg(long, value_name = "PATH|-")]
    out_json: Option<PathBuf>,

    /// Columns to sort the data rows by, ascending, in priority order.
    #[arg(long, value_name = "NAME", num_args = 0..)]
    sort_columns: Vec<String>,

    /// Delete and recreate the tab before appending.
    #[arg(long)]
    overwrite: bool,

    /// Create the tab; fail if it already exists.
    #[arg(long)]
    new_sheet: bool,

    /// Config file [default: ~/.sheetsync/config.yaml]
    #[arg(long, env = "SHEETSYNC_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// OAuth client secret JSON.
    #[arg(long, env = "SHEETSYNC_CLIENT_SECRET", value_name = "PATH")]
    client_secret: Option<PathBuf>,

    /// Stored OAuth token JSON.
    #[arg(long, env = "SHEETSYNC_TOKEN_FILE", value_name = "PATH")]
    token_file: Option<PathBuf>,

    /// API root, e.g. https://sheets.googleapis.com/v4/
    #[arg(long, env = "SHEETSYNC_API_BASE", value_name = "URL")]
    api_base: Option<String>,

    /// Bearer token to use instead of the OAuth flow.
    #[arg(long, env = "SHEETSYNC_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn request(&self, target: Target) -> Result<SyncRequest> {
        let mode = if self.new_sheet {
            TargetMode::CreateNew
        } else {
            TargetMode::MustExist
        };
        let mut request = SyncRequest::new(target, mode);
        if let Some(path) = &self.in_json {
            request.records = Some(io::read_input(path)?);
        }
        request.overwrite = self.overwrite;
        request.sort_columns = self.sort_columns.clone();
        request.export = self.out_json.is_some();
        Ok(request)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let spreadsheet = extract_id(&cli.sheet_id).context("invalid --sheet-id")?;
    let settings = Settings::load(&cli)?;
    let sheet = cli
        .sheet_name
        .clone()
        .unwrap_or_else(|| settings.config.default_sheet_name.clone());
    let request = cli.request(Target::new(spreadsheet, sheet))?;

    let mut client = settings.client()?;
    let report = match pipeline::run(&mut client, &request) {
        Ok(report) => report,
        Err(SyncError::SheetAlreadyExists { name }) => {
            eprintln!("Sheet '{name}' already exists. Exiting.");
            return Ok(ExitCode::from(1));
        }
        Err(SyncError::SheetNotFound { name, available }) => {
            eprintln!("Sheet '{name}' not found.");
            eprintln!("Available sheets: {}", available.join(", "));
            return Ok(ExitCode::from(1));
        }
        Err(err) => {
            let sheet = &request.target.sheet;
            return Err(err).with_context(|| format!("sync of sheet '{sheet}' failed"));
        }
    };

    print_report(&report);
    if let (Some(path), Some(export)) = (&cli.out_json, &report.export) {
        match export {
            Export::Records(records) => io::write_output(path, records)?,
            Export::NoData => eprintln!("No data found."),
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Status lines go to stderr so stdout stays valid JSON for `--out-json -`.
fn print_report(report: &SyncReport) {
    if report.created {
        eprintln!("{} created sheet", "✓".green().bold());
    }
    if let Some(import) = &report.import {
        if import.recreated {
            eprintln!("{} recreated sheet", "✓".green().bold());
        }
        if !import.new_headers.is_empty() {
            eprintln!(
                "{} added columns: {}",
                "✓".green().bold(),
                import.new_headers.join(", ")
            );
        }
        if import.rows > 0 {
            eprintln!("{} cells appended.", import.updated_cells);
        }
    }
    if let Some(sort) = &report.sort {
        for column in &sort.skipped {
            eprintln!("{} column '{column}' not found; not sorting by it", "!".yellow().bold());
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
