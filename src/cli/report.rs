//! Report CLI commands

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::error::{FluxoError, FluxoResult};
use crate::projection::ProjectionOptions;
use crate::reports::{CashFlowReport, SeriesFilter, StockLevelsReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Cash flow projection report
    CashFlow {
        /// Write CSV to this path instead of printing
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Stock levels report
    Stock {
        /// Only items at or below their minimum
        #[arg(short, long)]
        low: bool,
        /// Write CSV to this path instead of printing
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
    today: NaiveDate,
) -> FluxoResult<()> {
    match cmd {
        ReportCommands::CashFlow { csv } => {
            let options = ProjectionOptions {
                horizon_days: settings.horizon_days,
                empty_series: settings.empty_series,
            };
            let report = CashFlowReport::generate(storage, today, options)?;

            match csv {
                Some(path) => {
                    let mut file = create_file(&path)?;
                    report.export_csv(&mut file, SeriesFilter::All)?;
                    println!("Wrote cash flow CSV to {}", path.display());
                }
                None => print!("{}", report.format_terminal(SeriesFilter::All, settings)),
            }
        }

        ReportCommands::Stock { low, csv } => {
            let report = StockLevelsReport::generate(storage, low)?;

            match csv {
                Some(path) => {
                    let mut file = create_file(&path)?;
                    report.export_csv(&mut file)?;
                    println!("Wrote stock CSV to {}", path.display());
                }
                None => print!("{}", report.format_terminal()),
            }
        }
    }

    Ok(())
}

fn create_file(path: &std::path::Path) -> FluxoResult<std::fs::File> {
    std::fs::File::create(path)
        .map_err(|e| FluxoError::Export(format!("Failed to create {}: {}", path.display(), e)))
}
