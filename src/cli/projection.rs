//! Cash projection CLI command

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Args;

use crate::config::Settings;
use crate::error::{FluxoError, FluxoResult};
use crate::projection::{ProjectionOptions, MAX_HORIZON_DAYS};
use crate::reports::{CashFlowReport, SeriesFilter};
use crate::services::ProjectionService;
use crate::storage::Storage;

use super::parse_date;

/// Arguments for the projection command
#[derive(Args)]
pub struct ProjectionArgs {
    /// Show only the next N days
    #[arg(short, long, conflicts_with_all = ["month", "all"])]
    pub days: Option<u32>,

    /// Show one calendar month (YYYY-MM)
    #[arg(short, long, conflicts_with = "all")]
    pub month: Option<String>,

    /// Show the full series
    #[arg(short, long)]
    pub all: bool,

    /// Series horizon in days after today (defaults to the configured value)
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Compute as of this date instead of the current date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<String>,

    /// Write the series as CSV to this path instead of printing
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// Handle the projection command
pub fn handle_projection_command(
    storage: &Storage,
    settings: &Settings,
    args: ProjectionArgs,
    today: NaiveDate,
) -> FluxoResult<()> {
    let today = match args.today {
        Some(ref s) => parse_date(s)?,
        None => today,
    };

    let horizon_days = args.horizon.unwrap_or(settings.horizon_days);
    if horizon_days > MAX_HORIZON_DAYS {
        return Err(FluxoError::Validation(format!(
            "Horizon cannot exceed {} days, got {}",
            MAX_HORIZON_DAYS, horizon_days
        )));
    }

    let options = ProjectionOptions {
        horizon_days,
        empty_series: settings.empty_series,
    };

    // The cache lives for this process only; one invocation computes once.
    // Long-running embedders hold the service across calls instead.
    let mut service = ProjectionService::new(Duration::from_secs(settings.cache_ttl_secs));
    let projection = service.current(storage, today, options)?;

    let filter = match (args.days, args.month.as_deref()) {
        (Some(days), _) => SeriesFilter::Window(days),
        (None, Some(month)) => {
            let (year, month) = parse_month(month)?;
            SeriesFilter::Month { year, month }
        }
        (None, None) => SeriesFilter::All,
    };

    let report = CashFlowReport { projection };

    if let Some(path) = args.csv {
        let mut file = std::fs::File::create(&path)
            .map_err(|e| FluxoError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
        report.export_csv(&mut file, filter)?;
        println!("Wrote projection CSV to {}", path.display());
    } else {
        print!("{}", report.format_terminal(filter, settings));
    }

    Ok(())
}

fn parse_month(s: &str) -> FluxoResult<(i32, u32)> {
    let invalid = || FluxoError::Validation(format!("Invalid month '{}'. Use YYYY-MM", s));

    let (year_str, month_str) = s.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month: u32 = month_str.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}
