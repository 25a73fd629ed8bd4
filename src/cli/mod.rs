//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

use chrono::NaiveDate;

use crate::error::{FluxoError, FluxoResult};
use crate::models::Money;

pub mod household;
pub mod projection;
pub mod report;
pub mod stock;
pub mod store;

pub use household::{handle_household_command, HouseholdCommands};
pub use projection::{handle_projection_command, ProjectionArgs};
pub use report::{handle_report_command, ReportCommands};
pub use stock::{handle_stock_command, StockCommands};
pub use store::{handle_store_command, StoreCommands};

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date(s: &str) -> FluxoResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| FluxoError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s)))
}

/// Parse an amount argument like "1000.00", "1000" or "$10.50"
pub(crate) fn parse_money(s: &str) -> FluxoResult<Money> {
    Money::parse(s).map_err(|e| {
        FluxoError::Validation(format!(
            "Invalid amount '{}'. Use a format like '1000.00' or '1000'. Error: {}",
            s, e
        ))
    })
}
