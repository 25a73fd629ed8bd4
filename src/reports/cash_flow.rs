//! Cash Flow Report
//!
//! Wraps a cash projection for presentation: realized position per domain,
//! today's movement summary, and the forward daily balance series, with
//! terminal and CSV output.

use std::io::Write;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::FluxoResult;
use crate::models::DayBalance;
use crate::projection::{CashProjection, ProjectionOptions};
use crate::storage::Storage;

/// Which slice of the series to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesFilter {
    /// The full generated series
    All,
    /// The next N days from "today"
    Window(u32),
    /// One calendar month
    Month { year: i32, month: u32 },
}

/// Cash flow report over both domains
#[derive(Debug, Clone)]
pub struct CashFlowReport {
    /// The underlying projection
    pub projection: CashProjection,
}

impl CashFlowReport {
    /// Generate a report from the current storage snapshot
    pub fn generate(
        storage: &Storage,
        today: NaiveDate,
        options: ProjectionOptions,
    ) -> FluxoResult<Self> {
        let store = storage.store_transactions.get_all()?;
        let household = storage.household_entries.get_all()?;
        let projection = CashProjection::compute(&store, &household, today, options);
        Ok(Self { projection })
    }

    /// The series rows selected by `filter`
    pub fn rows(&self, filter: SeriesFilter) -> Vec<DayBalance> {
        match filter {
            SeriesFilter::All => self.projection.series.clone(),
            SeriesFilter::Window(days) => self.projection.window(days),
            SeriesFilter::Month { year, month } => self.projection.month(year, month),
        }
    }

    /// Format the report for terminal display using the configured
    /// currency symbol and date format
    pub fn format_terminal(&self, filter: SeriesFilter, settings: &Settings) -> String {
        let projection = &self.projection;
        let symbol = &settings.currency_symbol;
        let mut output = String::new();

        output.push_str("Cash Flow Projection\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "Real cash (store):     {:>14}\n",
            projection.real_cash.store.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Real cash (household): {:>14}\n",
            projection.real_cash.household.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Real cash (combined):  {:>14}\n",
            projection.real_cash.combined().format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Opening balance:       {:>14}\n",
            projection.opening_balance.format_with_symbol(symbol)
        ));
        output.push('\n');
        output.push_str(&format!(
            "Today ({}):  in {}  out {}\n",
            projection.today.format(&settings.date_format),
            projection.today_totals.inflows.format_with_symbol(symbol),
            projection.today_totals.outflows.format_with_symbol(symbol)
        ));
        output.push('\n');

        let rows = self.rows(filter);
        if rows.is_empty() {
            output.push_str("No forward movements recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:>12} {:>12} {:>14}\n",
            "Date", "Inflows", "Outflows", "Balance"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for day in &rows {
            output.push_str(&format!(
                "{:<12} {:>12} {:>12} {:>14}\n",
                day.date.format(&settings.date_format).to_string(),
                day.inflows.format_with_symbol(symbol),
                day.outflows.format_with_symbol(symbol),
                day.cumulative.format_with_symbol(symbol)
            ));
        }

        output
    }

    /// Export the series to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W, filter: SeriesFilter) -> FluxoResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["date", "inflows", "outflows", "cumulative_balance"])?;
        for day in self.rows(filter) {
            csv_writer.write_record([
                day.date.format("%Y-%m-%d").to_string(),
                day.inflows.to_decimal_string(),
                day.outflows.to_decimal_string(),
                day.cumulative.to_decimal_string(),
            ])?;
        }

        csv_writer.write_record([
            "summary".to_string(),
            "real_cash_combined".to_string(),
            self.projection.real_cash.combined().to_decimal_string(),
            self.projection.opening_balance.to_decimal_string(),
        ])?;

        csv_writer
            .flush()
            .map_err(|e| crate::error::FluxoError::Export(e.to_string()))?;
        Ok(())
    }
}
