//! Stock Levels Report
//!
//! Lists every tracked item with its quantity, minimum level, and a
//! low-stock marker.

use std::io::Write;

use crate::error::FluxoResult;
use crate::models::StockItem;
use crate::storage::Storage;

/// Stock levels report
#[derive(Debug, Clone)]
pub struct StockLevelsReport {
    /// All items sorted by name
    pub items: Vec<StockItem>,
    /// When true, only items at or below their minimum are listed
    pub low_only: bool,
}

impl StockLevelsReport {
    /// Generate a report from the current storage snapshot
    pub fn generate(storage: &Storage, low_only: bool) -> FluxoResult<Self> {
        let mut items = storage.stock.get_all()?;
        if low_only {
            items.retain(|item| item.is_low());
        }
        Ok(Self { items, low_only })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(if self.low_only {
            "Low Stock\n"
        } else {
            "Stock Levels\n"
        });
        output.push_str(&"=".repeat(52));
        output.push('\n');

        if self.items.is_empty() {
            output.push_str(if self.low_only {
                "No items at or below their minimum.\n"
            } else {
                "No stock items registered.\n"
            });
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:>10} {:>10} {:>5}\n",
            "Item", "Quantity", "Minimum", ""
        ));
        output.push_str(&"-".repeat(52));
        output.push('\n');

        for item in &self.items {
            let marker = if item.is_low() { "LOW" } else { "" };
            output.push_str(&format!(
                "{:<24} {:>7} {:>2} {:>10} {:>5}\n",
                item.name, item.quantity, item.unit, item.minimum, marker
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FluxoResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["name", "unit", "quantity", "minimum", "low"])?;
        for item in &self.items {
            csv_writer.write_record([
                item.name.clone(),
                item.unit.clone(),
                item.quantity.to_string(),
                item.minimum.to_string(),
                item.is_low().to_string(),
            ])?;
        }

        csv_writer
            .flush()
            .map_err(|e| crate::error::FluxoError::Export(e.to_string()))?;
        Ok(())
    }
}
