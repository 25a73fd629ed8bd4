//! Stock CLI commands

use clap::Subcommand;

use crate::error::FluxoResult;
use crate::reports::StockLevelsReport;
use crate::services::StockService;
use crate::storage::Storage;

/// Stock subcommands
#[derive(Subcommand)]
pub enum StockCommands {
    /// Register a new stock item
    Add {
        /// Item name
        name: String,
        /// Unit of measure ("kg", "un", "box")
        #[arg(short, long, default_value = "un")]
        unit: String,
        /// Starting quantity
        #[arg(short, long, default_value = "0")]
        quantity: i64,
        /// Minimum level before the item counts as low stock
        #[arg(short, long, default_value = "0")]
        minimum: i64,
    },
    /// Record an inbound quantity
    In {
        /// Item name
        name: String,
        /// Quantity received
        quantity: i64,
    },
    /// Record an outbound quantity
    Out {
        /// Item name
        name: String,
        /// Quantity removed
        quantity: i64,
    },
    /// List stock levels
    List {
        /// Only items at or below their minimum
        #[arg(short, long)]
        low: bool,
    },
}

/// Handle a stock command
pub fn handle_stock_command(storage: &Storage, cmd: StockCommands) -> FluxoResult<()> {
    let service = StockService::new(storage);

    match cmd {
        StockCommands::Add {
            name,
            unit,
            quantity,
            minimum,
        } => {
            let item = service.add_item(&name, &unit, quantity, minimum)?;
            println!("Added stock item: {}", item);
            println!("  Minimum: {} {}", item.minimum, item.unit);
            println!("  ID: {}", item.id);
        }

        StockCommands::In { name, quantity } => {
            let item = service.receive(&name, quantity)?;
            println!("Received {} {}; now {}", quantity, item.unit, item);
        }

        StockCommands::Out { name, quantity } => {
            let item = service.consume(&name, quantity)?;
            println!("Removed {} {}; now {}", quantity, item.unit, item);
            if item.is_low() {
                println!("  Warning: '{}' is at or below its minimum level.", item.name);
            }
        }

        StockCommands::List { low } => {
            let report = StockLevelsReport::generate(storage, low)?;
            print!("{}", report.format_terminal());
        }
    }

    Ok(())
}
