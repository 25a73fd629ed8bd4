use anyhow::Result;
use clap::{Parser, Subcommand};

use fluxo::cli::{
    handle_household_command, handle_projection_command, handle_report_command,
    handle_stock_command, handle_store_command,
};
use fluxo::config::{FluxoPaths, Settings};
use fluxo::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fluxo",
    version,
    about = "Cash flow control for a small store and its household",
    long_about = "Fluxo tracks store sales and purchases alongside household income \
                  and expenses, and projects the combined cash balance day by day \
                  so you can see how much money you will have, and when."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store transaction commands
    #[command(subcommand, alias = "st")]
    Store(fluxo::cli::StoreCommands),

    /// Household entry commands
    #[command(subcommand, alias = "hh")]
    House(fluxo::cli::HouseholdCommands),

    /// Stock commands
    #[command(subcommand)]
    Stock(fluxo::cli::StockCommands),

    /// Show the cash projection
    #[command(alias = "proj")]
    Projection(fluxo::cli::ProjectionArgs),

    /// Report generation commands
    #[command(subcommand)]
    Report(fluxo::cli::ReportCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FluxoPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    // "Today" is resolved once at the edge; everything below receives it
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Some(Commands::Store(cmd)) => {
            handle_store_command(&storage, &settings, cmd, today)?;
        }
        Some(Commands::House(cmd)) => {
            handle_household_command(&storage, &settings, cmd, today)?;
        }
        Some(Commands::Stock(cmd)) => {
            handle_stock_command(&storage, cmd)?;
        }
        Some(Commands::Projection(args)) => {
            handle_projection_command(&storage, &settings, args, today)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd, today)?;
        }
        Some(Commands::Init) => {
            println!("Initializing fluxo at: {}", paths.data_dir().display());
            paths.ensure_directories()?;
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  fluxo store add sale \"Order 1\" 150.00 --due 2026-09-01");
            println!("  fluxo house add expense Electricity 187.50 --due 2026-09-10");
            println!("  fluxo projection");
        }
        Some(Commands::Config) => {
            println!("Fluxo Configuration");
            println!("===================");
            println!("Data directory: {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Horizon (days):    {}", settings.horizon_days);
            println!("  Empty series:      {:?}", settings.empty_series);
            println!("  Cache TTL (secs):  {}", settings.cache_ttl_secs);
        }
        None => {
            println!("Fluxo - cash flow control for store and household");
            println!();
            println!("Run 'fluxo --help' for usage information.");
            println!("Run 'fluxo projection' to see the daily cash projection.");
        }
    }

    Ok(())
}
