//! Household entry CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{FluxoError, FluxoResult};
use crate::models::{HouseholdEntry, HouseholdEntryId, HouseholdEntryKind, Recurrence};
use crate::services::{CreateHouseholdEntryInput, EntryService, ScheduleService};
use crate::storage::Storage;

use super::{parse_date, parse_money};

/// Household entry subcommands
#[derive(Subcommand)]
pub enum HouseholdCommands {
    /// Add a household income or expense
    Add {
        /// Kind (income, expense)
        kind: String,
        /// Description
        description: String,
        /// Amount (e.g., "187.50")
        amount: String,
        /// Category label for grouping
        #[arg(short, long)]
        category: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List household entries
    List {
        /// Only forecast entries, sorted by due date
        #[arg(short, long)]
        forecast: bool,
    },
    /// Mark an entry as realized
    Settle {
        /// Entry ID (or unambiguous prefix)
        id: String,
        /// Realization date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Reverse a realization, returning the entry to forecast
    Revert {
        /// Entry ID (or unambiguous prefix)
        id: String,
    },
    /// Edit an entry
    Edit {
        /// Entry ID (or unambiguous prefix)
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID (or unambiguous prefix)
        id: String,
    },
    /// Create a repeating entry
    Recur {
        /// Kind (income, expense)
        kind: String,
        /// Description
        description: String,
        /// Amount per occurrence
        amount: String,
        /// Cadence (weekly, monthly)
        cadence: String,
        /// Date of the first occurrence (YYYY-MM-DD)
        start: String,
        /// Number of occurrences
        count: u32,
    },
}

/// Handle a household entry command
pub fn handle_household_command(
    storage: &Storage,
    settings: &Settings,
    cmd: HouseholdCommands,
    today: chrono::NaiveDate,
) -> FluxoResult<()> {
    let service = EntryService::new(storage);

    match cmd {
        HouseholdCommands::Add {
            kind,
            description,
            amount,
            category,
            due,
        } => {
            let entry = service.create_household(CreateHouseholdEntryInput {
                kind: parse_kind(&kind)?,
                description,
                category,
                amount: parse_money(&amount)?,
                due_date: due.as_deref().map(parse_date).transpose()?,
            })?;

            println!("Added {} entry: {}", entry.kind, entry.description);
            println!(
                "  Amount: {}",
                entry.amount.format_with_symbol(&settings.currency_symbol)
            );
            if !entry.category.is_empty() {
                println!("  Category: {}", entry.category);
            }
            if let Some(due) = entry.due_date {
                println!("  Due: {}", due.format(&settings.date_format));
            }
            println!("  ID: {}", entry.id);
        }

        HouseholdCommands::List { forecast } => {
            let entries = if forecast {
                storage.household_entries.get_forecast()?
            } else {
                storage.household_entries.get_all()?
            };

            if entries.is_empty() {
                println!("No household entries recorded.");
                return Ok(());
            }

            println!(
                "{:<12} {:<9} {:<24} {:>12} {:<9} {:<12}",
                "ID", "Kind", "Description", "Amount", "Status", "Due"
            );
            println!("{}", "-".repeat(84));
            for entry in entries {
                println!("{}", format_row(&entry, settings));
            }
        }

        HouseholdCommands::Settle { id, date } => {
            let id = resolve_id(storage, &id)?;
            let realized_date = match date {
                Some(d) => parse_date(&d)?,
                None => today,
            };

            let entry = service.realize_household(id, realized_date)?;
            println!(
                "Realized '{}' on {}",
                entry.description,
                realized_date.format(&settings.date_format)
            );
        }

        HouseholdCommands::Revert { id } => {
            let id = resolve_id(storage, &id)?;
            let entry = service.revert_household(id)?;
            println!("Reverted '{}'; back to forecast.", entry.description);
        }

        HouseholdCommands::Edit {
            id,
            description,
            category,
            amount,
            due,
        } => {
            let id = resolve_id(storage, &id)?;
            if description.is_none() && category.is_none() && amount.is_none() && due.is_none() {
                println!("No changes specified. Use --description, --category, --amount or --due.");
                return Ok(());
            }

            let entry = service.update_household(
                id,
                description.as_deref(),
                category.as_deref(),
                amount.as_deref().map(parse_money).transpose()?,
                due.as_deref().map(parse_date).transpose()?,
            )?;
            println!("Updated entry: {}", entry);
        }

        HouseholdCommands::Delete { id } => {
            let id = resolve_id(storage, &id)?;
            service.delete_household(id)?;
            println!("Deleted entry {}", id);
        }

        HouseholdCommands::Recur {
            kind,
            description,
            amount,
            cadence,
            start,
            count,
        } => {
            let schedule = ScheduleService::new(storage);
            let entries = schedule.create_household_recurrence(
                parse_kind(&kind)?,
                &description,
                parse_money(&amount)?,
                parse_cadence(&cadence)?,
                parse_date(&start)?,
                count,
            )?;

            println!("Created {} occurrences of '{}':", entries.len(), description);
            for entry in &entries {
                if let Some(due) = entry.due_date {
                    println!(
                        "  {} due {}",
                        entry.amount.format_with_symbol(&settings.currency_symbol),
                        due.format(&settings.date_format)
                    );
                }
            }
        }
    }

    Ok(())
}

fn parse_kind(s: &str) -> FluxoResult<HouseholdEntryKind> {
    match s.to_ascii_lowercase().as_str() {
        "income" => Ok(HouseholdEntryKind::Income),
        "expense" => Ok(HouseholdEntryKind::Expense),
        other => Err(FluxoError::Validation(format!(
            "Invalid kind: '{}'. Valid kinds: income, expense",
            other
        ))),
    }
}

fn parse_cadence(s: &str) -> FluxoResult<Recurrence> {
    match s.to_ascii_lowercase().as_str() {
        "weekly" => Ok(Recurrence::Weekly),
        "monthly" => Ok(Recurrence::Monthly),
        other => Err(FluxoError::Validation(format!(
            "Invalid cadence: '{}'. Valid cadences: weekly, monthly",
            other
        ))),
    }
}

fn format_row(entry: &HouseholdEntry, settings: &Settings) -> String {
    let due = entry
        .due_date
        .map(|d| d.format(&settings.date_format).to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<12} {:<9} {:<24} {:>12} {:<9} {:<12}",
        entry.id.to_string(),
        entry.kind.to_string(),
        entry.description,
        entry.amount.format_with_symbol(&settings.currency_symbol),
        entry.status.to_string(),
        due
    )
}

fn resolve_id(storage: &Storage, token: &str) -> FluxoResult<HouseholdEntryId> {
    if let Ok(id) = token.parse::<HouseholdEntryId>() {
        if storage.household_entries.get(id)?.is_some() {
            return Ok(id);
        }
    }

    let matches: Vec<_> = storage
        .household_entries
        .get_all()?
        .into_iter()
        .filter(|e| {
            e.id.to_string().starts_with(token) || e.id.as_uuid().to_string().starts_with(token)
        })
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.id),
        [] => Err(FluxoError::household_entry_not_found(token)),
        _ => Err(FluxoError::Validation(format!(
            "Identifier '{}' matches more than one entry",
            token
        ))),
    }
}
