//! Store transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{FluxoError, FluxoResult};
use crate::models::{StoreTransaction, StoreTransactionId, StoreTransactionKind};
use crate::services::{CreateStoreTransactionInput, EntryService, ScheduleService};
use crate::storage::Storage;

use super::{parse_date, parse_money};

/// Store transaction subcommands
#[derive(Subcommand)]
pub enum StoreCommands {
    /// Add a store sale or purchase
    Add {
        /// Kind (sale, purchase)
        kind: String,
        /// Description
        description: String,
        /// Nominal total (e.g., "150.00")
        total: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List store transactions
    List {
        /// Only pending transactions, sorted by due date
        #[arg(short, long)]
        pending: bool,
    },
    /// Mark a transaction as paid
    Pay {
        /// Transaction ID (or unambiguous prefix)
        id: String,
        /// Payment date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Settled amount, when it differs from the nominal total
        #[arg(short, long)]
        amount: Option<String>,
    },
    /// Reverse a payment, returning the transaction to pending
    Revert {
        /// Transaction ID (or unambiguous prefix)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (or unambiguous prefix)
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New nominal total
        #[arg(long)]
        total: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (or unambiguous prefix)
        id: String,
    },
    /// Split a total into monthly installments
    Installments {
        /// Kind (sale, purchase)
        kind: String,
        /// Description
        description: String,
        /// Total to split (e.g., "900.00")
        total: String,
        /// Number of parcels
        count: u32,
        /// Due date of the first parcel (YYYY-MM-DD)
        first_due: String,
    },
}

/// Handle a store transaction command
pub fn handle_store_command(
    storage: &Storage,
    settings: &Settings,
    cmd: StoreCommands,
    today: chrono::NaiveDate,
) -> FluxoResult<()> {
    let service = EntryService::new(storage);

    match cmd {
        StoreCommands::Add {
            kind,
            description,
            total,
            due,
        } => {
            let txn = service.create_store(CreateStoreTransactionInput {
                kind: parse_kind(&kind)?,
                description,
                total: parse_money(&total)?,
                due_date: due.as_deref().map(parse_date).transpose()?,
            })?;

            println!("Added {} transaction: {}", txn.kind, txn.description);
            println!(
                "  Total: {}",
                txn.total.format_with_symbol(&settings.currency_symbol)
            );
            if let Some(due) = txn.due_date {
                println!("  Due: {}", due.format(&settings.date_format));
            }
            println!("  ID: {}", txn.id);
        }

        StoreCommands::List { pending } => {
            let transactions = if pending {
                storage.store_transactions.get_pending()?
            } else {
                storage.store_transactions.get_all()?
            };

            if transactions.is_empty() {
                println!("No store transactions recorded.");
                return Ok(());
            }

            println!(
                "{:<12} {:<10} {:<24} {:>12} {:<8} {:<12}",
                "ID", "Kind", "Description", "Total", "Status", "Due"
            );
            println!("{}", "-".repeat(84));
            for txn in transactions {
                println!("{}", format_row(&txn, settings));
            }
        }

        StoreCommands::Pay { id, date, amount } => {
            let id = resolve_id(storage, &id)?;
            let payment_date = match date {
                Some(d) => parse_date(&d)?,
                None => today,
            };
            let paid_amount = amount.as_deref().map(parse_money).transpose()?;

            let txn = service.settle_store(id, payment_date, paid_amount)?;
            println!(
                "Paid '{}' on {}: {}",
                txn.description,
                payment_date.format(&settings.date_format),
                txn.settled_amount()
                    .format_with_symbol(&settings.currency_symbol)
            );
        }

        StoreCommands::Revert { id } => {
            let id = resolve_id(storage, &id)?;
            let txn = service.revert_store(id)?;
            println!("Reverted payment of '{}'; back to pending.", txn.description);
        }

        StoreCommands::Edit {
            id,
            description,
            total,
            due,
        } => {
            let id = resolve_id(storage, &id)?;
            if description.is_none() && total.is_none() && due.is_none() {
                println!("No changes specified. Use --description, --total or --due.");
                return Ok(());
            }

            let txn = service.update_store(
                id,
                description.as_deref(),
                total.as_deref().map(parse_money).transpose()?,
                due.as_deref().map(parse_date).transpose()?,
            )?;
            println!("Updated transaction: {}", txn);
        }

        StoreCommands::Delete { id } => {
            let id = resolve_id(storage, &id)?;
            service.delete_store(id)?;
            println!("Deleted transaction {}", id);
        }

        StoreCommands::Installments {
            kind,
            description,
            total,
            count,
            first_due,
        } => {
            let schedule = ScheduleService::new(storage);
            let parcels = schedule.create_store_installments(
                parse_kind(&kind)?,
                &description,
                parse_money(&total)?,
                count,
                parse_date(&first_due)?,
            )?;

            println!("Created {} parcels for '{}':", parcels.len(), description);
            for parcel in &parcels {
                let reference = parcel
                    .installment
                    .map(|i| i.to_string())
                    .unwrap_or_default();
                if let Some(due) = parcel.due_date {
                    println!(
                        "  {} {} due {}",
                        reference,
                        parcel.total.format_with_symbol(&settings.currency_symbol),
                        due.format(&settings.date_format)
                    );
                }
            }
        }
    }

    Ok(())
}

fn parse_kind(s: &str) -> FluxoResult<StoreTransactionKind> {
    match s.to_ascii_lowercase().as_str() {
        "sale" => Ok(StoreTransactionKind::Sale),
        "purchase" => Ok(StoreTransactionKind::Purchase),
        other => Err(FluxoError::Validation(format!(
            "Invalid kind: '{}'. Valid kinds: sale, purchase",
            other
        ))),
    }
}

fn format_row(txn: &StoreTransaction, settings: &Settings) -> String {
    let due = txn
        .due_date
        .map(|d| d.format(&settings.date_format).to_string())
        .unwrap_or_else(|| "-".to_string());
    let description = match txn.installment {
        Some(reference) => format!("{} ({})", txn.description, reference),
        None => txn.description.clone(),
    };
    format!(
        "{:<12} {:<10} {:<24} {:>12} {:<8} {:<12}",
        txn.id.to_string(),
        txn.kind.to_string(),
        description,
        txn.total.format_with_symbol(&settings.currency_symbol),
        txn.status.to_string(),
        due
    )
}

/// Resolve an ID argument: a full UUID, or an unambiguous prefix of the
/// displayed short form
fn resolve_id(storage: &Storage, token: &str) -> FluxoResult<StoreTransactionId> {
    if let Ok(id) = token.parse::<StoreTransactionId>() {
        if storage.store_transactions.get(id)?.is_some() {
            return Ok(id);
        }
    }

    let matches: Vec<_> = storage
        .store_transactions
        .get_all()?
        .into_iter()
        .filter(|t| {
            t.id.to_string().starts_with(token) || t.id.as_uuid().to_string().starts_with(token)
        })
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.id),
        [] => Err(FluxoError::store_transaction_not_found(token)),
        _ => Err(FluxoError::Validation(format!(
            "Identifier '{}' matches more than one transaction",
            token
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FluxoPaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("Sale").unwrap(), StoreTransactionKind::Sale);
        assert_eq!(
            parse_kind("purchase").unwrap(),
            StoreTransactionKind::Purchase
        );
        assert!(parse_kind("refund").is_err());
    }

    #[test]
    fn test_format_row_uses_configured_symbol_and_date_format() {
        let txn = StoreTransaction::with_due_date(
            StoreTransactionKind::Sale,
            "Order",
            Money::from_cents(15000),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
        );

        let mut settings = Settings::default();
        settings.currency_symbol = "R$".to_string();
        settings.date_format = "%d/%m/%Y".to_string();

        let row = format_row(&txn, &settings);
        assert!(row.contains("R$150.00"));
        assert!(row.contains("18/03/2024"));
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let txn = StoreTransaction::new(
            StoreTransactionKind::Sale,
            "Order",
            Money::from_cents(100),
        );
        let id = txn.id;
        storage.store_transactions.upsert(txn).unwrap();

        let short = id.to_string();
        assert_eq!(resolve_id(&storage, &short).unwrap(), id);
        assert_eq!(resolve_id(&storage, &id.as_uuid().to_string()).unwrap(), id);
        assert!(resolve_id(&storage, "str-ffffffff")
            .unwrap_err()
            .is_not_found());
    }
}
