//! Core data models for fluxo
//!
//! This module contains the data structures that represent the cash-control
//! domain: store transactions, household entries, stock items, and the
//! canonical movement types the projection core operates on.

pub mod household_entry;
pub mod ids;
pub mod money;
pub mod movement;
pub mod schedule;
pub mod stock;
pub mod store_transaction;

pub use household_entry::{EntryStatus, HouseholdEntry, HouseholdEntryKind};
pub use ids::{HouseholdEntryId, PlanId, StockItemId, StoreTransactionId};
pub use money::Money;
pub use movement::{DayBalance, DayTotals, Movement};
pub use schedule::Recurrence;
pub use stock::StockItem;
pub use store_transaction::{
    InstallmentRef, PaymentStatus, StoreTransaction, StoreTransactionKind,
};
