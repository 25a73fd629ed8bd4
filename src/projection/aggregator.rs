//! Data aggregator
//!
//! Reduces the two heterogeneous source collections (store transactions and
//! household entries) to the canonical `Movement` form. All "which field
//! wins" policy lives here:
//!
//! - paid/realized records resolve to their payment/realized date and the
//!   paid amount (falling back to the nominal amount);
//! - pending/forecast records resolve to their due date and nominal amount;
//! - records with no resolvable date are silently dropped from every
//!   aggregate. That is policy, not an error path.

use chrono::NaiveDate;

use crate::models::{HouseholdEntry, Movement, StoreTransaction};

/// Normalize a store transaction to a movement, if it has a resolvable date
pub fn movement_from_store(txn: &StoreTransaction) -> Option<Movement> {
    let (date, magnitude, realized) = if txn.is_paid() {
        (txn.payment_date?, txn.settled_amount(), true)
    } else {
        (txn.due_date?, txn.total, false)
    };
    let amount = if txn.kind.is_inflow() {
        magnitude
    } else {
        -magnitude
    };
    Some(Movement::new(date, amount, realized))
}

/// Normalize a household entry to a movement, if it has a resolvable date
pub fn movement_from_household(entry: &HouseholdEntry) -> Option<Movement> {
    let (date, realized) = if entry.is_realized() {
        (entry.realized_date?, true)
    } else {
        (entry.due_date?, false)
    };
    let amount = if entry.kind.is_inflow() {
        entry.amount
    } else {
        -entry.amount
    };
    Some(Movement::new(date, amount, realized))
}

/// Normalize both source collections into one movement list
///
/// Order is unspecified; two records with identical date and amount are both
/// kept, they represent distinct transactions.
pub fn normalize_all(
    store: &[StoreTransaction],
    household: &[HouseholdEntry],
) -> Vec<Movement> {
    store
        .iter()
        .filter_map(movement_from_store)
        .chain(household.iter().filter_map(movement_from_household))
        .collect()
}

/// Forward-looking movement list: normalized records dated on/after `today`
///
/// Records dated strictly before `today` contribute only to the opening
/// balance and are excluded here.
pub fn forward_movements(
    store: &[StoreTransaction],
    household: &[HouseholdEntry],
    today: NaiveDate,
) -> Vec<Movement> {
    normalize_all(store, household)
        .into_iter()
        .filter(|m| m.date >= today)
        .collect()
}
