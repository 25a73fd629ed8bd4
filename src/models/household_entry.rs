//! Household entry model
//!
//! Represents household income and expenses, with a forecast/realized
//! lifecycle mirroring the store side's pending/paid.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::HouseholdEntryId;
use super::money::Money;

/// Direction of a household entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseholdEntryKind {
    Income,
    Expense,
}

impl HouseholdEntryKind {
    /// Whether this kind contributes a positive cash movement
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl fmt::Display for HouseholdEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// Lifecycle status of a household entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Expected but not yet realized
    #[default]
    Forecast,
    /// Realized; contributes to actual cash
    Realized,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forecast => write!(f, "Forecast"),
            Self::Realized => write!(f, "Realized"),
        }
    }
}

/// A household income or expense entry
///
/// Amounts are positive magnitudes; the kind encodes direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdEntry {
    /// Unique identifier
    pub id: HouseholdEntryId,

    /// Income or expense
    pub kind: HouseholdEntryKind,

    /// Free-form description ("electricity", "rent", ...)
    pub description: String,

    /// Category label for grouping ("utilities", "groceries")
    #[serde(default)]
    pub category: String,

    /// Nominal amount
    pub amount: Money,

    /// Lifecycle status
    #[serde(default)]
    pub status: EntryStatus,

    /// Expected date while forecast
    pub due_date: Option<NaiveDate>,

    /// Actual date once realized
    pub realized_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HouseholdEntry {
    /// Create a new forecast entry
    pub fn new(kind: HouseholdEntryKind, description: impl Into<String>, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: HouseholdEntryId::new(),
            kind,
            description: description.into(),
            category: String::new(),
            amount,
            status: EntryStatus::Forecast,
            due_date: None,
            realized_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a forecast entry with a due date
    pub fn with_due_date(
        kind: HouseholdEntryKind,
        description: impl Into<String>,
        amount: Money,
        due_date: NaiveDate,
    ) -> Self {
        let mut entry = Self::new(kind, description, amount);
        entry.due_date = Some(due_date);
        entry
    }

    /// Check if this entry has been realized
    pub fn is_realized(&self) -> bool {
        matches!(self.status, EntryStatus::Realized)
    }

    /// Mark as realized on the given date
    pub fn realize(&mut self, realized_date: NaiveDate) {
        self.status = EntryStatus::Realized;
        self.realized_date = Some(realized_date);
        self.updated_at = Utc::now();
    }

    /// Reverse a realization, returning the entry to forecast
    pub fn revert(&mut self) {
        self.status = EntryStatus::Forecast;
        self.realized_date = None;
        self.updated_at = Utc::now();
    }

    /// Validate model invariants
    pub fn validate(&self) -> Result<(), HouseholdEntryValidationError> {
        if !self.amount.is_positive() {
            return Err(HouseholdEntryValidationError::NonPositiveAmount(self.amount));
        }
        if self.is_realized() && self.realized_date.is_none() {
            return Err(HouseholdEntryValidationError::RealizedWithoutDate);
        }
        Ok(())
    }
}

impl fmt::Display for HouseholdEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.description, self.amount)
    }
}

/// Validation errors for household entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HouseholdEntryValidationError {
    NonPositiveAmount(Money),
    RealizedWithoutDate,
}

impl fmt::Display for HouseholdEntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(m) => write!(f, "Amount must be positive, got {}", m),
            Self::RealizedWithoutDate => write!(f, "Realized entry requires a realized date"),
        }
    }
}

impl std::error::Error for HouseholdEntryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_is_forecast() {
        let entry = HouseholdEntry::new(
            HouseholdEntryKind::Expense,
            "Electricity",
            Money::from_cents(18750),
        );
        assert_eq!(entry.status, EntryStatus::Forecast);
        assert!(!entry.is_realized());
    }

    #[test]
    fn test_realize_and_revert() {
        let mut entry = HouseholdEntry::with_due_date(
            HouseholdEntryKind::Income,
            "Salary",
            Money::from_cents(350000),
            date(2024, 3, 5),
        );

        entry.realize(date(2024, 3, 5));
        assert!(entry.is_realized());
        assert_eq!(entry.realized_date, Some(date(2024, 3, 5)));

        entry.revert();
        assert!(!entry.is_realized());
        assert!(entry.realized_date.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let entry = HouseholdEntry::new(HouseholdEntryKind::Expense, "Bad", Money::zero());
        assert_eq!(
            entry.validate(),
            Err(HouseholdEntryValidationError::NonPositiveAmount(
                Money::zero()
            ))
        );
    }

    #[test]
    fn test_validate_realized_requires_date() {
        let mut entry = HouseholdEntry::new(
            HouseholdEntryKind::Income,
            "Refund",
            Money::from_cents(100),
        );
        entry.status = EntryStatus::Realized;
        assert_eq!(
            entry.validate(),
            Err(HouseholdEntryValidationError::RealizedWithoutDate)
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let entry = HouseholdEntry::with_due_date(
            HouseholdEntryKind::Expense,
            "Rent",
            Money::from_cents(120000),
            date(2024, 4, 1),
        );
        let json = serde_json::to_string(&entry).unwrap();
        let back: HouseholdEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry.id, back.id);
        assert_eq!(entry.amount, back.amount);
        assert_eq!(entry.due_date, back.due_date);
    }
}
