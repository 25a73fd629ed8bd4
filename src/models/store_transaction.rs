//! Store transaction model
//!
//! Represents purchases and sales on the store side of the books, including
//! payment status and installment references.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{PlanId, StoreTransactionId};
use super::money::Money;

/// Direction of a store transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreTransactionKind {
    /// Money coming in
    Sale,
    /// Money going out
    Purchase,
}

impl StoreTransactionKind {
    /// Whether this kind contributes a positive cash movement
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Sale)
    }
}

impl fmt::Display for StoreTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sale => write!(f, "Sale"),
            Self::Purchase => write!(f, "Purchase"),
        }
    }
}

/// Payment status of a store transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Not yet settled; contributes to the forecast only
    #[default]
    Pending,
    /// Settled; contributes to realized cash
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

/// Reference linking a transaction to its installment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRef {
    /// The plan this parcel belongs to
    pub plan_id: PlanId,
    /// 1-based parcel number
    pub number: u32,
    /// Total number of parcels in the plan
    pub count: u32,
}

impl fmt::Display for InstallmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number, self.count)
    }
}

/// A store-side cash transaction (purchase or sale)
///
/// Amounts are stored as positive magnitudes; the kind encodes direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreTransaction {
    /// Unique identifier
    pub id: StoreTransactionId,

    /// Sale or purchase
    pub kind: StoreTransactionKind,

    /// Free-form description (customer, supplier, item)
    pub description: String,

    /// Nominal amount
    pub total: Money,

    /// Amount actually settled, when it differs from the nominal total
    pub paid_amount: Option<Money>,

    /// Payment status
    #[serde(default)]
    pub status: PaymentStatus,

    /// Expected settlement date while pending
    pub due_date: Option<NaiveDate>,

    /// Actual settlement date once paid
    pub payment_date: Option<NaiveDate>,

    /// Set when this transaction is one parcel of an installment plan
    pub installment: Option<InstallmentRef>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoreTransaction {
    /// Create a new pending transaction
    pub fn new(kind: StoreTransactionKind, description: impl Into<String>, total: Money) -> Self {
        let now = Utc::now();
        Self {
            id: StoreTransactionId::new(),
            kind,
            description: description.into(),
            total,
            paid_amount: None,
            status: PaymentStatus::Pending,
            due_date: None,
            payment_date: None,
            installment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a pending transaction with a due date
    pub fn with_due_date(
        kind: StoreTransactionKind,
        description: impl Into<String>,
        total: Money,
        due_date: NaiveDate,
    ) -> Self {
        let mut txn = Self::new(kind, description, total);
        txn.due_date = Some(due_date);
        txn
    }

    /// Check if this transaction has been settled
    pub fn is_paid(&self) -> bool {
        matches!(self.status, PaymentStatus::Paid)
    }

    /// The amount that counts toward realized cash: the paid amount when
    /// recorded, otherwise the nominal total
    pub fn settled_amount(&self) -> Money {
        self.paid_amount.unwrap_or(self.total)
    }

    /// Mark as paid on the given date, optionally with a paid amount that
    /// differs from the nominal total
    pub fn settle(&mut self, payment_date: NaiveDate, paid_amount: Option<Money>) {
        self.status = PaymentStatus::Paid;
        self.payment_date = Some(payment_date);
        self.paid_amount = paid_amount;
        self.updated_at = Utc::now();
    }

    /// Reverse a payment, returning the transaction to pending
    pub fn revert_payment(&mut self) {
        self.status = PaymentStatus::Pending;
        self.payment_date = None;
        self.paid_amount = None;
        self.updated_at = Utc::now();
    }

    /// Validate model invariants
    pub fn validate(&self) -> Result<(), StoreTransactionValidationError> {
        if !self.total.is_positive() {
            return Err(StoreTransactionValidationError::NonPositiveTotal(self.total));
        }
        if let Some(paid) = self.paid_amount {
            if !paid.is_positive() {
                return Err(StoreTransactionValidationError::NonPositivePaidAmount(paid));
            }
        }
        if self.is_paid() && self.payment_date.is_none() {
            return Err(StoreTransactionValidationError::PaidWithoutDate);
        }
        Ok(())
    }
}

impl fmt::Display for StoreTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.description, self.total)
    }
}

/// Validation errors for store transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTransactionValidationError {
    NonPositiveTotal(Money),
    NonPositivePaidAmount(Money),
    PaidWithoutDate,
}

impl fmt::Display for StoreTransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveTotal(m) => write!(f, "Total must be positive, got {}", m),
            Self::NonPositivePaidAmount(m) => {
                write!(f, "Paid amount must be positive, got {}", m)
            }
            Self::PaidWithoutDate => write!(f, "Paid transaction requires a payment date"),
        }
    }
}

impl std::error::Error for StoreTransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_is_pending() {
        let txn = StoreTransaction::new(
            StoreTransactionKind::Sale,
            "Counter sale",
            Money::from_cents(12000),
        );
        assert_eq!(txn.status, PaymentStatus::Pending);
        assert!(!txn.is_paid());
        assert!(txn.payment_date.is_none());
    }

    #[test]
    fn test_settle_and_revert() {
        let mut txn = StoreTransaction::with_due_date(
            StoreTransactionKind::Purchase,
            "Supplier invoice",
            Money::from_cents(50000),
            date(2024, 3, 10),
        );

        txn.settle(date(2024, 3, 8), Some(Money::from_cents(48000)));
        assert!(txn.is_paid());
        assert_eq!(txn.settled_amount(), Money::from_cents(48000));
        assert_eq!(txn.payment_date, Some(date(2024, 3, 8)));

        txn.revert_payment();
        assert!(!txn.is_paid());
        assert_eq!(txn.settled_amount(), Money::from_cents(50000));
        assert!(txn.payment_date.is_none());
    }

    #[test]
    fn test_settled_amount_falls_back_to_total() {
        let mut txn = StoreTransaction::new(
            StoreTransactionKind::Sale,
            "Order 42",
            Money::from_cents(7500),
        );
        txn.settle(date(2024, 3, 1), None);
        assert_eq!(txn.settled_amount(), Money::from_cents(7500));
    }

    #[test]
    fn test_validate_rejects_zero_total() {
        let txn = StoreTransaction::new(StoreTransactionKind::Sale, "Bad", Money::zero());
        assert_eq!(
            txn.validate(),
            Err(StoreTransactionValidationError::NonPositiveTotal(
                Money::zero()
            ))
        );
    }

    #[test]
    fn test_validate_paid_requires_date() {
        let mut txn = StoreTransaction::new(
            StoreTransactionKind::Sale,
            "Order",
            Money::from_cents(100),
        );
        txn.status = PaymentStatus::Paid;
        assert_eq!(
            txn.validate(),
            Err(StoreTransactionValidationError::PaidWithoutDate)
        );
    }

    #[test]
    fn test_installment_display() {
        let installment = InstallmentRef {
            plan_id: PlanId::new(),
            number: 2,
            count: 6,
        };
        assert_eq!(installment.to_string(), "2/6");
    }

    #[test]
    fn test_serialization_round_trip() {
        let txn = StoreTransaction::with_due_date(
            StoreTransactionKind::Sale,
            "Order 7",
            Money::from_cents(31050),
            date(2024, 4, 2),
        );
        let json = serde_json::to_string(&txn).unwrap();
        let back: StoreTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn.id, back.id);
        assert_eq!(txn.total, back.total);
        assert_eq!(txn.due_date, back.due_date);
    }
}
