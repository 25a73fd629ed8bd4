//! Entry service
//!
//! Business logic for store transactions and household entries: creation,
//! deletion, payment processing and payment reversal.

use chrono::{NaiveDate, Utc};

use crate::error::{FluxoError, FluxoResult};
use crate::models::{
    HouseholdEntry, HouseholdEntryId, HouseholdEntryKind, Money, StoreTransaction,
    StoreTransactionId, StoreTransactionKind,
};
use crate::storage::Storage;

/// Input for creating a new store transaction
#[derive(Debug, Clone)]
pub struct CreateStoreTransactionInput {
    pub kind: StoreTransactionKind,
    pub description: String,
    pub total: Money,
    pub due_date: Option<NaiveDate>,
}

/// Input for creating a new household entry
#[derive(Debug, Clone)]
pub struct CreateHouseholdEntryInput {
    pub kind: HouseholdEntryKind,
    pub description: String,
    pub category: Option<String>,
    pub amount: Money,
    pub due_date: Option<NaiveDate>,
}

/// Service for entry management on both sides of the books
pub struct EntryService<'a> {
    storage: &'a Storage,
}

impl<'a> EntryService<'a> {
    /// Create a new entry service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a pending store transaction
    pub fn create_store(&self, input: CreateStoreTransactionInput) -> FluxoResult<StoreTransaction> {
        let mut txn = StoreTransaction::new(
            input.kind,
            input.description.trim().to_string(),
            input.total,
        );
        txn.due_date = input.due_date;

        txn.validate()
            .map_err(|e| FluxoError::Validation(e.to_string()))?;

        self.storage.store_transactions.upsert(txn.clone())?;
        self.storage.store_transactions.save()?;
        Ok(txn)
    }

    /// Create a forecast household entry
    pub fn create_household(&self, input: CreateHouseholdEntryInput) -> FluxoResult<HouseholdEntry> {
        let mut entry = HouseholdEntry::new(
            input.kind,
            input.description.trim().to_string(),
            input.amount,
        );
        entry.category = input.category.unwrap_or_default();
        entry.due_date = input.due_date;

        entry
            .validate()
            .map_err(|e| FluxoError::Validation(e.to_string()))?;

        self.storage.household_entries.upsert(entry.clone())?;
        self.storage.household_entries.save()?;
        Ok(entry)
    }

    /// Update fields of a store transaction; `None` leaves a field unchanged
    pub fn update_store(
        &self,
        id: StoreTransactionId,
        description: Option<&str>,
        total: Option<Money>,
        due_date: Option<NaiveDate>,
    ) -> FluxoResult<StoreTransaction> {
        let mut txn = self
            .storage
            .store_transactions
            .get(id)?
            .ok_or_else(|| FluxoError::store_transaction_not_found(id.to_string()))?;

        if let Some(description) = description {
            txn.description = description.trim().to_string();
        }
        if let Some(total) = total {
            txn.total = total;
        }
        if let Some(due_date) = due_date {
            txn.due_date = Some(due_date);
        }
        txn.updated_at = Utc::now();

        txn.validate()
            .map_err(|e| FluxoError::Validation(e.to_string()))?;

        self.storage.store_transactions.upsert(txn.clone())?;
        self.storage.store_transactions.save()?;
        Ok(txn)
    }

    /// Update fields of a household entry; `None` leaves a field unchanged
    pub fn update_household(
        &self,
        id: HouseholdEntryId,
        description: Option<&str>,
        category: Option<&str>,
        amount: Option<Money>,
        due_date: Option<NaiveDate>,
    ) -> FluxoResult<HouseholdEntry> {
        let mut entry = self
            .storage
            .household_entries
            .get(id)?
            .ok_or_else(|| FluxoError::household_entry_not_found(id.to_string()))?;

        if let Some(description) = description {
            entry.description = description.trim().to_string();
        }
        if let Some(category) = category {
            entry.category = category.trim().to_string();
        }
        if let Some(amount) = amount {
            entry.amount = amount;
        }
        if let Some(due_date) = due_date {
            entry.due_date = Some(due_date);
        }
        entry.updated_at = Utc::now();

        entry
            .validate()
            .map_err(|e| FluxoError::Validation(e.to_string()))?;

        self.storage.household_entries.upsert(entry.clone())?;
        self.storage.household_entries.save()?;
        Ok(entry)
    }

    /// Mark a store transaction as paid
    ///
    /// `paid_amount` overrides the nominal total when the settled value
    /// differs (discounts, partial interest).
    pub fn settle_store(
        &self,
        id: StoreTransactionId,
        payment_date: NaiveDate,
        paid_amount: Option<Money>,
    ) -> FluxoResult<StoreTransaction> {
        let mut txn = self
            .storage
            .store_transactions
            .get(id)?
            .ok_or_else(|| FluxoError::store_transaction_not_found(id.to_string()))?;

        if txn.is_paid() {
            return Err(FluxoError::Validation(format!(
                "Transaction {} is already paid",
                id
            )));
        }

        txn.settle(payment_date, paid_amount);
        txn.validate()
            .map_err(|e| FluxoError::Validation(e.to_string()))?;

        self.storage.store_transactions.upsert(txn.clone())?;
        self.storage.store_transactions.save()?;
        Ok(txn)
    }

    /// Reverse a store payment, returning the transaction to pending
    pub fn revert_store(&self, id: StoreTransactionId) -> FluxoResult<StoreTransaction> {
        let mut txn = self
            .storage
            .store_transactions
            .get(id)?
            .ok_or_else(|| FluxoError::store_transaction_not_found(id.to_string()))?;

        if !txn.is_paid() {
            return Err(FluxoError::Validation(format!(
                "Transaction {} is not paid",
                id
            )));
        }

        txn.revert_payment();
        self.storage.store_transactions.upsert(txn.clone())?;
        self.storage.store_transactions.save()?;
        Ok(txn)
    }

    /// Delete a store transaction
    pub fn delete_store(&self, id: StoreTransactionId) -> FluxoResult<()> {
        if !self.storage.store_transactions.delete(id)? {
            return Err(FluxoError::store_transaction_not_found(id.to_string()));
        }
        self.storage.store_transactions.save()
    }

    /// Mark a household entry as realized
    pub fn realize_household(
        &self,
        id: HouseholdEntryId,
        realized_date: NaiveDate,
    ) -> FluxoResult<HouseholdEntry> {
        let mut entry = self
            .storage
            .household_entries
            .get(id)?
            .ok_or_else(|| FluxoError::household_entry_not_found(id.to_string()))?;

        if entry.is_realized() {
            return Err(FluxoError::Validation(format!(
                "Entry {} is already realized",
                id
            )));
        }

        entry.realize(realized_date);
        self.storage.household_entries.upsert(entry.clone())?;
        self.storage.household_entries.save()?;
        Ok(entry)
    }

    /// Reverse a realization, returning the entry to forecast
    pub fn revert_household(&self, id: HouseholdEntryId) -> FluxoResult<HouseholdEntry> {
        let mut entry = self
            .storage
            .household_entries
            .get(id)?
            .ok_or_else(|| FluxoError::household_entry_not_found(id.to_string()))?;

        if !entry.is_realized() {
            return Err(FluxoError::Validation(format!(
                "Entry {} is not realized",
                id
            )));
        }

        entry.revert();
        self.storage.household_entries.upsert(entry.clone())?;
        self.storage.household_entries.save()?;
        Ok(entry)
    }

    /// Delete a household entry
    pub fn delete_household(&self, id: HouseholdEntryId) -> FluxoResult<()> {
        if !self.storage.household_entries.delete(id)? {
            return Err(FluxoError::household_entry_not_found(id.to_string()));
        }
        self.storage.household_entries.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FluxoPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_store_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let txn = service
            .create_store(CreateStoreTransactionInput {
                kind: StoreTransactionKind::Sale,
                description: "  Order 9  ".into(),
                total: Money::from_cents(4200),
                due_date: Some(date(2024, 4, 1)),
            })
            .unwrap();

        assert_eq!(txn.description, "Order 9");
        assert!(storage.store_transactions.get(txn.id).unwrap().is_some());
    }

    #[test]
    fn test_create_store_rejects_zero_total() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let result = service.create_store(CreateStoreTransactionInput {
            kind: StoreTransactionKind::Sale,
            description: "bad".into(),
            total: Money::zero(),
            due_date: None,
        });

        assert!(matches!(result, Err(FluxoError::Validation(_))));
    }

    #[test]
    fn test_update_store_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let txn = service
            .create_store(CreateStoreTransactionInput {
                kind: StoreTransactionKind::Sale,
                description: "Order".into(),
                total: Money::from_cents(1000),
                due_date: None,
            })
            .unwrap();

        let updated = service
            .update_store(
                txn.id,
                Some("Order 1"),
                Some(Money::from_cents(1500)),
                Some(date(2024, 4, 1)),
            )
            .unwrap();
        assert_eq!(updated.description, "Order 1");
        assert_eq!(updated.total, Money::from_cents(1500));
        assert_eq!(updated.due_date, Some(date(2024, 4, 1)));

        // A zero total is rejected and nothing is persisted
        assert!(service
            .update_store(txn.id, None, Some(Money::zero()), None)
            .is_err());
    }

    #[test]
    fn test_settle_and_revert_store() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let txn = service
            .create_store(CreateStoreTransactionInput {
                kind: StoreTransactionKind::Purchase,
                description: "Supplier".into(),
                total: Money::from_cents(10000),
                due_date: Some(date(2024, 4, 1)),
            })
            .unwrap();

        let paid = service
            .settle_store(txn.id, date(2024, 3, 30), Some(Money::from_cents(9800)))
            .unwrap();
        assert!(paid.is_paid());
        assert_eq!(paid.settled_amount(), Money::from_cents(9800));

        // Settling twice is a validation error
        assert!(matches!(
            service.settle_store(txn.id, date(2024, 3, 31), None),
            Err(FluxoError::Validation(_))
        ));

        let reverted = service.revert_store(txn.id).unwrap();
        assert!(!reverted.is_paid());
        assert!(reverted.paid_amount.is_none());
    }

    #[test]
    fn test_settle_missing_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let err = service
            .settle_store(StoreTransactionId::new(), date(2024, 3, 30), None)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_realize_and_revert_household() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let entry = service
            .create_household(CreateHouseholdEntryInput {
                kind: HouseholdEntryKind::Expense,
                description: "Electricity".into(),
                category: Some("utilities".into()),
                amount: Money::from_cents(18750),
                due_date: Some(date(2024, 4, 10)),
            })
            .unwrap();
        assert_eq!(entry.category, "utilities");

        let realized = service
            .realize_household(entry.id, date(2024, 4, 9))
            .unwrap();
        assert!(realized.is_realized());

        let reverted = service.revert_household(entry.id).unwrap();
        assert!(!reverted.is_realized());
    }

    #[test]
    fn test_delete_entries() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let txn = service
            .create_store(CreateStoreTransactionInput {
                kind: StoreTransactionKind::Sale,
                description: "Order".into(),
                total: Money::from_cents(100),
                due_date: None,
            })
            .unwrap();

        service.delete_store(txn.id).unwrap();
        assert!(service.delete_store(txn.id).unwrap_err().is_not_found());
    }
}
