//! Schedule service
//!
//! Materializes installment plans and recurrences as pending/forecast
//! records carrying their plan references.

use chrono::NaiveDate;

use crate::error::{FluxoError, FluxoResult};
use crate::models::schedule::{installment_dates, split_total};
use crate::models::{
    HouseholdEntry, HouseholdEntryKind, InstallmentRef, Money, PlanId, Recurrence,
    StoreTransaction, StoreTransactionKind,
};
use crate::storage::Storage;

/// Service for installment and recurrence scheduling
pub struct ScheduleService<'a> {
    storage: &'a Storage,
}

impl<'a> ScheduleService<'a> {
    /// Create a new schedule service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Split a store total into monthly parcels, creating one pending
    /// transaction per parcel
    ///
    /// Parcels sum exactly to the total; the first parcel absorbs the
    /// remainder cents. All parcels share one plan ID.
    pub fn create_store_installments(
        &self,
        kind: StoreTransactionKind,
        description: &str,
        total: Money,
        count: u32,
        first_due: NaiveDate,
    ) -> FluxoResult<Vec<StoreTransaction>> {
        if count == 0 {
            return Err(FluxoError::Schedule(
                "Installment count must be at least 1".into(),
            ));
        }
        if !total.is_positive() {
            return Err(FluxoError::Schedule(format!(
                "Installment total must be positive, got {}",
                total
            )));
        }

        let plan_id = PlanId::new();
        let dates = installment_dates(first_due, count);
        let amounts = split_total(total, count);

        let mut parcels = Vec::with_capacity(count as usize);
        for (i, (due, amount)) in dates.into_iter().zip(amounts).enumerate() {
            let mut txn =
                StoreTransaction::with_due_date(kind, description.trim().to_string(), amount, due);
            txn.installment = Some(InstallmentRef {
                plan_id,
                number: i as u32 + 1,
                count,
            });
            self.storage.store_transactions.upsert(txn.clone())?;
            parcels.push(txn);
        }

        self.storage.store_transactions.save()?;
        Ok(parcels)
    }

    /// Create `count` forecast household entries repeating at the given
    /// cadence from `start`
    pub fn create_household_recurrence(
        &self,
        kind: HouseholdEntryKind,
        description: &str,
        amount: Money,
        recurrence: Recurrence,
        start: NaiveDate,
        count: u32,
    ) -> FluxoResult<Vec<HouseholdEntry>> {
        if count == 0 {
            return Err(FluxoError::Schedule(
                "Occurrence count must be at least 1".into(),
            ));
        }
        if !amount.is_positive() {
            return Err(FluxoError::Schedule(format!(
                "Recurring amount must be positive, got {}",
                amount
            )));
        }

        let mut entries = Vec::with_capacity(count as usize);
        for due in recurrence.occurrences(start, count) {
            let entry = HouseholdEntry::with_due_date(
                kind,
                description.trim().to_string(),
                amount,
                due,
            );
            self.storage.household_entries.upsert(entry.clone())?;
            entries.push(entry);
        }

        self.storage.household_entries.save()?;
        Ok(entries)
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
    fn test_installments_sum_to_total() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ScheduleService::new(&storage);

        let parcels = service
            .create_store_installments(
                StoreTransactionKind::Purchase,
                "Oven",
                Money::from_cents(10000),
                3,
                date(2024, 4, 15),
            )
            .unwrap();

        assert_eq!(parcels.len(), 3);
        let sum: Money = parcels.iter().map(|p| p.total).sum();
        assert_eq!(sum, Money::from_cents(10000));

        // Monthly due dates, all pending
        assert_eq!(parcels[0].due_date, Some(date(2024, 4, 15)));
        assert_eq!(parcels[1].due_date, Some(date(2024, 5, 15)));
        assert_eq!(parcels[2].due_date, Some(date(2024, 6, 15)));
        assert!(parcels.iter().all(|p| !p.is_paid()));
    }

    #[test]
    fn test_installments_share_plan_and_are_persisted() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ScheduleService::new(&storage);

        let parcels = service
            .create_store_installments(
                StoreTransactionKind::Purchase,
                "Freezer",
                Money::from_cents(90000),
                6,
                date(2024, 1, 31),
            )
            .unwrap();

        let plan_id = parcels[0].installment.unwrap().plan_id;
        let stored = storage.store_transactions.get_by_plan(plan_id).unwrap();
        assert_eq!(stored.len(), 6);
        assert_eq!(stored[0].installment.unwrap().to_string(), "1/6");
        // End-of-month clamping
        assert_eq!(stored[1].due_date, Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_zero_count_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ScheduleService::new(&storage);

        let result = service.create_store_installments(
            StoreTransactionKind::Sale,
            "Bad",
            Money::from_cents(100),
            0,
            date(2024, 4, 1),
        );
        assert!(matches!(result, Err(FluxoError::Schedule(_))));
    }

    #[test]
    fn test_monthly_recurrence_entries() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ScheduleService::new(&storage);

        let entries = service
            .create_household_recurrence(
                HouseholdEntryKind::Expense,
                "Rent",
                Money::from_cents(120000),
                Recurrence::Monthly,
                date(2024, 4, 1),
                3,
            )
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].due_date, Some(date(2024, 6, 1)));
        assert_eq!(storage.household_entries.count().unwrap(), 3);
        assert!(entries.iter().all(|e| !e.is_realized()));
    }

    #[test]
    fn test_weekly_recurrence_dates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ScheduleService::new(&storage);

        let entries = service
            .create_household_recurrence(
                HouseholdEntryKind::Income,
                "Market stall",
                Money::from_cents(25000),
                Recurrence::Weekly,
                date(2024, 3, 2),
                2,
            )
            .unwrap();

        assert_eq!(entries[0].due_date, Some(date(2024, 3, 2)));
        assert_eq!(entries[1].due_date, Some(date(2024, 3, 9)));
    }
}
