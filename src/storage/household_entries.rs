//! Household entry repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FluxoError;
use crate::models::{HouseholdEntry, HouseholdEntryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable household entry data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct HouseholdEntryData {
    entries: Vec<HouseholdEntry>,
}

/// Repository for household entry persistence
pub struct HouseholdEntryRepository {
    path: PathBuf,
    data: RwLock<HashMap<HouseholdEntryId, HouseholdEntry>>,
}

impl HouseholdEntryRepository {
    /// Create a new household entry repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries from disk
    pub fn load(&self) -> Result<(), FluxoError> {
        let file_data: HouseholdEntryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for entry in file_data.entries {
            data.insert(entry.id, entry);
        }

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let file_data = HouseholdEntryData { entries };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an entry by ID
    pub fn get(&self, id: HouseholdEntryId) -> Result<Option<HouseholdEntry>, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all entries, newest first
    pub fn get_all(&self) -> Result<Vec<HouseholdEntry>, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Get forecast (unrealized) entries sorted by due date (undated last)
    pub fn get_forecast(&self) -> Result<Vec<HouseholdEntry>, FluxoError> {
        let mut forecast: Vec<_> = self
            .get_all()?
            .into_iter()
            .filter(|e| !e.is_realized())
            .collect();
        forecast.sort_by_key(|e| (e.due_date.is_none(), e.due_date));
        Ok(forecast)
    }

    /// Insert or update an entry
    pub fn upsert(&self, entry: HouseholdEntry) -> Result<(), FluxoError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(entry.id, entry);
        Ok(())
    }

    /// Delete an entry
    pub fn delete(&self, id: HouseholdEntryId) -> Result<bool, FluxoError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count entries
    pub fn count(&self) -> Result<usize, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HouseholdEntryKind, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, HouseholdEntryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("household_entries.json");
        let repo = HouseholdEntryRepository::new(path);
        (temp_dir, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_get_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let entry = HouseholdEntry::new(
            HouseholdEntryKind::Expense,
            "Groceries",
            Money::from_cents(23500),
        );
        let id = entry.id;
        repo.upsert(entry).unwrap();

        assert_eq!(
            repo.get(id).unwrap().unwrap().amount,
            Money::from_cents(23500)
        );
        assert!(repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let entry = HouseholdEntry::with_due_date(
            HouseholdEntryKind::Income,
            "Salary",
            Money::from_cents(350000),
            date(2024, 4, 5),
        );
        let id = entry.id;
        repo.upsert(entry).unwrap();
        repo.save().unwrap();

        let repo2 =
            HouseholdEntryRepository::new(temp_dir.path().join("household_entries.json"));
        repo2.load().unwrap();
        assert!(repo2.get(id).unwrap().is_some());
    }

    #[test]
    fn test_get_forecast_excludes_realized() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let forecast = HouseholdEntry::with_due_date(
            HouseholdEntryKind::Expense,
            "Rent",
            Money::from_cents(120000),
            date(2024, 4, 1),
        );
        let mut realized = HouseholdEntry::with_due_date(
            HouseholdEntryKind::Expense,
            "Water",
            Money::from_cents(8000),
            date(2024, 3, 10),
        );
        realized.realize(date(2024, 3, 10));

        repo.upsert(forecast).unwrap();
        repo.upsert(realized).unwrap();

        let pending = repo.get_forecast().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].description, "Rent");
    }
}
