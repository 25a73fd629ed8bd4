//! Storage layer for fluxo
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod file_io;
pub mod household_entries;
pub mod stock_items;
pub mod store_transactions;

pub use file_io::{read_json, write_json_atomic};
pub use household_entries::HouseholdEntryRepository;
pub use stock_items::StockRepository;
pub use store_transactions::StoreTransactionRepository;

use crate::config::paths::FluxoPaths;
use crate::error::FluxoError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FluxoPaths,
    pub store_transactions: StoreTransactionRepository,
    pub household_entries: HouseholdEntryRepository,
    pub stock: StockRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FluxoPaths) -> Result<Self, FluxoError> {
        paths.ensure_directories()?;

        Ok(Self {
            store_transactions: StoreTransactionRepository::new(paths.store_transactions_file()),
            household_entries: HouseholdEntryRepository::new(paths.household_entries_file()),
            stock: StockRepository::new(paths.stock_items_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FluxoPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FluxoError> {
        self.store_transactions.load()?;
        self.household_entries.load()?;
        self.stock.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FluxoError> {
        self.store_transactions.save()?;
        self.household_entries.save()?;
        self.stock.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_all_on_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        storage.load_all().unwrap();
        assert_eq!(storage.store_transactions.count().unwrap(), 0);
        assert_eq!(storage.household_entries.count().unwrap(), 0);
        assert_eq!(storage.stock.count().unwrap(), 0);
    }
}
