//! Stock item repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FluxoError;
use crate::models::{StockItem, StockItemId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable stock data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct StockData {
    items: Vec<StockItem>,
}

/// Repository for stock item persistence
pub struct StockRepository {
    path: PathBuf,
    data: RwLock<HashMap<StockItemId, StockItem>>,
}

impl StockRepository {
    /// Create a new stock repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load items from disk
    pub fn load(&self) -> Result<(), FluxoError> {
        let file_data: StockData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for item in file_data.items {
            data.insert(item.id, item);
        }

        Ok(())
    }

    /// Save items to disk
    pub fn save(&self) -> Result<(), FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut items: Vec<_> = data.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));

        let file_data = StockData { items };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an item by ID
    pub fn get(&self, id: StockItemId) -> Result<Option<StockItem>, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Find an item by exact name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Result<Option<StockItem>, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|item| item.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Get all items sorted by name
    pub fn get_all(&self) -> Result<Vec<StockItem>, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut items: Vec<_> = data.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    /// Insert or update an item
    pub fn upsert(&self, item: StockItem) -> Result<(), FluxoError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(item.id, item);
        Ok(())
    }

    /// Delete an item
    pub fn delete(&self, id: StockItemId) -> Result<bool, FluxoError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count items
    pub fn count(&self) -> Result<usize, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
