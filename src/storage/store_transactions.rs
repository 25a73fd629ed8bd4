//! Store transaction repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FluxoError;
use crate::models::{PlanId, StoreTransaction, StoreTransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable store transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct StoreTransactionData {
    transactions: Vec<StoreTransaction>,
}

/// Repository for store transaction persistence
pub struct StoreTransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<StoreTransactionId, StoreTransaction>>,
}

impl StoreTransactionRepository {
    /// Create a new store transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), FluxoError> {
        let file_data: StoreTransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for txn in file_data.transactions {
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let file_data = StoreTransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: StoreTransactionId) -> Result<Option<StoreTransaction>, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<StoreTransaction>, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    /// Get pending transactions sorted by due date (undated last)
    pub fn get_pending(&self) -> Result<Vec<StoreTransaction>, FluxoError> {
        let mut pending: Vec<_> = self
            .get_all()?
            .into_iter()
            .filter(|t| !t.is_paid())
            .collect();
        pending.sort_by_key(|t| (t.due_date.is_none(), t.due_date));
        Ok(pending)
    }

    /// Get all parcels of an installment plan, in parcel order
    pub fn get_by_plan(&self, plan_id: PlanId) -> Result<Vec<StoreTransaction>, FluxoError> {
        let mut parcels: Vec<_> = self
            .get_all()?
            .into_iter()
            .filter(|t| t.installment.map(|i| i.plan_id) == Some(plan_id))
            .collect();
        parcels.sort_by_key(|t| t.installment.map(|i| i.number));
        Ok(parcels)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: StoreTransaction) -> Result<(), FluxoError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: StoreTransactionId) -> Result<bool, FluxoError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, FluxoError> {
        let data = self
            .data
            .read()
            .map_err(|e| FluxoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
