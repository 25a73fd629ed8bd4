//! Stock service
//!
//! Business logic for stock items: registration, inbound/outbound
//! adjustments, and low-stock listing.

use crate::error::{FluxoError, FluxoResult};
use crate::models::StockItem;
use crate::storage::Storage;

/// Service for stock management
pub struct StockService<'a> {
    storage: &'a Storage,
}

impl<'a> StockService<'a> {
    /// Create a new stock service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new stock item
    pub fn add_item(
        &self,
        name: &str,
        unit: &str,
        quantity: i64,
        minimum: i64,
    ) -> FluxoResult<StockItem> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FluxoError::Validation("Item name cannot be empty".into()));
        }
        if quantity < 0 || minimum < 0 {
            return Err(FluxoError::Validation(
                "Quantity and minimum cannot be negative".into(),
            ));
        }
        if self.storage.stock.find_by_name(name)?.is_some() {
            return Err(FluxoError::Validation(format!(
                "Stock item '{}' already exists",
                name
            )));
        }

        let item = StockItem::new(name, unit.trim(), quantity, minimum);
        self.storage.stock.upsert(item.clone())?;
        self.storage.stock.save()?;
        Ok(item)
    }

    /// Record an inbound quantity for a named item
    pub fn receive(&self, name: &str, quantity: i64) -> FluxoResult<StockItem> {
        if quantity <= 0 {
            return Err(FluxoError::Validation(
                "Inbound quantity must be positive".into(),
            ));
        }

        let mut item = self.find(name)?;
        item.receive(quantity);
        self.storage.stock.upsert(item.clone())?;
        self.storage.stock.save()?;
        Ok(item)
    }

    /// Record an outbound quantity for a named item
    pub fn consume(&self, name: &str, quantity: i64) -> FluxoResult<StockItem> {
        if quantity <= 0 {
            return Err(FluxoError::Validation(
                "Outbound quantity must be positive".into(),
            ));
        }

        let mut item = self.find(name)?;
        item.consume(quantity)
            .map_err(|_| FluxoError::InsufficientStock {
                item: item.name.clone(),
                requested: quantity,
                available: item.quantity,
            })?;
        self.storage.stock.upsert(item.clone())?;
        self.storage.stock.save()?;
        Ok(item)
    }

    /// All items sorted by name
    pub fn list(&self) -> FluxoResult<Vec<StockItem>> {
        self.storage.stock.get_all()
    }

    /// Items at or below their minimum level
    pub fn low_stock(&self) -> FluxoResult<Vec<StockItem>> {
        Ok(self
            .storage
            .stock
            .get_all()?
            .into_iter()
            .filter(|item| item.is_low())
            .collect())
    }

    fn find(&self, name: &str) -> FluxoResult<StockItem> {
        self.storage
            .stock
            .find_by_name(name.trim())?
            .ok_or_else(|| FluxoError::stock_item_not_found(name.trim()))
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

    #[test]
    fn test_add_and_list() {
        let (_temp_dir, storage) = create_test_storage();
        let service = StockService::new(&storage);

        service.add_item("Flour 5kg", "un", 10, 3).unwrap();
        service.add_item("Sugar", "kg", 5, 2).unwrap();

        let items = service.list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Flour 5kg");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = StockService::new(&storage);

        service.add_item("Flour", "kg", 10, 3).unwrap();
        let result = service.add_item("flour", "kg", 4, 1);
        assert!(matches!(result, Err(FluxoError::Validation(_))));
    }

    #[test]
    fn test_receive_and_consume() {
        let (_temp_dir, storage) = create_test_storage();
        let service = StockService::new(&storage);

        service.add_item("Napkins", "box", 5, 2).unwrap();
        assert_eq!(service.receive("Napkins", 7).unwrap().quantity, 12);
        assert_eq!(service.consume("Napkins", 4).unwrap().quantity, 8);
    }

    #[test]
    fn test_consume_more_than_available() {
        let (_temp_dir, storage) = create_test_storage();
        let service = StockService::new(&storage);

        service.add_item("Sugar", "kg", 3, 1).unwrap();
        let err = service.consume("Sugar", 9).unwrap_err();
        assert!(matches!(err, FluxoError::InsufficientStock { .. }));
        // Quantity unchanged after the rejected adjustment
        assert_eq!(service.list().unwrap()[0].quantity, 3);
    }

    #[test]
    fn test_unknown_item() {
        let (_temp_dir, storage) = create_test_storage();
        let service = StockService::new(&storage);

        assert!(service.receive("Ghost", 1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_low_stock_listing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = StockService::new(&storage);

        service.add_item("Flour", "kg", 10, 3).unwrap();
        service.add_item("Sugar", "kg", 2, 2).unwrap();

        let low = service.low_stock().unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Sugar");
    }
}
