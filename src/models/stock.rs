//! Stock item model
//!
//! Tracks quantities on hand with a minimum level for low-stock alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::StockItemId;

/// An item tracked in stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    /// Unique identifier
    pub id: StockItemId,

    /// Item name ("Flour 5kg")
    pub name: String,

    /// Unit of measure ("kg", "un", "box")
    #[serde(default)]
    pub unit: String,

    /// Quantity on hand; never negative
    pub quantity: i64,

    /// Minimum level before the item counts as low stock
    #[serde(default)]
    pub minimum: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    /// Create a new stock item
    pub fn new(name: impl Into<String>, unit: impl Into<String>, quantity: i64, minimum: i64) -> Self {
        let now = Utc::now();
        Self {
            id: StockItemId::new(),
            name: name.into(),
            unit: unit.into(),
            quantity,
            minimum,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the item is at or below its minimum level
    pub fn is_low(&self) -> bool {
        self.quantity <= self.minimum
    }

    /// Record an inbound quantity
    pub fn receive(&mut self, quantity: i64) {
        self.quantity += quantity;
        self.updated_at = Utc::now();
    }

    /// Record an outbound quantity; fails rather than going negative
    pub fn consume(&mut self, quantity: i64) -> Result<(), StockAdjustError> {
        if quantity > self.quantity {
            return Err(StockAdjustError::InsufficientQuantity {
                requested: quantity,
                available: self.quantity,
            });
        }
        self.quantity -= quantity;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl fmt::Display for StockItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.quantity, self.unit)
    }
}

/// Errors from stock adjustments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockAdjustError {
    InsufficientQuantity { requested: i64, available: i64 },
}

impl fmt::Display for StockAdjustError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientQuantity {
                requested,
                available,
            } => write!(
                f,
                "Cannot remove {} units, only {} available",
                requested, available
            ),
        }
    }
}

impl std::error::Error for StockAdjustError {}
