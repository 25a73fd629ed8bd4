//! Business logic layer for fluxo

pub mod entry;
pub mod projection;
pub mod schedule;
pub mod stock;

pub use entry::{CreateHouseholdEntryInput, CreateStoreTransactionInput, EntryService};
pub use projection::ProjectionService;
pub use schedule::ScheduleService;
pub use stock::StockService;
