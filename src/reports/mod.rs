//! Report generation for fluxo

pub mod cash_flow;
pub mod stock_levels;

pub use cash_flow::{CashFlowReport, SeriesFilter};
pub use stock_levels::StockLevelsReport;
