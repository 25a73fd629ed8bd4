//! fluxo - cash flow control for a small store and its household
//!
//! Fluxo keeps two sets of books side by side: store sales and purchases,
//! and household income and expenses. Both feed a single cash projection
//! that answers "how much money will I have, day by day, from today on".
//!
//! # Architecture
//!
//! - `models` - domain types: money, transactions, entries, stock, schedules
//! - `projection` - movement normalization, the daily balance series, caching
//! - `storage` - JSON file persistence with atomic writes
//! - `services` - business logic over storage
//! - `reports` - terminal and CSV report generation
//! - `config` - paths and user settings
//! - `cli` - clap command handlers

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod projection;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FluxoError, FluxoResult};
