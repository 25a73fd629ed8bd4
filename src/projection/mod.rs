//! The projection core: aggregation and cash projection
//!
//! Two cooperating pieces. The aggregator merges store transactions and
//! household entries into one canonical movement list; the builder folds
//! that list into a time-ordered cumulative balance series starting from a
//! computed opening balance. Both are pure transforms over immutable
//! snapshots with an injected "today".

pub mod aggregator;
pub mod builder;
pub mod cache;

pub use aggregator::{forward_movements, movement_from_household, movement_from_store, normalize_all};
pub use builder::{
    CashProjection, EmptySeriesPolicy, ProjectionOptions, RealCash, MAX_HORIZON_DAYS,
};
pub use cache::{Clock, SystemClock, TtlCache};
