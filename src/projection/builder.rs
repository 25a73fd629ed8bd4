//! Cash projection builder
//!
//! Folds the aggregator's movement list into the realized cash position and
//! a forward daily balance series. Pure and stateless: "today" is an
//! injected date and the whole projection is recomputed from snapshots on
//! every call.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{DayBalance, DayTotals, HouseholdEntry, Money, StoreTransaction};

use super::aggregator::{movement_from_household, movement_from_store};

/// Upper bound on the horizon, in days (ten years). Larger values are
/// capped here and rejected at the CLI boundary.
pub const MAX_HORIZON_DAYS: u32 = 3650;

/// What to emit when there are no forward movements at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EmptySeriesPolicy {
    /// No rows; callers show an empty state
    #[default]
    Empty,
    /// A single row at "today" carrying the opening balance
    OpeningPoint,
}

/// Options controlling series generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionOptions {
    /// Minimum number of days after "today" the series covers, even when no
    /// movement extends that far
    pub horizon_days: u32,

    /// Behavior when the forward movement list is empty
    pub empty_series: EmptySeriesPolicy,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            empty_series: EmptySeriesPolicy::default(),
        }
    }
}

impl ProjectionOptions {
    /// Options with a specific horizon
    pub fn with_horizon(horizon_days: u32) -> Self {
        Self {
            horizon_days,
            ..Self::default()
        }
    }
}

/// Realized cash totals, split by domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RealCash {
    /// All-time realized total on the store side
    pub store: Money,
    /// All-time realized total on the household side
    pub household: Money,
}

impl RealCash {
    /// Combined realized total across both domains
    pub fn combined(&self) -> Money {
        self.store + self.household
    }
}

/// The full projection: realized position plus forward daily series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashProjection {
    /// The reference day the projection was computed for
    pub today: NaiveDate,

    /// All-time realized cash per domain
    pub real_cash: RealCash,

    /// Cumulative realized balance up to and including yesterday; the
    /// starting point of the series
    pub opening_balance: Money,

    /// Inflow/outflow totals for the current day, exposed separately for
    /// at-a-glance display
    pub today_totals: DayTotals,

    /// One row per calendar day from "today" to the series end
    pub series: Vec<DayBalance>,
}

impl CashProjection {
    /// Compute the projection from snapshots of both source collections
    pub fn compute(
        store: &[StoreTransaction],
        household: &[HouseholdEntry],
        today: NaiveDate,
        options: ProjectionOptions,
    ) -> Self {
        let store_movements: Vec<_> = store.iter().filter_map(movement_from_store).collect();
        let household_movements: Vec<_> = household
            .iter()
            .filter_map(movement_from_household)
            .collect();

        let real_cash = RealCash {
            store: store_movements
                .iter()
                .filter(|m| m.realized)
                .map(|m| m.amount)
                .sum(),
            household: household_movements
                .iter()
                .filter(|m| m.realized)
                .map(|m| m.amount)
                .sum(),
        };

        let all = store_movements.iter().chain(household_movements.iter());

        // Realized strictly before today carries into the first projected day
        let opening_balance: Money = all
            .clone()
            .filter(|m| m.realized && m.date < today)
            .map(|m| m.amount)
            .sum();

        // Group the forward list by calendar day
        let mut by_day: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
        for movement in all.filter(|m| m.date >= today) {
            by_day.entry(movement.date).or_default().absorb(movement);
        }

        let today_totals = by_day.get(&today).copied().unwrap_or_default();

        let series = match by_day.keys().next_back().copied() {
            None => match options.empty_series {
                EmptySeriesPolicy::Empty => Vec::new(),
                EmptySeriesPolicy::OpeningPoint => vec![DayBalance {
                    date: today,
                    inflows: Money::zero(),
                    outflows: Money::zero(),
                    cumulative: opening_balance,
                }],
            },
            Some(last_movement_day) => {
                let horizon = Duration::days(options.horizon_days.min(MAX_HORIZON_DAYS) as i64);
                let end = match today.checked_add_signed(horizon) {
                    Some(horizon_end) => last_movement_day.max(horizon_end),
                    None => last_movement_day,
                };

                let mut series = Vec::new();
                let mut cumulative = opening_balance;
                let mut day = today;
                while day <= end {
                    let totals = by_day.get(&day).copied().unwrap_or_default();
                    cumulative += totals.net();
                    series.push(DayBalance {
                        date: day,
                        inflows: totals.inflows,
                        outflows: totals.outflows,
                        cumulative,
                    });
                    day += Duration::days(1);
                }
                series
            }
        };

        Self {
            today,
            real_cash,
            opening_balance,
            today_totals,
            series,
        }
    }

    /// The series restricted to the next `days` days from "today"
    ///
    /// A post-filter on the generated rows; cumulative values are unchanged.
    pub fn window(&self, days: u32) -> Vec<DayBalance> {
        // A window past the calendar's end restricts nothing
        let end = match self.today.checked_add_signed(Duration::days(days as i64)) {
            Some(end) => end,
            None => return self.series.clone(),
        };
        self.series
            .iter()
            .filter(|d| d.date < end)
            .copied()
            .collect()
    }

    /// The series restricted to one calendar month
    ///
    /// Cumulative values are not re-based at the month start.
    pub fn month(&self, year: i32, month: u32) -> Vec<DayBalance> {
        self.series
            .iter()
            .filter(|d| d.date.year() == year && d.date.month() == month)
            .copied()
            .collect()
    }
}
