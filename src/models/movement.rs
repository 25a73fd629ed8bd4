//! Canonical cash movement types
//!
//! `Movement` is the normalized form every source record reduces to before
//! projection: one calendar day, one signed amount, one realized flag.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A single dated, signed cash effect derived from a source record
///
/// The date is always a calendar day; positive amounts are inflows and
/// negative amounts are outflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Canonical calendar day of the movement
    pub date: NaiveDate,

    /// Signed amount (positive inflow, negative outflow)
    pub amount: Money,

    /// True when the underlying record is paid/realized
    pub realized: bool,
}

impl Movement {
    pub fn new(date: NaiveDate, amount: Money, realized: bool) -> Self {
        Self {
            date,
            amount,
            realized,
        }
    }

    /// The inflow portion of this movement (zero for outflows)
    pub fn inflow(&self) -> Money {
        if self.amount.is_positive() {
            self.amount
        } else {
            Money::zero()
        }
    }

    /// The outflow portion of this movement as a positive magnitude
    /// (zero for inflows)
    pub fn outflow(&self) -> Money {
        if self.amount.is_negative() {
            self.amount.abs()
        } else {
            Money::zero()
        }
    }
}

/// Inflow/outflow totals for a single day, used for the at-a-glance
/// "today" summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayTotals {
    /// Sum of positive movements (always >= 0)
    pub inflows: Money,

    /// Sum of negative movements as a positive magnitude (always >= 0)
    pub outflows: Money,
}

impl DayTotals {
    /// Net flow for the day (inflows - outflows)
    pub fn net(&self) -> Money {
        self.inflows - self.outflows
    }

    /// Fold a movement's signed amount into the totals
    pub fn absorb(&mut self, movement: &Movement) {
        self.inflows += movement.inflow();
        self.outflows += movement.outflow();
    }
}

/// One row of the projection series: a calendar day with its flow totals
/// and running cumulative balance
///
/// Invariant: `cumulative(d) = cumulative(d-1) + inflows(d) - outflows(d)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBalance {
    /// The calendar day
    pub date: NaiveDate,

    /// Inflow total for the day (>= 0)
    pub inflows: Money,

    /// Outflow total for the day (>= 0)
    pub outflows: Money,

    /// Cumulative balance at end of day
    pub cumulative: Money,
}

impl DayBalance {
    /// Net flow for the day
    pub fn net(&self) -> Money {
        self.inflows - self.outflows
    }
}
