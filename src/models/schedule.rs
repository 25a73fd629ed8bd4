//! Installment and recurrence date generation
//!
//! Pure date arithmetic shared by the scheduling service: monthly parcel
//! dates with end-of-month clamping, parcel amount splitting, and simple
//! weekly/monthly recurrences.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Number of days in the month containing (year, month)
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(next_year, 1, 1).unwrap());
    (first_of_next - Duration::days(1)).day()
}

/// Add `months` calendar months to a date, clamping the day to the target
/// month's length (Jan 31 + 1 month = Feb 28/29)
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month() as i32 - 1 + months as i32;
    let year = zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u32;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).unwrap())
}

/// Due dates for `count` monthly parcels starting at `first_due`
///
/// The day-of-month of the first parcel is preserved where the target month
/// allows it: parcels due on the 31st fall back to the month's last day and
/// return to the 31st in longer months.
pub fn installment_dates(first_due: NaiveDate, count: u32) -> Vec<NaiveDate> {
    (0..count).map(|i| add_months(first_due, i)).collect()
}

/// Split a total into `count` parcel amounts that sum exactly to the total
///
/// The remainder cents after even division land on the first parcel.
pub fn split_total(total: Money, count: u32) -> Vec<Money> {
    if count == 0 {
        return Vec::new();
    }
    let count = count as i64;
    let base = total.cents() / count;
    let remainder = total.cents() - base * count;

    (0..count)
        .map(|i| {
            if i == 0 {
                Money::from_cents(base + remainder)
            } else {
                Money::from_cents(base)
            }
        })
        .collect()
}

/// Repeat cadence for recurring entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Weekly,
    Monthly,
}

impl Recurrence {
    /// The first `count` occurrence dates starting at `start` (inclusive)
    pub fn occurrences(&self, start: NaiveDate, count: u32) -> Vec<NaiveDate> {
        match self {
            Self::Weekly => (0..count)
                .map(|i| start + Duration::weeks(i as i64))
                .collect(),
            Self::Monthly => (0..count).map(|i| add_months(start, i)).collect(),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
        }
    }
}
