//! Aggregation stages: per-patient, per-month and categorical folds over the
//! normalized session list. Each stage is a pure function of its input plus,
//! where time matters, an explicit `today` anchor — nothing here reads the
//! system clock.

pub mod categorical;
pub mod patients;
pub mod temporal;

use chrono::{Datelike, Months, NaiveDate};

/// Same day N calendar months back, day clamped to the target month's length
/// (30-abr − 2 months → 28-feb).
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
