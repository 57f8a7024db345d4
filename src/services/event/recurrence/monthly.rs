use chrono::{Datelike, NaiveDate};

use super::Step;
use crate::utils::date::{add_months, first_of_month, nth_weekday_of_month, WEEKDAY_ABBREVIATIONS};

/// The nth weekday of every `interval`th month, starting with the anchor's
/// month. A month without that ordinal (no 5th Friday, say) produces a
/// [`Step::Miss`] carrying the month's first day rather than a substitute
/// date.
#[derive(Debug, Clone)]
pub(super) struct MonthlySteps {
    first_month: NaiveDate,
    months_ahead: Option<i64>,
    interval: u32,
    week_of_month: u8,
    weekday: u8,
}

impl MonthlySteps {
    pub(super) fn new(anchor: NaiveDate, interval: u32, week_of_month: u8, weekday: u8) -> Self {
        Self {
            first_month: first_of_month(anchor),
            months_ahead: Some(0),
            interval,
            week_of_month,
            weekday,
        }
    }
}

impl Iterator for MonthlySteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let months_ahead = self.months_ahead.take()?;
        let month = add_months(self.first_month, months_ahead)?;
        self.months_ahead = months_ahead.checked_add(i64::from(self.interval));

        match nth_weekday_of_month(month.year(), month.month(), self.weekday, self.week_of_month) {
            Some(date) => Some(Step::Hit(date)),
            None => {
                log::trace!(
                    "{} has no occurrence #{} of {}; skipping month",
                    month.format("%Y-%m"),
                    self.week_of_month,
                    WEEKDAY_ABBREVIATIONS
                        .get(usize::from(self.weekday))
                        .copied()
                        .unwrap_or("?"),
                );
                Some(Step::Miss(month))
            }
        }
    }
}
