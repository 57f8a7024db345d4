use chrono::NaiveDate;

use super::Step;
use crate::utils::date::{add_days, is_weekend};

/// Every `interval` days from the anchor.
#[derive(Debug, Clone)]
pub(super) struct DailySteps {
    next: Option<NaiveDate>,
    interval: u32,
}

impl DailySteps {
    pub(super) fn new(anchor: NaiveDate, interval: u32) -> Self {
        Self {
            next: Some(anchor),
            interval,
        }
    }
}

impl Iterator for DailySteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let current = self.next.take()?;
        self.next = add_days(current, i64::from(self.interval));
        Some(Step::Hit(current))
    }
}

/// Every Monday to Friday from the anchor on. Interval has no effect.
#[derive(Debug, Clone)]
pub(super) struct WeekdaySteps {
    next: Option<NaiveDate>,
}

impl WeekdaySteps {
    pub(super) fn new(anchor: NaiveDate) -> Self {
        Self { next: Some(anchor) }
    }
}

impl Iterator for WeekdaySteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let mut current = self.next.take()?;
        while is_weekend(current) {
            current = add_days(current, 1)?;
        }
        self.next = add_days(current, 1);
        Some(Step::Hit(current))
    }
}
