use chrono::NaiveDate;

use super::Step;
use crate::models::recurrence::WeekdaySet;
use crate::utils::date::{add_days, add_weeks, start_of_week};

/// Selected weekdays of every `interval`th calendar week, starting with the
/// Sunday-first week that contains the anchor. Days earlier in the anchor's
/// week are still produced here; the caller drops anything before the anchor.
#[derive(Debug, Clone)]
pub(super) struct WeeklySteps {
    week_start: Option<NaiveDate>,
    days: WeekdaySet,
    interval: u32,
    next_day: u8,
}

impl WeeklySteps {
    pub(super) fn new(anchor: NaiveDate, interval: u32, days: WeekdaySet) -> Self {
        Self {
            week_start: Some(start_of_week(anchor)),
            days,
            interval,
            next_day: 0,
        }
    }
}

impl Iterator for WeeklySteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.days.is_empty() {
            return None;
        }

        loop {
            let week_start = self.week_start?;

            while self.next_day < 7 {
                let day = self.next_day;
                self.next_day += 1;

                if self.days.contains(day) {
                    let Some(date) = add_days(week_start, i64::from(day)) else {
                        self.week_start = None;
                        return None;
                    };
                    return Some(Step::Hit(date));
                }
            }

            self.next_day = 0;
            self.week_start = add_weeks(week_start, i64::from(self.interval));
        }
    }
}
