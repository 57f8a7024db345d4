use chrono::NaiveDate;

use super::Step;
use crate::utils::date::add_years;

/// The anchor's month and day every `interval` years. Each step is computed
/// from the anchor itself, so Feb 29 clamps to Feb 28 in common years and
/// comes back in leap years.
#[derive(Debug, Clone)]
pub(super) struct YearlySteps {
    anchor: NaiveDate,
    years_ahead: Option<i64>,
    interval: u32,
}

impl YearlySteps {
    pub(super) fn new(anchor: NaiveDate, interval: u32) -> Self {
        Self {
            anchor,
            years_ahead: Some(0),
            interval,
        }
    }
}

impl Iterator for YearlySteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let years_ahead = self.years_ahead.take()?;
        let date = add_years(self.anchor, years_ahead)?;
        self.years_ahead = years_ahead.checked_add(i64::from(self.interval));
        Some(Step::Hit(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_day_clamps_and_recovers() {
        let steps: Vec<_> = YearlySteps::new(date(2024, 2, 29), 1).take(5).collect();
        assert_eq!(
            steps,
            vec![
                Step::Hit(date(2024, 2, 29)),
                Step::Hit(date(2025, 2, 28)),
                Step::Hit(date(2026, 2, 28)),
                Step::Hit(date(2027, 2, 28)),
                Step::Hit(date(2028, 2, 29)),
            ]
        );
    }

    #[test]
    fn test_interval() {
        let steps: Vec<_> = YearlySteps::new(date(2025, 7, 4), 2).take(2).collect();
        assert_eq!(steps, vec![Step::Hit(date(2025, 7, 4)), Step::Hit(date(2027, 7, 4))]);
    }
}
