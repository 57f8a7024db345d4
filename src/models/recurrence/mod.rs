//! Recurrence rule model.
//!
//! [`RecurrenceRule`] is the flat shape the event editor saves: it keeps
//! every field so switching the repeat type back and forth never loses what
//! the user typed. Before expansion a rule is resolved against its anchor
//! date into a [`Recurrence`], where each pattern carries only the data it
//! uses.

mod error;

pub use error::RecurrenceError;

use crate::utils::date::{day_of_week, weekday_from_index};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often an event repeats, as chosen in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    #[default]
    None,
    Daily,
    /// Monday through Friday only
    Weekdays,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

/// When a recurring event stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndType {
    #[default]
    Never,
    Date,
    Count,
}

/// Editor-facing recurrence rule, stored alongside its event.
///
/// Serialized with the editor's camelCase keys (`daysOfWeek`, `endType`, ...).
/// The snake_case spellings are accepted on input so hand-written agenda
/// files can use either. Unknown keys are rejected rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RecurrenceRule {
    #[serde(rename = "type")]
    pub kind: RecurrenceType,
    pub interval: u32,
    /// Weekly selection, Sunday=0. Empty means the anchor's own weekday.
    #[serde(alias = "days_of_week")]
    pub days_of_week: Vec<u8>,
    /// Monthly ordinal, 1-5.
    #[serde(alias = "week_of_month")]
    pub week_of_month: Option<u8>,
    /// Monthly weekday, Sunday=0.
    #[serde(alias = "day_of_week")]
    pub day_of_week: Option<u8>,
    #[serde(alias = "end_type")]
    pub end_type: EndType,
    /// Inclusive.
    #[serde(alias = "end_date")]
    pub end_date: Option<NaiveDate>,
    /// Counts occurrences from the first one, independent of any view.
    #[serde(alias = "end_count")]
    pub end_count: Option<u32>,
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self {
            kind: RecurrenceType::None,
            interval: 1,
            days_of_week: Vec::new(),
            week_of_month: None,
            day_of_week: None,
            end_type: EndType::Never,
            end_date: None,
            end_count: None,
        }
    }
}

impl RecurrenceRule {
    /// A rule that repeats with the given type every `interval` periods and
    /// never ends.
    pub fn new(kind: RecurrenceType, interval: u32) -> Self {
        Self {
            kind,
            interval,
            ..Self::default()
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn daily(interval: u32) -> Self {
        Self::new(RecurrenceType::Daily, interval)
    }

    pub fn weekdays() -> Self {
        Self::new(RecurrenceType::Weekdays, 1)
    }

    pub fn weekly(interval: u32, days_of_week: impl Into<Vec<u8>>) -> Self {
        Self {
            days_of_week: days_of_week.into(),
            ..Self::new(RecurrenceType::Weekly, interval)
        }
    }

    pub fn biweekly(days_of_week: impl Into<Vec<u8>>) -> Self {
        Self {
            days_of_week: days_of_week.into(),
            ..Self::new(RecurrenceType::Biweekly, 2)
        }
    }

    /// "The `week_of_month`th `day_of_week` of every `interval` months".
    pub fn monthly(interval: u32, week_of_month: u8, day_of_week: u8) -> Self {
        Self {
            week_of_month: Some(week_of_month),
            day_of_week: Some(day_of_week),
            ..Self::new(RecurrenceType::Monthly, interval)
        }
    }

    pub fn yearly(interval: u32) -> Self {
        Self::new(RecurrenceType::Yearly, interval)
    }

    /// Stop after the given date (inclusive).
    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_type = EndType::Date;
        self.end_date = Some(end_date);
        self
    }

    /// Stop after `count` occurrences.
    pub fn times(mut self, count: u32) -> Self {
        self.end_type = EndType::Count;
        self.end_count = Some(count);
        self
    }

    pub fn is_none(&self) -> bool {
        self.kind == RecurrenceType::None
    }

    /// Copy of the rule with the monthly selector filled in from `anchor`
    /// where the editor left it blank, exactly as [`resolve`](Self::resolve)
    /// would fill it. Other types are returned unchanged.
    pub fn with_anchor_defaults(&self, anchor: NaiveDate) -> Self {
        let mut rule = self.clone();
        if rule.kind == RecurrenceType::Monthly {
            rule.week_of_month.get_or_insert(week_of_month_of(anchor));
            rule.day_of_week.get_or_insert(day_of_week(anchor));
        }
        rule
    }

    /// Validate the fields the active type uses and build the typed form.
    ///
    /// `none` short-circuits to a single occurrence without looking at any
    /// other field. Fields that belong to other types are ignored, not
    /// rejected.
    pub fn resolve(&self, anchor: NaiveDate) -> Result<Recurrence, RecurrenceError> {
        if self.is_none() {
            return Ok(Recurrence::once());
        }

        let pattern = self.resolve_pattern(anchor)?;
        let end = self.resolve_end(anchor)?;
        Ok(Recurrence { pattern, end })
    }

    fn resolve_pattern(&self, anchor: NaiveDate) -> Result<RecurrencePattern, RecurrenceError> {
        let interval = || {
            if self.interval == 0 {
                Err(RecurrenceError::ZeroInterval)
            } else {
                Ok(self.interval)
            }
        };

        let pattern = match self.kind {
            RecurrenceType::None => RecurrencePattern::Once,
            RecurrenceType::Daily => RecurrencePattern::Daily {
                interval: interval()?,
            },
            RecurrenceType::Weekdays => RecurrencePattern::Weekdays,
            RecurrenceType::Weekly | RecurrenceType::Biweekly => {
                let interval = if self.kind == RecurrenceType::Biweekly {
                    2
                } else {
                    interval()?
                };
                let mut days = WeekdaySet::from_days(&self.days_of_week)?;
                if days.is_empty() {
                    days.insert(day_of_week(anchor));
                }
                RecurrencePattern::Weekly { interval, days }
            }
            RecurrenceType::Monthly => {
                let weekday = match self.day_of_week {
                    Some(day) if weekday_from_index(day).is_none() => {
                        return Err(RecurrenceError::DayOfWeekOutOfRange(day));
                    }
                    Some(day) => day,
                    None => day_of_week(anchor),
                };
                let week_of_month = match self.week_of_month {
                    Some(week) if !(1..=5).contains(&week) => {
                        return Err(RecurrenceError::WeekOfMonthOutOfRange(week));
                    }
                    Some(week) => week,
                    None => week_of_month_of(anchor),
                };
                RecurrencePattern::Monthly {
                    interval: interval()?,
                    week_of_month,
                    weekday,
                }
            }
            RecurrenceType::Yearly => RecurrencePattern::Yearly {
                interval: interval()?,
            },
        };

        Ok(pattern)
    }

    fn resolve_end(&self, anchor: NaiveDate) -> Result<RecurrenceEnd, RecurrenceError> {
        match self.end_type {
            EndType::Never => Ok(RecurrenceEnd::Never),
            EndType::Date => {
                let end = self.end_date.ok_or(RecurrenceError::MissingEndDate)?;
                if end < anchor {
                    return Err(RecurrenceError::EndDateBeforeStart { start: anchor, end });
                }
                Ok(RecurrenceEnd::Until(end))
            }
            EndType::Count => match self.end_count {
                None => Err(RecurrenceError::MissingEndCount),
                Some(0) => Err(RecurrenceError::ZeroEndCount),
                Some(count) => Ok(RecurrenceEnd::Count(count)),
            },
        }
    }
}

/// Which occurrence of its weekday `date` is within its month, 1-5.
fn week_of_month_of(date: NaiveDate) -> u8 {
    date.day().div_ceil(7) as u8
}

/// A set of weekdays, Sunday=0 through Saturday=6.
///
/// Iteration is always in ascending weekday order, whatever order the days
/// were inserted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn from_days(days: &[u8]) -> Result<Self, RecurrenceError> {
        let mut set = Self::default();
        for &day in days {
            if day > 6 {
                return Err(RecurrenceError::InvalidWeekday(day));
            }
            set.insert(day);
        }
        Ok(set)
    }

    /// Inserts a Sunday=0 weekday; out-of-range values are ignored.
    pub fn insert(&mut self, day: u8) {
        if day <= 6 {
            self.0 |= 1 << day;
        }
    }

    pub fn contains(&self, day: u8) -> bool {
        day <= 6 && self.0 & (1 << day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..7u8).filter(move |day| self.contains(*day))
    }
}

/// Repeat pattern of a resolved rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrencePattern {
    /// Does not repeat.
    Once,
    Daily { interval: u32 },
    Weekdays,
    /// Biweekly rules resolve to `interval: 2`.
    Weekly { interval: u32, days: WeekdaySet },
    /// The `week_of_month`th `weekday` (Sunday=0), every `interval` months.
    Monthly {
        interval: u32,
        week_of_month: u8,
        weekday: u8,
    },
    Yearly { interval: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceEnd {
    Never,
    /// Last permitted occurrence date, inclusive.
    Until(NaiveDate),
    /// Total occurrences counted from the first.
    Count(u32),
}

/// A validated recurrence, ready for expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub pattern: RecurrencePattern,
    pub end: RecurrenceEnd,
}

impl Recurrence {
    pub fn once() -> Self {
        Self {
            pattern: RecurrencePattern::Once,
            end: RecurrenceEnd::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_rule_is_none() {
        let rule = RecurrenceRule::default();
        assert!(rule.is_none());
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.end_type, EndType::Never);
    }

    #[test]
    fn test_none_ignores_other_fields() {
        let rule = RecurrenceRule {
            kind: RecurrenceType::None,
            interval: 0,
            day_of_week: Some(42),
            end_type: EndType::Date,
            ..RecurrenceRule::default()
        };

        assert_eq!(rule.resolve(date(2025, 1, 6)), Ok(Recurrence::once()));
    }

    #[test]
    fn test_biweekly_resolves_to_weekly_interval_two() {
        let recurrence = RecurrenceRule::biweekly(vec![2, 4])
            .resolve(date(2025, 1, 7))
            .unwrap();

        match recurrence.pattern {
            RecurrencePattern::Weekly { interval, days } => {
                assert_eq!(interval, 2);
                assert_eq!(days.iter().collect::<Vec<_>>(), vec![2, 4]);
            }
            other => panic!("unexpected pattern {other:?}"),
        }
    }

    #[test]
    fn test_weekly_empty_days_uses_anchor_weekday() {
        let recurrence = RecurrenceRule::weekly(1, Vec::new())
            .resolve(date(2025, 1, 8))
            .unwrap();

        match recurrence.pattern {
            RecurrencePattern::Weekly { days, .. } => {
                assert_eq!(days.iter().collect::<Vec<_>>(), vec![3]);
            }
            other => panic!("unexpected pattern {other:?}"),
        }
    }

    #[test]
    fn test_weekly_invalid_day() {
        let result = RecurrenceRule::weekly(1, vec![1, 7]).resolve(date(2025, 1, 6));
        assert_eq!(result, Err(RecurrenceError::InvalidWeekday(7)));
    }

    #[test]
    fn test_monthly_out_of_range_fields() {
        let anchor = date(2025, 1, 15);
        assert_eq!(
            RecurrenceRule::monthly(1, 2, 7).resolve(anchor),
            Err(RecurrenceError::DayOfWeekOutOfRange(7))
        );
        assert_eq!(
            RecurrenceRule::monthly(1, 0, 3).resolve(anchor),
            Err(RecurrenceError::WeekOfMonthOutOfRange(0))
        );
        assert_eq!(
            RecurrenceRule::monthly(1, 6, 3).resolve(anchor),
            Err(RecurrenceError::WeekOfMonthOutOfRange(6))
        );
    }

    #[test]
    fn test_monthly_defaults_from_anchor() {
        let rule = RecurrenceRule::new(RecurrenceType::Monthly, 1);
        // Jan 15 2025 is the 3rd Wednesday
        let recurrence = rule.resolve(date(2025, 1, 15)).unwrap();
        assert_eq!(
            recurrence.pattern,
            RecurrencePattern::Monthly {
                interval: 1,
                week_of_month: 3,
                weekday: 3
            }
        );
    }

    #[test]
    fn test_monthly_fields_ignored_for_other_types() {
        let rule = RecurrenceRule {
            week_of_month: Some(9),
            day_of_week: Some(9),
            ..RecurrenceRule::daily(2)
        };
        assert!(rule.resolve(date(2025, 1, 1)).is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = RecurrenceRule::daily(0).resolve(date(2025, 1, 1));
        assert_eq!(result, Err(RecurrenceError::ZeroInterval));
    }

    #[test]
    fn test_weekdays_ignores_interval() {
        let rule = RecurrenceRule {
            interval: 0,
            ..RecurrenceRule::weekdays()
        };
        let recurrence = rule.resolve(date(2025, 1, 1)).unwrap();
        assert_eq!(recurrence.pattern, RecurrencePattern::Weekdays);
    }

    #[test]
    fn test_end_conditions() {
        let anchor = date(2025, 1, 6);

        let missing_date = RecurrenceRule {
            end_type: EndType::Date,
            ..RecurrenceRule::daily(1)
        };
        assert_eq!(missing_date.resolve(anchor), Err(RecurrenceError::MissingEndDate));

        let missing_count = RecurrenceRule {
            end_type: EndType::Count,
            ..RecurrenceRule::daily(1)
        };
        assert_eq!(missing_count.resolve(anchor), Err(RecurrenceError::MissingEndCount));

        assert_eq!(
            RecurrenceRule::daily(1).times(0).resolve(anchor),
            Err(RecurrenceError::ZeroEndCount)
        );

        assert_eq!(
            RecurrenceRule::daily(1).until(date(2025, 1, 5)).resolve(anchor),
            Err(RecurrenceError::EndDateBeforeStart {
                start: anchor,
                end: date(2025, 1, 5)
            })
        );

        let until = RecurrenceRule::daily(1).until(anchor).resolve(anchor).unwrap();
        assert_eq!(until.end, RecurrenceEnd::Until(anchor));
    }

    #[test]
    fn test_anchor_defaults_fill_monthly_selector() {
        // Wednesday Jan 15 is the 3rd Wednesday
        let anchor = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let filled = RecurrenceRule::new(RecurrenceType::Monthly, 1).with_anchor_defaults(anchor);

        assert_eq!(filled, RecurrenceRule::monthly(1, 3, 3));
        assert_eq!(
            filled.resolve(anchor).unwrap(),
            RecurrenceRule::new(RecurrenceType::Monthly, 1).resolve(anchor).unwrap()
        );

        let chosen = RecurrenceRule::monthly(1, 2, 2);
        assert_eq!(chosen.with_anchor_defaults(anchor), chosen);

        let weekly = RecurrenceRule::weekly(1, Vec::new());
        assert_eq!(weekly.with_anchor_defaults(anchor), weekly);
    }

    #[test]
    fn test_weekday_set_ordering_and_duplicates() {
        let set = WeekdaySet::from_days(&[5, 1, 3, 1]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert!(set.contains(3));
        assert!(!set.contains(0));
        assert!(!set.contains(9));
    }

    #[test]
    fn test_rule_deserializes_from_editor_json() {
        let json = r#"{"type":"weekly","interval":1,"daysOfWeek":[1,3,5],"endType":"count","endCount":4}"#;

        let rule: RecurrenceRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule, RecurrenceRule::weekly(1, vec![1, 3, 5]).times(4));
    }

    #[test]
    fn test_rule_deserializes_monthly_editor_json() {
        let json = r#"{
            "type": "monthly",
            "interval": 2,
            "weekOfMonth": 2,
            "dayOfWeek": 2,
            "endType": "date",
            "endDate": "2025-12-31"
        }"#;

        let rule: RecurrenceRule = serde_json::from_str(json).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(rule, RecurrenceRule::monthly(2, 2, 2).until(end));
    }

    #[test]
    fn test_rule_accepts_snake_case_keys() {
        let json = r#"{"type":"weekly","days_of_week":[1,3,5],"end_type":"count","end_count":4}"#;

        let rule: RecurrenceRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule, RecurrenceRule::weekly(1, vec![1, 3, 5]).times(4));
    }

    #[test]
    fn test_rule_serializes_editor_keys() {
        let value = serde_json::to_value(RecurrenceRule::weekly(1, vec![1]).times(2)).unwrap();

        assert_eq!(value["type"], "weekly");
        assert_eq!(value["daysOfWeek"], serde_json::json!([1]));
        assert_eq!(value["endType"], "count");
        assert_eq!(value["endCount"], 2);
    }

    #[test]
    fn test_rule_rejects_unknown_keys() {
        let json = r#"{"type":"weekly","daysOfWeeks":[1,3,5]}"#;
        let err = serde_json::from_str::<RecurrenceRule>(json).unwrap_err();
        assert!(err.to_string().contains("daysOfWeeks"));
    }
}
