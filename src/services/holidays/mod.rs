//! US federal holidays as all-day calendar events.
//!
//! Holidays are generated per year rather than stored as yearly rules
//! because several of them float (3rd Monday, last Monday, 4th Thursday).

use crate::models::event::{CalendarEvent, EventCategory};
use crate::utils::date::{last_weekday_of_month, nth_weekday_of_month};
use chrono::{Datelike, NaiveDate};

const MONDAY: u8 = 1;
const THURSDAY: u8 = 4;

enum Rule {
    Fixed { month: u32, day: u32 },
    Nth { month: u32, weekday: u8, n: u8 },
    Last { month: u32, weekday: u8 },
}

const HOLIDAYS: [(&str, Rule); 11] = [
    ("New Year's Day", Rule::Fixed { month: 1, day: 1 }),
    ("Martin Luther King Jr. Day", Rule::Nth { month: 1, weekday: MONDAY, n: 3 }),
    ("Presidents' Day", Rule::Nth { month: 2, weekday: MONDAY, n: 3 }),
    ("Memorial Day", Rule::Last { month: 5, weekday: MONDAY }),
    ("Juneteenth", Rule::Fixed { month: 6, day: 19 }),
    ("Independence Day", Rule::Fixed { month: 7, day: 4 }),
    ("Labor Day", Rule::Nth { month: 9, weekday: MONDAY, n: 1 }),
    ("Columbus Day", Rule::Nth { month: 10, weekday: MONDAY, n: 2 }),
    ("Veterans Day", Rule::Fixed { month: 11, day: 11 }),
    ("Thanksgiving Day", Rule::Nth { month: 11, weekday: THURSDAY, n: 4 }),
    ("Christmas Day", Rule::Fixed { month: 12, day: 25 }),
];

impl Rule {
    fn date_in(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            Rule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            Rule::Nth { month, weekday, n } => nth_weekday_of_month(year, month, weekday, n),
            Rule::Last { month, weekday } => last_weekday_of_month(year, month, weekday),
        }
    }
}

/// Federal holidays observed in `year`, in calendar order.
pub fn federal_holidays(year: i32) -> Vec<CalendarEvent> {
    HOLIDAYS
        .iter()
        .filter_map(|(name, rule)| rule.date_in(year).map(|date| holiday_event(name, date)))
        .collect()
}

/// Holidays falling inside `start..=end`, covering every year the range
/// touches.
pub fn federal_holidays_between(start: NaiveDate, end: NaiveDate) -> Vec<CalendarEvent> {
    (start.year()..=end.year())
        .flat_map(federal_holidays)
        .filter(|holiday| start <= holiday.start_date && holiday.start_date <= end)
        .collect()
}

fn holiday_event(name: &str, date: NaiveDate) -> CalendarEvent {
    CalendarEvent {
        id: format!("holiday-{}-{}", date.format("%Y-%m-%d"), name.replace(' ', "-")),
        title: name.to_string(),
        start_date: date,
        end_date: date,
        is_all_day: true,
        start_time: None,
        end_time: None,
        color: Some("holiday".to_string()),
        category: EventCategory::Holiday,
        location: None,
        description: None,
        meeting_link: None,
        is_recurring: false,
        recurrence: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn find(holidays: &[CalendarEvent], title: &str) -> NaiveDate {
        holidays
            .iter()
            .find(|holiday| holiday.title == title)
            .map(|holiday| holiday.start_date)
            .unwrap()
    }

    #[test]
    fn test_floating_holidays_2025() {
        let holidays = federal_holidays(2025);

        assert_eq!(holidays.len(), 11);
        assert_eq!(find(&holidays, "Martin Luther King Jr. Day"), date(2025, 1, 20));
        assert_eq!(find(&holidays, "Presidents' Day"), date(2025, 2, 17));
        assert_eq!(find(&holidays, "Memorial Day"), date(2025, 5, 26));
        assert_eq!(find(&holidays, "Labor Day"), date(2025, 9, 1));
        assert_eq!(find(&holidays, "Columbus Day"), date(2025, 10, 13));
        assert_eq!(find(&holidays, "Thanksgiving Day"), date(2025, 11, 27));
    }

    #[test]
    fn test_holiday_event_shape() {
        let holidays = federal_holidays(2026);
        let july_fourth = holidays
            .iter()
            .find(|holiday| holiday.start_date == date(2026, 7, 4))
            .unwrap();

        assert_eq!(july_fourth.id, "holiday-2026-07-04-Independence-Day");
        assert!(july_fourth.is_all_day);
        assert_eq!(july_fourth.category, EventCategory::Holiday);
        assert!(july_fourth.validate().is_ok());
    }

    #[test]
    fn test_holidays_between_spans_years() {
        let holidays = federal_holidays_between(date(2025, 12, 1), date(2026, 1, 31));
        let titles: Vec<_> = holidays.iter().map(|h| h.title.as_str()).collect();

        assert_eq!(
            titles,
            vec!["Christmas Day", "New Year's Day", "Martin Luther King Jr. Day"]
        );
    }
}
