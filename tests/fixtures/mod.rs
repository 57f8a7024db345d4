// Test fixtures - reusable test data
// Provides consistent events and dates across the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use deployment_calendar::models::event::{CalendarEvent, EventCategory};
use deployment_calendar::models::recurrence::RecurrenceRule;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Jan 6 2025
    pub fn first_monday_2025() -> NaiveDate {
        date(2025, 1, 6)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        date(2024, 2, 29)
    }

    /// Dec 31, 2025
    pub fn new_years_eve_2025() -> NaiveDate {
        date(2025, 12, 31)
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn recurring(id: &str, start: NaiveDate, rule: RecurrenceRule) -> CalendarEvent {
        CalendarEvent::builder()
            .id(id)
            .title(format!("Recurring {id}"))
            .start_date(start)
            .recurrence(rule)
            .build()
            .unwrap()
    }

    /// Mon/Wed/Fri check-ins, four in total
    pub fn mwf_checkins() -> CalendarEvent {
        recurring(
            "checkin",
            dates::first_monday_2025(),
            RecurrenceRule::weekly(1, vec![1, 3, 5]).times(4),
        )
    }

    /// Family readiness meeting on the 5th Wednesday, when there is one
    pub fn fifth_wednesday_meeting() -> CalendarEvent {
        CalendarEvent::builder()
            .id("frg")
            .title("FRG meeting")
            .start_date(date(2025, 1, 15))
            .category(EventCategory::Meeting)
            .recurrence(RecurrenceRule::monthly(1, 5, 3))
            .build()
            .unwrap()
    }

    pub fn leap_day_anniversary() -> CalendarEvent {
        recurring(
            "anniversary",
            dates::leap_day_2024(),
            RecurrenceRule::yearly(1).times(3),
        )
    }

    /// Two-day drill every other weekend
    pub fn drill_weekend() -> CalendarEvent {
        CalendarEvent::builder()
            .id("drill")
            .title("Drill weekend")
            .start_date(date(2025, 1, 4))
            .end_date(date(2025, 1, 5))
            .all_day(true)
            .recurrence(RecurrenceRule::biweekly(Vec::new()))
            .build()
            .unwrap()
    }

    pub fn single_appointment() -> CalendarEvent {
        CalendarEvent::new("appt", "Legal appointment", date(2025, 1, 21)).unwrap()
    }
}
