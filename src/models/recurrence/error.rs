use chrono::NaiveDate;
use thiserror::Error;

/// A recurrence rule, event, or display window that the generator refuses
/// to expand. These are contract violations to surface to the editing form,
/// never conditions to paper over with an empty calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("Recurrence interval must be at least 1")]
    ZeroInterval,

    #[error("Day of week {0} is out of range (expected 0-6, Sunday=0)")]
    InvalidWeekday(u8),

    #[error("Monthly day of week {0} is out of range (expected 0-6, Sunday=0)")]
    DayOfWeekOutOfRange(u8),

    #[error("Monthly week of month {0} is out of range (expected 1-5)")]
    WeekOfMonthOutOfRange(u8),

    #[error("Recurrence ends on a date but no end date was given")]
    MissingEndDate,

    #[error("Recurrence ends after a count but no count was given")]
    MissingEndCount,

    #[error("Recurrence end count must be at least 1")]
    ZeroEndCount,

    #[error("Recurrence end date {end} is before the event start {start}")]
    EndDateBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("Event ends on {end}, before it starts on {start}")]
    EventEndsBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("Display window ends on {end}, before it starts on {start}")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },
}
