// Event module
// Calendar events and the occurrences expanded from them

use crate::models::recurrence::RecurrenceRule;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of calendar entry. Meetings, calls and video sessions also show up
/// in the communication log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    #[default]
    Event,
    Meeting,
    Call,
    Video,
    Reminder,
    Task,
    Holiday,
}

impl EventCategory {
    pub fn is_communication(&self) -> bool {
        matches!(self, Self::Meeting | Self::Call | Self::Video)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Event => "Event",
            Self::Meeting => "Meeting",
            Self::Call => "Call",
            Self::Video => "Video",
            Self::Reminder => "Reminder",
            Self::Task => "Task",
            Self::Holiday => "Holiday",
        };
        f.write_str(label)
    }
}

/// A user-authored calendar event.
///
/// `start_date` anchors any recurrence: it is the first occurrence, and the
/// span from `start_date` to `end_date` is repeated unchanged by every later
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    /// Inclusive; equal to `start_date` for single-day events.
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_all_day: bool,
    /// Ignored for all-day events.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    /// Only consulted when `is_recurring` is set.
    #[serde(default)]
    pub recurrence: RecurrenceRule,
}

impl CalendarEvent {
    /// Create a single-day, non-recurring event.
    ///
    /// # Examples
    /// ```
    /// use deployment_calendar::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    /// let event = CalendarEvent::new("evt-1", "Family call", day).unwrap();
    /// assert_eq!(event.end_date, day);
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, EventValidationError> {
        Self::builder().id(id).title(title).start_date(date).build()
    }

    pub fn builder() -> CalendarEventBuilder {
        CalendarEventBuilder::new()
    }

    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.trim().is_empty() {
            return Err(EventValidationError::MissingId);
        }

        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }

        if self.end_date < self.start_date {
            return Err(EventValidationError::EndBeforeStart);
        }

        Ok(())
    }

    /// Number of days the event spans beyond its first day.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// The rule expansion should follow: the stored rule for recurring
    /// events, a non-repeating rule otherwise.
    pub fn effective_rule(&self) -> RecurrenceRule {
        if self.is_recurring {
            self.recurrence.clone()
        } else {
            RecurrenceRule::none()
        }
    }

    pub fn repeats(&self) -> bool {
        self.is_recurring && !self.recurrence.is_none()
    }
}

/// Validation errors for [`CalendarEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("Event id is required")]
    MissingId,
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event start date is required")]
    MissingStartDate,
    #[error("Event end date must not be before its start date")]
    EndBeforeStart,
}

/// Builder for creating events with optional fields
pub struct CalendarEventBuilder {
    id: Option<String>,
    title: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    is_all_day: bool,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    color: Option<String>,
    category: EventCategory,
    location: Option<String>,
    description: Option<String>,
    meeting_link: Option<String>,
    recurrence: Option<RecurrenceRule>,
}

impl CalendarEventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            start_date: None,
            end_date: None,
            is_all_day: false,
            start_time: None,
            end_time: None,
            color: None,
            category: EventCategory::default(),
            location: None,
            description: None,
            meeting_link: None,
            recurrence: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Defaults to the start date when not set.
    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.is_all_day = all_day;
        self
    }

    pub fn times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn meeting_link(mut self, link: impl Into<String>) -> Self {
        self.meeting_link = Some(link.into());
        self
    }

    /// Marks the event as recurring with the given rule.
    pub fn recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    pub fn build(self) -> Result<CalendarEvent, EventValidationError> {
        let start_date = self.start_date.ok_or(EventValidationError::MissingStartDate)?;

        let event = CalendarEvent {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            start_date,
            end_date: self.end_date.unwrap_or(start_date),
            is_all_day: self.is_all_day,
            start_time: self.start_time,
            end_time: self.end_time,
            color: self.color,
            category: self.category,
            location: self.location,
            description: self.description,
            meeting_link: self.meeting_link,
            is_recurring: self.recurrence.is_some(),
            recurrence: self.recurrence.unwrap_or_default(),
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for CalendarEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One dated instance of an event. Derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Occurrence {
    pub event_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Occurrence {
    /// Key that identifies this occurrence across redraws.
    pub fn instance_id(&self) -> String {
        format!("{}_rec_{}", self.event_id, self.start_date.format("%Y-%m-%d"))
    }

    /// Whether any day of the occurrence falls inside `start..=end`.
    pub fn intersects(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}
