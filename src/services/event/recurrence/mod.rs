//! Recurrence expansion.
//!
//! [`generate_occurrences`] validates an event and its rule up front, then
//! hands back a lazy [`Occurrences`] iterator. Nothing is computed past the
//! point the caller stops pulling, so a rule that never ends costs no more
//! than the window being drawn. The iterator is `Clone`; cloning it (or
//! calling `generate_occurrences` again) restarts from the same position
//! with no shared counters.

use crate::models::event::{CalendarEvent, Occurrence};
use crate::models::recurrence::{
    Recurrence, RecurrenceEnd, RecurrenceError, RecurrencePattern, RecurrenceRule,
};
use crate::utils::date::add_days;
use chrono::NaiveDate;
use std::iter::FusedIterator;

mod daily;
pub mod describe;
mod monthly;
mod weekly;
mod yearly;

pub use describe::{describe_recurrence, describe_recurrence_from};

use daily::{DailySteps, WeekdaySteps};
use monthly::MonthlySteps;
use weekly::WeeklySteps;
use yearly::YearlySteps;

/// One candidate produced by a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The pattern lands on this date.
    Hit(NaiveDate),
    /// A whole period produced no date. Every later candidate falls after
    /// this date, so it still counts for stop conditions.
    Miss(NaiveDate),
}

#[derive(Debug, Clone)]
enum Steps {
    Once(Option<NaiveDate>),
    Daily(DailySteps),
    Weekdays(WeekdaySteps),
    Weekly(WeeklySteps),
    Monthly(MonthlySteps),
    Yearly(YearlySteps),
}

impl Steps {
    fn new(pattern: RecurrencePattern, anchor: NaiveDate) -> Self {
        match pattern {
            RecurrencePattern::Once => Self::Once(Some(anchor)),
            RecurrencePattern::Daily { interval } => Self::Daily(DailySteps::new(anchor, interval)),
            RecurrencePattern::Weekdays => Self::Weekdays(WeekdaySteps::new(anchor)),
            RecurrencePattern::Weekly { interval, days } => {
                Self::Weekly(WeeklySteps::new(anchor, interval, days))
            }
            RecurrencePattern::Monthly {
                interval,
                week_of_month,
                weekday,
            } => Self::Monthly(MonthlySteps::new(anchor, interval, week_of_month, weekday)),
            RecurrencePattern::Yearly { interval } => Self::Yearly(YearlySteps::new(anchor, interval)),
        }
    }
}

impl Iterator for Steps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self {
            Self::Once(date) => date.take().map(Step::Hit),
            Self::Daily(steps) => steps.next(),
            Self::Weekdays(steps) => steps.next(),
            Self::Weekly(steps) => steps.next(),
            Self::Monthly(steps) => steps.next(),
            Self::Yearly(steps) => steps.next(),
        }
    }
}

/// Occurrences of one event inside a display window, in ascending date
/// order.
///
/// Stop conditions are checked per candidate in this order: the rule's end
/// date, the rule's occurrence count, then the window end. Occurrences that
/// end before the window start are skipped but still consume the count,
/// which always runs from the event's first occurrence.
#[derive(Debug, Clone)]
pub struct Occurrences {
    event_id: String,
    anchor: NaiveDate,
    span_days: i64,
    end: RecurrenceEnd,
    window_start: NaiveDate,
    window_end: NaiveDate,
    steps: Steps,
    consumed: u32,
    finished: bool,
}

impl Occurrences {
    fn new(
        event: &CalendarEvent,
        recurrence: Recurrence,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Self {
        Self {
            event_id: event.id.clone(),
            anchor: event.start_date,
            span_days: event.span_days(),
            end: recurrence.end,
            window_start,
            window_end,
            steps: Steps::new(recurrence.pattern, event.start_date),
            consumed: 0,
            finished: false,
        }
    }

    fn past_rule_end(&self, date: NaiveDate) -> bool {
        matches!(self.end, RecurrenceEnd::Until(until) if date > until)
    }

    fn count_exhausted(&self) -> bool {
        matches!(self.end, RecurrenceEnd::Count(max) if self.consumed >= max)
    }
}

impl Iterator for Occurrences {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        while !self.finished {
            let Some(step) = self.steps.next() else {
                self.finished = true;
                break;
            };

            let start = match step {
                Step::Hit(date) => date,
                Step::Miss(probe) => {
                    if self.past_rule_end(probe) || probe > self.window_end {
                        self.finished = true;
                    }
                    continue;
                }
            };

            if start < self.anchor {
                continue;
            }

            if self.past_rule_end(start) || self.count_exhausted() || start > self.window_end {
                self.finished = true;
                break;
            }

            self.consumed += 1;

            let Some(end) = add_days(start, self.span_days) else {
                self.finished = true;
                break;
            };

            let occurrence = Occurrence {
                event_id: self.event_id.clone(),
                start_date: start,
                end_date: end,
            };

            if occurrence.intersects(self.window_start, self.window_end) {
                return Some(occurrence);
            }
        }

        None
    }
}

impl FusedIterator for Occurrences {}

/// Expand an event inside `window_start..=window_end` (both inclusive).
///
/// Non-recurring events are treated as a rule of type `none` and yield at
/// most one occurrence. An occurrence is in the window when any of its days
/// are.
///
/// # Errors
/// Returns a [`RecurrenceError`] when the event ends before it starts, the
/// window is inverted, or the rule is malformed (see
/// [`RecurrenceRule::resolve`]).
pub fn generate_occurrences(
    event: &CalendarEvent,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Occurrences, RecurrenceError> {
    generate_with_rule(event, &event.effective_rule(), window_start, window_end)
}

/// Expand an event with an explicit rule in place of its stored one, e.g.
/// to preview an unsaved edit.
pub fn generate_with_rule(
    event: &CalendarEvent,
    rule: &RecurrenceRule,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Occurrences, RecurrenceError> {
    if event.end_date < event.start_date {
        return Err(RecurrenceError::EventEndsBeforeStart {
            start: event.start_date,
            end: event.end_date,
        });
    }

    if window_end < window_start {
        return Err(RecurrenceError::InvertedWindow {
            start: window_start,
            end: window_end,
        });
    }

    let recurrence = rule.resolve(event.start_date)?;
    log::debug!(
        "Expanding event {} ({:?}, {:?}) for {}..={}",
        event.id,
        recurrence.pattern,
        recurrence.end,
        window_start,
        window_end
    );

    Ok(Occurrences::new(event, recurrence, window_start, window_end))
}

/// First occurrence that has not finished before `reference_date`: either
/// one in progress on that day or the next one to start.
pub fn next_occurrence(
    event: &CalendarEvent,
    reference_date: NaiveDate,
) -> Result<Option<Occurrence>, RecurrenceError> {
    Ok(generate_occurrences(event, reference_date, NaiveDate::MAX)?.next())
}
