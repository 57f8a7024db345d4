use super::recurrence::generate_occurrences;
use crate::models::event::{CalendarEvent, Occurrence};
use crate::models::recurrence::RecurrenceError;
use chrono::{NaiveDate, NaiveTime};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgendaError {
    #[error("Display window ends on {end}, before it starts on {start}")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },

    #[error("Cannot expand event '{event_id}': {source}")]
    Event {
        event_id: String,
        #[source]
        source: RecurrenceError,
    },
}

/// Every occurrence of every event inside the window, merged into one
/// ordered list.
///
/// Non-recurring events contribute at most one occurrence. Input order does
/// not matter: the result is sorted by start date, then all-day events
/// before timed ones, then start time, then event id.
pub fn occurrences_in_window(
    events: &[CalendarEvent],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<Occurrence>, AgendaError> {
    if window_end < window_start {
        return Err(AgendaError::InvertedWindow {
            start: window_start,
            end: window_end,
        });
    }

    let mut start_times: HashMap<&str, Option<NaiveTime>> = HashMap::new();
    let mut occurrences = Vec::new();

    for event in events {
        let expanded = generate_occurrences(event, window_start, window_end).map_err(|source| {
            AgendaError::Event {
                event_id: event.id.clone(),
                source,
            }
        })?;

        let start_time = if event.is_all_day { None } else { event.start_time };
        start_times.insert(event.id.as_str(), start_time);
        occurrences.extend(expanded);
    }

    occurrences.sort_by(|a, b| {
        let time_of = |occurrence: &Occurrence| {
            start_times
                .get(occurrence.event_id.as_str())
                .copied()
                .flatten()
        };

        a.start_date
            .cmp(&b.start_date)
            .then_with(|| time_of(a).cmp(&time_of(b)))
            .then_with(|| a.event_id.cmp(&b.event_id))
    });

    log::debug!(
        "Aggregated {} occurrences from {} events for {}..={}",
        occurrences.len(),
        events.len(),
        window_start,
        window_end
    );

    Ok(occurrences)
}

/// Occurrences inside the window grouped by `group_by`, each group in
/// display order.
///
/// The key is computed from the first visible day of each occurrence, so a
/// multi-day event that started before the window lands in the window's
/// first group instead of one the view never shows.
pub fn aggregate_for_window<K, F>(
    events: &[CalendarEvent],
    window_start: NaiveDate,
    window_end: NaiveDate,
    group_by: F,
) -> Result<BTreeMap<K, Vec<Occurrence>>, AgendaError>
where
    K: Ord,
    F: Fn(NaiveDate) -> K,
{
    let mut groups: BTreeMap<K, Vec<Occurrence>> = BTreeMap::new();

    for occurrence in occurrences_in_window(events, window_start, window_end)? {
        let key = group_by(occurrence.start_date.max(window_start));
        groups.entry(key).or_default().push(occurrence);
    }

    Ok(groups)
}

/// Everything on the calendar for a single day, including multi-day events
/// that started earlier.
pub fn occurrences_on(events: &[CalendarEvent], date: NaiveDate) -> Result<Vec<Occurrence>, AgendaError> {
    occurrences_in_window(events, date, date)
}

/// Ready-made grouping keys for [`aggregate_for_window`].
pub mod group {
    use crate::utils::date::{first_of_month, start_of_week};
    use chrono::NaiveDate;

    pub fn by_day(date: NaiveDate) -> NaiveDate {
        date
    }

    /// Sunday that starts the week.
    pub fn by_week(date: NaiveDate) -> NaiveDate {
        start_of_week(date)
    }

    /// First day of the month.
    pub fn by_month(date: NaiveDate) -> NaiveDate {
        first_of_month(date)
    }
}
