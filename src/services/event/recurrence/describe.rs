//! Plain-language summaries of recurrence rules for the event editor.
//!
//! The output is a fixed composition of `<cadence><days><end>`, e.g.
//! `"Every 2 weeks on Mon, Wed until Dec 31, 2025"`. The same rule always
//! produces the same string; weekday lists are sorted and de-duplicated so
//! the order they were picked in does not matter.

use crate::models::recurrence::{EndType, RecurrenceRule, RecurrenceType};
use crate::utils::date::WEEKDAY_ABBREVIATIONS;
use chrono::NaiveDate;

const ORDINALS: [&str; 5] = ["1st", "2nd", "3rd", "4th", "5th"];

/// Describe a rule. Rules of type `none` describe as an empty string.
///
/// Only the stored fields are described. A monthly rule with a blank
/// ordinal or weekday reads as plain "Monthly" even though expansion picks
/// them from the anchor; use [`describe_recurrence_from`] when the anchor is
/// known.
pub fn describe_recurrence(rule: &RecurrenceRule) -> String {
    if rule.is_none() {
        return String::new();
    }

    format!(
        "{}{}{}",
        cadence_clause(rule),
        day_clause(rule),
        end_clause(rule)
    )
}

/// Describe a rule as it will expand from `anchor`, so a monthly rule with
/// a blank selector names the weekday the generator will use.
pub fn describe_recurrence_from(rule: &RecurrenceRule, anchor: NaiveDate) -> String {
    describe_recurrence(&rule.with_anchor_defaults(anchor))
}

fn cadence_clause(rule: &RecurrenceRule) -> String {
    let interval = rule.interval.max(1);
    let every = |single: &str, unit: &str| {
        if interval == 1 {
            single.to_string()
        } else {
            format!("Every {interval} {unit}")
        }
    };

    match rule.kind {
        RecurrenceType::None => String::new(),
        RecurrenceType::Daily => every("Every day", "days"),
        RecurrenceType::Weekdays => "Every weekday (Mon-Fri)".to_string(),
        RecurrenceType::Weekly => every("Weekly", "weeks"),
        RecurrenceType::Biweekly => "Every 2 weeks".to_string(),
        RecurrenceType::Monthly => every("Monthly", "months"),
        RecurrenceType::Yearly => every("Yearly", "years"),
    }
}

fn day_clause(rule: &RecurrenceRule) -> String {
    match rule.kind {
        RecurrenceType::Weekly | RecurrenceType::Biweekly => {
            let mut days: Vec<u8> = rule.days_of_week.iter().copied().filter(|d| *d <= 6).collect();
            days.sort_unstable();
            days.dedup();

            if days.is_empty() {
                return String::new();
            }

            let names: Vec<&str> = days
                .iter()
                .map(|day| WEEKDAY_ABBREVIATIONS[usize::from(*day)])
                .collect();
            format!(" on {}", names.join(", "))
        }
        RecurrenceType::Monthly => {
            let ordinal = rule
                .week_of_month
                .and_then(|week| ORDINALS.get(usize::from(week).checked_sub(1)?));
            let weekday = rule
                .day_of_week
                .and_then(|day| WEEKDAY_ABBREVIATIONS.get(usize::from(day)));

            match (ordinal, weekday) {
                (Some(ordinal), Some(weekday)) => format!(" on the {ordinal} {weekday}"),
                _ => String::new(),
            }
        }
        _ => String::new(),
    }
}

fn end_clause(rule: &RecurrenceRule) -> String {
    match (rule.end_type, rule.end_date, rule.end_count) {
        (EndType::Date, Some(end), _) => format!(" until {}", end.format("%b %-d, %Y")),
        (EndType::Count, _, Some(1)) => " for 1 time".to_string(),
        (EndType::Count, _, Some(count)) => format!(" for {count} times"),
        _ => String::new(),
    }
}
