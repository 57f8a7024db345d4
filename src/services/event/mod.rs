//! Calendar event services.
//! Recurrence expansion and description live in `recurrence`; merging many
//! events into a grouped view for a display window lives in `agenda`.

pub mod agenda;
pub mod recurrence;

pub use agenda::{aggregate_for_window, occurrences_in_window, occurrences_on, AgendaError};
pub use recurrence::{
    describe_recurrence, describe_recurrence_from, generate_occurrences, next_occurrence, Occurrences,
};
