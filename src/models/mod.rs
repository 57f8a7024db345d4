// Module exports for models

pub mod event;
pub mod recurrence;
pub mod settings;
