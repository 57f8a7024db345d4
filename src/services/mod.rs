// Service module exports

pub mod event;
pub mod holidays;
pub mod settings;
