// Deployment Calendar Library
// Recurring-event engine behind the deployment and communication calendars

pub mod models;
pub mod services;
pub mod utils;
