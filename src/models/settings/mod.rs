// Settings module
// Agenda preferences and the on-disk agenda file layout

use crate::models::event::CalendarEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the agenda groups occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Day,
    Week,
    #[default]
    Month,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!("Unknown grouping '{other}' (expected day, week or month)")),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaSettings {
    pub group_by: GroupBy,
    pub include_federal_holidays: bool,
    /// Length of the default window, counted from today.
    pub window_days: u32,
}

impl Default for AgendaSettings {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Month,
            include_federal_holidays: true,
            window_days: 31,
        }
    }
}

impl AgendaSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.window_days == 0 {
            return Err("window_days must be at least 1".to_string());
        }
        if self.window_days > 3660 {
            return Err("window_days must be 3660 or less".to_string());
        }
        Ok(())
    }
}

/// Contents of an agenda file: preferences plus the saved events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgendaFile {
    #[serde(default)]
    pub settings: AgendaSettings,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}
