use crate::models::settings::AgendaFile;
use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const AGENDA_FILE_NAME: &str = "agenda.toml";

/// Reads and writes the TOML agenda file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Agenda file in the platform configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "MilitaryFamily", "DeploymentCalendar")
            .map(|dirs| dirs.config_dir().join(AGENDA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the agenda file. A missing file yields an empty agenda with
    /// default settings.
    pub fn load(&self) -> Result<AgendaFile> {
        if !self.path.exists() {
            log::warn!(
                "Agenda file {} not found; using defaults",
                self.path.display()
            );
            return Ok(AgendaFile::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read agenda file {}", self.path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid agenda file {}", self.path.display()))
    }

    /// Parse and validate agenda TOML.
    pub fn parse(content: &str) -> Result<AgendaFile> {
        let agenda: AgendaFile = toml::from_str(content).context("Failed to parse agenda TOML")?;

        agenda
            .settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let mut seen = HashSet::new();
        for event in &agenda.events {
            event
                .validate()
                .with_context(|| format!("Invalid event '{}'", event.id))?;
            if !seen.insert(event.id.as_str()) {
                bail!("Duplicate event id '{}'", event.id);
            }
        }

        log::debug!("Loaded {} events from agenda", agenda.events.len());
        Ok(agenda)
    }

    pub fn save(&self, agenda: &AgendaFile) -> Result<()> {
        let content = toml::to_string_pretty(agenda).context("Failed to serialize agenda")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write agenda file {}", self.path.display()))?;
        Ok(())
    }
}
