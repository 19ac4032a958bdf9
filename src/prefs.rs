//! Per-user preferences: theme, sidebar state and the saved session.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ConfigError;
use crate::models::Session;

/// Colour scheme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    /// Next theme in the header toggle cycle.
    pub fn cycle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub sidebar_collapsed: bool,
    #[serde(default)]
    pub session: Option<Session>,
}

impl Preferences {
    /// Platform directories for this application.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dz", "bank", "hr-backoffice")
    }

    /// `prefs.toml` in the platform config directory.
    pub fn default_path() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prefs.toml")
    }

    /// Load preferences; a missing or unreadable file yields defaults.
    pub fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Ignoring invalid preferences at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save preferences, creating the directory when needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
