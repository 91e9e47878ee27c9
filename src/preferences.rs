//! Display preferences (theme, density, language) persisted next to the
//! config file. Loaded once at startup and written back on every change.

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Density {
    #[default]
    Comfortable,
    Compact,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    Th,
    En,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub density: Density,
    #[serde(default)]
    pub language: Language,
}

/// File-backed holder for [`Preferences`].
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
    current: Preferences,
}

impl PreferencesStore {
    /// Read the preferences file; a missing or unreadable file yields
    /// defaults so startup never blocks on it.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable preferences");
                Preferences::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read preferences");
                Preferences::default()
            }
        };
        Self { path, current }
    }

    pub fn load_from_dir(dir: &Path) -> Self {
        Self::load(dir.join(PREFERENCES_FILE))
    }

    pub fn get(&self) -> Preferences {
        self.current
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a change and persist it. Unchanged preferences are not written.
    pub fn update(&mut self, change: impl FnOnce(&mut Preferences)) -> Result<Preferences> {
        let mut next = self.current;
        change(&mut next);
        if next != self.current {
            self.write(&next)?;
            self.current = next;
            tracing::debug!(path = %self.path.display(), "preferences saved");
        }
        Ok(self.current)
    }

    /// Set one preference by name (`theme`, `density`, `language`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<Preferences> {
        match key.trim().to_lowercase().as_str() {
            "theme" => {
                let theme: Theme = value
                    .parse()
                    .map_err(|_| anyhow!("unknown theme '{value}' (light, dark, system)"))?;
                self.update(|p| p.theme = theme)
            }
            "density" => {
                let density: Density = value
                    .parse()
                    .map_err(|_| anyhow!("unknown density '{value}' (comfortable, compact)"))?;
                self.update(|p| p.density = density)
            }
            "language" | "lang" => {
                let language: Language = value
                    .parse()
                    .map_err(|_| anyhow!("unknown language '{value}' (th, en)"))?;
                self.update(|p| p.language = language)
            }
            other => bail!("unknown preference '{other}' (theme, density, language)"),
        }
    }

    fn write(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create preferences directory")?;
        }
        let toml_str =
            toml::to_string_pretty(prefs).context("Failed to serialize preferences")?;
        fs::write(&self.path, toml_str).context("Failed to write preferences file")?;
        Ok(())
    }
}
