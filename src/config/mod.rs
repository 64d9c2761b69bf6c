// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{MAX_BPM, MIN_BPM, MusicalKey};

const CONFIG_NAME: &str = "cue";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read or write configuration: {0}")]
    Storage(#[from] confy::ConfyError),

    #[error("playback tick interval must be at least 1ms")]
    TickInterval,

    #[error("playback step must be a positive number of percentage points, got {0}")]
    Step(f64),

    #[error("library BPM range {min}-{max} must lie within 60-200 with min <= max")]
    BpmRange { min: u32, max: u32 },
}

/// The settings stored in the configuration file. Missing fields take their
/// default values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) log_file: String,
    pub(crate) playback: PlaybackConfig,
    pub(crate) search: SearchConfig,
    pub(crate) library: LibraryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            log_file: "cue.log".to_string(),
            playback: PlaybackConfig::default(),
            search: SearchConfig::default(),
            library: LibraryConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct PlaybackConfig {
    pub(crate) tick_interval_ms: u64,
    pub(crate) step_percent: f64,
    /// Show the time remaining rather than the time elapsed.
    pub(crate) countdown: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            step_percent: 0.5,
            countdown: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct SearchConfig {
    pub(crate) retry_delay_ms: u64,
    pub(crate) default_bpm: u32,
    pub(crate) default_key: MusicalKey,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: 500,
            default_bpm: 107,
            default_key: MusicalKey::C,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct LibraryConfig {
    pub(crate) bpm_min: u32,
    pub(crate) bpm_max: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            bpm_min: 60,
            bpm_max: 140,
        }
    }
}

impl AppConfig {
    /// Checks the values that deserialization alone cannot.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid setting: a zero tick
    /// interval, a step that is not a positive number, or a library tempo
    /// range that is inverted or outside the selectable range.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.playback.tick_interval_ms == 0 {
            return Err(ConfigError::TickInterval);
        }

        let step = self.playback.step_percent;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::Step(step));
        }

        let LibraryConfig { bpm_min: min, bpm_max: max } = self.library;
        if min < MIN_BPM || max > MAX_BPM || min > max {
            return Err(ConfigError::BpmRange { min, max });
        }

        Ok(())
    }
}

/// Loads and validates the configuration from the platform's configuration
/// directory, creating the file with defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or holds invalid
/// settings.
pub(crate) fn load_config() -> Result<AppConfig, ConfigError> {
    let path = confy::get_configuration_file_path(CONFIG_NAME, None)?;
    load_config_from(&path)
}

/// Loads and validates the configuration file at `path`, creating it with
/// defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or holds invalid
/// settings.
pub(crate) fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = confy::load_path(path)?;
    config.validate()?;
    Ok(config)
}

/// Writes `cfg` to the platform's configuration directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub(crate) fn save_config(cfg: &AppConfig) -> Result<(), ConfigError> {
    let path = confy::get_configuration_file_path(CONFIG_NAME, None)?;
    save_config_to(cfg, &path)
}

/// Writes `cfg` to the configuration file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub(crate) fn save_config_to(cfg: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    confy::store_path(path, cfg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cue.toml");

        let config = load_config_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cue.toml");
        fs::write(
            &path,
            "[playback]\ntick_interval_ms = 50\n\n[search]\ndefault_key = \"F#\"\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.playback.tick_interval_ms, 50);
        assert_eq!(config.playback.step_percent, 0.5);
        assert_eq!(config.search.default_key, MusicalKey::FSharp);
        assert_eq!(config.library, LibraryConfig::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cue.toml");

        let mut config = AppConfig::default();
        config.search.default_bpm = 128;
        config.playback.countdown = false;
        save_config_to(&config, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cue.toml");
        fs::write(&path, "[library]\nbpm_min = 150\nbpm_max = 90\n").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::BpmRange { min: 150, max: 90 })
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = AppConfig::default();
        config.playback.tick_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::TickInterval)));

        let mut config = AppConfig::default();
        config.playback.step_percent = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Step(_))));

        let mut config = AppConfig::default();
        config.library.bpm_min = 150;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BpmRange { min: 150, max: 140 })
        ));
    }
}
