//! User settings loaded from `settings.toml`.
//!
//! Every section falls back to its defaults, so a partial file only
//! overrides what it names.

use crate::logic::judge::JudgeWindows;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the settings file.
pub const SETTINGS_PATH: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical frames per second of every game step.
    pub frame_rate: f64,
    pub timing: TimingSettings,
    pub score: ScoreSettings,
    pub display: DisplaySettings,
    pub paths: PathSettings,
    pub keys: KeySettings,
}

/// Judgment tolerances, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub press_early: f64,
    pub press_late: f64,
    pub release_early: f64,
    pub max_miss_distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSettings {
    /// Combo size from which a miss triggers the combo-break cue.
    pub big_combo_loss_threshold: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// How long a lane is flagged after a mistake, in seconds.
    pub error_display_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub level_list: PathBuf,
    pub levels_dir: PathBuf,
    pub high_scores: PathBuf,
    pub songs_dir: PathBuf,
    pub effects_dir: PathBuf,
}

/// Key names, parsed by `input::bindings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub lanes: Vec<String>,
    pub menu_previous: String,
    pub menu_next: String,
    pub menu_confirm: String,
    pub exit: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            timing: TimingSettings::default(),
            score: ScoreSettings::default(),
            display: DisplaySettings::default(),
            paths: PathSettings::default(),
            keys: KeySettings::default(),
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            press_early: 0.1,
            press_late: 0.1,
            release_early: 0.1,
            max_miss_distance: 0.3,
        }
    }
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            big_combo_loss_threshold: 10,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            error_display_duration: 0.3,
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            level_list: PathBuf::from("data/levels.toml"),
            levels_dir: PathBuf::from("data/levels"),
            high_scores: PathBuf::from("data/high_scores.toml"),
            songs_dir: PathBuf::from("audio/songs"),
            effects_dir: PathBuf::from("audio/effects"),
        }
    }
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            lanes: vec!["d".into(), "f".into(), "j".into(), "k".into()],
            menu_previous: "Up".into(),
            menu_next: "Down".into(),
            menu_confirm: "Enter".into(),
            exit: "Esc".into(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("SETTINGS: {} not found, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("SETTINGS: {} ignored ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        toml::from_str(&content).map_err(|e| e.to_string())
    }

    #[cfg(test)]
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, content).map_err(|e| e.to_string())
    }

    pub fn judge_windows(&self) -> JudgeWindows {
        JudgeWindows {
            press_early: self.timing.press_early,
            press_late: self.timing.press_late,
            release_early: self.timing.release_early,
            max_miss_distance: self.timing.max_miss_distance,
        }
    }

    /// Full path of a sound effect file.
    pub fn effect_path(&self, name: &str) -> PathBuf {
        self.paths.effects_dir.join(name)
    }

    /// Full path of a song audio file.
    pub fn song_path(&self, name: &str) -> PathBuf {
        self.paths.songs_dir.join(name)
    }
}
