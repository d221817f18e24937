//! Level list and level files stored as TOML.
//!
//! The list (`levels.toml`) names every level file and its display name;
//! each level file lives in the levels directory.

use super::load_toml;
use crate::models::level::{Level, LevelEntry, LevelFile};
use crate::shared::ports::NoteSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelList {
    #[serde(default)]
    pub levels: Vec<LevelEntry>,
}

pub struct TomlLevelLibrary {
    list_path: PathBuf,
    levels_dir: PathBuf,
}

impl TomlLevelLibrary {
    pub fn new(list_path: impl Into<PathBuf>, levels_dir: impl Into<PathBuf>) -> Self {
        Self {
            list_path: list_path.into(),
            levels_dir: levels_dir.into(),
        }
    }

    pub fn level_path(&self, level_id: &str) -> PathBuf {
        self.levels_dir.join(level_id)
    }

    fn load_level_file(path: &Path) -> Result<Level, String> {
        let file: LevelFile = load_toml(path)?;
        Level::try_from(file).map_err(|e| format!("{}: {}", path.display(), e))
    }
}

impl NoteSource for TomlLevelLibrary {
    fn level_list(&self) -> Result<Vec<LevelEntry>, String> {
        let list: LevelList = load_toml(&self.list_path)?;
        log::info!(
            "STORAGE: {} levels listed in {}",
            list.levels.len(),
            self.list_path.display()
        );
        Ok(list.levels)
    }

    fn load_level(&self, level_id: &str) -> Result<Level, String> {
        let path = self.level_path(level_id);
        let level = Self::load_level_file(&path)?;
        log::info!(
            "STORAGE: Loaded {} ({} notes, {:.1}s)",
            level.song_name(),
            level.note_count(),
            level.length_seconds()
        );
        Ok(level)
    }
}
