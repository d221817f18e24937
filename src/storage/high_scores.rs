//! Best scores per level, stored as a TOML table.

use super::load_toml;
use crate::logic::score::HighScoreTable;
use crate::shared::ports::HighScoreStore;
use std::fs;
use std::path::PathBuf;

pub struct TomlHighScoreStore {
    path: PathBuf,
}

impl TomlHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for TomlHighScoreStore {
    fn load(&self) -> Result<HighScoreTable, String> {
        // First launch: nothing saved yet.
        if !self.path.exists() {
            return Ok(HighScoreTable::new());
        }
        load_toml(&self.path)
    }

    fn save(&mut self, table: &HighScoreTable) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
        }

        let content = toml::to_string_pretty(table).map_err(|e| e.to_string())?;
        fs::write(&self.path, content).map_err(|e| format!("{}: {}", self.path.display(), e))?;

        log::info!("STORAGE: High scores saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlHighScoreStore::new(dir.path().join("high_scores.toml"));
        assert_eq!(store.load().unwrap(), HighScoreTable::new());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlHighScoreStore::new(dir.path().join("data").join("high_scores.toml"));

        let mut table = HighScoreTable::new();
        table.set("tutorial.toml", 42.5);
        table.set("mii.toml", 7.0);
        store.save(&table).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.get("tutorial.toml"), 42.5);
        assert_eq!(loaded.get("mii.toml"), 7.0);
        assert_eq!(loaded.get("other.toml"), 0.0);
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("high_scores.toml");
        fs::write(&path, "scores = 12").unwrap();
        assert!(TomlHighScoreStore::new(path).load().is_err());
    }
}
