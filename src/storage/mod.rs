//! File-backed collaborators: level library and high-score table.

pub mod high_scores;
pub mod levels;

pub use high_scores::TomlHighScoreStore;
pub use levels::TomlLevelLibrary;

use std::fs;
use std::path::Path;

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    match toml::from_str(&content) {
        Ok(data) => Ok(data),
        Err(e) => {
            log::error!("STORAGE: Failed to parse TOML file {:?}: {}", path, e);
            Err(format!("{}: {}", path.display(), e))
        }
    }
}
