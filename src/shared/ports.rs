//! Narrow interfaces to the collaborators around the gameplay core.

use crate::input::events::GameKey;
use crate::logic::score::HighScoreTable;
use crate::models::level::{Level, LevelEntry};
use crate::shared::snapshot::{PlaySnapshot, ResultsSummary};
use std::path::Path;

/// Provides the level list and level contents.
pub trait NoteSource {
    fn level_list(&self) -> Result<Vec<LevelEntry>, String>;
    fn load_level(&self, level_id: &str) -> Result<Level, String>;
}

/// Edge-triggered key state, valid for the current frame only.
pub trait InputEdges {
    /// The key went down since the last frame boundary.
    fn was_pressed(&self, key: GameKey) -> bool;
    /// The key went up since the last frame boundary.
    fn was_released(&self, key: GameKey) -> bool;
    fn is_held(&self, key: GameKey) -> bool;
    /// Samples pending key transitions.
    fn update_key_states(&mut self);
    /// Clears the edges at the end of a frame.
    fn reset_key_states(&mut self);
}

/// Music and sound effects, addressed by file path.
pub trait SoundPort {
    fn load(&mut self, path: &Path) -> Result<(), String>;
    fn play(&mut self, path: &Path) -> Result<(), String>;
    fn unload(&mut self, path: &Path) -> Result<(), String>;
    /// Releases sources that finished playing.
    fn update_sources(&mut self);
}

/// Persistent best scores.
pub trait HighScoreStore {
    fn load(&self) -> Result<HighScoreTable, String>;
    fn save(&mut self, table: &HighScoreTable) -> Result<(), String>;
}

/// Receives what the player should see.
pub trait Presenter {
    fn clear(&mut self);
    fn show_level_select(&mut self, levels: &[LevelEntry]);
    fn show_selection(&mut self, index: usize, high_score: f64);
    fn show_confirmed(&mut self, index: usize);
    fn show_play_header(&mut self, song_name: &str, length_seconds: f64);
    fn show_play_frame(&mut self, snapshot: &PlaySnapshot) -> Result<(), String>;
    fn show_results(&mut self, results: &ResultsSummary);
    fn show_results_prompt(&mut self, visible: bool);
}
