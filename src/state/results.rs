//! Level results step.

use super::GameStep;
use super::manager::GameManager;
use crate::input::events::GameKey;
use crate::models::constants::EFFECT_MENU_BACK;
use crate::shared::snapshot::ResultsSummary;

impl GameManager {
    pub(super) fn init_level_results(&mut self) -> Result<(), String> {
        self.session = None;
        if let Some(song_path) = self.song_path.take() {
            self.ports.sound.unload(&song_path)?;
        }
        self.load_effect(EFFECT_MENU_BACK)?;

        let level_id = self.selected_id();
        let is_high_score = self.score.is_high_score(&level_id);
        let summary = ResultsSummary {
            score: self.score.score(),
            is_high_score,
            accuracy: self.score.accuracy(),
            notes_hit: self.score.notes_hit(),
            notes_total: self.score.played_notes(),
            max_combo: self.score.max_combo(),
            missed_notes: self.score.missed_notes(),
        };
        self.ports.view.clear();
        self.ports.view.show_results(&summary);

        if is_high_score {
            log::info!("LOGIC: New high score for {}", level_id);
            self.score.update_high_score(&level_id);
            self.score
                .save_high_scores(self.ports.high_scores.as_mut())
                .map_err(|e| format!("Cannot save high scores: {}", e))?;
        }
        Ok(())
    }

    pub(super) fn update_level_results(&mut self, elapsed: f64) -> Result<bool, String> {
        // Blinks once per second.
        self.ports.view.show_results_prompt(elapsed as u64 % 2 == 1);

        if self.ports.input.was_pressed(GameKey::MenuConfirm) {
            self.play_effect(EFFECT_MENU_BACK)?;
            self.step = GameStep::LevelSelect;
            return Ok(true);
        }
        Ok(false)
    }
}
