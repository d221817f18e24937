//! Level selection step.

use super::GameStep;
use super::manager::GameManager;
use crate::input::events::GameKey;
use crate::models::constants::{EFFECT_MENU_CONFIRM, EFFECT_MENU_NAVIGATE};

impl GameManager {
    pub(super) fn init_level_select(&mut self) -> Result<(), String> {
        if self.level_list.is_empty() {
            return Err("The level list is empty".to_string());
        }
        self.selected = self.selected.min(self.level_list.len() - 1);

        self.load_effect(EFFECT_MENU_NAVIGATE)?;
        self.load_effect(EFFECT_MENU_CONFIRM)?;

        let high_score = self.score.high_score(&self.selected_id());
        self.ports.view.clear();
        self.ports.view.show_level_select(&self.level_list);
        self.ports.view.show_selection(self.selected, high_score);
        Ok(())
    }

    pub(super) fn update_level_select(&mut self, _elapsed: f64) -> Result<bool, String> {
        let input = &self.ports.input;
        if input.was_pressed(GameKey::Exit) {
            self.ports.view.clear();
            self.step = GameStep::QuitSuccess;
            return Ok(true);
        }

        let level_count = self.level_list.len();
        let mut selection_changed = false;
        if input.was_pressed(GameKey::MenuNext) {
            self.selected = (self.selected + 1) % level_count;
            selection_changed = true;
        }
        if input.was_pressed(GameKey::MenuPrevious) {
            self.selected = (self.selected + level_count - 1) % level_count;
            selection_changed = true;
        }
        let confirmed = input.was_pressed(GameKey::MenuConfirm);

        if selection_changed {
            self.play_effect(EFFECT_MENU_NAVIGATE)?;
        }
        if confirmed {
            self.play_effect(EFFECT_MENU_CONFIRM)?;
            log::info!("LOGIC: Level {} selected", self.selected_id());
            self.ports.view.show_confirmed(self.selected);
            self.step = GameStep::LevelPlay;
            return Ok(true);
        }

        if selection_changed {
            let high_score = self.score.high_score(&self.selected_id());
            self.ports.view.show_selection(self.selected, high_score);
        }
        Ok(false)
    }
}
