//! Level play step.

use super::GameStep;
use super::manager::GameManager;
use crate::logic::session::PlaySession;
use crate::models::constants::EFFECT_COMBO_BREAK;

impl GameManager {
    pub(super) fn init_level_play(&mut self) -> Result<(), String> {
        self.load_effect(EFFECT_COMBO_BREAK)?;

        let level_id = self.selected_id();
        let level = self.ports.levels.load_level(&level_id)?;

        let song_path = self.settings.song_path(level.audio_file());
        self.ports.sound.load(&song_path)?;
        self.ports.sound.play(&song_path)?;
        self.song_path = Some(song_path);

        self.score.reset();
        self.ports.view.clear();
        self.ports
            .view
            .show_play_header(level.song_name(), level.length_seconds());

        self.session = Some(PlaySession::new(
            level,
            self.settings.judge_windows(),
            self.settings.display.error_display_duration,
        ));
        Ok(())
    }

    pub(super) fn update_level_play(&mut self, elapsed: f64) -> Result<bool, String> {
        let level_id = self.selected_id();
        let (report, snapshot, finished) = {
            let Some(session) = self.session.as_mut() else {
                return Err("No play session".to_string());
            };
            let input = self.ports.input.as_ref();
            let mut report = session.update(elapsed, input, &mut self.score);
            let finished = session.is_finished(elapsed);
            if finished {
                // Notes the song ended on are still owed a verdict.
                report.big_combo_loss |= session.finish(elapsed, &mut self.score).big_combo_loss;
            }
            let snapshot = session.snapshot(elapsed, input, &self.score, &level_id);
            (report, snapshot, finished)
        };

        if report.big_combo_loss {
            self.play_effect(EFFECT_COMBO_BREAK)?;
        }
        self.ports.view.show_play_frame(&snapshot)?;

        if finished {
            log::info!(
                "LOGIC: Level {} finished with {:.1} points",
                level_id,
                self.score.score()
            );
            self.step = GameStep::LevelResults;
            return Ok(true);
        }
        Ok(false)
    }
}
