//! Step loop of the game.

use super::GameStep;
use crate::logic::scheduler::{Clock, FrameScheduler, FrameStep};
use crate::logic::score::ScoreTracker;
use crate::logic::session::PlaySession;
use crate::models::level::LevelEntry;
use crate::models::settings::Settings;
use crate::shared::ports::{HighScoreStore, InputEdges, NoteSource, Presenter, SoundPort};
use std::fmt::Display;
use std::path::PathBuf;

/// Everything the manager talks to.
pub struct Collaborators {
    pub levels: Box<dyn NoteSource>,
    pub input: Box<dyn InputEdges>,
    pub sound: Box<dyn SoundPort>,
    pub view: Box<dyn Presenter>,
    pub high_scores: Box<dyn HighScoreStore>,
}

pub struct GameManager {
    pub(super) settings: Settings,
    pub(super) ports: Collaborators,
    pub(super) step: GameStep,

    pub(super) level_list: Vec<LevelEntry>,
    pub(super) selected: usize,
    pub(super) score: ScoreTracker,

    pub(super) session: Option<PlaySession>,
    /// Song of the current play session, unloaded on the results step.
    pub(super) song_path: Option<PathBuf>,
}

impl GameManager {
    /// Loads the level list and the high scores.
    ///
    /// A missing level list leaves the manager in `QuitError`; missing high
    /// scores only start from an empty table.
    pub fn new(settings: Settings, ports: Collaborators) -> Self {
        log::info!("LOGIC: Initializing game manager");
        let score = ScoreTracker::new(settings.score.big_combo_loss_threshold);

        let mut manager = Self {
            settings,
            ports,
            step: GameStep::LevelSelect,
            level_list: Vec::new(),
            selected: 0,
            score,
            session: None,
            song_path: None,
        };

        match manager.ports.levels.level_list() {
            Ok(levels) => manager.level_list = levels,
            Err(e) => {
                manager.fail(format!("Cannot read level list: {}", e));
            }
        }

        if let Err(e) = manager.score.load_high_scores(manager.ports.high_scores.as_ref()) {
            log::warn!("LOGIC: Cannot read high scores ({}), starting fresh", e);
        }

        manager
    }

    pub fn step(&self) -> GameStep {
        self.step
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn selected_level(&self) -> Option<&LevelEntry> {
        self.level_list.get(self.selected)
    }

    /// Runs steps until one of them quits. Returns the quit step.
    pub fn run<C: Clock>(&mut self, scheduler: &FrameScheduler<C>) -> GameStep {
        while !self.step.is_quit() {
            let step = self.step;
            log::info!("LOGIC: Entering {:?} at {} fps", step, scheduler.frame_rate());

            let mut runner = StepRunner {
                manager: &mut *self,
                step,
            };
            match scheduler.run(&mut runner) {
                Ok(frames) => log::debug!("LOGIC: {:?} ran {} frames", step, frames),
                Err(e) => {
                    self.fail(format!("{:?} failed to start: {}", step, e));
                }
            }

            // An update that stops without choosing a step would loop forever.
            if self.step == step {
                self.fail(format!("{:?} stopped without a next step", step));
            }
        }

        log::info!("LOGIC: Quitting with {:?}", self.step);
        self.step
    }

    /// Logs `error` and switches to `QuitError`. Returns `true`, the stop
    /// value of a failed update.
    pub(super) fn fail(&mut self, error: impl Display) -> bool {
        log::error!("LOGIC: {}", error);
        self.step = GameStep::QuitError;
        true
    }

    pub(super) fn effect_path(&self, name: &str) -> PathBuf {
        self.settings.effect_path(name)
    }

    pub(super) fn load_effect(&mut self, name: &str) -> Result<(), String> {
        let path = self.effect_path(name);
        self.ports.sound.load(&path)
    }

    pub(super) fn play_effect(&mut self, name: &str) -> Result<(), String> {
        let path = self.effect_path(name);
        self.ports.sound.play(&path)
    }

    /// Id of the selected level. The list is never empty past `LevelSelect` init.
    pub(super) fn selected_id(&self) -> String {
        self.selected_level()
            .map(|level| level.id.clone())
            .unwrap_or_default()
    }
}

/// Runs one step of the manager under the scheduler.
struct StepRunner<'a> {
    manager: &'a mut GameManager,
    step: GameStep,
}

impl FrameStep for StepRunner<'_> {
    fn init(&mut self) -> Result<(), String> {
        match self.step {
            GameStep::LevelSelect => self.manager.init_level_select(),
            GameStep::LevelPlay => self.manager.init_level_play(),
            GameStep::LevelResults => self.manager.init_level_results(),
            GameStep::QuitSuccess | GameStep::QuitError => Ok(()),
        }
    }

    fn update(&mut self, elapsed: f64) -> bool {
        let result = match self.step {
            GameStep::LevelSelect => self.manager.update_level_select(elapsed),
            GameStep::LevelPlay => self.manager.update_level_play(elapsed),
            GameStep::LevelResults => self.manager.update_level_results(elapsed),
            GameStep::QuitSuccess | GameStep::QuitError => Ok(true),
        };
        match result {
            Ok(stop) => stop,
            Err(e) => self.manager.fail(e),
        }
    }

    fn poll(&mut self) {
        self.manager.ports.input.update_key_states();
    }

    fn end_frame(&mut self) {
        self.manager.ports.sound.update_sources();
        self.manager.ports.input.reset_key_states();
    }
}
