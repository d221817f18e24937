//! In-memory collaborators for driving the game manager in tests.
//!
//! Every double is a cheap handle over shared state: the test keeps one clone
//! to inspect what the manager did with the other.

use crate::input::events::{GameKey, InputEvent};
use crate::input::state::KeyState;
use crate::logic::scheduler::{Clock, ManualClock};
use crate::logic::score::HighScoreTable;
use crate::models::level::{Level, LevelEntry};
use crate::shared::ports::{HighScoreStore, InputEdges, NoteSource, Presenter, SoundPort};
use crate::shared::snapshot::{PlaySnapshot, ResultsSummary};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Key transitions replayed at fixed clock times.
pub struct ScriptedInput {
    clock: ManualClock,
    events: Vec<(f64, InputEvent)>,
    next: usize,
    keys: HashMap<GameKey, KeyState>,
}

impl ScriptedInput {
    /// `script` entries are `(clock time, key, pressed)`.
    pub fn new(clock: ManualClock, script: &[(f64, GameKey, bool)]) -> Self {
        let mut events: Vec<(f64, InputEvent)> = script
            .iter()
            .map(|&(time, key, pressed)| {
                let event = if pressed {
                    InputEvent::press(key)
                } else {
                    InputEvent::release(key)
                };
                (time, event)
            })
            .collect();
        events.sort_by(|a, b| a.0.total_cmp(&b.0));

        Self {
            clock,
            events,
            next: 0,
            keys: HashMap::new(),
        }
    }

    fn key(&self, key: GameKey) -> KeyState {
        self.keys.get(&key).copied().unwrap_or_default()
    }
}

impl InputEdges for ScriptedInput {
    fn was_pressed(&self, key: GameKey) -> bool {
        self.key(key).just_pressed
    }

    fn was_released(&self, key: GameKey) -> bool {
        self.key(key).just_released
    }

    fn is_held(&self, key: GameKey) -> bool {
        self.key(key).held
    }

    fn update_key_states(&mut self) {
        let now = self.clock.now();
        while let Some(&(time, event)) = self.events.get(self.next) {
            if time > now {
                break;
            }
            let state = self.keys.entry(event.key).or_default();
            if event.pressed {
                state.on_press();
            } else {
                state.on_release();
            }
            self.next += 1;
        }
    }

    fn reset_key_states(&mut self) {
        for state in self.keys.values_mut() {
            state.reset_frame_state();
        }
    }
}

#[derive(Default)]
struct LevelsInner {
    entries: Vec<LevelEntry>,
    levels: HashMap<String, Level>,
    fail_list: bool,
}

/// Level list and levels held in memory. Broken entries fail to load.
#[derive(Clone, Default)]
pub struct MemoryLevels {
    inner: Rc<RefCell<LevelsInner>>,
}

impl MemoryLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: &str, name: &str, level: Level) {
        let mut inner = self.inner.borrow_mut();
        inner.entries.push(LevelEntry {
            id: id.to_string(),
            name: name.to_string(),
        });
        inner.levels.insert(id.to_string(), level);
    }

    /// Lists a level whose file cannot be loaded.
    pub fn add_broken(&mut self, id: &str, name: &str) {
        self.inner.borrow_mut().entries.push(LevelEntry {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub fn fail_list(&self) {
        self.inner.borrow_mut().fail_list = true;
    }
}

impl NoteSource for MemoryLevels {
    fn level_list(&self) -> Result<Vec<LevelEntry>, String> {
        let inner = self.inner.borrow();
        if inner.fail_list {
            return Err("level list unavailable".to_string());
        }
        Ok(inner.entries.clone())
    }

    fn load_level(&self, level_id: &str) -> Result<Level, String> {
        self.inner
            .borrow()
            .levels
            .get(level_id)
            .cloned()
            .ok_or_else(|| format!("{} cannot be loaded", level_id))
    }
}

#[derive(Default)]
struct SoundInner {
    loaded: HashSet<PathBuf>,
    played: Vec<PathBuf>,
    unloaded: Vec<PathBuf>,
    fail_play: bool,
}

/// Sound port recording every call. Playing or unloading a clip that was
/// not loaded is an error, like the real one.
#[derive(Clone, Default)]
pub struct RecordingSound {
    inner: Rc<RefCell<SoundInner>>,
}

impl RecordingSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<PathBuf> {
        self.inner.borrow().played.clone()
    }

    pub fn unloaded(&self) -> Vec<PathBuf> {
        self.inner.borrow().unloaded.clone()
    }

    pub fn fail_play(&self) {
        self.inner.borrow_mut().fail_play = true;
    }
}

impl SoundPort for RecordingSound {
    fn load(&mut self, path: &Path) -> Result<(), String> {
        self.inner.borrow_mut().loaded.insert(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self, path: &Path) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_play {
            return Err("device lost".to_string());
        }
        if !inner.loaded.contains(path) {
            return Err(format!("{} is not loaded", path.display()));
        }
        inner.played.push(path.to_path_buf());
        Ok(())
    }

    fn unload(&mut self, path: &Path) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        if !inner.loaded.remove(path) {
            return Err(format!("{} is not loaded", path.display()));
        }
        inner.unloaded.push(path.to_path_buf());
        Ok(())
    }

    fn update_sources(&mut self) {}
}

#[derive(Default)]
struct PresenterInner {
    selections: Vec<usize>,
    confirmed: Vec<usize>,
    play_frames: usize,
    last_frame: Option<PlaySnapshot>,
    results: Vec<ResultsSummary>,
}

#[derive(Clone, Default)]
pub struct RecordingPresenter {
    inner: Rc<RefCell<PresenterInner>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selections(&self) -> Vec<usize> {
        self.inner.borrow().selections.clone()
    }

    pub fn confirmed(&self) -> Vec<usize> {
        self.inner.borrow().confirmed.clone()
    }

    pub fn play_frames(&self) -> usize {
        self.inner.borrow().play_frames
    }

    pub fn last_frame(&self) -> Option<PlaySnapshot> {
        self.inner.borrow().last_frame.clone()
    }

    pub fn results(&self) -> Vec<ResultsSummary> {
        self.inner.borrow().results.clone()
    }
}

impl Presenter for RecordingPresenter {
    fn clear(&mut self) {}

    fn show_level_select(&mut self, _levels: &[LevelEntry]) {}

    fn show_selection(&mut self, index: usize, _high_score: f64) {
        self.inner.borrow_mut().selections.push(index);
    }

    fn show_confirmed(&mut self, index: usize) {
        self.inner.borrow_mut().confirmed.push(index);
    }

    fn show_play_header(&mut self, _song_name: &str, _length_seconds: f64) {}

    fn show_play_frame(&mut self, snapshot: &PlaySnapshot) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        inner.play_frames += 1;
        inner.last_frame = Some(snapshot.clone());
        Ok(())
    }

    fn show_results(&mut self, results: &ResultsSummary) {
        self.inner.borrow_mut().results.push(results.clone());
    }

    fn show_results_prompt(&mut self, _visible: bool) {}
}

/// High score store in memory, counting saves.
#[derive(Clone, Default)]
pub struct MemoryHighScores {
    table: Rc<RefCell<HighScoreTable>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryHighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, level_id: &str, score: f64) {
        self.table.borrow_mut().set(level_id, score);
    }

    pub fn get(&self, level_id: &str) -> Option<f64> {
        self.table.borrow().scores.get(level_id).copied()
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryHighScores {
    fn load(&self) -> Result<HighScoreTable, String> {
        Ok(self.table.borrow().clone())
    }

    fn save(&mut self, table: &HighScoreTable) -> Result<(), String> {
        *self.table.borrow_mut() = table.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
