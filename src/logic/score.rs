//! Score, combo and high-score tracking.
//!
//! The tracker knows nothing about timing: it only reacts to hit and miss
//! registrations.

use crate::shared::ports::HighScoreStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Best score per level id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreTable {
    #[serde(default)]
    pub scores: HashMap<String, f64>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score of a level, 0 if it was never played.
    pub fn get(&self, level_id: &str) -> f64 {
        self.scores.get(level_id).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, level_id: &str, score: f64) {
        self.scores.insert(level_id.to_string(), score);
    }
}

/// Result of a miss registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissEvent {
    /// Combo count right before the miss.
    pub combo_before_miss: u32,
    /// The broken combo reached the big combo loss threshold.
    pub is_big_combo_loss: bool,
}

/// Receiver of judged note outcomes.
pub trait ScoreSink {
    /// Registers a successfully played note worth `value` points.
    fn register_hit(&mut self, value: f64);
    /// Registers a missed note.
    fn register_miss(&mut self) -> MissEvent;
}

pub struct ScoreTracker {
    score: f64,
    combo: u32,
    max_combo: u32,
    missed_notes: u32,
    played_notes: u32,
    is_full_combo: bool,
    big_combo_loss_threshold: u32,
    high_scores: HighScoreTable,
}

impl ScoreTracker {
    pub fn new(big_combo_loss_threshold: u32) -> Self {
        Self {
            score: 0.0,
            combo: 0,
            max_combo: 0,
            missed_notes: 0,
            played_notes: 0,
            is_full_combo: true,
            big_combo_loss_threshold,
            high_scores: HighScoreTable::new(),
        }
    }

    /// Zeroes the session counters. High scores are kept.
    pub fn reset(&mut self) {
        self.score = 0.0;
        self.combo = 0;
        self.max_combo = 0;
        self.missed_notes = 0;
        self.played_notes = 0;
        self.is_full_combo = true;
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn missed_notes(&self) -> u32 {
        self.missed_notes
    }

    pub fn played_notes(&self) -> u32 {
        self.played_notes
    }

    pub fn notes_hit(&self) -> u32 {
        self.played_notes - self.missed_notes
    }

    pub fn is_full_combo(&self) -> bool {
        self.is_full_combo
    }

    /// Fraction of played notes that were hit, 0 when nothing was played.
    pub fn accuracy(&self) -> f64 {
        if self.played_notes == 0 {
            return 0.0;
        }
        self.notes_hit() as f64 / self.played_notes as f64
    }

    pub fn high_score(&self, level_id: &str) -> f64 {
        self.high_scores.get(level_id)
    }

    /// Returns `true` if the current score beats the level's best.
    pub fn is_high_score(&self, level_id: &str) -> bool {
        self.score > self.high_scores.get(level_id)
    }

    /// Stores the current score as the level's best.
    pub fn update_high_score(&mut self, level_id: &str) {
        self.high_scores.set(level_id, self.score);
    }

    pub fn load_high_scores(&mut self, store: &dyn HighScoreStore) -> Result<(), String> {
        self.high_scores = store.load()?;
        Ok(())
    }

    pub fn save_high_scores(&self, store: &mut dyn HighScoreStore) -> Result<(), String> {
        store.save(&self.high_scores)
    }
}

impl ScoreSink for ScoreTracker {
    fn register_hit(&mut self, value: f64) {
        self.score += value;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.played_notes += 1;
    }

    fn register_miss(&mut self) -> MissEvent {
        let combo_before_miss = self.combo;

        self.missed_notes += 1;
        self.played_notes += 1;
        self.combo = 0;
        self.is_full_combo = false;

        MissEvent {
            combo_before_miss,
            is_big_combo_loss: combo_before_miss >= self.big_combo_loss_threshold,
        }
    }
}
