//! Read-only captures of game state handed to the presenter.
//!
//! Snapshots are built once per frame by the logic side; the presenter never
//! touches gameplay state directly.

use crate::models::note::Note;

/// Gameplay state of one play frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaySnapshot {
    /// Time since the play step started, in seconds.
    pub elapsed: f64,
    /// Scroll lead time of the lanes, in seconds.
    pub lane_length: f64,

    /// Active notes of every lane, oldest first.
    pub lanes: Vec<Vec<Note>>,
    /// Per-lane key held state.
    pub keys_held: Vec<bool>,
    /// Lanes with a miss inside the error display duration.
    pub recent_mistakes: Vec<bool>,

    pub score: f64,
    pub combo: u32,
    pub is_full_combo: bool,
    pub missed_notes: u32,
    pub high_score: f64,
    pub is_high_score: bool,
    /// Notes not yet played, pending ones included.
    pub remaining_notes: usize,
}

/// End-of-level summary.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsSummary {
    pub score: f64,
    pub is_high_score: bool,
    /// Hit ratio in `[0, 1]`.
    pub accuracy: f64,
    pub notes_hit: u32,
    pub notes_total: u32,
    pub max_combo: u32,
    pub missed_notes: u32,
}
