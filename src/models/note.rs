//! Press-and-hold notes and their judgment states.

use super::constants::HIT_VALUE_PER_SECOND;

/// Judgment state of a note.
///
/// The only legal paths are `Active -> Pressed -> Missed` and
/// `Active -> Missed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    /// Scrolled in, waiting for the player.
    Active,
    /// Pressed in time. Still provisional while the key is held.
    Pressed,
    /// Failed (timed out, pressed too early or released too early).
    Missed,
}

impl NoteState {
    /// Returns `true` if moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: NoteState) -> bool {
        matches!(
            (self, next),
            (NoteState::Active, NoteState::Pressed)
                | (NoteState::Active, NoteState::Missed)
                | (NoteState::Pressed, NoteState::Missed)
        )
    }

    /// Returns `true` once the note has received a verdict.
    pub fn is_judged(self) -> bool {
        !matches!(self, NoteState::Active)
    }
}

/// A single note of a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Lane the note belongs to.
    pub lane: usize,
    /// Time the key must be pressed, in seconds from song start.
    pub start: f64,
    /// Time the key may be released, in seconds. Always greater than `start`.
    pub end: f64,
    /// Current judgment state.
    pub state: NoteState,
}

impl Note {
    /// Creates a fresh `Active` note.
    pub fn new(lane: usize, start: f64, end: f64) -> Self {
        Self {
            lane,
            start,
            end,
            state: NoteState::Active,
        }
    }

    /// Hold duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Score awarded when the note is played successfully.
    /// Longer holds are worth more.
    pub fn hit_value(&self) -> f64 {
        self.duration() * HIT_VALUE_PER_SECOND
    }

    /// Applies a state transition.
    ///
    /// Returns `false` and leaves the note untouched if the transition
    /// would break monotonicity.
    pub fn transition(&mut self, next: NoteState) -> bool {
        if !self.state.can_transition_to(next) {
            return false;
        }
        self.state = next;
        true
    }
}
