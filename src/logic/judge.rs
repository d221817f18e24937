//! Per-lane note judgment.
//!
//! Each frame, every lane judges at most one note: its bottom note, the
//! first one the player is still responsible for.

use crate::models::note::{Note, NoteState};

/// Judgment tolerances, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgeWindows {
    /// How early before `start` a press still counts.
    pub press_early: f64,
    /// How late after `start` a press still counts. Past it the note times out.
    pub press_late: f64,
    /// How early before `end` the key may be released.
    pub release_early: f64,
    /// How far before the press window an early press still consumes the note.
    pub max_miss_distance: f64,
}

/// Input edges of one lane for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneEdges {
    pub pressed: bool,
    pub released: bool,
}

/// Why a note was missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissCause {
    /// Never pressed within the late tolerance.
    TimedOut,
    /// Pressed before the press window, close enough to consume the note.
    PressedTooEarly,
    /// Released before the hold was long enough.
    ReleasedTooEarly,
}

/// Outcome of judging a lane for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The note became `Pressed`. Its hit is scored when it is evicted.
    Pressed,
    /// The note became `Missed`. The miss must be registered right away.
    Missed(MissCause),
}

impl JudgeWindows {
    /// Returns `true` while a judged note can still change or be released.
    pub fn is_within_resolvable_window(&self, note: &Note, time: f64) -> bool {
        time <= note.end - self.release_early
    }
}

/// Index of the lane's bottom note: the first note still `Active`, or judged
/// but not yet past its resolvable window.
pub fn bottom_note_index(notes: &[Note], time: f64, windows: &JudgeWindows) -> Option<usize> {
    notes.iter().position(|note| {
        note.state == NoteState::Active || windows.is_within_resolvable_window(note, time)
    })
}

/// Judges the bottom note of a lane and applies the resulting transition.
///
/// Returns the verdict if the note changed state this frame.
pub fn judge_lane(
    notes: &mut [Note],
    time: f64,
    edges: LaneEdges,
    windows: &JudgeWindows,
) -> Option<Verdict> {
    let index = bottom_note_index(notes, time, windows)?;
    let note = &mut notes[index];

    let verdict = match note.state {
        NoteState::Active => judge_active(note, time, edges, windows)?,
        NoteState::Pressed => {
            if edges.released && windows.is_within_resolvable_window(note, time) {
                Verdict::Missed(MissCause::ReleasedTooEarly)
            } else {
                return None;
            }
        }
        NoteState::Missed => return None,
    };

    let next = match verdict {
        Verdict::Pressed => NoteState::Pressed,
        Verdict::Missed(_) => NoteState::Missed,
    };
    let applied = note.transition(next);
    debug_assert!(applied, "illegal transition {:?} -> {:?}", note.state, next);

    Some(verdict)
}

fn judge_active(note: &Note, time: f64, edges: LaneEdges, windows: &JudgeWindows) -> Option<Verdict> {
    // Timeout wins over any input in the same frame.
    if time > note.start + windows.press_late {
        return Some(Verdict::Missed(MissCause::TimedOut));
    }
    if !edges.pressed {
        return None;
    }

    let press_window_open = note.start - windows.press_early;
    if time >= press_window_open {
        Some(Verdict::Pressed)
    } else if time + windows.max_miss_distance >= press_window_open {
        Some(Verdict::Missed(MissCause::PressedTooEarly))
    } else {
        None
    }
}
