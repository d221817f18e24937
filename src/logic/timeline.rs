//! Per-lane note queues of a play session.
//!
//! Notes move from a lane's pending queue to its active queue when they
//! scroll in, and from the active queue to the played batch once they are
//! past their resolvable window.

use crate::logic::judge::JudgeWindows;
use crate::models::level::Level;
use crate::models::note::{Note, NoteState};

/// Dead prefix size from which `LaneQueue` compacts its storage.
const COMPACT_THRESHOLD: usize = 64;

/// FIFO of active notes: a growable array plus a head cursor.
///
/// Everything before `head` has been evicted. Indices handed out by
/// `as_slice` are relative to the head.
#[derive(Debug, Clone, Default)]
pub struct LaneQueue {
    notes: Vec<Note>,
    head: usize,
}

impl LaneQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len() - self.head
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push_back(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn front(&self) -> Option<&Note> {
        self.notes.get(self.head)
    }

    pub fn front_mut(&mut self) -> Option<&mut Note> {
        self.notes.get_mut(self.head)
    }

    pub fn pop_front(&mut self) -> Option<Note> {
        let note = *self.notes.get(self.head)?;
        self.head += 1;
        self.compact();
        Some(note)
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes[self.head..]
    }

    pub fn as_mut_slice(&mut self) -> &mut [Note] {
        &mut self.notes[self.head..]
    }

    fn compact(&mut self) {
        if self.head == self.notes.len() {
            self.notes.clear();
            self.head = 0;
        } else if self.head >= COMPACT_THRESHOLD && self.head * 2 >= self.notes.len() {
            self.notes.drain(..self.head);
            self.head = 0;
        }
    }
}

/// How a note left the active queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    /// Judged, then outlived its resolvable window.
    Resolved,
    /// Expired while still `Active`. Its miss has not been registered yet.
    Expired,
}

/// A note that left the active queue this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedNote {
    pub note: Note,
    pub eviction: Eviction,
}

impl PlayedNote {
    fn at_end(mut note: Note) -> Self {
        let eviction = if note.state.is_judged() {
            Eviction::Resolved
        } else {
            note.transition(NoteState::Missed);
            Eviction::Expired
        };
        Self { note, eviction }
    }
}

#[derive(Debug, Clone, Default)]
struct LaneTimeline {
    pending: Vec<Note>,
    next_pending: usize,
    active: LaneQueue,
}

pub struct NoteTimeline {
    lanes: Vec<LaneTimeline>,
    lead_time: f64,
    played: Vec<PlayedNote>,
}

impl NoteTimeline {
    pub fn from_level(level: &Level) -> Self {
        let lanes = (0..level.lane_count())
            .map(|lane| LaneTimeline {
                pending: level.lane_notes(lane).to_vec(),
                next_pending: 0,
                active: LaneQueue::new(),
            })
            .collect();

        Self {
            lanes,
            lead_time: level.lane_length_seconds(),
            played: Vec::new(),
        }
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn lead_time(&self) -> f64 {
        self.lead_time
    }

    /// Moves every note whose scroll-in time has been reached into its lane's
    /// active queue.
    pub fn activate_notes_for_time(&mut self, time: f64) {
        let lead_time = self.lead_time;
        for lane in &mut self.lanes {
            while let Some(note) = lane.pending.get(lane.next_pending) {
                if time < note.start - lead_time {
                    break;
                }
                let mut note = *note;
                note.state = NoteState::Active;
                lane.active.push_back(note);
                lane.next_pending += 1;
            }
        }
    }

    /// Evicts, from the front of each lane, every note past its resolvable
    /// window into the played batch.
    pub fn remove_notes_for_time(&mut self, time: f64, windows: &JudgeWindows) {
        for lane in &mut self.lanes {
            while let Some(front) = lane.active.front_mut() {
                let eviction = match front.state {
                    NoteState::Pressed | NoteState::Missed
                        if !windows.is_within_resolvable_window(front, time) =>
                    {
                        Eviction::Resolved
                    }
                    // Only reached when notes are evicted without a judge pass.
                    NoteState::Active if time > front.end + windows.press_late => {
                        front.transition(NoteState::Missed);
                        Eviction::Expired
                    }
                    _ => break,
                };

                if let Some(note) = lane.active.pop_front() {
                    self.played.push(PlayedNote { note, eviction });
                }
            }
        }
    }

    /// Evicts every note left, pending ones included. Notes without a verdict
    /// expire as misses.
    pub fn remove_all_notes(&mut self) {
        for lane in &mut self.lanes {
            while let Some(note) = lane.active.pop_front() {
                self.played.push(PlayedNote::at_end(note));
            }
            for note in lane.pending.drain(lane.next_pending..) {
                self.played.push(PlayedNote::at_end(note));
            }
        }
    }

    /// Active notes of a lane, oldest first.
    pub fn active_notes(&self, lane: usize) -> &[Note] {
        self.lanes[lane].active.as_slice()
    }

    pub fn active_notes_mut(&mut self, lane: usize) -> &mut [Note] {
        self.lanes[lane].active.as_mut_slice()
    }

    /// Notes evicted since the last `clear_played_notes`.
    pub fn played_notes(&self) -> &[PlayedNote] {
        &self.played
    }

    pub fn clear_played_notes(&mut self) {
        self.played.clear();
    }

    /// Notes not yet evicted, pending ones included.
    pub fn remaining_notes(&self) -> usize {
        self.lanes
            .iter()
            .map(|lane| lane.pending.len() - lane.next_pending + lane.active.len())
            .sum()
    }
}
