//! One play-through of a level.
//!
//! Every frame runs activate, judge, evict and score, in that order, before
//! the next frame can start.

use crate::input::events::GameKey;
use crate::logic::judge::{JudgeWindows, LaneEdges, Verdict, judge_lane};
use crate::logic::score::{ScoreSink, ScoreTracker};
use crate::logic::timeline::{Eviction, NoteTimeline};
use crate::models::level::Level;
use crate::models::note::NoteState;
use crate::shared::ports::InputEdges;
use crate::shared::snapshot::PlaySnapshot;

/// What one frame registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub hits: u32,
    pub misses: u32,
    /// At least one miss broke a big combo.
    pub big_combo_loss: bool,
}

pub struct PlaySession {
    level: Level,
    timeline: NoteTimeline,
    windows: JudgeWindows,
    error_display_duration: f64,
    /// Time of the latest miss of each lane.
    last_mistakes: Vec<f64>,
}

impl PlaySession {
    pub fn new(level: Level, windows: JudgeWindows, error_display_duration: f64) -> Self {
        let timeline = NoteTimeline::from_level(&level);
        // Far enough in the past that no lane starts flagged.
        let last_mistakes = vec![-2.0 * error_display_duration - 1.0; timeline.lane_count()];
        Self {
            level,
            timeline,
            windows,
            error_display_duration,
            last_mistakes,
        }
    }

    pub fn timeline(&self) -> &NoteTimeline {
        &self.timeline
    }

    /// Runs one frame at song time `time`.
    pub fn update(&mut self, time: f64, input: &dyn InputEdges, score: &mut dyn ScoreSink) -> FrameReport {
        let mut report = FrameReport::default();

        self.timeline.activate_notes_for_time(time);

        for lane in 0..self.timeline.lane_count() {
            let key = GameKey::Lane(lane);
            let edges = LaneEdges {
                pressed: input.was_pressed(key),
                released: input.was_released(key),
            };

            match judge_lane(self.timeline.active_notes_mut(lane), time, edges, &self.windows) {
                Some(Verdict::Pressed) => {
                    log::debug!("LOGIC: Lane {} pressed at {:.3}s", lane, time);
                }
                Some(Verdict::Missed(cause)) => {
                    log::debug!("LOGIC: Lane {} missed at {:.3}s ({:?})", lane, time, cause);
                    record_miss(&mut self.last_mistakes, lane, time, score, &mut report);
                }
                None => {}
            }
        }

        self.timeline.remove_notes_for_time(time, &self.windows);
        self.score_played_notes(time, score, &mut report);

        report
    }

    /// Scores every note the song ended on, pending ones included. Held
    /// notes count as hits and unjudged notes as misses.
    pub fn finish(&mut self, time: f64, score: &mut dyn ScoreSink) -> FrameReport {
        let mut report = FrameReport::default();
        let remaining = self.timeline.remaining_notes();
        if remaining > 0 {
            log::debug!("LOGIC: Song ended with {} notes left", remaining);
        }

        self.timeline.remove_all_notes();
        self.score_played_notes(time, score, &mut report);
        report
    }

    /// Registers the played batch, then clears it.
    fn score_played_notes(&mut self, time: f64, score: &mut dyn ScoreSink, report: &mut FrameReport) {
        let Self {
            timeline,
            last_mistakes,
            ..
        } = self;
        for played in timeline.played_notes() {
            match (played.eviction, played.note.state) {
                (Eviction::Resolved, NoteState::Pressed) => {
                    score.register_hit(played.note.hit_value());
                    report.hits += 1;
                }
                (Eviction::Expired, _) => {
                    log::debug!(
                        "LOGIC: Lane {} note at {:.3}s expired",
                        played.note.lane,
                        played.note.start
                    );
                    record_miss(last_mistakes, played.note.lane, time, score, report);
                }
                // Registered when it was judged.
                (Eviction::Resolved, _) => {}
            }
        }
        timeline.clear_played_notes();
    }

    /// The song is over once `time` passes its length.
    pub fn is_finished(&self, time: f64) -> bool {
        time > self.level.length_seconds()
    }

    /// A lane stays flagged for `error_display_duration` after its last miss.
    pub fn lane_has_recent_mistake(&self, lane: usize, time: f64) -> bool {
        time - self.last_mistakes[lane] <= self.error_display_duration
    }

    pub fn snapshot(&self, time: f64, input: &dyn InputEdges, score: &ScoreTracker, level_id: &str) -> PlaySnapshot {
        let lane_count = self.timeline.lane_count();
        PlaySnapshot {
            elapsed: time,
            lane_length: self.timeline.lead_time(),
            lanes: (0..lane_count)
                .map(|lane| self.timeline.active_notes(lane).to_vec())
                .collect(),
            keys_held: (0..lane_count)
                .map(|lane| input.is_held(GameKey::Lane(lane)))
                .collect(),
            recent_mistakes: (0..lane_count)
                .map(|lane| self.lane_has_recent_mistake(lane, time))
                .collect(),
            score: score.score(),
            combo: score.combo(),
            is_full_combo: score.is_full_combo(),
            missed_notes: score.missed_notes(),
            high_score: score.high_score(level_id),
            is_high_score: score.is_high_score(level_id),
            remaining_notes: self.timeline.remaining_notes(),
        }
    }
}

fn record_miss(
    last_mistakes: &mut [f64],
    lane: usize,
    time: f64,
    score: &mut dyn ScoreSink,
    report: &mut FrameReport,
) {
    let event = score.register_miss();
    last_mistakes[lane] = time;
    report.misses += 1;
    if event.is_big_combo_loss {
        log::debug!("LOGIC: Combo of {} lost", event.combo_before_miss);
        report.big_combo_loss = true;
    }
}
