//! Presenter writing what the player should see to the log.
//!
//! Per-frame output is only emitted when something visible changed, so a
//! 60 fps play step does not flood the log.

use crate::models::level::LevelEntry;
use crate::shared::ports::Presenter;
use crate::shared::snapshot::{PlaySnapshot, ResultsSummary};

/// Values of a play frame worth a new log line when they change.
#[derive(Debug, Clone, PartialEq)]
struct FrameKey {
    second: u64,
    score: f64,
    combo: u32,
    missed_notes: u32,
    keys_held: Vec<bool>,
    recent_mistakes: Vec<bool>,
}

#[derive(Default)]
pub struct LogPresenter {
    levels: Vec<LevelEntry>,
    last_frame: Option<FrameKey>,
    prompt_visible: Option<bool>,
    lines: usize,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines emitted so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    fn emit(&mut self, line: String) {
        log::info!("VIEW: {}", line);
        self.lines += 1;
    }

    fn level_name(&self, index: usize) -> &str {
        self.levels.get(index).map(|level| level.name.as_str()).unwrap_or("?")
    }
}

/// One character per lane: `x` recent mistake, `#` held, `.` idle.
fn lane_bar(snapshot: &PlaySnapshot) -> String {
    snapshot
        .keys_held
        .iter()
        .zip(&snapshot.recent_mistakes)
        .map(|(&held, &mistake)| match (mistake, held) {
            (true, _) => 'x',
            (false, true) => '#',
            (false, false) => '.',
        })
        .collect()
}

impl Presenter for LogPresenter {
    fn clear(&mut self) {
        self.last_frame = None;
        self.prompt_visible = None;
    }

    fn show_level_select(&mut self, levels: &[LevelEntry]) {
        self.levels = levels.to_vec();
        self.emit(format!("{} levels", levels.len()));
        for (i, level) in levels.iter().enumerate() {
            self.emit(format!("  {}. {}", i + 1, level.name));
        }
    }

    fn show_selection(&mut self, index: usize, high_score: f64) {
        let line = format!("> {} (best {:.1})", self.level_name(index), high_score);
        self.emit(line);
    }

    fn show_confirmed(&mut self, index: usize) {
        let line = format!("Starting {}", self.level_name(index));
        self.emit(line);
    }

    fn show_play_header(&mut self, song_name: &str, length_seconds: f64) {
        self.emit(format!("{} ({}s)", song_name, length_seconds as u64));
    }

    fn show_play_frame(&mut self, snapshot: &PlaySnapshot) -> Result<(), String> {
        let key = FrameKey {
            second: snapshot.elapsed as u64,
            score: snapshot.score,
            combo: snapshot.combo,
            missed_notes: snapshot.missed_notes,
            keys_held: snapshot.keys_held.clone(),
            recent_mistakes: snapshot.recent_mistakes.clone(),
        };
        if self.last_frame.as_ref() == Some(&key) {
            return Ok(());
        }

        let mut line = format!(
            "{:>3}s [{}] score {:.1} combo {} missed {}",
            key.second,
            lane_bar(snapshot),
            snapshot.score,
            snapshot.combo,
            snapshot.missed_notes
        );
        if snapshot.is_full_combo {
            line.push_str(" FC");
        }
        if snapshot.is_high_score {
            line.push_str(" NEW BEST");
        } else {
            line.push_str(&format!(" (best {:.1})", snapshot.high_score));
        }

        self.emit(line);
        self.last_frame = Some(key);
        Ok(())
    }

    fn show_results(&mut self, results: &ResultsSummary) {
        self.emit(format!(
            "Score {:.1}{}",
            results.score,
            if results.is_high_score { " (new high score!)" } else { "" }
        ));
        self.emit(format!(
            "Accuracy {:.1}% ({}/{})",
            results.accuracy * 100.0,
            results.notes_hit,
            results.notes_total
        ));
        self.emit(format!(
            "Max combo {}, missed {}",
            results.max_combo, results.missed_notes
        ));
    }

    fn show_results_prompt(&mut self, visible: bool) {
        if self.prompt_visible == Some(visible) {
            return;
        }
        self.prompt_visible = Some(visible);
        if visible {
            self.emit("Press confirm to continue".to_string());
        }
    }
}
