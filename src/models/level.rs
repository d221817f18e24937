//! Level data: per-lane notes, song length and scroll lead time.

use super::constants::NUM_LANES;
use super::note::Note;
use serde::{Deserialize, Serialize};

/// One entry of the level list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry {
    /// Level file name. Also the key of its high score.
    #[serde(rename = "file")]
    pub id: String,
    /// Name shown in the level select menu.
    pub name: String,
}

/// A note as written in a level file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoteDef {
    pub lane: usize,
    pub start: f64,
    pub end: f64,
}

/// On-disk layout of a level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    pub song_name: String,
    pub audio_file: String,
    pub length_seconds: f64,
    pub lane_length_seconds: f64,
    #[serde(default)]
    pub notes: Vec<NoteDef>,
}

/// A loaded level. Immutable for the duration of a play session.
#[derive(Debug, Clone)]
pub struct Level {
    song_name: String,
    audio_file: String,
    length_seconds: f64,
    lane_length_seconds: f64,
    lanes: Vec<Vec<Note>>,
}

impl Level {
    /// Builds a level, validating every note and sorting each lane by start time.
    pub fn new(
        song_name: impl Into<String>,
        audio_file: impl Into<String>,
        length_seconds: f64,
        lane_length_seconds: f64,
        notes: impl IntoIterator<Item = Note>,
    ) -> Result<Self, String> {
        if !(length_seconds > 0.0) {
            return Err(format!("Invalid song length: {}", length_seconds));
        }
        if !(lane_length_seconds > 0.0) {
            return Err(format!("Invalid lane length: {}", lane_length_seconds));
        }

        let mut lanes = vec![Vec::new(); NUM_LANES];
        for note in notes {
            if note.lane >= NUM_LANES {
                return Err(format!(
                    "Note at {:.3}s uses lane {} (only {} lanes)",
                    note.start, note.lane, NUM_LANES
                ));
            }
            if !(note.start >= 0.0) || !(note.end > note.start) {
                return Err(format!(
                    "Note in lane {} has an invalid interval [{}, {})",
                    note.lane, note.start, note.end
                ));
            }
            lanes[note.lane].push(note);
        }

        for lane in &mut lanes {
            lane.sort_by(|a, b| a.start.total_cmp(&b.start));
        }

        Ok(Self {
            song_name: song_name.into(),
            audio_file: audio_file.into(),
            length_seconds,
            lane_length_seconds,
            lanes,
        })
    }

    pub fn song_name(&self) -> &str {
        &self.song_name
    }

    pub fn audio_file(&self) -> &str {
        &self.audio_file
    }

    /// Song length in seconds. The play step ends once this is exceeded.
    pub fn length_seconds(&self) -> f64 {
        self.length_seconds
    }

    /// How long before its start a note scrolls in and becomes judgeable.
    pub fn lane_length_seconds(&self) -> f64 {
        self.lane_length_seconds
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Notes of one lane, ordered by start time.
    pub fn lane_notes(&self, lane: usize) -> &[Note] {
        &self.lanes[lane]
    }

    pub fn note_count(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }
}

impl TryFrom<LevelFile> for Level {
    type Error = String;

    fn try_from(file: LevelFile) -> Result<Self, Self::Error> {
        let notes = file
            .notes
            .iter()
            .map(|def| Note::new(def.lane, def.start, def.end));
        Level::new(
            file.song_name,
            file.audio_file,
            file.length_seconds,
            file.lane_length_seconds,
            notes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_are_sorted_by_start() {
        let level = Level::new(
            "Song",
            "song.wav",
            10.0,
            1.5,
            vec![
                Note::new(1, 3.0, 3.5),
                Note::new(1, 1.0, 1.5),
                Note::new(0, 2.0, 2.5),
                Note::new(1, 2.0, 2.2),
            ],
        )
        .unwrap();

        let starts: Vec<f64> = level.lane_notes(1).iter().map(|n| n.start).collect();
        assert_eq!(starts, vec![1.0, 2.0, 3.0]);
        assert_eq!(level.lane_notes(0).len(), 1);
        assert!(level.lane_notes(3).is_empty());
        assert_eq!(level.note_count(), 4);
        assert_eq!(level.lane_count(), NUM_LANES);
    }

    #[test]
    fn test_rejects_out_of_range_lane() {
        let err = Level::new("Song", "song.wav", 10.0, 1.5, vec![Note::new(NUM_LANES, 1.0, 2.0)])
            .unwrap_err();
        assert!(err.contains("lane"));
    }

    #[test]
    fn test_rejects_empty_interval() {
        assert!(Level::new("Song", "song.wav", 10.0, 1.5, vec![Note::new(0, 2.0, 2.0)]).is_err());
        assert!(Level::new("Song", "song.wav", 10.0, 1.5, vec![Note::new(0, 2.0, 1.0)]).is_err());
    }

    #[test]
    fn test_rejects_non_positive_lengths() {
        assert!(Level::new("Song", "song.wav", 0.0, 1.5, Vec::new()).is_err());
        assert!(Level::new("Song", "song.wav", 10.0, 0.0, Vec::new()).is_err());
    }

    #[test]
    fn test_from_level_file() {
        let content = r#"
            song_name = "Tutorial"
            audio_file = "tutorial.wav"
            length_seconds = 30.0
            lane_length_seconds = 1.5

            [[notes]]
            lane = 2
            start = 1.0
            end = 1.5
        "#;
        let file: LevelFile = toml::from_str(content).unwrap();
        let level = Level::try_from(file).unwrap();

        assert_eq!(level.song_name(), "Tutorial");
        assert_eq!(level.audio_file(), "tutorial.wav");
        assert_eq!(level.lane_notes(2), &[Note::new(2, 1.0, 1.5)]);
    }
}
