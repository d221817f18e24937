//! Plain data: notes, levels, settings.

pub mod constants;
pub mod level;
pub mod note;
pub mod settings;

pub use constants::*;
pub use level::{Level, LevelEntry, LevelFile};
pub use note::{Note, NoteState};
pub use settings::Settings;
