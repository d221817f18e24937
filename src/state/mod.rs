//! Game steps and the manager running them.
//!
//! - `LevelSelect` - level list navigation
//! - `LevelPlay` - one play-through of the selected level
//! - `LevelResults` - end-of-level summary
//!
//! Each step has an init and an update, run by the frame scheduler until the
//! update picks the next step.

pub mod manager;
mod play;
mod results;
mod select;

pub use manager::{Collaborators, GameManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStep {
    LevelSelect,
    LevelPlay,
    LevelResults,
    QuitSuccess,
    QuitError,
}

impl GameStep {
    pub fn is_quit(self) -> bool {
        matches!(self, GameStep::QuitSuccess | GameStep::QuitError)
    }
}
