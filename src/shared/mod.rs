//! Types shared between the gameplay core and its collaborators.

pub mod ports;
pub mod snapshot;

pub use ports::{HighScoreStore, InputEdges, NoteSource, Presenter, SoundPort};
pub use snapshot::{PlaySnapshot, ResultsSummary};
