//! Gameplay logic: frame pacing, judgment, note queues, scoring and audio.
//!
//! Everything here runs on the gameplay thread. The only data coming from
//! another thread are key transitions, read through `InputEdges`.

pub mod audio;
pub mod judge;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod timeline;
