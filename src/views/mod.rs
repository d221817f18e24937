//! Presentation of game state. Text only.

pub mod presenter;

pub use presenter::LogPresenter;
