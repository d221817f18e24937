//! Timing, judgment and scoring core of a lane-based rhythm game.

pub mod input;
pub mod logic;
pub mod models;
pub mod shared;
pub mod state;
pub mod storage;
pub mod system;
pub mod views;

#[cfg(test)]
mod test_utils;
