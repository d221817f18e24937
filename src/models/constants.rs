//! Fixed gameplay constants.

/// Number of parallel lanes, each bound to one key.
pub const NUM_LANES: usize = 4;

/// Points awarded per second of a successfully held note.
pub const HIT_VALUE_PER_SECOND: f64 = 10.0;

/// Coarse sleep between two frame checks of the scheduler.
pub const SCHEDULER_SLEEP_MS: u64 = 1;

/// Sound effect file names, relative to the effects directory.
pub const EFFECT_MENU_NAVIGATE: &str = "menu_navigate.wav";
pub const EFFECT_MENU_CONFIRM: &str = "menu_confirm.wav";
pub const EFFECT_MENU_BACK: &str = "menu_back.wav";
pub const EFFECT_COMBO_BREAK: &str = "combo_break.wav";
