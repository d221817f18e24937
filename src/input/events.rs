//! Logical keys and the transitions sent by the input thread.

/// A key as the game sees it, independent of the physical binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Key of a gameplay lane.
    Lane(usize),
    MenuPrevious,
    MenuNext,
    MenuConfirm,
    Exit,
}

/// A key going down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: GameKey,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(key: GameKey) -> Self {
        Self { key, pressed: true }
    }

    pub fn release(key: GameKey) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}
