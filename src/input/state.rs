//! Frame-sampled key state fed by the input thread.

use super::events::{GameKey, InputEvent};
use crate::shared::ports::InputEdges;
use crossbeam_channel::Receiver;
use std::collections::HashMap;

/// State of a single key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    /// Whether the key is currently held down.
    pub held: bool,
    /// Whether the key went down since the last reset.
    pub just_pressed: bool,
    /// Whether the key went up since the last reset.
    pub just_released: bool,
}

impl KeyState {
    pub fn on_press(&mut self) {
        if !self.held {
            self.held = true;
            self.just_pressed = true;
        }
    }

    pub fn on_release(&mut self) {
        if self.held {
            self.held = false;
            self.just_released = true;
        }
    }

    /// Clears the edges, keeping the held state.
    pub fn reset_frame_state(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// `InputEdges` implementation draining the input channel once per poll.
pub struct InputState {
    rx: Receiver<InputEvent>,
    keys: HashMap<GameKey, KeyState>,
}

impl InputState {
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self {
            rx,
            keys: HashMap::new(),
        }
    }

    fn key(&self, key: GameKey) -> KeyState {
        self.keys.get(&key).copied().unwrap_or_default()
    }
}

impl InputEdges for InputState {
    fn was_pressed(&self, key: GameKey) -> bool {
        self.key(key).just_pressed
    }

    fn was_released(&self, key: GameKey) -> bool {
        self.key(key).just_released
    }

    fn is_held(&self, key: GameKey) -> bool {
        self.key(key).held
    }

    fn update_key_states(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            let state = self.keys.entry(event.key).or_default();
            if event.pressed {
                state.on_press();
            } else {
                state.on_release();
            }
        }
    }

    fn reset_key_states(&mut self) {
        for state in self.keys.values_mut() {
            state.reset_frame_state();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_press_is_an_edge_for_one_frame() {
        let (tx, rx) = unbounded();
        let mut input = InputState::new(rx);
        let key = GameKey::Lane(1);

        tx.send(InputEvent::press(key)).unwrap();
        assert!(!input.was_pressed(key));

        input.update_key_states();
        assert!(input.was_pressed(key));
        assert!(input.is_held(key));
        assert!(!input.was_released(key));

        input.reset_key_states();
        assert!(!input.was_pressed(key));
        assert!(input.is_held(key));
    }

    #[test]
    fn test_release_edge() {
        let (tx, rx) = unbounded();
        let mut input = InputState::new(rx);
        let key = GameKey::Lane(0);

        tx.send(InputEvent::press(key)).unwrap();
        input.update_key_states();
        input.reset_key_states();

        tx.send(InputEvent::release(key)).unwrap();
        input.update_key_states();
        assert!(input.was_released(key));
        assert!(!input.is_held(key));
    }

    #[test]
    fn test_edges_survive_several_polls_until_reset() {
        let (tx, rx) = unbounded();
        let mut input = InputState::new(rx);

        tx.send(InputEvent::press(GameKey::MenuConfirm)).unwrap();
        input.update_key_states();
        input.update_key_states();
        assert!(input.was_pressed(GameKey::MenuConfirm));
    }

    #[test]
    fn test_repeated_press_is_ignored() {
        let (tx, rx) = unbounded();
        let mut input = InputState::new(rx);
        let key = GameKey::Lane(2);

        tx.send(InputEvent::press(key)).unwrap();
        input.update_key_states();
        input.reset_key_states();

        tx.send(InputEvent::press(key)).unwrap();
        input.update_key_states();
        assert!(!input.was_pressed(key));
        assert!(input.is_held(key));
    }

    #[test]
    fn test_unknown_keys_are_idle() {
        let (_tx, rx) = unbounded::<InputEvent>();
        let input = InputState::new(rx);
        assert!(!input.was_pressed(GameKey::Exit));
        assert!(!input.was_released(GameKey::Exit));
        assert!(!input.is_held(GameKey::Exit));
    }
}
