use super::events::GameKey;
use crate::models::constants::NUM_LANES;
use crate::models::settings::KeySettings;
use crossterm::event::KeyCode;
use std::collections::HashMap;

/// Physical terminal keys bound to game keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    binds: HashMap<KeyCode, GameKey>,
}

impl KeyBindings {
    pub fn from_settings(keys: &KeySettings) -> Self {
        let mut bindings = Self {
            binds: HashMap::new(),
        };

        bindings.bind(&keys.menu_previous, GameKey::MenuPrevious);
        bindings.bind(&keys.menu_next, GameKey::MenuNext);
        bindings.bind(&keys.menu_confirm, GameKey::MenuConfirm);
        bindings.bind(&keys.exit, GameKey::Exit);

        if keys.lanes.len() != NUM_LANES {
            log::warn!(
                "INPUT: {} lane keys configured for {} lanes",
                keys.lanes.len(),
                NUM_LANES
            );
        }
        // Lanes go last so they win over a menu key bound to the same code.
        for (lane, name) in keys.lanes.iter().take(NUM_LANES).enumerate() {
            bindings.bind(name, GameKey::Lane(lane));
        }

        bindings
    }

    fn bind(&mut self, name: &str, key: GameKey) {
        match parse_keycode(name) {
            Some(code) => {
                self.binds.insert(code, key);
            }
            None => log::warn!("INPUT: Unknown key name in settings: {}", name),
        }
    }

    pub fn resolve(&self, code: KeyCode) -> Option<GameKey> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.binds.get(&code).copied()
    }
}

pub fn parse_keycode(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match s {
        "Up" => Some(KeyCode::Up),
        "Down" => Some(KeyCode::Down),
        "Left" => Some(KeyCode::Left),
        "Right" => Some(KeyCode::Right),
        "Enter" => Some(KeyCode::Enter),
        "Esc" | "Escape" => Some(KeyCode::Esc),
        "Space" => Some(KeyCode::Char(' ')),
        "Tab" => Some(KeyCode::Tab),
        "Backspace" => Some(KeyCode::Backspace),
        _ => s
            .strip_prefix('F')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}
