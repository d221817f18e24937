//! Raw-mode terminal setup for key press and release reporting.

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use std::io::{self, stdout};

/// Keeps the terminal in raw mode until dropped.
pub struct TerminalGuard {
    enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        // Release events need the keyboard enhancement protocol.
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            log::warn!("INPUT: Terminal does not report key releases, every press is a tap");
        }

        Ok(Self { enhanced })
    }

    /// Whether key release events are reported.
    pub fn reports_releases(&self) -> bool {
        self.enhanced
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        if let Err(e) = disable_raw_mode() {
            log::error!("INPUT: Failed to restore terminal: {}", e);
        }
    }
}
