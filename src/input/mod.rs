//! Input thread bootstrapping and frame-sampled key state.

pub mod bindings;
pub mod events;
pub mod state;
pub mod terminal;

use crate::input::bindings::KeyBindings;
use crate::input::events::InputEvent;
use crate::system::bus::SystemBus;
use crossterm::event::{self, Event, KeyEventKind};
use std::thread;

/// Spawns the thread turning terminal key events into `InputEvent`s.
///
/// When the terminal does not report releases, every press is sent as a
/// press immediately followed by a release.
pub fn start_thread(
    bus: SystemBus,
    bindings: KeyBindings,
    reports_releases: bool,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("Input Thread".to_string())
        .spawn(move || {
            log::info!("INPUT: Thread started");

            // Blocking loop: wait for an event, forward it, repeat.
            loop {
                let key = match event::read() {
                    Ok(Event::Key(key)) => key,
                    Ok(_) => continue,
                    Err(e) => {
                        log::error!("INPUT: Failed to read terminal event: {}", e);
                        break;
                    }
                };

                let Some(game_key) = bindings.resolve(key.code) else {
                    continue;
                };
                let events = match key.kind {
                    KeyEventKind::Press if reports_releases => vec![InputEvent::press(game_key)],
                    KeyEventKind::Press => {
                        vec![InputEvent::press(game_key), InputEvent::release(game_key)]
                    }
                    KeyEventKind::Release => vec![InputEvent::release(game_key)],
                    // Auto-repeat is not a new press.
                    _ => continue,
                };

                if let Err(e) = events.into_iter().try_for_each(|event| bus.input_tx.send(event)) {
                    log::error!("INPUT: Failed to send event (Logic thread died?): {}", e);
                    break;
                }
            }

            log::info!("INPUT: Thread stopped");
        })
}
