//! Channel between the input thread and the gameplay thread.
//!
//! The input thread only sends; the gameplay thread drains the receiver once
//! per loop iteration through `InputState`.

use crate::input::events::InputEvent;
use crossbeam_channel::{Receiver, Sender, unbounded};

#[derive(Clone)]
pub struct SystemBus {
    /// Input -> Logic: key transitions.
    pub input_tx: Sender<InputEvent>,
    pub input_rx: Receiver<InputEvent>,
}

impl SystemBus {
    pub fn new() -> Self {
        let (input_tx, input_rx) = unbounded();
        Self { input_tx, input_rx }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
