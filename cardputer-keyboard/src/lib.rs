//! Keyboard driver for the M5Stack Cardputer (TCA8418 controller).
//!
//! This driver implements:
//! - Draining press/release events from the TCA8418 over `embedded-hal` I2C
//! - Shift and function latches that persist across polls
//! - Three-layer key labels (base, shift, function) with fall-through
//! - The "GO" button on an active-low GPIO
//! - New-key detection between consecutive polls
//!
//! Bus faults never reach the caller: a failed poll just reports fewer keys.
//!
//! ```ignore
//! let mut keyboard = Keyboard::new(i2c, go_pin);
//! loop {
//!     for label in keyboard.get_new_keys() {
//!         handle(label);
//!     }
//!     delay.delay_ms(10);
//! }
//! ```

#![cfg_attr(not(test), no_std)]

mod edge;
mod error;
mod source;
mod tca8418;

#[cfg(test)]
mod testing;

use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;
use heapless::Vec;
use log::debug;

use cardputer_keymap::{resolve, KeyEvent, ModifierLatches, ModifierTracker};

pub use cardputer_keymap::Label;
pub use edge::EdgeDetector;
pub use error::Fault;
pub use source::{EventSource, RawEvents, MAX_EVENTS_PER_POLL};
pub use tca8418::{Tca8418, DEFAULT_ADDRESS};

/// Label reported while the GO button is held.
pub const GO_LABEL: Label = "GO";

/// Room for one label per drained event plus GO.
pub const KEY_STATE_CAPACITY: usize = MAX_EVENTS_PER_POLL + 1;

/// Labels produced by one poll, in the order the events were drained.
pub type KeyState = Vec<Label, KEY_STATE_CAPACITY>;

pub struct Keyboard<S, P> {
    source: S,
    go: P,
    modifiers: ModifierTracker,
    edges: EdgeDetector,
}

impl<I2C: I2c, P: InputPin> Keyboard<Tca8418<I2C>, P> {
    /// Set up the controller at its default address.
    ///
    /// A failed register setup is logged and the keyboard comes up in
    /// degraded mode, reporting only the GO button until
    /// [`try_reinit`](Self::try_reinit) succeeds.
    pub fn new(i2c: I2C, go: P) -> Self {
        Self::with_address(i2c, go, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, go: P, address: u8) -> Self {
        let mut controller = Tca8418::new(i2c, address);
        if let Err(fault) = controller.init() {
            fault.absorb();
        }
        Self::from_source(controller, go)
    }

    /// Retry controller setup if it has not succeeded yet.
    pub fn try_reinit(&mut self) -> bool {
        self.source.try_reinit()
    }

    pub fn controller(&self) -> &Tca8418<I2C> {
        &self.source
    }
}

impl<S: EventSource, P: InputPin> Keyboard<S, P> {
    pub fn from_source(source: S, go: P) -> Self {
        Self {
            source,
            go,
            modifiers: ModifierTracker::new(),
            edges: EdgeDetector::new(),
        }
    }

    /// Labels of every key activated since the last poll.
    ///
    /// Also becomes the reference snapshot for the next
    /// [`get_new_keys`](Self::get_new_keys).
    pub fn get_pressed_keys(&mut self) -> KeyState {
        let state = self.poll();
        self.edges.retain(&state);
        state
    }

    /// Labels of this poll that were not reported by the previous one.
    pub fn get_new_keys(&mut self) -> KeyState {
        let state = self.poll();
        self.edges.new_keys(&state)
    }

    /// Current shift and function latches.
    pub fn modifiers(&self) -> ModifierLatches {
        self.modifiers.latches()
    }

    /// Take the event source and GO pin back.
    pub fn release(self) -> (S, P) {
        (self.source, self.go)
    }

    fn go_pressed(&mut self) -> bool {
        // Active low. A pin that cannot be read counts as released.
        match self.go.is_low() {
            Ok(level) => level,
            Err(_) => false,
        }
    }

    fn poll(&mut self) -> KeyState {
        let mut state = KeyState::new();
        if self.go_pressed() {
            // Capacity covers GO plus a full drain, so pushes cannot fail.
            let _ = state.push(GO_LABEL);
        }

        let events = self.source.drain_events();
        if !events.is_empty() {
            debug!("drained {} key events", events.len());
        }

        for &raw in events.iter() {
            let event = KeyEvent::decode(raw);
            if self.modifiers.observe(event) {
                continue;
            }
            if let Some(label) = resolve(event.key, event.pressed, self.modifiers.latches()) {
                let _ = state.push(label);
            }
        }

        state
    }
}
