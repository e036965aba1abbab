//! Shift and function latches.
//!
//! These are level latches, not toggles: each tracks the last state the
//! controller reported for its key. They start released and change only
//! when a press or release of the latch key itself is observed.

use crate::{KeyClass, KeyEvent, Latch};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModifierLatches {
    pub shift_held: bool,
    pub function_held: bool,
}

#[derive(Debug, Default)]
pub struct ModifierTracker {
    latches: ModifierLatches,
}

impl ModifierTracker {
    pub const fn new() -> Self {
        Self {
            latches: ModifierLatches {
                shift_held: false,
                function_held: false,
            },
        }
    }

    pub fn latches(&self) -> ModifierLatches {
        self.latches
    }

    /// Feed one event through the tracker.
    ///
    /// Returns `true` if the event was a latch key and has been consumed;
    /// consumed events must not go on to label resolution.
    pub fn observe(&mut self, event: KeyEvent) -> bool {
        match KeyClass::of(event.key) {
            KeyClass::Latch(Latch::Shift) => self.latches.shift_held = event.pressed,
            KeyClass::Latch(Latch::Function) => self.latches.function_held = event.pressed,
            KeyClass::Hold | KeyClass::Regular => return false,
        }
        true
    }
}
