//! Run recorded polls through the real keyboard driver.

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use cardputer_keyboard::{EventSource, Keyboard, Label, RawEvents};
use cardputer_keymap::ModifierLatches;

use crate::capture::CapturedPoll;

/// Hands out one recorded batch of event bytes per poll.
pub struct ScriptedSource {
    polls: VecDeque<Vec<u8>>,
}

impl EventSource for ScriptedSource {
    fn drain_events(&mut self) -> RawEvents {
        let poll = self.polls.pop_front().unwrap_or_default();
        // Same contract as the controller: 0x00 ends the queue.
        poll.into_iter().take_while(|&raw| raw != 0).collect()
    }
}

/// GO button that follows the recorded level, one reading per poll.
pub struct ScriptedPin {
    levels: VecDeque<bool>,
}

impl ErrorType for ScriptedPin {
    type Error = Infallible;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.levels.pop_front().unwrap_or(false))
    }
}

/// Outcome of one replayed poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub labels: Vec<Label>,
    pub modifiers: ModifierLatches,
}

/// Which driver entry point to replay through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Pressed,
    New,
}

pub fn replay(polls: &[CapturedPoll], mode: Mode) -> Vec<PollReport> {
    let source = ScriptedSource {
        polls: polls.iter().map(|poll| poll.events.clone()).collect(),
    };
    let pin = ScriptedPin {
        levels: polls.iter().map(|poll| poll.go).collect(),
    };
    let mut keyboard = Keyboard::from_source(source, pin);

    polls
        .iter()
        .map(|_| {
            let state = match mode {
                Mode::Pressed => keyboard.get_pressed_keys(),
                Mode::New => keyboard.get_new_keys(),
            };
            PollReport {
                labels: state.to_vec(),
                modifiers: keyboard.modifiers(),
            }
        })
        .collect()
}
