//! Fake bus and pins for the driver tests.

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{self, InputPin};
use embedded_hal::i2c::{self, ErrorKind, I2c, NoAcknowledgeSource, Operation};

use crate::source::{EventSource, RawEvents};
use crate::tca8418::{DEFAULT_ADDRESS, INT_STAT, KEY_EVENT_A, K_INT};

/// Register-level model of a TCA8418 with a preloaded event FIFO.
pub struct FakeBus {
    pub address: u8,
    pub registers: [u8; 0x30],
    pub fifo: VecDeque<u8>,
    /// Every register write except INT_STAT acknowledgements, in order.
    pub writes: Vec<(u8, u8)>,
    /// Number of INT_STAT acknowledgements.
    pub acks: usize,
    /// Successful transactions so far.
    pub transactions: usize,
    /// Fail every transaction once this many have succeeded.
    pub fail_after: Option<usize>,
    /// Fail this many upcoming transactions, then recover.
    pub fail_next: usize,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::with_fifo(&[])
    }

    pub fn with_fifo(events: &[u8]) -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            registers: [0; 0x30],
            fifo: events.iter().copied().collect(),
            writes: Vec::new(),
            acks: 0,
            transactions: 0,
            fail_after: None,
            fail_next: 0,
        }
    }

    fn read(&mut self, reg: u8) -> u8 {
        match reg {
            INT_STAT if self.fifo.is_empty() => 0,
            INT_STAT => K_INT,
            KEY_EVENT_A => self.fifo.pop_front().unwrap_or(0),
            _ => self.registers[reg as usize],
        }
    }

    fn write(&mut self, reg: u8, value: u8) {
        if reg == INT_STAT {
            self.acks += 1;
        } else {
            self.registers[reg as usize] = value;
            self.writes.push((reg, value));
        }
    }
}

impl i2c::ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if self.fail_after.is_some_and(|limit| self.transactions >= limit) {
            return Err(ErrorKind::Bus);
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(ErrorKind::Bus);
        }
        self.transactions += 1;

        let mut pointer = 0u8;
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    if let Some(&reg) = bytes.first() {
                        pointer = reg;
                    }
                    if let &[reg, value] = &bytes[..] {
                        self.write(reg, value);
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.read(pointer);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Active-low button with a settable level.
pub struct GoPin {
    pub pressed: bool,
}

impl digital::ErrorType for GoPin {
    type Error = Infallible;
}

impl InputPin for GoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed)
    }
}

/// Pin whose reads always fail.
pub struct BrokenPin;

impl digital::ErrorType for BrokenPin {
    type Error = digital::ErrorKind;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

/// Event source that replays one batch of raw bytes per poll.
#[derive(Default)]
pub struct Script {
    polls: VecDeque<Vec<u8>>,
}

impl Script {
    pub fn new(polls: &[&[u8]]) -> Self {
        Self {
            polls: polls.iter().map(|poll| poll.to_vec()).collect(),
        }
    }
}

impl EventSource for Script {
    fn drain_events(&mut self) -> RawEvents {
        let poll = self.polls.pop_front().unwrap_or_default();
        RawEvents::from_slice(&poll).unwrap()
    }
}
