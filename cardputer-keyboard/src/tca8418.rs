//! TCA8418 I2C driver for the Cardputer keyboard.
//!
//! The TCA8418 scans the key matrix itself and queues press/release events
//! in a 10-deep FIFO. We enable every row and column, turn on key-event
//! interrupts, and drain the FIFO through the KEY_EVENT_A register.

use embedded_hal::i2c::I2c;
use log::info;

use crate::error::Fault;
use crate::source::{EventSource, RawEvents};

/// TCA8418 I2C address (fixed by the part).
pub const DEFAULT_ADDRESS: u8 = 0x34;

// TCA8418 register addresses
pub(crate) const CFG: u8 = 0x01; // Configuration
pub(crate) const INT_STAT: u8 = 0x02; // Interrupt status
pub(crate) const KEY_EVENT_A: u8 = 0x04; // Head of the key event FIFO
pub(crate) const KP_GPIO1: u8 = 0x1D; // Keypad selection, ROW0-7
pub(crate) const KP_GPIO2: u8 = 0x1E; // Keypad selection, COL0-7
pub(crate) const KP_GPIO3: u8 = 0x1F; // Keypad selection, COL8-9

/// CFG bits: auto-increment, GPI interrupt enable, key event interrupt enable.
const CFG_AI: u8 = 0x80;
const CFG_GPI_IEN: u8 = 0x02;
const CFG_KE_IEN: u8 = 0x01;

/// INT_STAT bit 0: key event pending. Written back as 1 to clear.
pub(crate) const K_INT: u8 = 0x01;

/// Register writes performed once at power-on, in order.
pub(crate) const INIT_SEQUENCE: [(u8, u8); 4] = [
    (KP_GPIO1, 0xFF),
    (KP_GPIO2, 0xFF),
    (KP_GPIO3, 0x03),
    (CFG, CFG_AI | CFG_GPI_IEN | CFG_KE_IEN),
];

pub struct Tca8418<I2C> {
    i2c: I2C,
    address: u8,
    initialized: bool,
}

impl<I2C: I2c> Tca8418<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            initialized: false,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Whether the register setup has succeeded. Until it has, polls report
    /// no events and do not touch the bus.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Configure the keypad matrix and interrupts.
    pub fn init(&mut self) -> Result<(), Fault<I2C::Error>> {
        self.configure().map_err(Fault::Initialization)?;
        self.initialized = true;
        Ok(())
    }

    /// Try to re-initialize if the controller was not configured.
    pub fn try_reinit(&mut self) -> bool {
        if !self.initialized && self.init().is_ok() {
            info!("keyboard controller at 0x{:02X} initialized", self.address);
        }
        self.initialized
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn configure(&mut self) -> Result<(), I2C::Error> {
        for (reg, value) in INIT_SEQUENCE {
            self.write_register(reg, value)?;
        }
        Ok(())
    }

    /// Read pending events into `events` until the FIFO reports empty, the
    /// sentinel `0x00` is read, or `events` is full.
    ///
    /// On a bus fault `events` keeps everything read before it.
    fn read_events(&mut self, events: &mut RawEvents) -> Result<(), Fault<I2C::Error>> {
        let mut status = self.read_register(INT_STAT).map_err(Fault::TransientIo)?;
        while status & K_INT != 0 && !events.is_full() {
            let event = self
                .read_register(KEY_EVENT_A)
                .map_err(Fault::TransientIo)?;
            if event == 0 {
                break;
            }
            // Cannot fail, fullness was checked above.
            let _ = events.push(event);

            self.write_register(INT_STAT, K_INT)
                .map_err(Fault::TransientIo)?;
            status = self.read_register(INT_STAT).map_err(Fault::TransientIo)?;
        }
        Ok(())
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[reg, value])
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(buf[0])
    }
}

impl<I2C: I2c> EventSource for Tca8418<I2C> {
    fn drain_events(&mut self) -> RawEvents {
        let mut events = RawEvents::new();
        if !self.initialized {
            return events;
        }
        if let Err(fault) = self.read_events(&mut events) {
            fault.absorb();
        }
        events
    }
}
