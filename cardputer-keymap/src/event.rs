use crate::KeyId;

/// Press flag in a raw controller event byte.
const PRESS_BIT: u8 = 0x80;
/// Key identifier bits in a raw controller event byte.
const KEY_MASK: u8 = 0x7F;

/// One decoded key transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyId,
    pub pressed: bool,
}

impl KeyEvent {
    /// Split a raw event byte into key identifier and press/release.
    ///
    /// Bit 7 set = press, clear = release; bits 0-6 = key identifier.
    /// The end-of-queue sentinel `0x00` must be filtered out before this.
    pub const fn decode(raw: u8) -> Self {
        Self {
            key: raw & KEY_MASK,
            pressed: raw & PRESS_BIT != 0,
        }
    }

    /// Re-encode into the controller's byte layout.
    pub const fn raw(self) -> u8 {
        if self.pressed {
            self.key | PRESS_BIT
        } else {
            self.key & KEY_MASK
        }
    }
}
