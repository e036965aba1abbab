//! Shared keymap definitions and layer resolution for the Cardputer keyboard.
//!
//! This crate is `no_std`-compatible so it can be used by both the on-device
//! driver and the native CLI tool.
//!
//! The TCA8418 reports keys by a 7-bit identifier. Only 56 of the 127
//! possible identifiers are wired on the Cardputer, so the keymap is a fixed
//! 128-slot table indexed by identifier with the unused slots left empty.

#![cfg_attr(not(test), no_std)]

mod event;
mod modifier;
mod resolve;

pub use event::KeyEvent;
pub use modifier::{ModifierLatches, ModifierTracker};
pub use resolve::resolve;

/// Position in the controller's key matrix (1..=127).
pub type KeyId = u8;

/// Semantic key name emitted to callers.
pub type Label = &'static str;

/// Number of slots in the keymap table (one per 7-bit identifier).
pub const KEY_SLOTS: usize = 128;

/// Number of physical rows on the keyboard.
pub const ROWS: usize = 4;
/// Number of physical columns on the keyboard.
pub const COLS: usize = 14;

/// Function latch key.
pub const KC_FN: KeyId = 3;
/// Shift latch key.
pub const KC_SHIFT: KeyId = 7;
/// Control hold key.
pub const KC_CTRL: KeyId = 4;
/// Option hold key.
pub const KC_OPT: KeyId = 8;
/// Alt hold key.
pub const KC_ALT: KeyId = 14;

/// How a key identifier takes part in decoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyClass {
    /// Shift or function: updates a latch, never emits a label.
    Latch(Latch),
    /// Control, alt or option: emits its base label on press only.
    Hold,
    /// Everything else: emits a layered label on press only.
    Regular,
}

/// The two sticky modifiers tracked across polls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Latch {
    Shift,
    Function,
}

impl KeyClass {
    pub const fn of(key: KeyId) -> Self {
        match key {
            KC_SHIFT => KeyClass::Latch(Latch::Shift),
            KC_FN => KeyClass::Latch(Latch::Function),
            KC_CTRL | KC_ALT | KC_OPT => KeyClass::Hold,
            _ => KeyClass::Regular,
        }
    }
}

/// Labels for one key across the three layers.
///
/// An empty slot means "no label in this layer"; resolution falls through
/// to the next lower-precedence layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyMapping {
    pub base: Option<Label>,
    pub shift: Option<Label>,
    pub function: Option<Label>,
}

impl KeyMapping {
    /// Mapping of the latch keys: nothing in any layer.
    pub const EMPTY: KeyMapping = KeyMapping {
        base: None,
        shift: None,
        function: None,
    };

    /// A key that only ever emits its base label.
    pub const fn base_only(base: Label) -> Self {
        Self {
            base: Some(base),
            shift: None,
            function: None,
        }
    }

    /// A key with base and shift labels and an optional function label.
    pub const fn layered(base: Label, shift: Label, function: Option<Label>) -> Self {
        Self {
            base: Some(base),
            shift: Some(shift),
            function,
        }
    }

    /// Pick the label for the given latch state.
    ///
    /// Function beats shift beats base. A held modifier whose slot is empty
    /// falls through instead of suppressing the key.
    pub fn label(&self, latches: ModifierLatches) -> Option<Label> {
        self.function
            .filter(|_| latches.function_held)
            .or(self.shift.filter(|_| latches.shift_held))
            .or(self.base)
    }
}

/// Shorthand aliases for readability.
const fn keys(base: Label, shift: Label) -> KeyMapping {
    KeyMapping::layered(base, shift, None)
}

const fn fn_keys(base: Label, shift: Label, function: Label) -> KeyMapping {
    KeyMapping::layered(base, shift, Some(function))
}

const fn same(label: Label) -> KeyMapping {
    KeyMapping::layered(label, label, Some(label))
}

/// Populated keymap entries, listed by physical column (left to right) and
/// row (top to bottom).
const ENTRIES: &[(KeyId, KeyMapping)] = &[
    // Col 1
    (1, same("ESC")),
    (2, same("TAB")),
    (KC_FN, KeyMapping::EMPTY),
    (KC_CTRL, KeyMapping::base_only("CTL")),
    // Col 2
    (5, fn_keys("1", "!", "F1")),
    (6, keys("q", "Q")),
    (KC_SHIFT, KeyMapping::EMPTY),
    (KC_OPT, KeyMapping::base_only("OPT")),
    // Col 3
    (11, fn_keys("2", "@", "F2")),
    (12, keys("w", "W")),
    (13, keys("a", "A")),
    (KC_ALT, KeyMapping::base_only("ALT")),
    // Col 4
    (15, fn_keys("3", "#", "F3")),
    (16, keys("e", "E")),
    (17, keys("s", "S")),
    (18, keys("z", "Z")),
    // Col 5
    (21, fn_keys("4", "$", "F4")),
    (22, keys("r", "R")),
    (23, keys("d", "D")),
    (24, keys("x", "X")),
    // Col 6
    (25, fn_keys("5", "%", "F5")),
    (26, keys("t", "T")),
    (27, keys("f", "F")),
    (28, keys("c", "C")),
    // Col 7
    (31, fn_keys("6", "^", "F6")),
    (32, keys("y", "Y")),
    (33, keys("g", "G")),
    (34, keys("v", "V")),
    // Col 8
    (35, fn_keys("7", "&", "F7")),
    (36, keys("u", "U")),
    (37, keys("h", "H")),
    (38, keys("b", "B")),
    // Col 9
    (41, fn_keys("8", "*", "F8")),
    (42, keys("i", "I")),
    (43, keys("j", "J")),
    (44, keys("n", "N")),
    // Col 10
    (45, fn_keys("9", "(", "F9")),
    (46, keys("o", "O")),
    (47, keys("k", "K")),
    (48, keys("m", "M")),
    // Col 11
    (51, fn_keys("0", ")", "F10")),
    (52, keys("p", "P")),
    (53, fn_keys("l", "L", "UP")),
    (54, keys(",", "<")),
    // Col 12
    (55, keys("-", "_")),
    (56, keys("[", "{")),
    (57, fn_keys(";", ":", "LEFT")),
    (58, fn_keys(".", ">", "DOWN")),
    // Col 13
    (61, keys("=", "+")),
    (62, keys("]", "}")),
    (63, keys("'", "\"")),
    (64, fn_keys("/", "?", "RIGHT")),
    // Col 14
    (65, fn_keys("BSPC", "BSPC", "DEL")),
    (66, keys("\\", "|")),
    (67, same("ENT")),
    (68, same("SPC")),
];

const fn build_keymap() -> [Option<KeyMapping>; KEY_SLOTS] {
    let mut map = [None; KEY_SLOTS];
    let mut i = 0;
    while i < ENTRIES.len() {
        let (key, mapping) = ENTRIES[i];
        map[key as usize] = Some(mapping);
        i += 1;
    }
    map
}

/// Keymap indexed by key identifier.
pub static KEYMAP: [Option<KeyMapping>; KEY_SLOTS] = build_keymap();

/// Look up the mapping for a key identifier. Unpopulated and out-of-range
/// identifiers have none.
pub fn lookup(key: KeyId) -> Option<&'static KeyMapping> {
    KEYMAP.get(key as usize)?.as_ref()
}

/// Iterate over every populated key in table order.
pub fn mapped_keys() -> impl Iterator<Item = (KeyId, &'static KeyMapping)> {
    ENTRIES.iter().map(|(key, mapping)| (*key, mapping))
}

/// Physical `(row, col)` of a key identifier.
///
/// The TCA8418 numbers keys `row * 10 + col + 1` over its own 8×10 matrix.
/// The Cardputer wires two physical columns of four keys into each
/// controller row, so controller column 0-3 is the left physical column and
/// 4-7 the right one.
pub fn matrix_position(key: KeyId) -> Option<(usize, usize)> {
    if key == 0 || key as usize >= KEY_SLOTS {
        return None;
    }
    let index = key as usize - 1;
    let (ctrl_row, ctrl_col) = (index / 10, index % 10);
    if ctrl_col >= 2 * ROWS {
        return None;
    }
    let col = ctrl_row * 2 + ctrl_col / ROWS;
    if col >= COLS {
        return None;
    }
    Some((ctrl_col % ROWS, col))
}

/// Inverse of [`matrix_position`].
pub fn key_at(row: usize, col: usize) -> Option<KeyId> {
    if row >= ROWS || col >= COLS {
        return None;
    }
    let ctrl_row = col / 2;
    let ctrl_col = (col % 2) * ROWS + row;
    Some((ctrl_row * 10 + ctrl_col + 1) as KeyId)
}
