use crate::{lookup, KeyClass, KeyId, Label, ModifierLatches};

/// Resolve one decoded event to at most one label.
///
/// - Latch keys (shift, function) never produce a label.
/// - Hold keys (control, alt, option) produce their base label on press.
/// - Regular keys produce a layered label on press, see [`crate::KeyMapping::label`].
/// - Releases and unmapped identifiers produce nothing.
pub fn resolve(key: KeyId, pressed: bool, latches: ModifierLatches) -> Option<Label> {
    if !pressed {
        return None;
    }
    match KeyClass::of(key) {
        KeyClass::Latch(_) => None,
        KeyClass::Hold => lookup(key)?.base,
        KeyClass::Regular => lookup(key)?.label(latches),
    }
}
