//! New-key detection between consecutive polls.
//!
//! Labels are only emitted on a press event, so a key that stays down with
//! no new controller event does not show up in the next snapshot at all.
//! The diff below therefore only removes labels repeated from the previous
//! poll; it cannot tell a held key from a released one.

use crate::KeyState;

#[derive(Debug, Default)]
pub struct EdgeDetector {
    /// Snapshot from the most recent poll.
    previous: KeyState,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self {
            previous: KeyState::new(),
        }
    }

    pub fn previous(&self) -> &KeyState {
        &self.previous
    }

    /// Remember `current` as the snapshot for the next comparison.
    pub fn retain(&mut self, current: &KeyState) {
        self.previous = current.clone();
    }

    /// Labels of `current`, in order, that appear nowhere in the previous
    /// snapshot. `current` becomes the new previous snapshot.
    pub fn new_keys(&mut self, current: &KeyState) -> KeyState {
        let fresh = current
            .iter()
            .copied()
            .filter(|label| !self.previous.contains(label))
            .collect();
        self.retain(current);
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(labels: &[&'static str]) -> KeyState {
        KeyState::from_slice(labels).unwrap()
    }

    #[test]
    fn test_first_poll_is_all_new() {
        let mut edges = EdgeDetector::new();
        let fresh = edges.new_keys(&state(&["GO", "a"]));
        assert_eq!(fresh.as_slice(), &["GO", "a"]);
        assert_eq!(edges.previous().as_slice(), &["GO", "a"]);
    }

    #[test]
    fn test_repeated_labels_dropped() {
        let mut edges = EdgeDetector::new();
        edges.new_keys(&state(&["GO", "a"]));
        let fresh = edges.new_keys(&state(&["GO", "b", "a", "c"]));
        assert_eq!(fresh.as_slice(), &["b", "c"]);
    }

    #[test]
    fn test_duplicates_within_poll_kept() {
        let mut edges = EdgeDetector::new();
        let fresh = edges.new_keys(&state(&["a", "a"]));
        assert_eq!(fresh.as_slice(), &["a", "a"]);
    }

    #[test]
    fn test_only_previous_poll_counts() {
        let mut edges = EdgeDetector::new();
        edges.new_keys(&state(&["a"]));
        edges.new_keys(&state(&[]));
        let fresh = edges.new_keys(&state(&["a"]));
        assert_eq!(fresh.as_slice(), &["a"]);
    }

    #[test]
    fn test_retain_updates_previous() {
        let mut edges = EdgeDetector::new();
        edges.retain(&state(&["x"]));
        assert!(edges.new_keys(&state(&["x"])).is_empty());
    }
}
