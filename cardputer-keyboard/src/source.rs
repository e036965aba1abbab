use heapless::Vec;

/// Upper bound on raw events drained in one poll.
///
/// The TCA8418 FIFO holds 10 events; the extra room covers events that
/// arrive while the drain is running. Anything beyond stays queued in the
/// controller for the next poll.
pub const MAX_EVENTS_PER_POLL: usize = 16;

/// Raw event bytes drained in one poll, oldest first.
pub type RawEvents = Vec<u8, MAX_EVENTS_PER_POLL>;

/// Anything that can hand over the controller's pending key events.
pub trait EventSource {
    /// Take all pending raw event bytes, oldest first.
    ///
    /// Never fails: bus faults end the drain early and whatever was read so
    /// far is returned. The `0x00` end-of-queue sentinel is never included.
    fn drain_events(&mut self) -> RawEvents;
}
