/// Signal events for the discrete-event simulator.
///
/// An `Event` carries a `signal` that arrives at the pin `label` at
/// `time`. Events are immutable records placed on the
/// [`EventQueue`](crate::scheduler::EventQueue) and dispatched in
/// `(time, id)` order.

use std::cmp::Ordering;

use crate::label::Label;
use crate::time::SimTime;

// ── Event ID ──────────────────────────────────────────────────────────

/// A strictly-increasing event identifier.
///
/// Two events scheduled at the same time are ordered by their `EventId`,
/// which corresponds to insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(u64);

impl EventId {
    /// Wrap a raw u64 into an `EventId`.
    #[inline]
    pub fn new(raw: u64) -> Self {
        EventId(raw)
    }

    /// Return the raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E#{}", self.0)
    }
}

// ── Event ID Generator ───────────────────────────────────────────────

/// Deterministic, strictly-increasing event-ID generator.
#[derive(Debug, Clone, Default)]
pub struct EventIdGen {
    next: u64,
}

impl EventIdGen {
    /// Create a generator starting at 0.
    pub fn new() -> Self {
        EventIdGen { next: 0 }
    }

    /// Mint the next event ID.
    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next);
        self.next += 1;
        id
    }

    /// Peek at the next ID without consuming it.
    pub fn peek(&self) -> EventId {
        EventId(self.next)
    }
}

// ── Event ─────────────────────────────────────────────────────────────

/// A signal arriving at a pin at a point in time.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Event<S, T> {
    /// Insertion-order tiebreaker, assigned by the queue.
    pub id: EventId,

    /// When the signal arrives.
    pub time: T,

    /// The value carried by the event. Opaque to the queue.
    pub signal: S,

    /// Target of the event. On the main queue this is a pin label; inside
    /// a solver call it is a pinout slot index.
    pub label: Label,
}

impl<S, T> Event<S, T> {
    /// Convenience constructor.
    pub fn new(id: EventId, time: T, signal: S, label: Label) -> Self {
        Event {
            id,
            time,
            signal,
            label,
        }
    }
}

/// Ordering: smallest `(time, id)` first.
///
/// `BinaryHeap` is a max-heap, so the natural ordering is reversed here.
impl<S, T: SimTime> Ord for Event<S, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .cmp_time(&self.time)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<S, T: SimTime> PartialOrd for Event<S, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, T: SimTime> PartialEq for Event<S, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S, T: SimTime> Eq for Event<S, T> {}
