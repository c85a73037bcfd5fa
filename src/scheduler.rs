/// Deterministic event queue.
///
/// Uses a `BinaryHeap` with reversed `Ord` on `Event` to act as a
/// min-heap keyed by `(time, event_id)`. Event IDs are strictly
/// increasing, so events at equal times pop in insertion order.

use std::collections::BinaryHeap;

use crate::event::{Event, EventId, EventIdGen};
use crate::label::Label;
use crate::time::SimTime;

/// Time-ordered priority queue of `(time, signal, label)` events.
///
/// Scheduled events cannot be cancelled. A solver that needs to revoke
/// an earlier effect has to make the later dispatch a no-op instead.
#[derive(Debug, Clone)]
pub struct EventQueue<S, T> {
    /// Min-heap (via reversed Ord on Event).
    queue: BinaryHeap<Event<S, T>>,

    /// Monotonic event-ID generator.
    id_gen: EventIdGen,
}

impl<S, T: SimTime> EventQueue<S, T> {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        EventQueue {
            queue: BinaryHeap::new(),
            id_gen: EventIdGen::new(),
        }
    }

    /// Schedule `signal` to arrive at `label` at `time`.
    ///
    /// Returns the `EventId` assigned to this event.
    pub fn push(&mut self, time: T, signal: S, label: Label) -> EventId {
        let id = self.id_gen.next_id();
        self.queue.push(Event::new(id, time, signal, label));
        id
    }

    /// Pop the next event (earliest time, lowest ID).
    pub fn pop(&mut self) -> Option<Event<S, T>> {
        self.queue.pop()
    }

    /// Peek at the next event without removing it.
    pub fn peek(&self) -> Option<&Event<S, T>> {
        self.queue.peek()
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of pending events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns the next event ID that will be assigned.
    pub fn next_event_id(&self) -> EventId {
        self.id_gen.peek()
    }

    /// Drain all events in dispatch order into a `Vec`.
    pub fn drain_ordered(&mut self) -> Vec<Event<S, T>> {
        let mut events = Vec::with_capacity(self.queue.len());
        while let Some(e) = self.queue.pop() {
            events.push(e);
        }
        events
    }
}

impl<S, T: SimTime> Default for EventQueue<S, T> {
    fn default() -> Self {
        Self::new()
    }
}
