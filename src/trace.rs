//! TraceEntry: records every event popped by the simulation loop.

use crate::event::EventId;
use crate::label::Label;

/// A record of a single dispatched event.
///
/// Appended by [`Simulation`](crate::simulation::Simulation) when
/// `record_trace` is enabled in its config. Useful for test assertions
/// and waveform-style post-mortem inspection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEntry<S, T> {
    /// Time at which the event was dispatched.
    pub time: T,
    /// The queue's unique ID for this event.
    pub event_id: EventId,
    /// The pin that received the signal.
    pub label: Label,
    /// The signal delivered.
    pub signal: S,
}

impl<S: std::fmt::Debug, T: std::fmt::Debug> std::fmt::Display for TraceEntry<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[T={:?} E=#{} P={}] {:?}",
            self.time,
            self.event_id.raw(),
            self.label,
            self.signal,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let entry = TraceEntry {
            time: 12u64,
            event_id: EventId::new(3),
            label: Label::new(5),
            signal: true,
        };
        assert_eq!(entry.to_string(), "[T=12 E=#3 P=#5] true");
    }
}
