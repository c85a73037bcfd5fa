/// Simulation execution loop.
///
/// Drives the event queue: pops the earliest event, advances time and
/// dispatches to a handler. For circuits the handler is the
/// [`Circuit`](crate::circuit::Circuit) itself, which routes the event to
/// the solvers of the gates it touches. The loop is synchronous and
/// single-threaded.

use tracing::{trace, warn};

use crate::event::{Event, EventId};
use crate::label::Label;
use crate::scheduler::EventQueue;
use crate::time::SimTime;
use crate::trace::TraceEntry;

// ── Handler trait ─────────────────────────────────────────────────────

/// Reacts to dispatched events.
///
/// The handler receives a [`SimulationContext`] so it can schedule
/// follow-up events.
pub trait EventHandler<S, T> {
    /// Called for every dispatched event.
    fn handle(&mut self, ctx: &mut SimulationContext<'_, S, T>, event: &Event<S, T>);
}

/// A handler backed by a closure, useful for tests and one-off scripts.
impl<S, T, F> EventHandler<S, T> for F
where
    F: FnMut(&mut SimulationContext<'_, S, T>, &Event<S, T>),
{
    fn handle(&mut self, ctx: &mut SimulationContext<'_, S, T>, event: &Event<S, T>) {
        (self)(ctx, event);
    }
}

// ── Simulation Context ───────────────────────────────────────────────

/// Mutable context passed to the handler on every dispatch.
///
/// Scheduling into the past is not rejected. Such events pop out of order
/// relative to already-dispatched ones; that is a caller error.
pub struct SimulationContext<'a, S, T> {
    pub(crate) queue: &'a mut EventQueue<S, T>,
    pub(crate) now: T,
}

impl<S, T: SimTime> SimulationContext<'_, S, T> {
    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> T {
        self.now
    }

    /// Schedule `signal` at pin `label` at an absolute time.
    pub fn schedule_at(&mut self, at: T, signal: S, label: Label) -> EventId {
        self.queue.push(at, signal, label)
    }

    /// Schedule `signal` at pin `label`, `delay` ticks after now.
    pub fn schedule_after(&mut self, delay: u32, signal: S, label: Label) -> EventId {
        let at = self.now.delayed(delay);
        self.queue.push(at, signal, label)
    }

    /// Number of pending events.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}

// ── Configuration ────────────────────────────────────────────────────

/// Budgets and recording options for [`Simulation::run`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig<T> {
    /// Stop after this many events per `run` call.
    pub max_steps: Option<u64>,
    /// Leave events later than this time in the queue.
    pub until: Option<T>,
    /// Keep a [`TraceEntry`] for every dispatched event.
    pub record_trace: bool,
}

impl<T> SimulationConfig<T> {
    /// No budget, no trace.
    pub fn new() -> Self {
        SimulationConfig {
            max_steps: None,
            until: None,
            record_trace: false,
        }
    }

    /// Set the step budget.
    pub fn max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Set the time budget.
    pub fn until(mut self, time: T) -> Self {
        self.until = Some(time);
        self
    }

    /// Enable or disable trace recording.
    pub fn record_trace(mut self, on: bool) -> Self {
        self.record_trace = on;
        self
    }
}

impl<T> Default for SimulationConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a call to [`Simulation::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// No events left.
    QueueEmpty,
    /// `max_steps` events were dispatched.
    StepBudget,
    /// The next event lies beyond `until`.
    TimeBudget,
}

/// Outcome of a [`Simulation::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Events dispatched during this call.
    pub processed: u64,
    /// What ended the run.
    pub stop: StopReason,
}

// ── Simulation ────────────────────────────────────────────────────────

/// Top-level simulation driver.
///
/// Owns the event queue and tracks the current time. Call `run` to
/// execute until the configured budget or an empty queue, or `step` to
/// advance by exactly one event.
#[derive(Debug, Clone)]
pub struct Simulation<S, T> {
    queue: EventQueue<S, T>,
    current_time: Option<T>,
    events_processed: u64,
    config: SimulationConfig<T>,
    trace: Vec<TraceEntry<S, T>>,
}

impl<S: Clone, T: SimTime> Simulation<S, T> {
    /// Create a new simulation with the default config.
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::new())
    }

    /// Create a new simulation with the given config.
    pub fn with_config(config: SimulationConfig<T>) -> Self {
        Simulation {
            queue: EventQueue::new(),
            current_time: None,
            events_processed: 0,
            config,
            trace: Vec::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &SimulationConfig<T> {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next `run`.
    pub fn set_config(&mut self, config: SimulationConfig<T>) {
        self.config = config;
    }

    /// Access the queue directly (e.g. for initial event seeding).
    pub fn queue_mut(&mut self) -> &mut EventQueue<S, T> {
        &mut self.queue
    }

    /// Read-only view of the pending events.
    pub fn queue(&self) -> &EventQueue<S, T> {
        &self.queue
    }

    /// Time of the last dispatched event, `None` before the first step.
    pub fn current_time(&self) -> Option<T> {
        self.current_time
    }

    /// Total events processed so far.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Recorded dispatches (empty unless `record_trace` is on).
    pub fn trace(&self) -> &[TraceEntry<S, T>] {
        &self.trace
    }

    /// Schedule `signal` at pin `label` before or between runs.
    pub fn schedule(&mut self, at: T, signal: S, label: Label) -> EventId {
        self.queue.push(at, signal, label)
    }

    /// Execute a single step: pop one event, advance time, dispatch.
    ///
    /// Returns `Some(event)` if an event was processed, `None` if the
    /// queue is empty.
    pub fn step(&mut self, handler: &mut dyn EventHandler<S, T>) -> Option<Event<S, T>> {
        let event = self.queue.pop()?;

        if let Some(now) = self.current_time {
            if event.time.cmp_time(&now).is_lt() {
                warn!(
                    event = %event.id,
                    time = ?event.time,
                    now = ?now,
                    "event scheduled in the past"
                );
            }
        }
        self.current_time = Some(event.time);
        self.events_processed += 1;
        trace!(event = %event.id, time = ?event.time, pin = %event.label, "dispatch");

        if self.config.record_trace {
            self.trace.push(TraceEntry {
                time: event.time,
                event_id: event.id,
                label: event.label,
                signal: event.signal.clone(),
            });
        }

        let mut ctx = SimulationContext {
            queue: &mut self.queue,
            now: event.time,
        };
        handler.handle(&mut ctx, &event);

        Some(event)
    }

    /// Run until the queue is empty or the configured budget is exhausted.
    pub fn run(&mut self, handler: &mut dyn EventHandler<S, T>) -> RunSummary {
        let config = self.config.clone();
        self.run_with_config(&config, handler)
    }

    /// Run under an explicit config instead of the stored one.
    pub fn run_with_config(
        &mut self,
        config: &SimulationConfig<T>,
        handler: &mut dyn EventHandler<S, T>,
    ) -> RunSummary {
        let start = self.events_processed;
        let stop = loop {
            let processed = self.events_processed - start;
            if config.max_steps.is_some_and(|max| processed >= max) {
                break StopReason::StepBudget;
            }
            let Some(next) = self.queue.peek() else {
                break StopReason::QueueEmpty;
            };
            if let Some(until) = config.until {
                if next.time.cmp_time(&until).is_gt() {
                    break StopReason::TimeBudget;
                }
            }
            self.step(handler);
        };
        RunSummary {
            processed: self.events_processed - start,
            stop,
        }
    }

    /// Run until the queue is empty **or** `max_steps` events have been
    /// dispatched. Returns the number of events processed in this call.
    ///
    /// The stored time budget is ignored; trace recording still follows
    /// the stored config.
    pub fn run_for(&mut self, max_steps: u64, handler: &mut dyn EventHandler<S, T>) -> u64 {
        let config = SimulationConfig {
            max_steps: Some(max_steps),
            until: None,
            ..self.config.clone()
        };
        self.run_with_config(&config, handler).processed
    }

    /// Run every event whose time is not after `time`.
    ///
    /// The stored step budget is ignored.
    pub fn run_until(&mut self, time: T, handler: &mut dyn EventHandler<S, T>) -> u64 {
        let config = SimulationConfig {
            until: Some(time),
            max_steps: None,
            ..self.config.clone()
        };
        self.run_with_config(&config, handler).processed
    }

    /// Returns `true` if there are no more events to process.
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<S: Clone, T: SimTime> Default for Simulation<S, T> {
    fn default() -> Self {
        Self::new()
    }
}
