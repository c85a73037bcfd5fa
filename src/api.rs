/// Step-by-step simulation API for external interfaces.
///
/// Wraps a circuit and its simulation behind one handle for stepping,
/// inspection and (with the `serialize` feature) JSON export. This is
/// the surface CLI tools and bindings drive.

use crate::circuit::Circuit;
use crate::event::EventId;
use crate::label::Label;
use crate::simulation::{RunSummary, Simulation};
use crate::time::SimTime;

#[cfg(feature = "serialize")]
use crate::error::{FlexError, FlexResult};

// ── StepResult ────────────────────────────────────────────────────────

/// Result of a single simulation step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct StepResult<S, T> {
    /// The event that was dispatched.
    pub event_id: EventId,
    /// Time of the event.
    pub time: T,
    /// Pin the signal was delivered to.
    pub pin: Label,
    /// The delivered signal.
    pub signal: S,
    /// Total events processed so far.
    pub total_events: u64,
}

// ── SimulationApi ─────────────────────────────────────────────────────

/// High-level API wrapping a circuit and its simulation.
#[derive(Debug, Clone)]
pub struct SimulationApi<S, T> {
    circuit: Circuit<S, T>,
    sim: Simulation<S, T>,
}

impl<S, T> SimulationApi<S, T>
where
    S: Clone + Default + PartialEq + 'static,
    T: SimTime + 'static,
{
    /// Create an API from a pre-built circuit and simulation.
    pub fn new(circuit: Circuit<S, T>, sim: Simulation<S, T>) -> Self {
        SimulationApi { circuit, sim }
    }

    /// Execute a single step. Returns `None` if the queue is empty.
    pub fn step(&mut self) -> Option<StepResult<S, T>> {
        let event = self.sim.step(&mut self.circuit)?;
        Some(StepResult {
            event_id: event.id,
            time: event.time,
            pin: event.label,
            signal: event.signal,
            total_events: self.sim.events_processed(),
        })
    }

    /// Run to the simulation's configured budget.
    pub fn run(&mut self) -> RunSummary {
        self.sim.run(&mut self.circuit)
    }

    /// Run up to `n` steps. Returns number actually processed.
    pub fn run_steps(&mut self, n: u64) -> u64 {
        self.sim.run_for(n, &mut self.circuit)
    }

    /// Schedule a stimulus on pin `pid`.
    pub fn drive(&mut self, at: T, signal: S, pid: Label) -> EventId {
        self.sim.schedule(at, signal, pid)
    }

    /// Whether the simulation has finished (event queue empty).
    pub fn is_finished(&self) -> bool {
        self.sim.is_finished()
    }

    /// Time of the last dispatched event.
    pub fn current_time(&self) -> Option<T> {
        self.sim.current_time()
    }

    /// Total events processed.
    pub fn events_processed(&self) -> u64 {
        self.sim.events_processed()
    }

    /// State of pin `pid`.
    pub fn pin_state(&self, pid: Label) -> Option<S> {
        self.circuit.pin(pid).map(|pin| pin.state().clone())
    }

    /// The circuit under simulation.
    pub fn circuit(&self) -> &Circuit<S, T> {
        &self.circuit
    }

    /// Mutable access to the circuit, for editing between steps.
    pub fn circuit_mut(&mut self) -> &mut Circuit<S, T> {
        &mut self.circuit
    }

    /// Access the underlying `Simulation`.
    pub fn simulation(&self) -> &Simulation<S, T> {
        &self.sim
    }

    /// Fork: create an independent copy of this API.
    pub fn fork(&self) -> Self {
        self.clone()
    }
}

// ── JSON Export ───────────────────────────────────────────────────────

#[cfg(feature = "serialize")]
impl<S, T> SimulationApi<S, T>
where
    S: Clone + Default + PartialEq + serde::Serialize + 'static,
    T: SimTime + serde::Serialize + 'static,
{
    /// Export the time, counters and queue length as a JSON string.
    pub fn state_json(&self) -> FlexResult<String> {
        #[derive(serde::Serialize)]
        struct ApiState<T> {
            current_time: Option<T>,
            events_processed: u64,
            pending_events: usize,
            is_finished: bool,
        }

        to_json(&ApiState {
            current_time: self.sim.current_time(),
            events_processed: self.sim.events_processed(),
            pending_events: self.sim.queue().len(),
            is_finished: self.sim.is_finished(),
        })
    }

    /// Export every pin and net slot plus the gate-type table.
    ///
    /// Slots are exported as stored, tombstones included, so array
    /// indices are labels.
    pub fn netlist_json(&self) -> FlexResult<String> {
        #[derive(serde::Serialize)]
        struct GateTypeRecord {
            name: String,
            pinout: Vec<String>,
        }

        #[derive(serde::Serialize)]
        struct Netlist<S> {
            gate_types: Vec<GateTypeRecord>,
            pins: Vec<crate::circuit::Pin<S>>,
            nets: Vec<crate::circuit::Net<S>>,
        }

        let gate_types = self
            .circuit
            .gate_types()
            .into_iter()
            .map(|g| GateTypeRecord {
                name: g.name().to_string(),
                pinout: g.pinout().to_vec(),
            })
            .collect();

        to_json(&Netlist {
            gate_types,
            pins: self.circuit.pinlist(),
            nets: self.circuit.netlist(),
        })
    }

    /// Export the recorded trace as a JSON array string.
    pub fn trace_json(&self) -> FlexResult<String> {
        to_json(&self.sim.trace())
    }
}

#[cfg(feature = "serialize")]
fn to_json<V: serde::Serialize + ?Sized>(value: &V) -> FlexResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| FlexError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::CircuitBuilder;
    use crate::simulation::SimulationConfig;

    fn api() -> SimulationApi<bool, u64> {
        let (circuit, sim) = CircuitBuilder::new()
            .builtin_gates()
            .gate("AND")
            .gate("NOT")
            .wire((0, 2), (1, 0))
            .drive(0, true, (0, 0))
            .drive(0, true, (0, 1))
            .config(SimulationConfig::new().record_trace(true))
            .build()
            .unwrap();
        SimulationApi::new(circuit, sim)
    }

    #[test]
    fn test_api_step_by_step() {
        let mut api = api();

        let r1 = api.step().unwrap();
        assert_eq!(r1.time, 0);
        assert_eq!(r1.pin, Label::new(0));
        assert!(r1.signal);
        assert_eq!(r1.total_events, 1);

        let r2 = api.step().unwrap();
        assert_eq!(r2.pin, Label::new(1));
        assert_eq!(r2.total_events, 2);
        assert_eq!(api.pin_state(Label::new(2)), Some(true));

        while api.step().is_some() {}
        assert!(api.is_finished());
        assert_eq!(api.pin_state(Label::new(4)), Some(false));
    }

    #[test]
    fn test_api_run_steps() {
        let mut api = api();
        assert_eq!(api.run_steps(2), 2);
        assert!(!api.is_finished());
        assert!(api.run().processed > 0);
        assert!(api.is_finished());
    }

    #[test]
    fn test_api_drive_and_edit_between_runs() {
        let mut api = api();
        api.run();

        // Cut the wire, then drop the AND output: the NOT gate no longer sees it.
        api.circuit_mut().nets().remove_wire(Label::new(2), Label::new(3));
        api.drive(10, false, Label::new(1));
        api.run();

        assert_eq!(api.pin_state(Label::new(2)), Some(false));
        assert_eq!(api.pin_state(Label::new(3)), Some(true));
        assert_eq!(api.current_time(), Some(11));
    }

    #[test]
    fn test_api_fork() {
        let mut api = api();
        let mut fork = api.fork();

        api.run();
        assert!(api.events_processed() > 0);

        assert_eq!(fork.events_processed(), 0);
        fork.run();
        assert_eq!(fork.events_processed(), api.events_processed());
        assert_eq!(fork.circuit().pinlist(), api.circuit().pinlist());
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_api_json_exports() {
        let mut api = api();
        api.run();

        let state = api.state_json().unwrap();
        assert!(state.contains("\"events_processed\""));
        assert!(state.contains("\"is_finished\": true"));

        let netlist = api.netlist_json().unwrap();
        assert!(netlist.contains("\"LATCH\""));
        assert!(netlist.contains("\"type_id\""));

        let trace: serde_json::Value = serde_json::from_str(&api.trace_json().unwrap()).unwrap();
        assert_eq!(trace.as_array().map(Vec::len), Some(api.events_processed() as usize));
    }
}
