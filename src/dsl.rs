/// Fluent builder DSL for circuit setup.
///
/// Hides the boilerplate of registering gate types, instantiating gates,
/// wiring pinout slots together and seeding stimulus events. Every build
/// starts from a fresh circuit, so tests never share fixtures.

use tracing::debug;

use crate::circuit::builtin::{self, Logic};
use crate::circuit::{Circuit, GateLibrary, GateType};
use crate::error::{FlexError, FlexResult};
use crate::label::Label;
use crate::simulation::{RunSummary, Simulation, SimulationConfig};
use crate::time::SimTime;

/// A pinout slot of a queued gate: `(gate index, slot index)`.
///
/// Gate indices count `gate` calls in order, starting at 0.
pub type PinRef = (usize, usize);

// ── CircuitBuilder ────────────────────────────────────────────────────

/// Fluent builder for constructing a `Circuit` + `Simulation` pair.
///
/// # Example
/// ```rust
/// use flexlogic::dsl::CircuitBuilder;
///
/// let (mut circuit, sim, summary) = CircuitBuilder::<bool, u64>::new()
///     .builtin_gates()
///     .gate("AND")
///     .gate("NOT")
///     .wire((0, 2), (1, 0))
///     .drive(0, true, (0, 0))
///     .drive(0, true, (0, 1))
///     .run()
///     .unwrap();
///
/// assert!(summary.processed > 0);
/// assert!(sim.is_finished());
/// assert_eq!(circuit.gates().list_gate_ids().len(), 2);
/// ```
pub struct CircuitBuilder<S, T> {
    types: Vec<GateType<S, T>>,
    gates: Vec<String>,
    wires: Vec<(PinRef, PinRef)>,
    drives: Vec<(T, S, PinRef)>,
    config: SimulationConfig<T>,
}

impl<S, T> CircuitBuilder<S, T>
where
    S: Clone + Default + PartialEq + 'static,
    T: SimTime + 'static,
{
    /// Create a new builder.
    pub fn new() -> Self {
        CircuitBuilder {
            types: Vec::new(),
            gates: Vec::new(),
            wires: Vec::new(),
            drives: Vec::new(),
            config: SimulationConfig::new(),
        }
    }

    // ── Gate types ────────────────────────────────────────────

    /// Register a gate type. Type ids follow registration order.
    pub fn gate_type(mut self, gate: GateType<S, T>) -> Self {
        self.types.push(gate);
        self
    }

    /// Register several gate types.
    pub fn library(mut self, types: Vec<GateType<S, T>>) -> Self {
        self.types.extend(types);
        self
    }

    // ── Structure ─────────────────────────────────────────────

    /// Queue an instance of the gate type `name`.
    pub fn gate(mut self, name: &str) -> Self {
        self.gates.push(name.to_string());
        self
    }

    /// Connect two pinout slots with a wire.
    pub fn wire(mut self, a: PinRef, b: PinRef) -> Self {
        self.wires.push((a, b));
        self
    }

    // ── Stimulus ──────────────────────────────────────────────

    /// Drive `signal` onto a pinout slot at `at`.
    pub fn drive(mut self, at: T, signal: S, pin: PinRef) -> Self {
        self.drives.push((at, signal, pin));
        self
    }

    /// Use `config` for the built simulation.
    pub fn config(mut self, config: SimulationConfig<T>) -> Self {
        self.config = config;
        self
    }

    // ── Build ─────────────────────────────────────────────────

    /// Build and return `(Circuit, Simulation)`.
    ///
    /// Fails on a duplicate gate-type name, an unknown gate name, or a
    /// pin reference that does not name a queued gate's slot.
    pub fn build(self) -> FlexResult<(Circuit<S, T>, Simulation<S, T>)> {
        let mut library = GateLibrary::new();
        for gate in self.types {
            library.register(gate)?;
        }

        let mut circuit = Circuit::new();
        circuit.set_gate_types(library.into_types());

        let mut gids = Vec::with_capacity(self.gates.len());
        for name in &self.gates {
            let gid = circuit.gates().add_gate(name);
            if gid.is_empty() {
                return Err(FlexError::UnknownGateType(name.clone()));
            }
            gids.push(gid);
        }

        for (a, b) in self.wires {
            let pa = resolve(&mut circuit, &gids, a)?;
            let pb = resolve(&mut circuit, &gids, b)?;
            circuit.nets().add_wire(pa, pb);
        }

        let mut sim = Simulation::with_config(self.config);
        for (at, signal, pin) in self.drives {
            let pid = resolve(&mut circuit, &gids, pin)?;
            sim.schedule(at, signal, pid);
        }

        debug!(
            gates = gids.len(),
            nets = circuit.nets().list_nets().len(),
            pending = sim.queue().len(),
            "circuit built"
        );
        Ok((circuit, sim))
    }

    /// Build and run to the configured budget.
    pub fn run(self) -> FlexResult<(Circuit<S, T>, Simulation<S, T>, RunSummary)> {
        let (mut circuit, mut sim) = self.build()?;
        let summary = sim.run(&mut circuit);
        Ok((circuit, sim, summary))
    }
}

impl<S, T> CircuitBuilder<S, T>
where
    S: Logic + Default + PartialEq,
    T: SimTime + 'static,
{
    /// Register the built-in AND, NOT, LATCH and OR types.
    pub fn builtin_gates(self) -> Self {
        self.library(builtin::library())
    }
}

impl<S, T> Default for CircuitBuilder<S, T>
where
    S: Clone + Default + PartialEq + 'static,
    T: SimTime + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Pin label of `(gate, slot)`.
fn resolve<S, T>(circuit: &mut Circuit<S, T>, gids: &[Label], (gate, slot): PinRef) -> FlexResult<Label>
where
    S: Clone + Default + 'static,
    T: Clone + 'static,
{
    gids.get(gate)
        .and_then(|&gid| circuit.nets().get_pins(gid).get(slot).copied())
        .ok_or(FlexError::UnknownPin { gate, slot })
}
