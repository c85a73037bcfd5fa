//! Gate types: a named pinout plus the solver that gives it behavior.

use std::rc::Rc;

use crate::arena::Emptiable;
use crate::error::{FlexError, FlexResult};
use crate::scheduler::EventQueue;

/// Transition function of a gate type.
///
/// Receives the states of one gate instance's pins in pinout-slot order
/// and the current time. It may rewrite those states in place and push
/// follow-up events. Inside a solver call, event labels are **pinout
/// slot indices**, not pin labels; the simulation driver translates them
/// to the instance's pins.
pub type Solver<S, T> = Rc<dyn Fn(&mut [S], T, &mut EventQueue<S, T>)>;

/// A named, immutable gate definition.
///
/// Each type can have any number of instances in a circuit.
#[derive(Clone)]
pub struct GateType<S, T> {
    name: String,
    pinout: Vec<String>,
    solver: Solver<S, T>,
}

impl<S, T> GateType<S, T> {
    /// Declare a gate type.
    ///
    /// Fails if `name` is empty or `pinout` has no slots.
    pub fn new<F>(name: impl Into<String>, pinout: &[&str], solver: F) -> FlexResult<Self>
    where
        F: Fn(&mut [S], T, &mut EventQueue<S, T>) + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(FlexError::EmptyGateName);
        }
        if pinout.is_empty() {
            return Err(FlexError::EmptyPinout(name));
        }
        Ok(GateType {
            name,
            pinout: pinout.iter().map(|s| s.to_string()).collect(),
            solver: Rc::new(solver),
        })
    }

    /// Unchecked constructor for the built-in gate types, whose name and
    /// pinout are known to be non-empty.
    pub(crate) fn builtin<F>(name: &str, pinout: &[&str], solver: F) -> Self
    where
        F: Fn(&mut [S], T, &mut EventQueue<S, T>) + 'static,
    {
        debug_assert!(!name.is_empty() && !pinout.is_empty());
        GateType {
            name: name.to_string(),
            pinout: pinout.iter().map(|s| s.to_string()).collect(),
            solver: Rc::new(solver),
        }
    }

    /// The type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pin slot names in slot order.
    pub fn pinout(&self) -> &[String] {
        &self.pinout
    }

    /// Number of pin slots.
    pub fn width(&self) -> usize {
        self.pinout.len()
    }

    /// Slot index of the pin named `pin`.
    pub fn slot(&self, pin: &str) -> Option<usize> {
        self.pinout.iter().position(|p| p == pin)
    }

    /// Shared handle to the solver.
    pub fn solver(&self) -> Solver<S, T> {
        Rc::clone(&self.solver)
    }

    /// Run the solver directly.
    pub fn solve(&self, states: &mut [S], now: T, events: &mut EventQueue<S, T>) {
        (self.solver)(states, now, events)
    }
}

impl<S, T> std::fmt::Debug for GateType<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateType")
            .field("name", &self.name)
            .field("pinout", &self.pinout)
            .finish_non_exhaustive()
    }
}

impl<S: 'static, T: 'static> Emptiable for GateType<S, T> {
    fn empty() -> Self {
        GateType {
            name: String::new(),
            pinout: Vec::new(),
            solver: Rc::new(|_: &mut [S], _: T, _: &mut EventQueue<S, T>| {}),
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

// ── GateLibrary ──────────────────────────────────────────────────────

/// An ordered collection of gate types with unique names.
///
/// The order of registration becomes the type-id order once loaded into
/// a circuit with [`Circuit::set_gate_types`](super::Circuit::set_gate_types).
#[derive(Debug, Clone)]
pub struct GateLibrary<S, T> {
    types: Vec<GateType<S, T>>,
}

impl<S, T> GateLibrary<S, T> {
    /// An empty library.
    pub fn new() -> Self {
        GateLibrary { types: Vec::new() }
    }

    /// Add a gate type. Rejects a name that is already present.
    pub fn register(&mut self, gate: GateType<S, T>) -> FlexResult<()> {
        if self.get(gate.name()).is_some() {
            return Err(FlexError::DuplicateGateType(gate.name));
        }
        self.types.push(gate);
        Ok(())
    }

    /// Chained form of [`GateLibrary::register`].
    pub fn with(mut self, gate: GateType<S, T>) -> FlexResult<Self> {
        self.register(gate)?;
        Ok(self)
    }

    /// Look a type up by name.
    pub fn get(&self, name: &str) -> Option<&GateType<S, T>> {
        self.types.iter().find(|g| g.name() == name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Consume the library, yielding its types in registration order.
    pub fn into_types(self) -> Vec<GateType<S, T>> {
        self.types
    }
}

impl<S, T> Default for GateLibrary<S, T> {
    fn default() -> Self {
        Self::new()
    }
}
