//! The netlist graph: pins, nets and gate types held in label arenas.
//!
//! A [`Circuit`] exclusively owns three arenas. All relationships between
//! entities are [`Label`] indirections resolved through those arenas, so
//! there is no aliasing between a pin and the nets it sits on.
//!
//! The circuit is edited through three stateless views:
//!
//! | View | Concern |
//! |---|---|
//! | [`PinController`] | pin lifecycle and queries |
//! | [`NetController`] | attach/detach/merge, wire editing |
//! | [`GateController`] | gate instances (a typed net plus one pin per slot) |
//!
//! A gate instance is not a separate entity: it is a net whose `type_id`
//! names a [`GateType`]. Editing a gate's pins through the pin or net
//! controllers is allowed, but the gate may then misbehave under
//! simulation. Use [`GateController`] when gate integrity matters.

pub mod builtin;
pub mod entity;
pub mod gate_controller;
pub mod gate_type;
pub mod net_controller;
pub mod pin_controller;
pub mod runtime;

pub use entity::{Net, Pin};
pub use gate_controller::GateController;
pub use gate_type::{GateLibrary, GateType, Solver};
pub use net_controller::NetController;
pub use pin_controller::PinController;

use std::collections::HashSet;

use crate::arena::LabelArena;
use crate::event::EventId;
use crate::label::Label;

use entity::is_strictly_sorted;

/// The circuit aggregate.
///
/// `S` is the signal/state value carried by pins and nets, `T` the
/// simulation time type.
#[derive(Debug, Clone)]
pub struct Circuit<S, T> {
    pub(crate) pinlist: LabelArena<Pin<S>>,
    pub(crate) netlist: LabelArena<Net<S>>,
    pub(crate) gatetypes: LabelArena<GateType<S, T>>,
    /// Pending events that a solver scheduled on its own gate's pins.
    pub(crate) scheduled: HashSet<EventId>,
}

impl<S, T> Circuit<S, T>
where
    S: Clone + Default + 'static,
    T: Clone + 'static,
{
    /// An empty circuit: no pins, no nets, no gate types.
    pub fn new() -> Self {
        Circuit {
            pinlist: LabelArena::new(),
            netlist: LabelArena::new(),
            gatetypes: LabelArena::new(),
            scheduled: HashSet::new(),
        }
    }

    // ── Views ─────────────────────────────────────────────────

    /// Edit the circuit through its pins.
    pub fn pins(&mut self) -> PinController<'_, S, T> {
        PinController::new(self)
    }

    /// Edit the circuit through its nets.
    pub fn nets(&mut self) -> NetController<'_, S, T> {
        NetController::new(self)
    }

    /// Edit the circuit through its gates.
    pub fn gates(&mut self) -> GateController<'_, S, T> {
        GateController::new(self)
    }

    // ── Gate types ────────────────────────────────────────────

    /// Replace the gate-type table. Type ids follow the order of `types`.
    ///
    /// Existing gate instances keep their numeric type id, so this is
    /// meant to be called before any gate is added.
    pub fn set_gate_types(&mut self, types: Vec<GateType<S, T>>) {
        let mut table = LabelArena::new();
        for (i, gate) in types.into_iter().enumerate() {
            table.set(gate, Label::from(i));
        }
        self.gatetypes = table;
    }

    /// Copy of the registered gate types, in type-id order.
    pub fn gate_types(&self) -> Vec<GateType<S, T>> {
        self.gatetypes.compress()
    }

    /// Type id of the gate type named `name`, or `Label::EMPTY`.
    pub fn find_type_name(&self, name: &str) -> Label {
        self.gatetypes
            .iter()
            .find(|(_, g)| g.name() == name)
            .map_or(Label::EMPTY, |(tid, _)| tid)
    }

    /// The gate type registered under `tid`.
    pub fn gate_type(&self, tid: Label) -> Option<&GateType<S, T>> {
        self.gatetypes.get(tid)
    }

    /// The gate type of gate instance `gid`, if `gid` is a live gate net.
    pub fn gate_type_of(&self, gid: Label) -> Option<&GateType<S, T>> {
        let net = self.netlist.get(gid)?;
        self.gatetypes.get(net.type_id)
    }

    // ── Snapshots ─────────────────────────────────────────────

    /// Deep copy of every net slot, tombstones included.
    pub fn netlist(&self) -> Vec<Net<S>> {
        self.netlist.slots().to_vec()
    }

    /// Deep copy of every pin slot, tombstones included.
    pub fn pinlist(&self) -> Vec<Pin<S>> {
        self.pinlist.slots().to_vec()
    }

    /// The live pin at `pid`.
    pub fn pin(&self, pid: Label) -> Option<&Pin<S>> {
        self.pinlist.get(pid)
    }

    /// The live net at `nid`.
    pub fn net(&self, nid: Label) -> Option<&Net<S>> {
        self.netlist.get(nid)
    }

    /// Overwrite the state of pin `pid`. Returns `false` if it does not resolve.
    pub fn set_pin_state(&mut self, pid: Label, state: S) -> bool {
        match self.pinlist.get_mut(pid) {
            Some(pin) => {
                pin.state = state;
                true
            }
            None => false,
        }
    }

    /// Check the adjacency invariants.
    ///
    /// Every live pin's net list and every live net's pin list must be
    /// strictly ascending, and every link must be present on both sides.
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        for (pid, pin) in self.pinlist.iter() {
            if !is_strictly_sorted(&pin.nets) {
                return Err(format!("pin {} nets not strictly ascending: {:?}", pid, pin.nets));
            }
            for &nid in &pin.nets {
                let linked = self
                    .netlist
                    .get(nid)
                    .is_some_and(|net| net.pins.binary_search(&pid).is_ok());
                if !linked {
                    return Err(format!("pin {} names net {} without a back-link", pid, nid));
                }
            }
        }
        for (nid, net) in self.netlist.iter() {
            if !is_strictly_sorted(&net.pins) {
                return Err(format!("net {} pins not strictly ascending: {:?}", nid, net.pins));
            }
            for &pid in &net.pins {
                let linked = self
                    .pinlist
                    .get(pid)
                    .is_some_and(|pin| pin.nets.binary_search(&nid).is_ok());
                if !linked {
                    return Err(format!("net {} names pin {} without a back-link", nid, pid));
                }
            }
        }
        Ok(())
    }
}

impl<S, T> Default for Circuit<S, T>
where
    S: Clone + Default + 'static,
    T: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
