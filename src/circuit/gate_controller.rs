//! `GateController`: gate instances as typed nets.
//!
//! A gate instance is a net whose `type_id` names a gate type, plus one
//! freshly allocated pin per pinout slot. The net's label doubles as the
//! gate id.

use tracing::debug;

use crate::label::Label;

use super::entity::{Net, Pin};
use super::pin_controller::PinController;
use super::Circuit;

/// Gate lifecycle over a borrowed [`Circuit`].
pub struct GateController<'a, S, T> {
    circuit: &'a mut Circuit<S, T>,
}

impl<'a, S, T> GateController<'a, S, T>
where
    S: Clone + Default + 'static,
    T: Clone + 'static,
{
    /// Wrap a circuit.
    pub fn new(circuit: &'a mut Circuit<S, T>) -> Self {
        GateController { circuit }
    }

    /// Instantiate the gate type named `name`.
    ///
    /// Returns the new gate id, or `Label::EMPTY` (with no side effects)
    /// if no gate type has that name.
    pub fn add_gate(&mut self, name: &str) -> Label {
        let tid = self.circuit.find_type_name(name);
        let Some(width) = self.circuit.gate_type(tid).map(|g| g.width()) else {
            debug!(name, "add_gate: unknown gate type");
            return Label::EMPTY;
        };
        if width == 0 {
            return Label::EMPTY;
        }

        // Placeholder pins keep the slot live until the real pins land.
        let gid = self.circuit.netlist.add(
            Net::new(vec![Label::EMPTY; width], tid, S::default()),
            Label::new(0),
        );

        let mut pins = Vec::with_capacity(width);
        let mut hint = Label::new(0);
        for _ in 0..width {
            let pid = self.circuit.pinlist.add(Pin::on(&[gid]), hint);
            hint = Label::new(pid.raw() + 1);
            pins.push(pid);
        }
        if let Some(net) = self.circuit.netlist.get_mut(gid) {
            net.pins = pins;
        }

        debug!(gid = %gid, name, pins = ?self.circuit.netlist.get(gid).map(Net::pins), "add_gate");
        gid
    }

    /// Remove gate `gid` together with every pin currently on it.
    ///
    /// Fails if `gid` is not a live gate net. Pins that were also on other
    /// nets are detached from those as well.
    pub fn remove_gate(&mut self, gid: Label) -> bool {
        let Some(net) = self.circuit.netlist.get(gid) else {
            return false;
        };
        if net.is_wire() {
            return false;
        }

        let pins = net.pins.clone();
        let mut pin_view = PinController::new(&mut *self.circuit);
        for pid in pins {
            pin_view.remove_pin(pid);
        }
        // A tampered gate may still hold stale labels.
        self.circuit.netlist.remove(gid);

        debug!(gid = %gid, "remove_gate");
        true
    }

    /// Ids of all live gate instances, ascending.
    pub fn list_gate_ids(&self) -> Vec<Label> {
        self.circuit
            .netlist
            .iter()
            .filter(|(_, net)| !net.is_wire())
            .map(|(gid, _)| gid)
            .collect()
    }
}
