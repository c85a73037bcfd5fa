//! `PinController`: view and edit a circuit through its pins.

use tracing::debug;

use crate::label::Label;

use super::entity::{sorted_insert, Pin};
use super::net_controller::NetController;
use super::Circuit;

/// Pin lifecycle and queries over a borrowed [`Circuit`].
pub struct PinController<'a, S, T> {
    circuit: &'a mut Circuit<S, T>,
}

impl<'a, S, T> PinController<'a, S, T>
where
    S: Clone + Default + 'static,
    T: Clone + 'static,
{
    /// Wrap a circuit.
    pub fn new(circuit: &'a mut Circuit<S, T>) -> Self {
        PinController { circuit }
    }

    /// Add a pin, optionally on net `nid`.
    ///
    /// With `nid == Label::EMPTY` the pin starts with no nets. Otherwise
    /// `nid` must resolve to a live net or nothing is created and
    /// `Label::EMPTY` is returned.
    pub fn add_pin(&mut self, nid: Label) -> Label {
        if nid.is_empty() {
            return self.circuit.pinlist.add(Pin::on(&[]), Label::new(0));
        }
        if self.circuit.netlist.get(nid).is_none() {
            debug!(nid = %nid, "add_pin: net does not resolve");
            return Label::EMPTY;
        }

        let pid = self.circuit.pinlist.add(Pin::on(&[nid]), Label::new(0));
        if let Some(net) = self.circuit.netlist.get_mut(nid) {
            sorted_insert(&mut net.pins, pid);
        }
        pid
    }

    /// Remove pin `pid`, detaching it from every net it sits on.
    ///
    /// Nets left without pins vanish. Returns `false` if `pid` does not
    /// resolve.
    pub fn remove_pin(&mut self, pid: Label) -> bool {
        let Some(pin) = self.circuit.pinlist.get(pid) else {
            return false;
        };

        let nets = pin.nets.clone();
        let mut net_view = NetController::new(&mut *self.circuit);
        for nid in nets {
            net_view.detach(nid, pid);
        }
        self.circuit.pinlist.remove(pid);
        true
    }

    /// Labels of all live pins, ascending.
    pub fn list_pins(&self) -> Vec<Label> {
        self.circuit.pinlist.labels()
    }

    /// Nets attached to `pid`, ascending. Empty if `pid` does not resolve.
    pub fn get_nets(&self, pid: Label) -> Vec<Label> {
        self.circuit
            .pinlist
            .get(pid)
            .map(|pin| pin.nets.clone())
            .unwrap_or_default()
    }

    /// State of pin `pid`.
    pub fn get_state(&self, pid: Label) -> Option<S> {
        self.circuit.pinlist.get(pid).map(|pin| pin.state.clone())
    }

    /// Set the state of pin `pid`. Returns `false` if it does not resolve.
    pub fn set_state(&mut self, pid: Label, state: S) -> bool {
        self.circuit.set_pin_state(pid, state)
    }
}
