//! `NetController`: the connection algebra.
//!
//! Every change to pin/net adjacency goes through here. Both sides of a
//! link are kept as strictly ascending label lists, so membership tests
//! and insert points are binary searches.
//!
//! Nets come in two kinds. A *gate net* carries a gate-type id and is
//! created by the gate controller. A *wire net* (`type_id == EMPTY`) is
//! passive connectivity. The wire operations ([`NetController::add_wire`],
//! [`NetController::remove_wire`], [`NetController::crumble`]) only ever
//! restructure wire nets, so gate nets survive wire editing.

use tracing::debug;

use crate::label::Label;

use super::entity::{sorted_insert, sorted_remove, sorted_union, Net};
use super::Circuit;

/// Net lifecycle, connection algebra and wire editing over a borrowed
/// [`Circuit`].
pub struct NetController<'a, S, T> {
    circuit: &'a mut Circuit<S, T>,
}

impl<'a, S, T> NetController<'a, S, T>
where
    S: Clone + Default + 'static,
    T: Clone + 'static,
{
    /// Wrap a circuit.
    pub fn new(circuit: &'a mut Circuit<S, T>) -> Self {
        NetController { circuit }
    }

    // ── Links ─────────────────────────────────────────────────

    /// Link net `nid` and pin `pid` on both sides.
    ///
    /// Returns `true` if at least one side was newly inserted, which also
    /// repairs a one-sided link. Returns `false` if either label does not
    /// resolve or the link already existed in full.
    pub fn attach(&mut self, nid: Label, pid: Label) -> bool {
        if self.circuit.pinlist.get(pid).is_none() {
            return false;
        }
        let Some(net) = self.circuit.netlist.get_mut(nid) else {
            return false;
        };
        let net_side = sorted_insert(&mut net.pins, pid);

        let pin_side = match self.circuit.pinlist.get_mut(pid) {
            Some(pin) => sorted_insert(&mut pin.nets, nid),
            None => false,
        };
        net_side || pin_side
    }

    /// Unlink net `nid` and pin `pid` on both sides.
    ///
    /// A net whose last pin is detached becomes a tombstone on its own.
    /// Returns `true` if at least one side held the link.
    pub fn detach(&mut self, nid: Label, pid: Label) -> bool {
        if self.circuit.pinlist.get(pid).is_none() || self.circuit.netlist.get(nid).is_none() {
            return false;
        }

        let pin_side = match self.circuit.pinlist.get_mut(pid) {
            Some(pin) => sorted_remove(&mut pin.nets, nid),
            None => false,
        };
        let (net_side, drained) = match self.circuit.netlist.get_mut(nid) {
            Some(net) => (sorted_remove(&mut net.pins, pid), net.pins.is_empty()),
            None => (false, false),
        };
        if drained {
            self.circuit.netlist.remove(nid);
        }
        pin_side || net_side
    }

    // ── Nets ──────────────────────────────────────────────────

    /// Copy `net` into the circuit.
    ///
    /// Pins in `net.pins` that do not resolve are skipped. The stored pin
    /// list is sorted and deduplicated. If no pin resolves, nothing is
    /// allocated and `Label::EMPTY` is returned.
    pub fn add_net(&mut self, net: Net<S>) -> Label {
        let Some(first) = net
            .pins
            .iter()
            .position(|&pid| self.circuit.pinlist.get(pid).is_some())
        else {
            debug!(pins = ?net.pins, "add_net: no pin resolves");
            return Label::EMPTY;
        };

        let seed = net.pins[first];
        let nid = self.circuit.netlist.add(
            Net::new(vec![seed], net.type_id, net.state.clone()),
            Label::new(0),
        );
        if let Some(pin) = self.circuit.pinlist.get_mut(seed) {
            sorted_insert(&mut pin.nets, nid);
        }
        for &pid in &net.pins[first + 1..] {
            self.attach(nid, pid);
        }

        debug!(nid = %nid, pins = ?self.get_pins(nid), "add_net");
        nid
    }

    /// Disconnect every resolving pin in `net.pins` from the nets it sits
    /// on. With `empty_only`, gate nets are left alone and only wire nets
    /// are touched.
    ///
    /// `net` does not have to match an existing net; any loose pin set
    /// works. Returns `true` if at least one link was removed.
    pub fn remove_net(&mut self, net: &Net<S>, empty_only: bool) -> bool {
        let mut removed = false;
        for &pid in &net.pins {
            let Some(pin) = self.circuit.pinlist.get(pid) else {
                continue;
            };
            for nid in pin.nets.clone() {
                if empty_only && !self.circuit.netlist.get(nid).is_some_and(Net::is_wire) {
                    continue;
                }
                removed = self.detach(nid, pid) || removed;
            }
        }
        removed
    }

    /// Fold every resolving net in `nids` into the first resolving one.
    ///
    /// Labels that do not resolve (including `Label::EMPTY`) are skipped.
    /// Returns the merge target, or `Label::EMPTY` if nothing resolved.
    pub fn merge(&mut self, nids: &[Label]) -> Label {
        let Some(at) = nids
            .iter()
            .position(|&nid| self.circuit.netlist.get(nid).is_some())
        else {
            return Label::EMPTY;
        };

        let target = nids[at];
        for &nid in &nids[at + 1..] {
            self.merge_two(target, nid);
        }
        target
    }

    /// Merge net `nid2` into net `nid1`.
    ///
    /// Both must resolve and differ. The target keeps its own type id and
    /// state; if both nets carried a gate type, the target's wins. Pins of
    /// the source are re-pointed at the target and the source slot is
    /// tombstoned without detaching anything.
    pub fn merge_two(&mut self, nid1: Label, nid2: Label) -> bool {
        if nid1 == nid2 {
            return false;
        }
        let Some(source) = self.circuit.netlist.get(nid2) else {
            return false;
        };
        let source_pins = source.pins.clone();
        let Some(target) = self.circuit.netlist.get_mut(nid1) else {
            return false;
        };
        target.pins = sorted_union(&target.pins, &source_pins);

        for &pid in &source_pins {
            if let Some(pin) = self.circuit.pinlist.get_mut(pid) {
                if sorted_remove(&mut pin.nets, nid2) {
                    sorted_insert(&mut pin.nets, nid1);
                }
            }
        }
        self.circuit.netlist.remove(nid2);

        debug!(target = %nid1, source = %nid2, "merge_two");
        true
    }

    /// Labels of all live nets, ascending.
    pub fn list_nets(&self) -> Vec<Label> {
        self.circuit.netlist.labels()
    }

    /// Pins on `nid`, ascending. Empty if `nid` does not resolve.
    pub fn get_pins(&self, nid: Label) -> Vec<Label> {
        self.circuit
            .netlist
            .get(nid)
            .map(|net| net.pins.clone())
            .unwrap_or_default()
    }

    /// State of net `nid`.
    pub fn get_state(&self, nid: Label) -> Option<S> {
        self.circuit.netlist.get(nid).map(|net| net.state.clone())
    }

    // ── Wires ─────────────────────────────────────────────────

    /// Connect `pid1` and `pid2` with a wire net.
    ///
    /// Any wire nets already on either pin are merged with the new one, so
    /// a transitively connected wire cluster is always a single net. Gate
    /// nets are never merged. Returns the resulting wire net, or
    /// `Label::EMPTY` if either pin does not resolve.
    pub fn add_wire(&mut self, pid1: Label, pid2: Label) -> Label {
        let (Some(p1), Some(p2)) = (
            self.circuit.pinlist.get(pid1),
            self.circuit.pinlist.get(pid2),
        ) else {
            return Label::EMPTY;
        };

        let mut merges: Vec<Label> = Vec::new();
        for &nid in p1.nets.iter().chain(p2.nets.iter()) {
            let is_wire = self.circuit.netlist.get(nid).is_some_and(Net::is_wire);
            if is_wire && !merges.contains(&nid) {
                merges.push(nid);
            }
        }

        let nid = self.add_net(Net::wire(vec![pid1, pid2]));
        if nid.is_empty() {
            return Label::EMPTY;
        }
        if merges.is_empty() {
            debug!(nid = %nid, pid1 = %pid1, pid2 = %pid2, "add_wire");
            return nid;
        }

        merges.push(nid);
        let target = self.merge(&merges);
        debug!(nid = %target, pid1 = %pid1, pid2 = %pid2, merged = merges.len(), "add_wire");
        target
    }

    /// Disconnect `pid1` and `pid2` along wire nets only. Gate nets that
    /// also connect them are untouched.
    pub fn remove_wire(&mut self, pid1: Label, pid2: Label) -> bool {
        self.remove_net(&Net::wire(vec![pid1, pid2]), true)
    }

    /// Best-effort split primitive.
    ///
    /// Disconnects every pair of pins in `pids` from their wire nets, then
    /// gives each pin of `pids` that was left with no nets at all a
    /// singleton wire net. Returns the labels of the seeded nets.
    ///
    /// Crumbling pins that share one wire net leaves them as loose pins
    /// rather than splitting that net into parts; a true split needs
    /// wire-level adjacency the net model does not record.
    pub fn crumble(&mut self, pids: &[Label]) -> Vec<Label> {
        for (i, &a) in pids.iter().enumerate() {
            for &b in &pids[i + 1..] {
                self.remove_wire(a, b);
            }
        }
        if let [only] = pids {
            self.remove_net(&Net::wire(vec![*only]), true);
        }

        let mut seeded = Vec::new();
        for &pid in pids {
            let loose = self
                .circuit
                .pinlist
                .get(pid)
                .is_some_and(|pin| pin.nets.is_empty());
            if loose {
                seeded.push(self.add_net(Net::wire(vec![pid])));
            }
        }
        debug!(pins = ?pids, seeded = ?seeded, "crumble");
        seeded
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::Emptiable;
    use crate::circuit::builtin;
    use crate::circuit::{Circuit, Net};
    use crate::label::{labels, Label};

    /// AND (pins 0-2, net 0), NOT (pins 3-4, net 1), LATCH (pins 5-8, net 2).
    fn three_gates() -> Circuit<i64, i64> {
        let mut c = Circuit::new();
        c.set_gate_types(builtin::library());
        c.gates().add_gate("AND");
        c.gates().add_gate("NOT");
        c.gates().add_gate("LATCH");
        c
    }

    fn scratch_net() -> Net<i64> {
        Net::new(labels(&[8, 4, 2, 0, -1, 345, 4]), Label::EMPTY, -1)
    }

    #[test]
    fn test_attach_reports_new_links_only() {
        let mut c = three_gates();
        let mut nets = c.nets();
        assert!(nets.attach(Label::new(1), Label::new(0)));
        assert!(!nets.attach(Label::new(1), Label::new(0)));
        assert!(!nets.attach(Label::new(7), Label::new(0)));
        assert!(!nets.attach(Label::new(1), Label::new(99)));
        assert_eq!(nets.get_pins(Label::new(1)), labels(&[0, 3, 4]));
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_attach_repairs_one_sided_link() {
        let mut c = three_gates();
        // Break the pin side of the link between net 0 and pin 1.
        if let Some(pin) = c.pinlist.get_mut(Label::new(1)) {
            pin.nets.clear();
        }
        assert!(c.check_invariants().is_err());

        assert!(c.nets().attach(Label::new(0), Label::new(1)));
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_detach() {
        let mut c = three_gates();
        let mut nets = c.nets();
        assert!(nets.detach(Label::new(1), Label::new(3)));
        assert!(!nets.detach(Label::new(1), Label::new(3)));
        assert!(!nets.detach(Label::new(1), Label::new(0)));
        assert!(!nets.detach(Label::EMPTY, Label::new(4)));

        // Detaching the last pin makes the net vanish.
        assert!(nets.detach(Label::new(1), Label::new(4)));
        assert_eq!(nets.list_nets(), labels(&[0, 2]));
        assert!(c.pins().get_nets(Label::new(4)).is_empty());
        assert!(c.check_invariants().is_ok());

        // The tombstone no longer looks like a gate.
        assert_eq!(c.netlist()[1], Net::<i64>::empty());
        assert!(c.gate_type_of(Label::new(1)).is_none());
    }

    #[test]
    fn test_merge_from_empty_fails() {
        let mut c = three_gates();
        let before_nets = c.netlist();
        let before_pins = c.pinlist();

        assert!(!c.nets().merge_two(Label::new(0), Label::EMPTY));
        assert!(!c.nets().merge_two(Label::EMPTY, Label::new(0)));

        assert_eq!(c.netlist(), before_nets);
        assert_eq!(c.pinlist(), before_pins);
        assert_eq!(c.gates().list_gate_ids(), labels(&[0, 1, 2]));
        assert_eq!(c.nets().get_pins(Label::new(0)), labels(&[0, 1, 2]));
    }

    #[test]
    fn test_merge_into_self_is_rejected() {
        let mut c = three_gates();
        assert!(!c.nets().merge_two(Label::new(1), Label::new(1)));
        assert_eq!(c.nets().get_pins(Label::new(1)), labels(&[3, 4]));
    }

    #[test]
    fn test_merge_two() {
        let mut c = three_gates();
        assert!(c.nets().merge_two(Label::new(0), Label::new(2)));

        assert_eq!(c.gates().list_gate_ids(), labels(&[0, 1]));
        assert_eq!(c.pins().list_pins().len(), 9);
        assert_eq!(c.netlist().len(), 3);
        assert_eq!(c.pinlist().len(), 9);
        assert_eq!(c.nets().get_pins(Label::new(0)), labels(&[0, 1, 2, 5, 6, 7, 8]));
        assert_eq!(c.pins().get_nets(Label::new(6)), labels(&[0]));
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_retargets_shared_pins_without_duplicates() {
        let mut c = three_gates();
        let wire = c.nets().add_net(Net::wire(labels(&[2, 3])));
        assert_eq!(wire, Label::new(3));

        // Pin 2 sits on both nets; after the merge it must list net 0 once.
        assert!(c.nets().merge_two(Label::new(0), wire));
        assert_eq!(c.pins().get_nets(Label::new(2)), labels(&[0]));
        assert_eq!(c.pins().get_nets(Label::new(3)), labels(&[0, 1]));
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_many() {
        let mut c = Circuit::<i64, i64>::new();
        c.set_gate_types(builtin::library());
        for _ in 0..4 {
            c.gates().add_gate("AND");
            c.gates().add_gate("NOT");
            c.gates().add_gate("LATCH");
        }
        c.gates().remove_gate(Label::new(6));
        c.gates().remove_gate(Label::new(10));

        assert_eq!(c.gates().list_gate_ids().len(), 10);
        assert_eq!(c.pins().list_pins().len(), 31);
        assert_eq!(c.netlist().len(), 12);
        assert_eq!(c.pinlist().len(), 36);

        let target = c.nets().merge(&labels(&[-1, 0, 4, 5, 6, 7, 8, 10, 11]));

        assert_eq!(target, Label::new(0));
        assert_eq!(c.gates().list_gate_ids(), labels(&[0, 1, 2, 3, 9]));
        assert_eq!(c.pins().list_pins().len(), 31);
        assert_eq!(c.netlist().len(), 12);
        assert_eq!(c.pinlist().len(), 36);
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_single_and_none() {
        let mut c = three_gates();
        assert_eq!(c.nets().merge(&labels(&[-1, 2])), Label::new(2));
        assert_eq!(c.nets().merge(&labels(&[-1, 40])), Label::EMPTY);
        assert_eq!(c.nets().merge(&[]), Label::EMPTY);
        assert_eq!(c.gates().list_gate_ids(), labels(&[0, 1, 2]));
    }

    #[test]
    fn test_add_net_sorts_and_filters() {
        let mut c = three_gates();
        let nid = c.nets().add_net(scratch_net());

        assert_eq!(nid, Label::new(3));
        assert_eq!(c.nets().list_nets(), labels(&[0, 1, 2, 3]));
        assert_eq!(c.nets().get_pins(nid), labels(&[0, 2, 4, 8]));
        assert_eq!(c.nets().get_state(nid), Some(-1));
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_add_net_with_no_valid_pins_fails() {
        let mut c = three_gates();
        let nid = c.nets().add_net(Net::wire(labels(&[-1, 345, 9])));

        assert_eq!(nid, Label::EMPTY);
        assert_eq!(c.nets().list_nets(), labels(&[0, 1, 2]));
        assert_eq!(c.netlist().len(), 3);
    }

    #[test]
    fn test_remove_net_clean() {
        let mut c = three_gates();
        c.nets().add_net(scratch_net());

        assert!(c.nets().remove_net(&scratch_net(), false));
        assert_eq!(c.nets().list_nets(), labels(&[0, 1, 2]));
        // Non-wire removal also strips the pins from their gates.
        assert_eq!(c.nets().get_pins(Label::new(0)), labels(&[1]));
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_net_dirty() {
        let mut c = three_gates();
        c.nets().add_net(scratch_net());

        let dirty = Net::new(labels(&[0, 1, 2, -1, 9]), Label::EMPTY, -1);
        assert!(c.nets().remove_net(&dirty, false));
        // Gate 0 lost every pin; the scratch net keeps pins 4 and 8.
        assert_eq!(c.nets().list_nets(), labels(&[1, 2, 3]));
        assert_eq!(c.nets().get_pins(Label::new(3)), labels(&[4, 8]));
    }

    #[test]
    fn test_remove_net_invalid() {
        let mut c = three_gates();
        c.nets().add_net(scratch_net());

        let invalid = Net::new(labels(&[-1, -324, 456, 9]), Label::EMPTY, -1);
        assert!(!c.nets().remove_net(&invalid, false));
        assert_eq!(c.nets().list_nets().len(), 4);
    }

    #[test]
    fn test_remove_net_empty_only_spares_gates() {
        let mut c = three_gates();
        c.nets().add_net(scratch_net());

        assert!(c.nets().remove_net(&scratch_net(), true));
        assert_eq!(c.nets().list_nets(), labels(&[0, 1, 2]));
        assert_eq!(c.nets().get_pins(Label::new(0)), labels(&[0, 1, 2]));
    }

    #[test]
    fn test_add_wire_creates_wire_net() {
        let mut c = three_gates();
        let w = c.nets().add_wire(Label::new(2), Label::new(3));

        assert_eq!(w, Label::new(3));
        assert!(c.net(w).is_some_and(Net::is_wire));
        assert_eq!(c.nets().get_pins(w), labels(&[2, 3]));
        // Gate nets are not merged into the wire.
        assert_eq!(c.gates().list_gate_ids(), labels(&[0, 1, 2]));
        assert_eq!(c.pins().get_nets(Label::new(2)), labels(&[0, 3]));
    }

    #[test]
    fn test_add_wire_invalid_pin() {
        let mut c = three_gates();
        assert_eq!(c.nets().add_wire(Label::new(2), Label::new(50)), Label::EMPTY);
        assert_eq!(c.nets().add_wire(Label::EMPTY, Label::new(2)), Label::EMPTY);
        assert_eq!(c.nets().list_nets(), labels(&[0, 1, 2]));
    }

    #[test]
    fn test_wire_clustering() {
        let mut c = three_gates();
        let mut nets = c.nets();
        let a = nets.add_wire(Label::new(2), Label::new(3));
        let b = nets.add_wire(Label::new(4), Label::new(5));
        assert_ne!(a, b);

        // Bridging the two clusters folds them into one wire net.
        let bridged = nets.add_wire(Label::new(3), Label::new(4));
        assert_eq!(bridged, a);
        assert_eq!(nets.get_pins(bridged), labels(&[2, 3, 4, 5]));

        // Re-wiring inside the cluster does not add a parallel net.
        let again = nets.add_wire(Label::new(2), Label::new(5));
        assert_eq!(again, a);

        let wires: Vec<Label> = nets
            .list_nets()
            .into_iter()
            .filter(|&n| c.net(n).is_some_and(Net::is_wire))
            .collect();
        assert_eq!(wires, vec![a]);
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_wire_spares_gate_net() {
        let mut c = three_gates();
        let w = c.nets().add_wire(Label::new(0), Label::new(1));

        assert!(c.nets().remove_wire(Label::new(0), Label::new(1)));
        assert!(c.net(w).is_none());
        // Pins 0 and 1 are still joined by the AND gate's net.
        assert_eq!(c.nets().get_pins(Label::new(0)), labels(&[0, 1, 2]));
        assert!(!c.nets().remove_wire(Label::new(0), Label::new(1)));
    }

    #[test]
    fn test_crumble_reseeds_loose_pins() {
        let mut c: Circuit<i64, i64> = Circuit::new();
        let p: Vec<Label> = (0..4).map(|_| c.pins().add_pin(Label::EMPTY)).collect();
        let w = c.nets().add_wire(p[0], p[1]);
        c.nets().add_wire(p[1], p[2]);
        c.nets().add_wire(p[2], p[3]);
        assert_eq!(c.nets().get_pins(w), p);

        let seeded = c.nets().crumble(&[p[0], p[1]]);

        // Both crumbled pins became loose and got a net of their own.
        assert_eq!(seeded.len(), 2);
        for (&pid, &nid) in [p[0], p[1]].iter().zip(&seeded) {
            assert_eq!(c.nets().get_pins(nid), vec![pid]);
        }
        assert_eq!(c.nets().get_pins(w), vec![p[2], p[3]]);
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_crumble_keeps_gate_pins_on_gate() {
        let mut c = three_gates();
        c.nets().add_wire(Label::new(2), Label::new(3));

        let seeded = c.nets().crumble(&labels(&[2, 3]));
        assert!(seeded.is_empty());
        assert_eq!(c.pins().get_nets(Label::new(2)), labels(&[0]));
        assert_eq!(c.pins().get_nets(Label::new(3)), labels(&[1]));
        assert_eq!(c.nets().list_nets(), labels(&[0, 1, 2]));
    }
}
