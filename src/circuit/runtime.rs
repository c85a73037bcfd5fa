//! Circuit dispatch: routes signal events through wires into gate solvers.
//!
//! The circuit itself is the [`EventHandler`] passed to
//! [`Simulation::run`](crate::simulation::Simulation::run). For each event:
//!
//! 1. The signal lands on the target pin and on every pin of the target's
//!    wire nets. Each of those wire nets takes the signal as its state.
//! 2. Every gate net holding a pin whose state changed is evaluated once,
//!    in ascending gate-id order. An event driven from outside the circuit
//!    also evaluates the target pin's own gates, changed or not. Events a
//!    solver scheduled on its own pins do not, or every gate would keep
//!    re-triggering itself.
//! 3. Evaluation hands the solver the states of the gate's first
//!    `width` pins, writes the results back and schedules the solver's
//!    events on the gate's pins.

use tracing::{trace, warn};

use crate::event::Event;
use crate::label::Label;
use crate::scheduler::EventQueue;
use crate::simulation::{EventHandler, SimulationContext};
use crate::time::SimTime;

use super::Circuit;

impl<S, T> Circuit<S, T>
where
    S: Clone + Default + PartialEq + 'static,
    T: SimTime + 'static,
{
    /// Apply `signal` to `pid` and its wire neighbors. Returns the gates
    /// that saw at least one pin change, ascending and deduplicated.
    fn propagate(&mut self, pid: Label, signal: &S) -> Vec<Label> {
        let Some(pin) = self.pinlist.get(pid) else {
            return Vec::new();
        };

        let wires: Vec<Label> = pin
            .nets
            .iter()
            .copied()
            .filter(|&nid| self.netlist.get(nid).is_some_and(|net| net.is_wire()))
            .collect();

        let mut targets = vec![pid];
        for &nid in &wires {
            if let Some(net) = self.netlist.get_mut(nid) {
                net.state = signal.clone();
                targets.extend_from_slice(&net.pins);
            }
        }
        targets.sort_unstable();
        targets.dedup();

        let mut gates = Vec::new();
        for target in targets {
            let Some(pin) = self.pinlist.get_mut(target) else {
                continue;
            };
            if pin.state == *signal {
                continue;
            }
            pin.state = signal.clone();
            gates.extend(
                pin.nets
                    .iter()
                    .copied()
                    .filter(|&nid| self.netlist.get(nid).is_some_and(|net| !net.is_wire())),
            );
        }
        gates.sort_unstable();
        gates.dedup();
        gates
    }

    /// Gate nets holding `pid`.
    fn owning_gates(&self, pid: Label) -> Vec<Label> {
        self.pinlist
            .get(pid)
            .map(|pin| {
                pin.nets
                    .iter()
                    .copied()
                    .filter(|&nid| self.netlist.get(nid).is_some_and(|net| !net.is_wire()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Run the solver of gate `gid` and forward its events.
    fn evaluate(&mut self, ctx: &mut SimulationContext<'_, S, T>, gid: Label) {
        let Some(net) = self.netlist.get(gid) else {
            return;
        };
        let Some(gate) = self.gatetypes.get(net.type_id) else {
            warn!(gid = %gid, type_id = %net.type_id, "gate has no registered type");
            return;
        };

        let width = gate.width();
        if net.pins.len() < width {
            warn!(
                gid = %gid,
                gate = gate.name(),
                pins = net.pins.len(),
                width,
                "gate has fewer pins than its pinout, skipped"
            );
            return;
        }

        let pins = net.pins[..width].to_vec();
        let solver = gate.solver();
        let mut states: Vec<S> = pins
            .iter()
            .map(|&pid| {
                self.pinlist
                    .get(pid)
                    .map(|pin| pin.state.clone())
                    .unwrap_or_default()
            })
            .collect();

        let mut local = EventQueue::new();
        solver(states.as_mut_slice(), ctx.now(), &mut local);

        for (&pid, state) in pins.iter().zip(states) {
            self.set_pin_state(pid, state);
        }

        while let Some(event) = local.pop() {
            match event.label.index().and_then(|slot| pins.get(slot)) {
                Some(&pid) => {
                    let id = ctx.schedule_at(event.time, event.signal, pid);
                    self.scheduled.insert(id);
                }
                None => {
                    warn!(gid = %gid, slot = %event.label, "solver scheduled onto a missing slot, dropped");
                }
            }
        }
    }
}

impl<S, T> EventHandler<S, T> for Circuit<S, T>
where
    S: Clone + Default + PartialEq + 'static,
    T: SimTime + 'static,
{
    fn handle(&mut self, ctx: &mut SimulationContext<'_, S, T>, event: &Event<S, T>) {
        let internal = self.scheduled.remove(&event.id);
        if self.pinlist.get(event.label).is_none() {
            warn!(pin = %event.label, event = %event.id, "event targets a missing pin");
            return;
        }

        let mut gates = self.propagate(event.label, &event.signal);
        if !internal {
            gates.extend(self.owning_gates(event.label));
            gates.sort_unstable();
            gates.dedup();
        }
        trace!(pin = %event.label, internal, gates = ?gates, "evaluate");
        for gid in gates {
            self.evaluate(ctx, gid);
        }
    }
}
