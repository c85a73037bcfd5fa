//! Combinational gates with a one-tick delay.

use crate::label::Label;
use crate::time::SimTime;

use crate::circuit::gate_type::GateType;

use super::Logic;

/// `OUT = A & B`.
pub fn and<S: Logic, T: SimTime + 'static>() -> GateType<S, T> {
    GateType::builtin("AND", &["A", "B", "OUT"], |pins: &mut [S], now: T, events| {
        pins[2] = pins[0] & pins[1];
        events.push(now.delayed(1), pins[2], Label::new(2));
    })
}

/// `OUT = A | B`.
pub fn or<S: Logic, T: SimTime + 'static>() -> GateType<S, T> {
    GateType::builtin("OR", &["A", "B", "OUT"], |pins: &mut [S], now: T, events| {
        pins[2] = pins[0] | pins[1];
        events.push(now.delayed(1), pins[2], Label::new(2));
    })
}

/// `OUT = !A`.
pub fn not<S: Logic, T: SimTime + 'static>() -> GateType<S, T> {
    GateType::builtin("NOT", &["A", "OUT"], |pins: &mut [S], now: T, events| {
        pins[1] = !pins[0];
        events.push(now.delayed(1), pins[1], Label::new(1));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::EventQueue;

    #[test]
    fn test_and_gate() {
        let gate = and::<i64, i64>();
        let mut pins = [1, 1, 0];
        let mut q = EventQueue::new();
        gate.solve(&mut pins, 0, &mut q);

        assert_eq!(pins[2], 1);
        assert_eq!(q.len(), 1);
        let event = q.pop().unwrap();
        assert_eq!((event.signal, event.time, event.label), (1, 1, Label::new(2)));
    }

    #[test]
    fn test_not_gate() {
        let gate = not::<i64, i64>();
        let mut pins = [1, 0];
        let mut q = EventQueue::new();
        gate.solve(&mut pins, 0, &mut q);

        assert_eq!(pins[1], !1);
        let event = q.pop().unwrap();
        assert_eq!((event.signal, event.time, event.label), (!1, 1, Label::new(1)));
        assert!(q.is_empty());
    }

    #[test]
    fn test_or_gate_bool() {
        let gate = or::<bool, u64>();
        let mut pins = [false, true, false];
        let mut q = EventQueue::new();
        gate.solve(&mut pins, 10, &mut q);

        assert!(pins[2]);
        assert_eq!(q.pop().map(|e| e.time), Some(11));
    }
}
