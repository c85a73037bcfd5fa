//! `LATCH`: set/reset latch with an internal state slot.

use crate::label::Label;
use crate::time::SimTime;

use crate::circuit::gate_type::GateType;

use super::Logic;

/// Set/reset latch.
///
/// `INNER` holds the latched value across evaluations:
/// `INNER = (INNER | SET) & !RESET`, and `OUT` follows `INNER` after two
/// ticks. Reset wins when both inputs are high.
pub fn latch<S: Logic, T: SimTime + 'static>() -> GateType<S, T> {
    GateType::builtin(
        "LATCH",
        &["SET", "RESET", "INNER", "OUT"],
        |pins: &mut [S], now: T, events| {
            pins[2] = (pins[2] | pins[0]) & !pins[1];
            pins[3] = pins[2];
            events.push(now.delayed(2), pins[3], Label::new(3));
        },
    )
}
