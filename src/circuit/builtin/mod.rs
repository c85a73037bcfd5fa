//! Built-in gate types: AND, OR, NOT and an SR LATCH.
//!
//! These are reference gates used for testing and demonstration. They
//! work over any signal type with bitwise operators, so `bool` gives
//! classic two-valued logic and integers give bit-parallel logic.
//!
//! Each solver writes its output slot in place and schedules the new
//! output value onto that same slot after the gate's propagation delay.

pub mod latch;
pub mod logic;

use std::ops::{BitAnd, BitOr, Not};

pub use latch::latch;
pub use logic::{and, not, or};

use crate::time::SimTime;

use super::gate_type::GateType;

/// Signal values the built-in gates can compute on.
pub trait Logic:
    Copy + BitAnd<Output = Self> + BitOr<Output = Self> + Not<Output = Self> + 'static
{
}

impl<S> Logic for S where
    S: Copy + BitAnd<Output = S> + BitOr<Output = S> + Not<Output = S> + 'static
{
}

/// The standard table: AND, NOT, LATCH, OR, in that type-id order.
pub fn library<S: Logic, T: SimTime + 'static>() -> Vec<GateType<S, T>> {
    vec![and(), not(), latch(), or()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_order() {
        let names: Vec<String> = library::<bool, u64>()
            .iter()
            .map(|g| g.name().to_string())
            .collect();
        assert_eq!(names, ["AND", "NOT", "LATCH", "OR"]);
    }
}
