//! Label arena: a contiguous, tombstoned store addressed by [`Label`].
//!
//! Every entity store in a [`Circuit`](crate::circuit::Circuit) is a
//! `LabelArena`. Removal never shrinks the arena: the slot is overwritten
//! with the element type's empty value and becomes eligible for reuse by
//! a later [`LabelArena::add`].

use crate::label::Label;

/// Capability required of anything stored in a [`LabelArena`]: the type
/// has a distinguished "empty" value and can report whether a value is it.
pub trait Emptiable {
    /// The tombstone value written into removed slots.
    fn empty() -> Self;

    /// Returns `true` if this value is a tombstone.
    fn is_empty(&self) -> bool;
}

/// Contiguous store mapping labels to values.
///
/// Lookups of out-of-range, negative or tombstoned labels yield `None`;
/// no operation on an arena panics on a bad label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelArena<T> {
    slots: Vec<T>,
}

impl<T: Emptiable> LabelArena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        LabelArena { slots: Vec::new() }
    }

    /// Number of slots, tombstones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the arena has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store `value` in the first empty slot at or after `hint`, or append.
    ///
    /// Reuse is deterministic: the lowest free label `>= hint` wins. A
    /// negative or out-of-range hint always appends.
    pub fn add(&mut self, value: T, hint: Label) -> Label {
        if let Some(start) = hint.index().filter(|&s| s < self.slots.len()) {
            if let Some(offset) = self.slots[start..].iter().position(Emptiable::is_empty) {
                let at = start + offset;
                self.slots[at] = value;
                return Label::from(at);
            }
        }
        self.slots.push(value);
        Label::from(self.slots.len() - 1)
    }

    /// Write `value` at `at`, growing the arena with empty slots if needed.
    ///
    /// Negative labels are ignored.
    pub fn set(&mut self, value: T, at: Label) {
        let Some(index) = at.index() else {
            return;
        };
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, T::empty);
        }
        self.slots[index] = value;
    }

    /// The live value at `at`, if any.
    pub fn get(&self, at: Label) -> Option<&T> {
        self.slots.get(at.index()?).filter(|v| !v.is_empty())
    }

    /// Mutable access to the live value at `at`, if any.
    pub fn get_mut(&mut self, at: Label) -> Option<&mut T> {
        self.slots.get_mut(at.index()?).filter(|v| !v.is_empty())
    }

    /// Overwrite the slot at `at` with a tombstone. Out-of-range is a no-op.
    pub fn remove(&mut self, at: Label) {
        if let Some(slot) = at.index().and_then(|i| self.slots.get_mut(i)) {
            *slot = T::empty();
        }
    }

    /// Iterate over live slots as `(label, value)` in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_empty())
            .map(|(i, v)| (Label::from(i), v))
    }

    /// Labels of all live slots, ascending.
    pub fn labels(&self) -> Vec<Label> {
        self.iter().map(|(label, _)| label).collect()
    }

    /// Raw slot view, tombstones included.
    pub fn slots(&self) -> &[T] {
        &self.slots
    }
}

impl<T: Emptiable + Clone> LabelArena<T> {
    /// Copy out the live values only, in label order.
    pub fn compress(&self) -> Vec<T> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }
}

impl<T: Emptiable> Default for LabelArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
