//! `Pin` and `Net` records and the sorted-set helpers that keep their
//! adjacency lists strictly ascending.

use crate::arena::Emptiable;
use crate::label::Label;

// ── Pin ───────────────────────────────────────────────────────────────

/// A connection point. Belongs to zero or more nets.
///
/// In a well-formed digital circuit a pin sits on at most two nets: the
/// net of the gate it belongs to and one wire net.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Pin<S> {
    pub(crate) nets: Vec<Label>,
    pub(crate) valid: bool,
    pub(crate) state: S,
}

impl<S: Default> Pin<S> {
    /// A live pin on exactly the given nets (sorted and deduplicated here).
    pub(crate) fn on(nets: &[Label]) -> Self {
        let mut nets = nets.to_vec();
        nets.sort_unstable();
        nets.dedup();
        Pin {
            nets,
            valid: true,
            state: S::default(),
        }
    }
}

impl<S> Pin<S> {
    /// Nets this pin belongs to, ascending.
    pub fn nets(&self) -> &[Label] {
        &self.nets
    }

    /// Whether the slot holds a live pin.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The signal value currently on this pin.
    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S: Default> Emptiable for Pin<S> {
    fn empty() -> Self {
        Pin {
            nets: Vec::new(),
            valid: false,
            state: S::default(),
        }
    }

    fn is_empty(&self) -> bool {
        !self.valid
    }
}

// ── Net ───────────────────────────────────────────────────────────────

/// A set of pins sharing one signal.
///
/// `type_id == Label::EMPTY` marks a passive wire net. Any other value
/// makes the net a gate instance of that gate type. A net with no pins
/// is a tombstone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Net<S> {
    pub(crate) pins: Vec<Label>,
    pub(crate) type_id: Label,
    pub(crate) state: S,
}

impl<S> Net<S> {
    /// Describe a net by its pins, type and state. The pin list may be
    /// unsorted and may name stale pins; `NetController::add_net` cleans it.
    pub fn new(pins: Vec<Label>, type_id: Label, state: S) -> Self {
        Net {
            pins,
            type_id,
            state,
        }
    }

    /// Pins on this net, ascending.
    pub fn pins(&self) -> &[Label] {
        &self.pins
    }

    /// Gate type of the net, or `Label::EMPTY` for a wire net.
    pub fn type_id(&self) -> Label {
        self.type_id
    }

    /// The net's signal value.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Returns `true` for a passive wire net.
    pub fn is_wire(&self) -> bool {
        self.type_id.is_empty()
    }
}

impl<S: Default> Net<S> {
    /// A wire net over `pins` with the default state.
    pub fn wire(pins: Vec<Label>) -> Self {
        Net::new(pins, Label::EMPTY, S::default())
    }
}

impl<S: Default> Emptiable for Net<S> {
    fn empty() -> Self {
        Net::wire(Vec::new())
    }

    fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

// ── Sorted label sets ────────────────────────────────────────────────

/// Insert `label` keeping `set` ascending. Returns `false` if present.
pub(crate) fn sorted_insert(set: &mut Vec<Label>, label: Label) -> bool {
    match set.binary_search(&label) {
        Ok(_) => false,
        Err(at) => {
            set.insert(at, label);
            true
        }
    }
}

/// Remove `label` from the ascending `set`. Returns `false` if absent.
pub(crate) fn sorted_remove(set: &mut Vec<Label>, label: Label) -> bool {
    match set.binary_search(&label) {
        Ok(at) => {
            set.remove(at);
            true
        }
        Err(_) => false,
    }
}

/// Linear merge of two ascending sets, dropping duplicates.
pub(crate) fn sorted_union(a: &[Label], b: &[Label]) -> Vec<Label> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Returns `true` if `set` is strictly ascending.
pub(crate) fn is_strictly_sorted(set: &[Label]) -> bool {
    set.windows(2).all(|w| w[0] < w[1])
}
