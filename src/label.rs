//! Label: a small signed integer addressing a slot in a [`LabelArena`].
//!
//! [`LabelArena`]: crate::arena::LabelArena

use crate::error::{FlexError, FlexResult};

/// Digits used by the base-26 naming scheme (`0-9`, then `a-p`).
const NAME_DIGITS: &[u8; 26] = b"0123456789abcdefghijklmnop";

/// Identifier of a pin, net or gate type inside its arena.
///
/// `Label` is a newtype around `i64` rather than a bare integer so that
/// pin labels, net labels and event IDs cannot be mixed up at compile
/// time. The reserved value [`Label::EMPTY`] means "no entity".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Label(i64);

impl Label {
    /// The "no entity" sentinel.
    pub const EMPTY: Label = Label(-1);

    /// Create a label from a raw integer.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Label(raw)
    }

    /// Return the underlying integer.
    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Returns `true` for [`Label::EMPTY`].
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Label::EMPTY
    }

    /// Slot index, or `None` for any negative label.
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Base-26 textual name of this label (`0`, `1`, … `p`, `10`, …).
    pub fn name(self) -> String {
        let mut n = self.0.unsigned_abs();
        let mut digits = Vec::new();
        loop {
            digits.push(NAME_DIGITS[(n % 26) as usize]);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        if self.0 < 0 {
            digits.push(b'-');
        }
        digits.iter().rev().map(|&b| b as char).collect()
    }

    /// Parse a name produced by [`Label::name`].
    ///
    /// Only lowercase name digits are accepted, with an optional leading `-`.
    pub fn from_name(name: &str) -> FlexResult<Label> {
        let digits = name.strip_prefix('-').unwrap_or(name);
        if digits.is_empty() || !digits.bytes().all(|b| NAME_DIGITS.contains(&b)) {
            return Err(FlexError::InvalidLabelName(name.to_string()));
        }
        i64::from_str_radix(name, 26)
            .map(Label)
            .map_err(|_| FlexError::InvalidLabelName(name.to_string()))
    }
}

impl From<usize> for Label {
    fn from(index: usize) -> Self {
        Label(index as i64)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "#-")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Convert a slice of raw integers into labels.
pub fn labels(raw: &[i64]) -> Vec<Label> {
    raw.iter().copied().map(Label::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sentinel() {
        assert!(Label::EMPTY.is_empty());
        assert_eq!(Label::EMPTY.raw(), -1);
        assert_eq!(Label::EMPTY.index(), None);
        assert!(!Label::new(0).is_empty());
        assert_eq!(Label::new(7).index(), Some(7));
    }

    #[test]
    fn test_ordering_matches_raw() {
        assert!(Label::EMPTY < Label::new(0));
        assert!(Label::new(3) < Label::new(12));
    }

    #[test]
    fn test_names() {
        assert_eq!(Label::new(0).name(), "0");
        assert_eq!(Label::new(10).name(), "a");
        assert_eq!(Label::new(25).name(), "p");
        assert_eq!(Label::new(26).name(), "10");
        assert_eq!(Label::EMPTY.name(), "-1");
    }

    #[test]
    fn test_name_parse() {
        for raw in [0, 1, 25, 26, 675, 12345] {
            let l = Label::new(raw);
            assert_eq!(Label::from_name(&l.name()).unwrap(), l);
        }
        assert_eq!(Label::from_name("-1").unwrap(), Label::EMPTY);
    }

    #[test]
    fn test_name_parse_rejects_out_of_alphabet() {
        let err = Label::from_name("z").unwrap_err();
        assert_eq!(err, FlexError::InvalidLabelName("z".into()));
        assert!(Label::from_name("").is_err());
    }

    #[test]
    fn test_name_parse_rejects_foreign_spellings() {
        for name in ["A", "1F", "+1", "-", "--1", " 1"] {
            assert_eq!(
                Label::from_name(name).unwrap_err(),
                FlexError::InvalidLabelName(name.into()),
                "{name:?}"
            );
        }
        assert_eq!(Label::from_name("-a").unwrap(), Label::new(-10));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Label::new(4)), "#4");
        assert_eq!(format!("{}", Label::EMPTY), "#-");
    }
}
