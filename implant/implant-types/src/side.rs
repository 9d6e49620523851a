//! Anatomical side selection.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The anatomical side a component is planned for.
///
/// `None` marks both "no side requested yet" on a configuration and
/// "side-free" on symmetric (straight-stem) components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnatomSide {
    /// No side / side-free.
    #[default]
    None,
    /// Patient left.
    Left,
    /// Patient right.
    Right,
}

impl AnatomSide {
    /// True when a concrete side (left or right) is selected.
    #[inline]
    #[must_use]
    pub fn is_set(self) -> bool {
        self != Self::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(AnatomSide::default(), AnatomSide::None);
        assert!(!AnatomSide::None.is_set());
        assert!(AnatomSide::Left.is_set());
        assert!(AnatomSide::Right.is_set());
    }
}
