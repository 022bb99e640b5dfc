use std::fmt::Display;

use crate::StorageRange;

/// Helper struct that wraps around a slice of `StorageRange`s and makes it displayable as `[0-3, 8-11, 14]`, which is
/// far easier to read in logs and assertion messages than the `Debug` representation
pub struct DisplayableRanges<'a> {
    ranges: &'a [StorageRange],
}

impl<'a> std::fmt::Debug for DisplayableRanges<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl<'a> Display for DisplayableRanges<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (idx, range) in self.ranges.iter().enumerate() {
            write!(f, "{}", range)?;
            if idx < self.ranges.len() - 1 {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

impl<'a> PartialEq for DisplayableRanges<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.ranges == other.ranges
    }
}

impl<'a> Eq for DisplayableRanges<'a> {}

/// Wraps a slice of storage ranges into a type that implements `Display`
pub fn make_displayable(ranges: &[StorageRange]) -> DisplayableRanges<'_> {
    DisplayableRanges { ranges }
}
