//! Cell identifiers.

use std::fmt;

/// Index of a cell in the SoA cell store.  Ids are dense (`0..count`) and
/// assigned in spawn order.
///
/// Ordering is the id order, which is also the order the tick loop merges
/// proposals in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub u32);

impl CellId {
    /// Position of this cell in the store's arrays.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

impl TryFrom<usize> for CellId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<CellId, Self::Error> {
        u32::try_from(n).map(CellId)
    }
}
