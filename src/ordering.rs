use std::fmt::Display;
use std::str::FromStr;

use nalgebra::Vector3;

use crate::curves::{hilbert, linear, morton};

/// The traversal order used to linearize the cells of a grid (or the chunks of a chunk grid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellOrdering {
    /// X varies fastest, then Y, then Z. This is the default `CellOrdering`!
    RowMajor,
    /// Y varies fastest, then X, then Z
    ColMajor,
    /// Morton order, interleaving the bits of all axes. 2D grids (`Z == 1`) use the 2D code
    ZOrder,
    /// Hilbert curve on each Z layer, layers stacked along Z
    Hilbert,
}

impl CellOrdering {
    pub const ALL: [CellOrdering; 4] = [
        CellOrdering::RowMajor,
        CellOrdering::ColMajor,
        CellOrdering::ZOrder,
        CellOrdering::Hilbert,
    ];

    /// Is this ordering a bijection onto `[0, N)` for every grid? Only the space-filling curves need normalization
    pub fn is_dense(&self) -> bool {
        matches!(self, CellOrdering::RowMajor | CellOrdering::ColMajor)
    }

    /// The identifier of this ordering, e.g. `row-major`
    pub fn name(&self) -> &'static str {
        match self {
            CellOrdering::RowMajor => "row-major",
            CellOrdering::ColMajor => "col-major",
            CellOrdering::ZOrder => "z-order",
            CellOrdering::Hilbert => "hilbert",
        }
    }

    /// Largest number of cells per axis for which this ordering yields exact ranks
    pub fn max_extent(&self, dims: Vector3<usize>) -> usize {
        match self {
            CellOrdering::RowMajor | CellOrdering::ColMajor => usize::MAX,
            CellOrdering::ZOrder if dims.z <= 1 => 1 << morton::MORTON_2D_BITS_PER_AXIS,
            CellOrdering::ZOrder => 1 << morton::MORTON_3D_BITS_PER_AXIS,
            CellOrdering::Hilbert => hilbert::MAX_HILBERT_SIDE,
        }
    }

    /// Fails with `Error::CurveCapacityExceeded` if a grid of `dims` is too large for this ordering to rank exactly
    pub fn check_capacity(&self, dims: Vector3<usize>) -> crate::Result<()> {
        let max_extent = self.max_extent(dims);
        if dims.iter().any(|&size| size > max_extent) {
            return Err(crate::Error::CurveCapacityExceeded {
                ordering: *self,
                dims: dims.into(),
                max_extent,
            });
        }
        Ok(())
    }

    /// The raw rank of `coord` in a grid of `dims`. Dense for the linear orderings, possibly sparse for the curves.
    /// Callers guarantee `coord < dims` on every axis
    pub fn rank(&self, coord: Vector3<usize>, dims: Vector3<usize>) -> u64 {
        match self {
            CellOrdering::RowMajor => linear::row_major(coord, dims),
            CellOrdering::ColMajor => linear::col_major(coord, dims),
            CellOrdering::ZOrder if dims.z <= 1 => morton::encode_2d(coord.x as u32, coord.y as u32),
            CellOrdering::ZOrder => morton::encode_3d(coord.x as u32, coord.y as u32, coord.z as u32),
            CellOrdering::Hilbert => hilbert::rank(coord, dims),
        }
    }

    /// Inverts `rank` for the dense orderings. Returns `None` for the space-filling curves, which are inverted through
    /// a `NormalizationMap` instead, and for ranks outside of `dims`
    pub fn delinearize(&self, rank: u64, dims: Vector3<usize>) -> Option<Vector3<usize>> {
        match self {
            CellOrdering::RowMajor => linear::row_major_inverse(rank, dims),
            CellOrdering::ColMajor => linear::col_major_inverse(rank, dims),
            CellOrdering::ZOrder | CellOrdering::Hilbert => None,
        }
    }
}

impl Default for CellOrdering {
    fn default() -> Self {
        CellOrdering::RowMajor
    }
}

impl Display for CellOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CellOrdering {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "row-major" => Ok(CellOrdering::RowMajor),
            "col-major" => Ok(CellOrdering::ColMajor),
            "z-order" => Ok(CellOrdering::ZOrder),
            "hilbert" => Ok(CellOrdering::Hilbert),
            other => Err(crate::Error::UnknownOrdering(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for ordering in CellOrdering::ALL {
            assert_eq!(ordering, ordering.to_string().parse::<CellOrdering>().unwrap());
        }
        assert_eq!(
            crate::Error::UnknownOrdering("spiral".to_owned()),
            "spiral".parse::<CellOrdering>().unwrap_err()
        );
    }

    #[test]
    fn dense_orderings() {
        assert!(CellOrdering::RowMajor.is_dense());
        assert!(CellOrdering::ColMajor.is_dense());
        assert!(!CellOrdering::ZOrder.is_dense());
        assert!(!CellOrdering::Hilbert.is_dense());
    }

    #[test]
    fn z_order_switches_to_3d_code_for_volumes() {
        let coord = Vector3::new(1, 1, 0);
        assert_eq!(3, CellOrdering::ZOrder.rank(coord, Vector3::new(4, 4, 1)));
        assert_eq!(3, CellOrdering::ZOrder.rank(coord, Vector3::new(4, 4, 4)));
        assert_eq!(4, CellOrdering::ZOrder.rank(Vector3::new(0, 0, 1), Vector3::new(4, 4, 4)));
    }

    #[test]
    fn curves_do_not_delinearize() {
        let dims = Vector3::new(4, 4, 1);
        assert_eq!(None, CellOrdering::ZOrder.delinearize(0, dims));
        assert_eq!(None, CellOrdering::Hilbert.delinearize(0, dims));
        assert_eq!(Some(Vector3::new(1, 2, 0)), CellOrdering::RowMajor.delinearize(9, dims));
    }

    #[test]
    fn ranks_are_repeatable() {
        let dims = Vector3::new(7, 5, 3);
        for ordering in CellOrdering::ALL {
            let coord = Vector3::new(6, 2, 1);
            assert_eq!(ordering.rank(coord, dims), ordering.rank(coord, dims));
        }
    }
}
