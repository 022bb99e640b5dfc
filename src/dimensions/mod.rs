mod bounds;
pub use self::bounds::*;

use nalgebra::Vector3;

use crate::align::Alignable;

/// The positive size of a grid along X, Y and Z. A Z size of 1 denotes a 2D grid. This is used both for arrays of
/// cells, for single chunks and for the grid of chunks covering an array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    dims: Vector3<usize>,
}

impl Extent {
    /// Creates a new `Extent`, failing if any axis is zero. `what` names the extent in the error message
    pub fn new(dims: Vector3<usize>, what: &'static str) -> crate::Result<Self> {
        if dims.iter().any(|&size| size == 0) {
            return Err(crate::Error::InvalidExtent {
                what,
                extent: dims.into(),
            });
        }
        Ok(Self { dims })
    }

    pub fn dims(&self) -> Vector3<usize> {
        self.dims
    }

    pub fn cell_count(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn is_2d(&self) -> bool {
        self.dims.z == 1
    }

    pub fn contains(&self, coord: Vector3<usize>) -> bool {
        coord.x < self.dims.x && coord.y < self.dims.y && coord.z < self.dims.z
    }

    /// Number of chunks of nominal size `chunk` needed along each axis to cover this extent
    pub fn chunk_counts(&self, chunk: Vector3<usize>) -> Vector3<usize> {
        self.dims.zip_map(&chunk, |size, chunk| size.div_ceil_by(chunk))
    }

    /// Iterates over all coordinates within this extent, X innermost and Z outermost
    pub fn coords(&self) -> impl Iterator<Item = Vector3<usize>> {
        RegionBounds::new(Vector3::zeros(), self.dims).coords()
    }
}
