use nalgebra::Vector3;

use crate::CellOrdering;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{what} must be positive on every axis, got {extent:?}")]
    InvalidExtent {
        what: &'static str,
        extent: [usize; 3],
    },
    #[error("Coordinate {coord:?} is outside of the grid with dimensions {dims:?}")]
    CoordinateOutOfRange {
        coord: [usize; 3],
        dims: [usize; 3],
    },
    #[error("Unknown ordering '{0}', expected one of row-major, col-major, z-order, hilbert")]
    UnknownOrdering(String),
    #[error("Grid {dims:?} exceeds the capacity of the {ordering} ordering (at most {max_extent} cells per axis)")]
    CurveCapacityExceeded {
        ordering: CellOrdering,
        dims: [usize; 3],
        max_extent: usize,
    },
    #[error("Normalization map for shape {shape:?} ({ordering}) has no entry for {coord:?} (chunk {chunk:?})")]
    NormalizationMiss {
        shape: [usize; 3],
        ordering: CellOrdering,
        coord: [usize; 3],
        /// The chunk being linearized, if the map covers the cells of a chunk
        chunk: Option<[usize; 3]>,
    },
    #[error("Chunk traversal has no chunk at dense index {index} of a chunk grid with {chunk_counts:?} chunks")]
    MissingChunk {
        index: usize,
        chunk_counts: [usize; 3],
    },
    #[error("Global index {index} is out of range for an array of {total_cells} cells")]
    GlobalIndexOutOfRange {
        index: usize,
        total_cells: usize,
    },
}

impl Error {
    pub(crate) fn out_of_range(coord: Vector3<usize>, dims: Vector3<usize>) -> Self {
        Error::CoordinateOutOfRange {
            coord: coord.into(),
            dims: dims.into(),
        }
    }

    /// Attaches `chunk` to a `NormalizationMiss`. Other errors are returned unchanged
    pub(crate) fn in_chunk(self, chunk: Vector3<usize>) -> Self {
        match self {
            Error::NormalizationMiss {
                shape,
                ordering,
                coord,
                ..
            } => Error::NormalizationMiss {
                shape,
                ordering,
                coord,
                chunk: Some(chunk.into()),
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, crate::Error>;
