//! Dense ranks for orderings that are not onto. A `NormalizationMap` is built by ranking every coordinate of a finite
//! domain, sorting by rank and handing out positions `0..N` in that order. The map depends only on the domain shape
//! and the ordering, so one map serves every chunk of the same actual shape.

use nalgebra::Vector3;

use crate::cache::SharedRankCache;
use crate::dimensions::Extent;
use crate::{CellOrdering, GridCoordinate};

/// Identifies a normalization domain: its shape and the ordering that ranks it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizationKey {
    pub shape: [usize; 3],
    pub ordering: CellOrdering,
}

impl NormalizationKey {
    pub fn new(shape: Vector3<usize>, ordering: CellOrdering) -> Self {
        Self {
            shape: shape.into(),
            ordering,
        }
    }

    pub fn shape(&self) -> Vector3<usize> {
        Vector3::from(self.shape)
    }
}

/// Forward (coordinate to dense position) and reverse (dense position to coordinate) lookup for one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationMap {
    key: NormalizationKey,
    /// Raw rank and coordinate of every cell, sorted by dense position
    entries: Vec<(u64, Vector3<usize>)>,
    /// Dense position of every cell, indexed by the row-major offset of its coordinate
    positions: Vec<usize>,
}

impl NormalizationMap {
    /// Builds the map for `key` by enumerating its whole domain. Ties in raw rank (the layered 3D Hilbert order can
    /// produce them when the padded square is larger than a layer) are broken by Z, then Y, then X
    pub fn build(key: NormalizationKey, cache: Option<SharedRankCache>) -> crate::Result<Self> {
        let grid = GridCoordinate::with_cache(key.shape(), key.ordering, cache)?;
        let extent = grid.extent();
        let mut entries = extent
            .coords()
            .map(|coord| (grid.linearize(coord), coord))
            .collect::<Vec<_>>();
        entries.sort_by_key(|&(rank, coord)| (rank, coord.z, coord.y, coord.x));

        let mut positions = vec![0; entries.len()];
        for (position, (_, coord)) in entries.iter().enumerate() {
            positions[row_major_offset(*coord, extent)] = position;
        }
        log::debug!(
            "Built normalization map for shape {:?} ({}) with {} entries",
            key.shape,
            key.ordering,
            entries.len()
        );
        Ok(Self {
            key,
            entries,
            positions,
        })
    }

    pub fn key(&self) -> NormalizationKey {
        self.key
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dense position of `coord`, or `None` if `coord` is outside of the domain
    pub fn position_of(&self, coord: Vector3<usize>) -> Option<usize> {
        let shape = self.key.shape();
        if coord.x >= shape.x || coord.y >= shape.y || coord.z >= shape.z {
            return None;
        }
        let offset = coord.x + coord.y * shape.x + coord.z * shape.x * shape.y;
        self.positions.get(offset).copied()
    }

    /// Coordinate at dense `position`
    pub fn coord_at(&self, position: usize) -> Option<Vector3<usize>> {
        self.entries.get(position).map(|&(_, coord)| coord)
    }

    /// Forward lookup that reports a miss as `Error::NormalizationMiss`. A miss means the map was built for a
    /// different domain than the one it is queried with
    pub fn require_position(&self, coord: Vector3<usize>) -> crate::Result<usize> {
        self.position_of(coord)
            .ok_or(crate::Error::NormalizationMiss {
                shape: self.key.shape,
                ordering: self.key.ordering,
                coord: coord.into(),
                chunk: None,
            })
    }
}

fn row_major_offset(coord: Vector3<usize>, extent: Extent) -> usize {
    let dims = extent.dims();
    coord.x + coord.y * dims.x + coord.z * dims.x * dims.y
}
