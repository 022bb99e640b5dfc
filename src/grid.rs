use nalgebra::Vector3;

use crate::cache::{with_cache, RankKey, SharedRankCache};
use crate::dimensions::{Extent, RegionBounds};
use crate::CellOrdering;

/// A regular grid of `dims` cells linearized with one `CellOrdering`. Used for the cells of an array, for the cells
/// within a single chunk, and for the grid of chunks
#[derive(Debug, Clone)]
pub struct GridCoordinate {
    extent: Extent,
    ordering: CellOrdering,
    cache: Option<SharedRankCache>,
}

impl GridCoordinate {
    /// Creates a new `GridCoordinate` without memoization. Fails if any axis of `dims` is zero or if the grid is too
    /// large for the ordering to produce exact ranks
    pub fn new(dims: Vector3<usize>, ordering: CellOrdering) -> crate::Result<Self> {
        Self::with_cache(dims, ordering, None)
    }

    /// Like `new`, but memoizes ranks in the given shared cache
    pub fn with_cache(
        dims: Vector3<usize>,
        ordering: CellOrdering,
        cache: Option<SharedRankCache>,
    ) -> crate::Result<Self> {
        let extent = Extent::new(dims, "grid size")?;
        ordering.check_capacity(dims)?;
        Ok(Self {
            extent,
            ordering,
            cache,
        })
    }

    pub fn dims(&self) -> Vector3<usize> {
        self.extent.dims()
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn ordering(&self) -> CellOrdering {
        self.ordering
    }

    pub fn total_cells(&self) -> usize {
        self.extent.cell_count()
    }

    /// Raw rank of `coord` under this grid's ordering. Dense in `[0, total_cells)` for row-major and column-major, but
    /// possibly sparse (and larger) for the space-filling curves.
    ///
    /// `coord` must lie within the grid, this is not checked
    pub fn linearize(&self, coord: Vector3<usize>) -> u64 {
        let cache = match &self.cache {
            Some(cache) => cache,
            None => return self.ordering.rank(coord, self.dims()),
        };
        let key = RankKey::new(coord, self.dims(), self.ordering);
        if let Some(rank) = with_cache(cache, |cache| cache.get(&key).copied()) {
            return rank;
        }
        let rank = self.ordering.rank(coord, self.dims());
        with_cache(cache, |cache| cache.insert(key, rank));
        rank
    }

    /// Checked variant of `linearize`
    pub fn try_linearize(&self, coord: Vector3<usize>) -> crate::Result<u64> {
        if !self.extent.contains(coord) {
            return Err(crate::Error::out_of_range(coord, self.dims()));
        }
        Ok(self.linearize(coord))
    }

    /// Bounds of the region at `grid_index` when this grid is tiled with regions of `nominal` size. The region is
    /// clipped to the grid, so regions on the high boundary of an axis may be smaller than `nominal`. This is how the
    /// actual size of a partial chunk is determined
    pub fn bounds(&self, grid_index: Vector3<usize>, nominal: Vector3<usize>) -> RegionBounds {
        let dims = self.dims();
        let start = grid_index.component_mul(&nominal).zip_map(&dims, usize::min);
        let end = (start + nominal).zip_map(&dims, usize::min);
        RegionBounds::new(start, end)
    }

    /// Intersection of the closed box `[lo, hi]` with this grid, as half-open bounds. Signed so that boxes reaching
    /// below zero or inverted boxes (`lo > hi`) can be passed as-is; those yield an empty region
    pub fn intersection(&self, lo: Vector3<i64>, hi: Vector3<i64>) -> RegionBounds {
        let dims = self.dims();
        let clip = |value: i64, size: usize| value.clamp(0, size as i64) as usize;
        let start = Vector3::new(clip(lo.x, dims.x), clip(lo.y, dims.y), clip(lo.z, dims.z));
        let end = Vector3::new(
            clip(hi.x.saturating_add(1), dims.x),
            clip(hi.y.saturating_add(1), dims.y),
            clip(hi.z.saturating_add(1), dims.z),
        );
        RegionBounds::new(start, end.zip_map(&start, usize::max))
    }
}
