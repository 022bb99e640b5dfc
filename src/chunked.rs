use std::sync::{Arc, Mutex, PoisonError};

use nalgebra::Vector3;
use rustc_hash::FxHashMap;

use crate::cache::SharedRankCache;
use crate::dimensions::RegionBounds;
use crate::normalization::{NormalizationKey, NormalizationMap};
use crate::{CellOrdering, GridCoordinate, LayoutConfig};

/// Chunks of the array in storage order, together with the number of cells stored before each of them
#[derive(Debug)]
struct ChunkTable {
    /// Dense normalization of the chunk grid, only for space-filling chunk orders
    chunk_map: Option<NormalizationMap>,
    /// Chunk coordinate at each dense chunk index
    order: Vec<Vector3<usize>>,
    /// `offsets[i]` is the number of cells in all chunks with a dense index below `i`. Has one extra trailing entry
    /// holding the total number of cells
    offsets: Vec<usize>,
}

/// Cell-within-chunk-within-array coordinates. Assigns every cell of a chunked array a global index in
/// `[0, total_cells)`: the number of cells in all chunks that precede the cell's chunk in chunk order, plus the dense
/// rank of the cell within its own chunk. Chunks on the high boundary of an axis may be partial, they are linearized
/// as grids of their actual (clipped) size.
///
/// For two cells in different chunks the global indices compare like the chunks do in chunk order, and for two cells
/// in the same chunk they compare like the cells do in cell order.
#[derive(Debug)]
pub struct ChunkedCoordinate {
    cells: GridCoordinate,
    chunk_grid: GridCoordinate,
    chunk_size: Vector3<usize>,
    cell_ordering: CellOrdering,
    table: ChunkTable,
    local_maps: Mutex<FxHashMap<NormalizationKey, Arc<NormalizationMap>>>,
    cache: Option<SharedRankCache>,
}

impl ChunkedCoordinate {
    pub fn new(layout: &LayoutConfig) -> crate::Result<Self> {
        Self::with_cache(layout, None)
    }

    /// Creates a new `ChunkedCoordinate` that memoizes ranks in `cache`. This validates `layout` and builds the chunk
    /// traversal table, normalizing the chunk grid first if the chunk ordering is a space-filling curve
    pub fn with_cache(layout: &LayoutConfig, cache: Option<SharedRankCache>) -> crate::Result<Self> {
        layout.validate()?;
        // The array grid is only used for clipping. Cells are ranked within a single chunk, so the cell ordering's
        // capacity limit applies to the chunk shape
        let cells = GridCoordinate::new(layout.size, CellOrdering::RowMajor)?;
        layout
            .cell_ordering
            .check_capacity(layout.chunk.zip_map(&layout.size, usize::min))?;
        let chunk_counts = cells.extent().chunk_counts(layout.chunk);
        let chunk_grid = GridCoordinate::with_cache(chunk_counts, layout.chunk_ordering, cache.clone())?;
        let table = ChunkTable::build(&cells, &chunk_grid, layout.chunk, cache.clone())?;
        log::debug!(
            "Chunked {} layout {:?} / {:?}: {} chunks ({}), cells in {} order",
            if cells.extent().is_2d() { "2D" } else { "3D" },
            layout.size,
            layout.chunk,
            table.order.len(),
            layout.chunk_ordering,
            layout.cell_ordering
        );
        Ok(Self {
            cells,
            chunk_grid,
            chunk_size: layout.chunk,
            cell_ordering: layout.cell_ordering,
            table,
            local_maps: Mutex::new(FxHashMap::default()),
            cache,
        })
    }

    /// The grid of all cells of the array. Always row-major, it only serves to clip chunks and queries
    pub fn cell_grid(&self) -> &GridCoordinate {
        &self.cells
    }

    pub fn array_dims(&self) -> Vector3<usize> {
        self.cells.dims()
    }

    pub fn chunk_size(&self) -> Vector3<usize> {
        self.chunk_size
    }

    /// Number of chunks along each axis
    pub fn chunk_counts(&self) -> Vector3<usize> {
        self.chunk_grid.dims()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_grid.total_cells()
    }

    pub fn total_cells(&self) -> usize {
        self.cells.total_cells()
    }

    pub fn cell_ordering(&self) -> CellOrdering {
        self.cell_ordering
    }

    pub fn chunk_ordering(&self) -> CellOrdering {
        self.chunk_grid.ordering()
    }

    /// The chunk containing `cell`
    pub fn parent_chunk(&self, cell: Vector3<usize>) -> Vector3<usize> {
        cell.component_div(&self.chunk_size)
    }

    /// Row-major index of `chunk` within the chunk grid, independent of the chunk ordering. Useful as a set key
    pub fn flat_chunk_index(&self, chunk: Vector3<usize>) -> usize {
        let counts = self.chunk_counts();
        chunk.x + chunk.y * counts.x + chunk.z * counts.x * counts.y
    }

    /// The cells covered by `chunk`, clipped to the array
    pub fn chunk_region(&self, chunk: Vector3<usize>) -> RegionBounds {
        self.cells.bounds(chunk, self.chunk_size)
    }

    /// Actual size of `chunk`, which is smaller than the nominal chunk size for partial chunks
    pub fn chunk_dims(&self, chunk: Vector3<usize>) -> Vector3<usize> {
        self.chunk_region(chunk).dims()
    }

    /// Dense position of `chunk` in chunk order, in `[0, chunk_count)`
    pub fn linearize_chunk(&self, chunk: Vector3<usize>) -> crate::Result<usize> {
        if !self.chunk_grid.extent().contains(chunk) {
            return Err(crate::Error::out_of_range(chunk, self.chunk_counts()));
        }
        match &self.table.chunk_map {
            Some(map) => map.require_position(chunk),
            None => Ok(self.chunk_grid.linearize(chunk) as usize),
        }
    }

    /// Inverse of `linearize_chunk`. Returns `None` if `index` is not smaller than the number of chunks
    pub fn delinearize_chunk_index(&self, index: usize) -> Option<Vector3<usize>> {
        self.table.order.get(index).copied()
    }

    /// All chunks in the order in which they are stored
    pub fn chunks_in_order(&self) -> &[Vector3<usize>] {
        &self.table.order
    }

    /// Number of cells stored before the first cell of `chunk`
    pub fn cells_before_chunk(&self, chunk: Vector3<usize>) -> crate::Result<usize> {
        let index = self.linearize_chunk(chunk)?;
        self.table
            .offsets
            .get(index)
            .copied()
            .ok_or(crate::Error::MissingChunk {
                index,
                chunk_counts: self.chunk_counts().into(),
            })
    }

    /// Dense rank of `cell` within its own chunk, in `[0, cells in chunk)`
    pub fn local_rank(&self, cell: Vector3<usize>) -> crate::Result<usize> {
        let chunk = self.parent_chunk(cell);
        let region = self.chunk_region(chunk);
        if !region.contains(cell) {
            return Err(crate::Error::out_of_range(cell, self.array_dims()));
        }
        let local = cell - region.start;
        let dims = region.dims();
        if self.cell_ordering.is_dense() {
            let grid = GridCoordinate::with_cache(dims, self.cell_ordering, self.cache.clone())?;
            Ok(grid.linearize(local) as usize)
        } else {
            self.local_map(dims)?
                .require_position(local)
                .map_err(|error| error.in_chunk(chunk))
        }
    }

    /// Global index of `cell`, a bijection from the cells of the array onto `[0, total_cells)`
    pub fn global_index(&self, cell: Vector3<usize>) -> crate::Result<usize> {
        if !self.cells.extent().contains(cell) {
            return Err(crate::Error::out_of_range(cell, self.array_dims()));
        }
        self.global_index_in_bounds(cell)
    }

    /// `global_index` for a cell that is known to lie within the array
    pub(crate) fn global_index_in_bounds(&self, cell: Vector3<usize>) -> crate::Result<usize> {
        let before = self.cells_before_chunk(self.parent_chunk(cell))?;
        Ok(before + self.local_rank(cell)?)
    }

    /// Inverse of `global_index`
    pub fn cell_at_global_index(&self, index: usize) -> crate::Result<Vector3<usize>> {
        if index >= self.total_cells() {
            return Err(crate::Error::GlobalIndexOutOfRange {
                index,
                total_cells: self.total_cells(),
            });
        }
        // Last chunk whose first cell is at or before `index`
        let chunk_index = self.table.offsets.partition_point(|&offset| offset <= index) - 1;
        let chunk = self.table.order[chunk_index];
        let region = self.chunk_region(chunk);
        let position = index - self.table.offsets[chunk_index];
        let dims = region.dims();
        let local = if self.cell_ordering.is_dense() {
            self.cell_ordering.delinearize(position as u64, dims)
        } else {
            self.local_map(dims)?.coord_at(position)
        };
        local
            .map(|local| region.start + local)
            .ok_or(crate::Error::GlobalIndexOutOfRange {
                index,
                total_cells: self.total_cells(),
            })
    }

    /// The normalization map for chunks of actual size `dims`, built on first use and shared by all chunks of that size
    fn local_map(&self, dims: Vector3<usize>) -> crate::Result<Arc<NormalizationMap>> {
        let key = NormalizationKey::new(dims, self.cell_ordering);
        let mut maps = self.local_maps.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(map) = maps.get(&key) {
            return Ok(Arc::clone(map));
        }
        let map = Arc::new(NormalizationMap::build(key, self.cache.clone())?);
        maps.insert(key, Arc::clone(&map));
        Ok(map)
    }
}

/// Global index of `cell` in an array with the given `layout`. Builds the chunk table for this one lookup, so callers
/// resolving many cells should hold on to a `ChunkedCoordinate` instead
pub fn global_index(cell: Vector3<usize>, layout: &LayoutConfig) -> crate::Result<usize> {
    ChunkedCoordinate::new(layout)?.global_index(cell)
}

/// The chunk containing `cell` in an array with the given `layout`
pub fn parent_chunk(cell: Vector3<usize>, layout: &LayoutConfig) -> crate::Result<Vector3<usize>> {
    layout.validate()?;
    let in_array = (0..3).all(|axis| cell[axis] < layout.size[axis]);
    if !in_array {
        return Err(crate::Error::out_of_range(cell, layout.size));
    }
    Ok(cell.component_div(&layout.chunk))
}

impl ChunkTable {
    fn build(
        cells: &GridCoordinate,
        chunk_grid: &GridCoordinate,
        chunk_size: Vector3<usize>,
        cache: Option<SharedRankCache>,
    ) -> crate::Result<Self> {
        let counts = chunk_grid.dims();
        let ordering = chunk_grid.ordering();
        let chunk_map = if ordering.is_dense() {
            None
        } else {
            Some(NormalizationMap::build(NormalizationKey::new(counts, ordering), cache)?)
        };

        let chunk_count = chunk_grid.total_cells();
        let mut order = Vec::with_capacity(chunk_count);
        let mut offsets = Vec::with_capacity(chunk_count + 1);
        offsets.push(0);
        for index in 0..chunk_count {
            let chunk = match &chunk_map {
                Some(map) => map.coord_at(index),
                None => ordering.delinearize(index as u64, counts),
            }
            .ok_or(crate::Error::MissingChunk {
                index,
                chunk_counts: counts.into(),
            })?;
            let before = offsets[index];
            offsets.push(before + cells.bounds(chunk, chunk_size).cell_count());
            order.push(chunk);
        }
        Ok(Self {
            chunk_map,
            order,
            offsets,
        })
    }
}
