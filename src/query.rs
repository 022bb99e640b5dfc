use std::collections::BTreeSet;
use std::fmt::Display;

use nalgebra::Vector3;

use crate::cache::SharedRankCache;
use crate::dimensions::RegionBounds;
use crate::helper::make_displayable;
use crate::{CellOrdering, ChunkedCoordinate, LayoutConfig, QueryBox, QueryConfig, QueryMetrics};

/// An inclusive range `[start, end]` of contiguous global indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageRange {
    pub start: usize,
    pub end: usize,
}

impl StorageRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of indices in this range. A hand-built range with `start > end` counts as its single `start` index
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

impl Display for StorageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Merges a set of global indices into the minimal list of contiguous, inclusive ranges, in ascending order.
/// Duplicates are ignored
pub fn coalesce_ranges(indices: impl IntoIterator<Item = usize>) -> Vec<StorageRange> {
    let mut indices = indices.into_iter().collect::<Vec<_>>();
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<StorageRange> = Vec::new();
    for index in indices {
        match ranges.last_mut() {
            Some(range) if range.end + 1 == index => range.end = index,
            _ => ranges.push(StorageRange::new(index, index)),
        }
    }
    ranges
}

/// Everything a read query touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Cells inside the query box, clipped to the array. Ordered with X innermost and Z outermost
    pub requested_cells: Vec<Vector3<usize>>,
    /// Row-major flat indices (within the chunk grid) of every chunk that holds at least one requested cell
    pub touched_chunks: BTreeSet<usize>,
    /// All cells of the touched chunks, chunk by chunk. A superset of `requested_cells`
    pub actual_cells: Vec<Vector3<usize>>,
    /// Contiguous global index ranges covering `actual_cells`, i.e. what a chunked read fetches
    pub chunked_ranges: Vec<StorageRange>,
    /// Contiguous global index ranges covering only `requested_cells`
    pub unchunked_ranges: Vec<StorageRange>,
    /// Number of cells in the whole array
    pub total_cells: usize,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.requested_cells.is_empty()
    }

    pub fn metrics(&self) -> QueryMetrics {
        QueryMetrics::from_result(self)
    }
}

/// Reduces rectangular read queries on one chunked layout to the storage ranges they touch
#[derive(Debug)]
pub struct QueryAnalyzer {
    chunked: ChunkedCoordinate,
}

impl QueryAnalyzer {
    pub fn new(layout: &LayoutConfig) -> crate::Result<Self> {
        Ok(Self::from_chunked(ChunkedCoordinate::new(layout)?))
    }

    pub fn with_cache(layout: &LayoutConfig, cache: Option<SharedRankCache>) -> crate::Result<Self> {
        Ok(Self::from_chunked(ChunkedCoordinate::with_cache(layout, cache)?))
    }

    pub fn from_chunked(chunked: ChunkedCoordinate) -> Self {
        Self { chunked }
    }

    pub fn chunked(&self) -> &ChunkedCoordinate {
        &self.chunked
    }

    /// The part of `query` that lies within the array
    pub fn requested_region(&self, query: &QueryBox) -> RegionBounds {
        if query.is_inverted() {
            return RegionBounds::new(Vector3::zeros(), Vector3::zeros());
        }
        self.chunked.cell_grid().intersection(query.lo, query.hi)
    }

    /// Analyzes `query`. Empty, inverted or out-of-array queries yield an empty result. Fails only if a global index
    /// cannot be resolved, in which case no partial result is returned
    pub fn analyze(&self, query: &QueryBox) -> crate::Result<QueryResult> {
        let region = self.requested_region(query);

        let requested_cells = region.coords().collect::<Vec<_>>();
        let touched_chunks = requested_cells
            .iter()
            .map(|&cell| self.chunked.flat_chunk_index(self.chunked.parent_chunk(cell)))
            .collect::<BTreeSet<_>>();

        let mut actual_cells = Vec::new();
        for &flat_index in &touched_chunks {
            let chunk = CellOrdering::RowMajor
                .delinearize(flat_index as u64, self.chunked.chunk_counts())
                .ok_or(crate::Error::MissingChunk {
                    index: flat_index,
                    chunk_counts: self.chunked.chunk_counts().into(),
                })?;
            actual_cells.extend(self.chunked.chunk_region(chunk).coords());
        }

        let chunked_ranges = coalesce_ranges(self.global_indices(&actual_cells)?);
        let unchunked_ranges = coalesce_ranges(self.global_indices(&requested_cells)?);
        log::trace!(
            "Query {:?}..={:?}: {} requested cells, {} touched chunks, {} actual cells, chunked ranges {}",
            query.lo,
            query.hi,
            requested_cells.len(),
            touched_chunks.len(),
            actual_cells.len(),
            make_displayable(&chunked_ranges)
        );

        Ok(QueryResult {
            requested_cells,
            touched_chunks,
            actual_cells,
            chunked_ranges,
            unchunked_ranges,
            total_cells: self.chunked.total_cells(),
        })
    }

    fn global_indices(&self, cells: &[Vector3<usize>]) -> crate::Result<Vec<usize>> {
        cells
            .iter()
            .map(|&cell| self.chunked.global_index_in_bounds(cell))
            .collect()
    }
}

/// Analyzes the query of `config` against its layout. This is the single entry point for collaborators that do not
/// keep a `QueryAnalyzer` around
pub fn compute_query_result(config: &QueryConfig) -> crate::Result<QueryResult> {
    config.validate()?;
    QueryAnalyzer::new(&config.layout)?.analyze(&config.query)
}
