use crate::QueryResult;

/// Weight of the inverse amplification in `QueryMetrics::storage_alignment`
pub const AMPLIFICATION_WEIGHT: f64 = 0.7;
/// Weight of the inverse number of chunked ranges in `QueryMetrics::storage_alignment`
pub const RANGE_WEIGHT: f64 = 0.3;

/// Read-cost figures derived from a `QueryResult`. Ratios that would divide by zero are `None`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryMetrics {
    pub requested_cells: usize,
    pub actual_cells: usize,
    pub touched_chunks: usize,
    pub chunked_ranges: usize,
    pub unchunked_ranges: usize,
    /// Cells read per cell requested, `>= 1`
    pub amplification: Option<f64>,
    /// Touched chunks per contiguous chunked range. Higher means more chunks are fetched with one read
    pub coalescing_factor: Option<f64>,
    /// Percentage of read cells that were requested, `100 / amplification`
    pub efficiency: Option<f64>,
    /// Score in `(0, 100]` combining low amplification and few ranges, weighted with `AMPLIFICATION_WEIGHT` and
    /// `RANGE_WEIGHT`
    pub storage_alignment: Option<f64>,
}

impl QueryMetrics {
    pub fn from_result(result: &QueryResult) -> Self {
        let requested_cells = result.requested_cells.len();
        let actual_cells = result.actual_cells.len();
        let touched_chunks = result.touched_chunks.len();
        let chunked_ranges = result.chunked_ranges.len();

        let amplification = ratio(actual_cells, requested_cells);
        let coalescing_factor = ratio(touched_chunks, chunked_ranges);
        let efficiency = amplification.map(|amplification| 100.0 / amplification);
        let storage_alignment = match amplification {
            Some(amplification) if chunked_ranges > 0 => Some(
                100.0 * (AMPLIFICATION_WEIGHT / amplification + RANGE_WEIGHT / chunked_ranges as f64),
            ),
            _ => None,
        };

        Self {
            requested_cells,
            actual_cells,
            touched_chunks,
            chunked_ranges,
            unchunked_ranges: result.unchunked_ranges.len(),
            amplification,
            coalescing_factor,
            efficiency,
            storage_alignment,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_query_result, CellOrdering, LayoutConfig, QueryBox, QueryConfig};
    use nalgebra::Vector3;

    fn metrics_for(query: QueryBox) -> QueryMetrics {
        let layout = LayoutConfig::new(
            Vector3::new(8, 8, 1),
            Vector3::new(4, 4, 1),
            CellOrdering::RowMajor,
            CellOrdering::RowMajor,
        );
        compute_query_result(&QueryConfig::new(layout, query)).unwrap().metrics()
    }

    #[test]
    fn aligned_query_is_perfect() {
        let metrics = metrics_for(QueryBox::new_2d([0, 3], [0, 3]));
        assert_eq!(Some(1.0), metrics.amplification);
        assert_eq!(Some(100.0), metrics.efficiency);
        assert_eq!(Some(1.0), metrics.coalescing_factor);
        assert_eq!(Some(100.0), metrics.storage_alignment);
    }

    #[test]
    fn unaligned_query_is_amplified() {
        // 2x2 cells in the middle touch all four 4x4 chunks
        let metrics = metrics_for(QueryBox::new_2d([3, 4], [3, 4]));
        assert_eq!(4, metrics.requested_cells);
        assert_eq!(64, metrics.actual_cells);
        assert_eq!(Some(16.0), metrics.amplification);
        assert_eq!(Some(6.25), metrics.efficiency);
        // All four chunks are adjacent in storage, so they coalesce into a single range
        assert_eq!(1, metrics.chunked_ranges);
        assert_eq!(Some(4.0), metrics.coalescing_factor);
        let alignment = metrics.storage_alignment.unwrap();
        assert!((alignment - 100.0 * (0.7 / 16.0 + 0.3)).abs() < 1e-9);
    }

    #[test]
    fn empty_query_has_no_ratios() {
        let metrics = metrics_for(QueryBox::new_2d([5, 4], [0, 0]));
        assert_eq!(0, metrics.requested_cells);
        assert_eq!(None, metrics.amplification);
        assert_eq!(None, metrics.coalescing_factor);
        assert_eq!(None, metrics.efficiency);
        assert_eq!(None, metrics.storage_alignment);
    }
}
