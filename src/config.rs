use nalgebra::Vector3;

use crate::dimensions::Extent;
use crate::CellOrdering;

/// Shape and traversal orders of a chunked array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutConfig {
    /// Number of cells along each axis. `size.z == 1` is a 2D array
    pub size: Vector3<usize>,
    /// Nominal chunk size along each axis. Chunks on the high boundary are clipped to `size`
    pub chunk: Vector3<usize>,
    /// Order of the cells within each chunk
    pub cell_ordering: CellOrdering,
    /// Order of the chunks within the array
    pub chunk_ordering: CellOrdering,
}

impl LayoutConfig {
    pub fn new(
        size: Vector3<usize>,
        chunk: Vector3<usize>,
        cell_ordering: CellOrdering,
        chunk_ordering: CellOrdering,
    ) -> Self {
        Self {
            size,
            chunk,
            cell_ordering,
            chunk_ordering,
        }
    }

    /// Fails if any array or chunk axis is zero
    pub fn validate(&self) -> crate::Result<()> {
        Extent::new(self.size, "array size")?;
        Extent::new(self.chunk, "chunk size")?;
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(
            Vector3::new(8, 8, 1),
            Vector3::new(2, 2, 1),
            CellOrdering::default(),
            CellOrdering::default(),
        )
    }
}

/// A rectangular read query: three closed intervals `[lo, hi]`. Bounds are signed and need not lie within the array,
/// they are clipped when the query is evaluated. `lo > hi` on any axis is an empty query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryBox {
    pub lo: Vector3<i64>,
    pub hi: Vector3<i64>,
}

impl QueryBox {
    pub fn new(x: [i64; 2], y: [i64; 2], z: [i64; 2]) -> Self {
        Self {
            lo: Vector3::new(x[0], y[0], z[0]),
            hi: Vector3::new(x[1], y[1], z[1]),
        }
    }

    /// Query over a 2D array (`z = [0, 0]`)
    pub fn new_2d(x: [i64; 2], y: [i64; 2]) -> Self {
        Self::new(x, y, [0, 0])
    }

    /// Query covering an entire array of `size`
    pub fn covering(size: Vector3<usize>) -> Self {
        Self {
            lo: Vector3::zeros(),
            hi: size.map(|s| s as i64 - 1),
        }
    }

    pub fn is_inverted(&self) -> bool {
        (0..3).any(|axis| self.lo[axis] > self.hi[axis])
    }
}

/// Everything needed to analyze one read query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryConfig {
    pub layout: LayoutConfig,
    pub query: QueryBox,
}

impl QueryConfig {
    pub fn new(layout: LayoutConfig, query: QueryBox) -> Self {
        Self { layout, query }
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.layout.validate()
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self::new(layout, QueryBox::covering(layout.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_covers_array() {
        let config = QueryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(Vector3::new(7, 7, 0), config.query.hi);
        assert!(!config.query.is_inverted());
    }

    #[test]
    fn zero_chunk_axis_is_rejected() {
        let mut layout = LayoutConfig::default();
        layout.chunk = Vector3::new(2, 0, 1);
        assert_eq!(
            Err(crate::Error::InvalidExtent {
                what: "chunk size",
                extent: [2, 0, 1]
            }),
            layout.validate()
        );
    }

    #[test]
    fn inverted_query() {
        assert!(QueryBox::new_2d([3, 2], [0, 7]).is_inverted());
        assert!(QueryBox::new([0, 1], [0, 1], [1, 0]).is_inverted());
    }
}
