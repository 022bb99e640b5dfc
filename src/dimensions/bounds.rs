use nalgebra::Vector3;

/// An axis-aligned, half-open region `[start, end)` of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionBounds {
    pub start: Vector3<usize>,
    pub end: Vector3<usize>,
}

impl RegionBounds {
    pub fn new(start: Vector3<usize>, end: Vector3<usize>) -> Self {
        Self { start, end }
    }

    /// Actual size of this region along each axis. Inverted regions have size zero
    pub fn dims(&self) -> Vector3<usize> {
        self.end.zip_map(&self.start, |end, start| end.saturating_sub(start))
    }

    pub fn cell_count(&self) -> usize {
        self.dims().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    pub fn contains(&self, coord: Vector3<usize>) -> bool {
        (0..3).all(|axis| coord[axis] >= self.start[axis] && coord[axis] < self.end[axis])
    }

    /// Iterates over all coordinates in this region, X innermost and Z outermost
    pub fn coords(&self) -> impl Iterator<Item = Vector3<usize>> {
        let RegionBounds { start, end } = *self;
        (start.z..end.z).flat_map(move |z| {
            (start.y..end.y).flat_map(move |y| (start.x..end.x).map(move |x| Vector3::new(x, y, z)))
        })
    }
}

/// Pixel-region helper for 2D rendering collaborators. Returns `(start_x, start_y, end_x, end_y)` of chunk
/// `(chunk_x, chunk_y)` with ends exclusive and clipped to the array size, so boundary chunks come out narrower
pub fn chunk_bounds(
    chunk_x: usize,
    chunk_y: usize,
    chunk_size_x: usize,
    chunk_size_y: usize,
    size_x: usize,
    size_y: usize,
) -> (usize, usize, usize, usize) {
    let start_x = chunk_x * chunk_size_x;
    let start_y = chunk_y * chunk_size_y;
    (
        start_x,
        start_y,
        (start_x + chunk_size_x).min(size_x),
        (start_y + chunk_size_y).min(size_y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_region_is_empty() {
        let region = RegionBounds::new(Vector3::new(3, 0, 0), Vector3::new(2, 4, 1));
        assert!(region.is_empty());
        assert_eq!(0, region.coords().count());
    }

    #[test]
    fn region_dims_and_contains() {
        let region = RegionBounds::new(Vector3::new(4, 4, 0), Vector3::new(6, 6, 1));
        assert_eq!(Vector3::new(2, 2, 1), region.dims());
        assert_eq!(4, region.cell_count());
        assert!(region.contains(Vector3::new(5, 4, 0)));
        assert!(!region.contains(Vector3::new(6, 4, 0)));
    }

    #[test]
    fn chunk_bounds_clip_partial_chunks() {
        assert_eq!((0, 0, 4, 4), chunk_bounds(0, 0, 4, 4, 6, 6));
        assert_eq!((4, 4, 6, 6), chunk_bounds(1, 1, 4, 4, 6, 6));
        assert_eq!((3, 0, 6, 3), chunk_bounds(1, 0, 3, 3, 8, 8));
    }
}
