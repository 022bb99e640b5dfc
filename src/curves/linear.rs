use nalgebra::Vector3;

/// Row-major rank: X varies fastest, then Y, then Z
pub fn row_major(coord: Vector3<usize>, dims: Vector3<usize>) -> u64 {
    (coord.x + coord.y * dims.x + coord.z * dims.x * dims.y) as u64
}

/// Column-major rank: Y varies fastest, then X, then Z. Layers along Z stay contiguous in both linear orders
pub fn col_major(coord: Vector3<usize>, dims: Vector3<usize>) -> u64 {
    (coord.y + coord.x * dims.y + coord.z * dims.x * dims.y) as u64
}

/// Inverse of `row_major`. Returns `None` if `rank` is not smaller than the number of cells in `dims`
pub fn row_major_inverse(rank: u64, dims: Vector3<usize>) -> Option<Vector3<usize>> {
    let rank = usize::try_from(rank).ok()?;
    let layer = dims.x * dims.y;
    if rank >= layer * dims.z {
        return None;
    }
    let within_layer = rank % layer;
    Some(Vector3::new(within_layer % dims.x, within_layer / dims.x, rank / layer))
}

/// Inverse of `col_major`. Returns `None` if `rank` is not smaller than the number of cells in `dims`
pub fn col_major_inverse(rank: u64, dims: Vector3<usize>) -> Option<Vector3<usize>> {
    let rank = usize::try_from(rank).ok()?;
    let layer = dims.x * dims.y;
    if rank >= layer * dims.z {
        return None;
    }
    let within_layer = rank % layer;
    Some(Vector3::new(within_layer / dims.y, within_layer % dims.y, rank / layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_walks_x_first() {
        let dims = Vector3::new(3, 2, 2);
        assert_eq!(0, row_major(Vector3::new(0, 0, 0), dims));
        assert_eq!(1, row_major(Vector3::new(1, 0, 0), dims));
        assert_eq!(3, row_major(Vector3::new(0, 1, 0), dims));
        assert_eq!(6, row_major(Vector3::new(0, 0, 1), dims));
        assert_eq!(11, row_major(Vector3::new(2, 1, 1), dims));
    }

    #[test]
    fn col_major_walks_y_first() {
        let dims = Vector3::new(3, 2, 2);
        assert_eq!(1, col_major(Vector3::new(0, 1, 0), dims));
        assert_eq!(2, col_major(Vector3::new(1, 0, 0), dims));
        assert_eq!(6, col_major(Vector3::new(0, 0, 1), dims));
        assert_eq!(11, col_major(Vector3::new(2, 1, 1), dims));
    }

    #[test]
    fn inverses_cover_every_rank() {
        let dims = Vector3::new(5, 3, 2);
        for rank in 0..30_u64 {
            let row = row_major_inverse(rank, dims).unwrap();
            assert_eq!(rank, row_major(row, dims));
            let col = col_major_inverse(rank, dims).unwrap();
            assert_eq!(rank, col_major(col, dims));
        }
        assert_eq!(None, row_major_inverse(30, dims));
        assert_eq!(None, col_major_inverse(30, dims));
    }
}
