//! Hilbert curve over a power-of-two square. There is no true 3D curve: a 3D grid is a stack of 2D curves, one per
//! Z layer, so locality along Z is only that of the layer order.

use nalgebra::Vector3;

use crate::number::next_power_of_two;

/// Largest side length of the padded square for which `n * n` still fits into a `u64`
pub const MAX_HILBERT_SIDE: usize = 1 << 31;

/// Rotate/reflect a quadrant. `n` is the side length of the full square
fn rotate(n: u64, x: &mut u64, y: &mut u64, rx: u64, ry: u64) {
    if ry == 0 {
        if rx == 1 {
            *x = n - 1 - *x;
            *y = n - 1 - *y;
        }
        std::mem::swap(x, y);
    }
}

/// Distance of `(x, y)` along the Hilbert curve filling the `n * n` square. `n` must be a power of two and both
/// coordinates must be smaller than `n`
pub fn xy2d(n: u64, mut x: u64, mut y: u64) -> u64 {
    let mut d = 0;
    let mut s = n / 2;
    while s > 0 {
        let rx = u64::from((x & s) != 0);
        let ry = u64::from((y & s) != 0);
        d += s * s * ((3 * rx) ^ ry);
        rotate(n, &mut x, &mut y, rx, ry);
        s /= 2;
    }
    d
}

/// Inverse of `xy2d`
pub fn d2xy(n: u64, d: u64) -> (u64, u64) {
    let (mut x, mut y) = (0, 0);
    let mut t = d;
    let mut s = 1;
    while s < n {
        let rx = 1 & (t / 2);
        let ry = 1 & (t ^ rx);
        rotate(s, &mut x, &mut y, rx, ry);
        x += s * rx;
        y += s * ry;
        t /= 4;
        s *= 2;
    }
    (x, y)
}

/// Side length of the padded square that the curve for a grid of `dims` is computed on
pub fn padded_side(dims: Vector3<usize>) -> usize {
    next_power_of_two(dims.x.max(dims.y))
}

/// Hilbert rank of `coord` within a grid of `dims`. For 3D grids this is `z * dims.x * dims.y` plus the 2D distance
/// within the layer
pub fn rank(coord: Vector3<usize>, dims: Vector3<usize>) -> u64 {
    let n = padded_side(dims) as u64;
    let in_layer = xy2d(n, coord.x as u64, coord.y as u64);
    if dims.z <= 1 {
        in_layer
    } else {
        (coord.z * dims.x * dims.y) as u64 + in_layer
    }
}
