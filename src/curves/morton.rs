use crate::number::{compact_bits, spread_bits};

/// Number of bits per axis that a 2D Morton code can hold
pub const MORTON_2D_BITS_PER_AXIS: usize = 32;
/// Number of bits per axis that a 3D Morton code can hold
pub const MORTON_3D_BITS_PER_AXIS: usize = 21;

/// Interleaves the bits of `x` and `y`, with `x` in the even bit positions and `y` in the odd bit positions
pub fn encode_2d(x: u32, y: u32) -> u64 {
    spread_bits(x as u64, MORTON_2D_BITS_PER_AXIS, 2, 0)
        | spread_bits(y as u64, MORTON_2D_BITS_PER_AXIS, 2, 1)
}

/// Interleaves the lowest 21 bits of `x`, `y` and `z`, one bit per axis at a time, starting with `x` at bit 0
pub fn encode_3d(x: u32, y: u32, z: u32) -> u64 {
    spread_bits(x as u64, MORTON_3D_BITS_PER_AXIS, 3, 0)
        | spread_bits(y as u64, MORTON_3D_BITS_PER_AXIS, 3, 1)
        | spread_bits(z as u64, MORTON_3D_BITS_PER_AXIS, 3, 2)
}

pub fn decode_2d(code: u64) -> (u32, u32) {
    (
        compact_bits(code, MORTON_2D_BITS_PER_AXIS, 2, 0) as u32,
        compact_bits(code, MORTON_2D_BITS_PER_AXIS, 2, 1) as u32,
    )
}

pub fn decode_3d(code: u64) -> (u32, u32, u32) {
    (
        compact_bits(code, MORTON_3D_BITS_PER_AXIS, 3, 0) as u32,
        compact_bits(code, MORTON_3D_BITS_PER_AXIS, 3, 1) as u32,
        compact_bits(code, MORTON_3D_BITS_PER_AXIS, 3, 2) as u32,
    )
}
