use core::ops::Range;

macro_rules! impl_bits {
    () => {
        fn get_bits(&self, bit_range: Range<usize>) -> Self {
            let num_bits = bit_range.len();
            if num_bits == 0 {
                return 0;
            }
            let shifted = *self >> bit_range.start;
            if num_bits >= Self::BITS as usize {
                shifted
            } else {
                shifted & (((1 as Self) << num_bits) - 1)
            }
        }

        fn set_bits(&mut self, bit_range: Range<usize>, new_value: Self) {
            let num_bits = bit_range.len();
            if num_bits == 0 {
                return;
            }
            let mask = if num_bits >= Self::BITS as usize {
                Self::MAX
            } else {
                ((1 as Self) << num_bits) - 1
            };
            let clear_mask = !(mask << bit_range.start);
            *self = (*self & clear_mask) | ((new_value & mask) << bit_range.start)
        }
    };
}

/// Bit-level access to unsigned integers, used to interleave and de-interleave the axes of a Morton code
pub trait Bits: Sized + Copy {
    /// Returns the bits in `bit_range`, shifted down to bit 0
    fn get_bits(&self, bit_range: Range<usize>) -> Self;
    /// Overwrites the bits in `bit_range` with the lowest bits of `new_value`
    fn set_bits(&mut self, bit_range: Range<usize>, new_value: Self);
}

impl Bits for u32 {
    impl_bits! {}
}

impl Bits for u64 {
    impl_bits! {}
}

/// Spreads the lowest `count` bits of `value` apart so that bit `i` lands at bit `i * stride + offset`
pub fn spread_bits(value: u64, count: usize, stride: usize, offset: usize) -> u64 {
    let mut spread = 0_u64;
    for bit in 0..count {
        let target = bit * stride + offset;
        spread.set_bits(target..target + 1, value.get_bits(bit..bit + 1));
    }
    spread
}

/// Inverse of `spread_bits`: gathers every `stride`-th bit of `value`, starting at `offset`, into the lowest `count` bits
pub fn compact_bits(value: u64, count: usize, stride: usize, offset: usize) -> u64 {
    let mut compact = 0_u64;
    for bit in 0..count {
        let source = bit * stride + offset;
        compact.set_bits(bit..bit + 1, value.get_bits(source..source + 1));
    }
    compact
}

/// Smallest power of two that is `>= value`. Zero maps to one
pub fn next_power_of_two(value: usize) -> usize {
    value.max(1).next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_bits() {
        let value = 0b1011_0110_u32;
        assert_eq!(0b0110, value.get_bits(0..4));
        assert_eq!(0b1011, value.get_bits(4..8));
        assert_eq!(value, value.get_bits(0..32));

        let mut target = 0_u64;
        target.set_bits(8..12, 0b1111_1010);
        assert_eq!(0b1010_0000_0000, target);
        target.set_bits(0..64, 7);
        assert_eq!(7, target);
    }

    #[test]
    fn spread_and_compact_are_inverse() {
        let value = 0b1101_u64;
        let spread = spread_bits(value, 4, 3, 1);
        assert_eq!(0b001_001_000_001_0, spread);
        assert_eq!(value, compact_bits(spread, 4, 3, 1));
    }

    #[test]
    fn power_of_two_padding() {
        assert_eq!(1, next_power_of_two(0));
        assert_eq!(1, next_power_of_two(1));
        assert_eq!(8, next_power_of_two(5));
        assert_eq!(16, next_power_of_two(16));
    }
}
