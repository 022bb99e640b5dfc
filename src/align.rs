use num_traits::PrimInt;

/// Rounding division for chunk grids: an axis of `size` cells split into chunks of `chunk` cells needs
/// `size.div_ceil_by(chunk)` chunks, the last of which may be partial
pub trait Alignable: Sized {
    /// Integer division of the associated value by `divisor`, rounding up. A `divisor` of zero yields zero
    fn div_ceil_by(&self, divisor: Self) -> Self;
}

impl<T: PrimInt> Alignable for T {
    fn div_ceil_by(&self, divisor: Self) -> Self {
        if divisor.is_zero() {
            T::zero()
        } else {
            (*self + divisor - T::one()) / divisor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_ceil_counts_partial_chunks() {
        assert_eq!(2_usize, 6_usize.div_ceil_by(4));
        assert_eq!(3_usize, 8_usize.div_ceil_by(3));
        assert_eq!(1_usize, 4_usize.div_ceil_by(4));
        assert_eq!(1_usize, 1_usize.div_ceil_by(10));
        assert_eq!(0_usize, 5_usize.div_ceil_by(0));
    }
}
