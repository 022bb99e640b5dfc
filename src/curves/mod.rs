//! The four coordinate orderings as free functions. Each maps an integer coordinate inside known bounds to a rank. The
//! linear orderings are dense bijections onto `[0, N)`; the space-filling curves are computed over the enclosing
//! power-of-two square (or cube) and may skip values, which `NormalizationMap` resolves one layer up.

pub mod hilbert;
pub mod linear;
pub mod morton;
