//! Linearization of chunked 2D/3D arrays and the storage cost of rectangular read queries.
//!
//! Cells are ordered with one of four `CellOrdering`s (row-major, column-major, Morton/Z-order or Hilbert) inside each
//! chunk, and chunks are ordered with another one inside the array. `ChunkedCoordinate` composes both into a dense
//! global index per cell, and `QueryAnalyzer` maps a query box onto the contiguous global index ranges that a chunked
//! read would have to fetch.

mod align;
pub use self::align::*;

mod cache;
pub use self::cache::*;

mod chunked;
pub use self::chunked::*;

mod config;
pub use self::config::*;

mod error;
pub use self::error::*;

mod grid;
pub use self::grid::*;

mod helper;
pub use self::helper::*;

mod metrics;
pub use self::metrics::*;

mod normalization;
pub use self::normalization::*;

mod ordering;
pub use self::ordering::*;

mod query;
pub use self::query::*;

pub mod curves;
pub mod dimensions;
pub use self::dimensions::chunk_bounds;
pub mod number;
