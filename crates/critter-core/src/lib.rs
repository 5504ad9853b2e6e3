//! **critter-core**: geometry shared by the critter simulation crates.
//!
//! Provides the integer [`Point`] used to address grid cells and the
//! half-open [`Range`] rectangle describing a world's extent.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
