use critter_core::Point;

use crate::traits::{CellState, GridWorld};

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Resource-biased estimate from `from` to `to`.
///
/// The Manhattan distance, less the resource quantity at `to` when `to` is a
/// resource cell. Rich targets look closer and the result may go negative,
/// so this is not admissible once resources are involved.
pub fn heuristic<W: GridWorld + ?Sized>(world: &W, from: Point, to: Point) -> f64 {
    let dist = f64::from(manhattan(from, to));
    dist - resource_at(world, to)
}

/// Quantity at `p` if it is a resource cell, otherwise zero.
#[inline]
pub(crate) fn resource_at<W: GridWorld + ?Sized>(world: &W, p: Point) -> f64 {
    if world.cell_state(p) == CellState::Resource {
        world.resource_quantity_at(p).unwrap_or(0.0)
    } else {
        0.0
    }
}
