use critter_core::Point;

use crate::config::Connectivity;

/// Reusable neighbour buffer.
///
/// Enumerates the cardinal (4-way) or compass (8-way) neighbours of a point,
/// filtered by a predicate, without allocating per call.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Neighbours of `p` under `connectivity`, keeping only those for which
    /// `keep` returns `true`.
    pub fn around(
        &mut self,
        p: Point,
        connectivity: Connectivity,
        keep: impl Fn(Point) -> bool,
    ) -> &[Point] {
        match connectivity {
            Connectivity::Four => self.cardinal(p, keep),
            Connectivity::Eight => self.all(p, keep),
        }
    }

    /// N, E, S, W neighbours of `p` that pass `keep`.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        self.buf.extend(p.neighbors_4().into_iter().filter(|&n| keep(n)));
        &self.buf
    }

    /// N, NE, E, SE, S, SW, W, NW neighbours of `p` that pass `keep`.
    pub fn all(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        self.buf.extend(p.neighbors_8().into_iter().filter(|&n| keep(n)));
        &self.buf
    }
}
