use critter_core::{Point, Range};

/// Classification of one world cell as seen by the pathfinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Open ground.
    #[default]
    Empty,
    /// Rock or other solid terrain. Impassable.
    Terrain,
    /// Water or other liquid. Impassable.
    Liquid,
    /// A cell holding a resource (food). Traversable.
    Resource,
    /// Occupied by a passive critter. Impassable.
    Passive,
    /// Occupied by a hostile critter. Impassable.
    Hostile,
}

impl CellState {
    /// Whether a critter may step onto a cell in this state.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        matches!(self, CellState::Empty | CellState::Resource)
    }

    /// Whether the cell is held by a critter of either kind.
    #[inline]
    pub const fn is_occupied(self) -> bool {
        matches!(self, CellState::Passive | CellState::Hostile)
    }
}

/// Read-only view of the world consumed by the pathfinder.
///
/// Implementors own the grid; the pathfinder never mutates it and assumes it
/// stays fixed for the duration of one search. Nothing is cached between
/// searches.
pub trait GridWorld {
    /// Number of columns.
    fn width(&self) -> i32;

    /// Number of rows.
    fn height(&self) -> i32;

    /// Classification of the cell at `p`. Only called for in-bounds points.
    fn cell_state(&self, p: Point) -> CellState;

    /// Resource quantity at `p`. `None` unless `p` is a
    /// [`CellState::Resource`] cell.
    fn resource_quantity_at(&self, p: Point) -> Option<f64>;

    /// The rectangle `[0, width) × [0, height)`.
    #[inline]
    fn bounds(&self) -> Range {
        Range::sized(self.width(), self.height())
    }

    /// Whether `p` is a legal search endpoint or step: in bounds and
    /// traversable.
    #[inline]
    fn is_passable(&self, p: Point) -> bool {
        self.bounds().contains(p) && self.cell_state(p).is_traversable()
    }
}

impl<W: GridWorld + ?Sized> GridWorld for &W {
    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn cell_state(&self, p: Point) -> CellState {
        (**self).cell_state(p)
    }

    fn resource_quantity_at(&self, p: Point) -> Option<f64> {
        (**self).resource_quantity_at(p)
    }
}
