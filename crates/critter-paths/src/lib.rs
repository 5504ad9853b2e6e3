//! Resource-aware A* pathfinding for critters on a 2D grid.
//!
//! The crate is built from three pieces, leaves first:
//!
//! - [`IndexedMinQueue`]: distinct keys with mutable priorities, backed by a
//!   binary heap plus a key → slot index, so decrease/increase-key run in
//!   `O(log n)`.
//! - [`SearchNode`]: one explored cell with its `g`/`h`/`f` costs and a
//!   back-pointer to its predecessor.
//! - [`Pathfinder`]: the A* driver, reading the world through [`GridWorld`].
//!
//! "No path" is an ordinary outcome and comes back as an empty `Vec`.
//! [`PathError`] is reserved for programming errors.
//!
//! ```
//! use critter_core::Point;
//! use critter_paths::{CellState, GridWorld, Pathfinder};
//!
//! struct Open;
//!
//! impl GridWorld for Open {
//!     fn width(&self) -> i32 { 5 }
//!     fn height(&self) -> i32 { 5 }
//!     fn cell_state(&self, _p: Point) -> CellState { CellState::Empty }
//!     fn resource_quantity_at(&self, _p: Point) -> Option<f64> { None }
//! }
//!
//! let path = Pathfinder::new(&Open)
//!     .find_path(Point::new(0, 0), Point::new(4, 4))
//!     .unwrap();
//! assert_eq!(path.len(), 5);
//! ```

mod astar;
mod config;
mod distance;
mod error;
mod neighbors;
mod node;
mod pqueue;
mod traits;

pub use astar::{Pathfinder, SearchReport, Termination};
pub use config::{Connectivity, PathConfig};
pub use distance::{chebyshev, heuristic, manhattan};
pub use error::PathError;
pub use neighbors::Neighbors;
pub use node::SearchNode;
pub use pqueue::IndexedMinQueue;
pub use traits::{CellState, GridWorld};
