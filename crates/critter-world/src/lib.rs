//! A concrete world for critters to path through.
//!
//! [`World`] is a dense grid of [`CellState`](critter_paths::CellState)
//! values plus per-cell food quantities, and implements
//! [`GridWorld`](critter_paths::GridWorld) so it can be handed straight to a
//! [`Pathfinder`](critter_paths::Pathfinder). [`MapGen`] fills one with
//! seeded random content.

pub mod error;
pub mod mapgen;
pub mod world;

pub use error::WorldError;
pub use mapgen::{MapGen, ScatterConfig};
pub use world::World;
