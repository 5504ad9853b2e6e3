//! Random world content.
//!
//! [`MapGen`] scatters terrain, liquid, food and critters over a [`World`]
//! cell by cell. With a seeded RNG the result is reproducible.

use critter_core::Point;
use critter_paths::CellState;
use rand::Rng;

use crate::{World, WorldError};

/// Per-cell probabilities for [`MapGen::scatter`].
///
/// Each cell independently rolls once; the densities are the chances of
/// each outcome and the remainder stays empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScatterConfig {
    pub terrain: f64,
    pub liquid: f64,
    pub food: f64,
    pub passive: f64,
    pub hostile: f64,
    /// Inclusive range of whole-unit food quantities.
    pub food_min: u32,
    pub food_max: u32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            terrain: 0.15,
            liquid: 0.05,
            food: 0.04,
            passive: 0.01,
            hostile: 0.01,
            food_min: 1,
            food_max: 10,
        }
    }
}

impl ScatterConfig {
    fn validate(&self) -> Result<(), WorldError> {
        let parts = [self.terrain, self.liquid, self.food, self.passive, self.hostile];
        if let Some(&bad) = parts.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(WorldError::InvalidDensity(bad));
        }
        let total: f64 = parts.iter().sum();
        if total > 1.0 {
            return Err(WorldError::InvalidDensity(total));
        }
        Ok(())
    }
}

/// Random content generator over a [`World`].
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub world: World,
}

impl<R: Rng> MapGen<R> {
    /// Create a generator that will fill `world`.
    pub fn with_world(world: World, rng: R) -> Self {
        Self { rng, world }
    }

    /// Consume the generator, returning the world.
    pub fn into_world(self) -> World {
        self.world
    }

    /// Reset every cell, then roll each one against `cfg`.
    ///
    /// Returns the number of cells left traversable (empty or food).
    pub fn scatter(&mut self, cfg: &ScatterConfig) -> Result<usize, WorldError> {
        cfg.validate()?;
        let (lo, hi) = (cfg.food_min.max(1), cfg.food_max.max(cfg.food_min.max(1)));

        let bands = [
            (cfg.terrain, CellState::Terrain),
            (cfg.liquid, CellState::Liquid),
            (cfg.food, CellState::Resource),
            (cfg.passive, CellState::Passive),
            (cfg.hostile, CellState::Hostile),
        ];

        let mut open = 0usize;
        for p in self.world.bounds().iter() {
            let r: f64 = self.rng.random();
            let mut edge = 0.0;
            let mut state = CellState::Empty;
            for (density, band) in bands {
                edge += density;
                if r < edge {
                    state = band;
                    break;
                }
            }

            if state == CellState::Resource {
                self.world.set(p, CellState::Empty)?;
                let qty = self.rng.random_range(lo..=hi);
                self.world.place_resource(p, f64::from(qty))?;
            } else {
                self.world.set(p, state)?;
            }
            if state.is_traversable() {
                open += 1;
            }
        }
        log::debug!(
            "scattered {}x{} world: {open} open cells, {} food",
            self.world.bounds().width(),
            self.world.bounds().height(),
            self.world.count(CellState::Resource)
        );
        Ok(open)
    }

    /// A uniformly chosen empty cell, or `None` if there is none.
    pub fn random_empty_cell(&mut self) -> Option<Point> {
        let empty = self.world.positions(CellState::Empty);
        if empty.is_empty() {
            return None;
        }
        Some(empty[self.rng.random_range(0..empty.len())])
    }

    /// Put up to `n` critters of kind `state` on random empty cells and
    /// return where they landed.
    pub fn place_critters(&mut self, n: usize, state: CellState) -> Result<Vec<Point>, WorldError> {
        let mut placed = Vec::with_capacity(n);
        for _ in 0..n {
            let Some(p) = self.random_empty_cell() else {
                break;
            };
            self.world.set(p, state)?;
            placed.push(p);
        }
        Ok(placed)
    }
}
