//! Foraging demo shared by the `critter-demo` binary and its tests.
//!
//! Foragers are tracked here, outside the world grid, so their own cells
//! never block their searches. Scattered critters in the world do block.

use critter_core::Point;
use critter_paths::{PathError, Pathfinder, chebyshev};
use critter_world::{World, WorldError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("usage: critter-demo [seed] [width] [height]: {0}")]
    Usage(String),
}

/// Command-line settings for the demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoArgs {
    pub seed: u64,
    pub width: i32,
    pub height: i32,
    pub foragers: usize,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            seed: 1,
            width: 48,
            height: 20,
            foragers: 4,
        }
    }
}

impl DemoArgs {
    /// Parse `[seed] [width] [height]`; missing values keep their defaults.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, DemoError> {
        let mut out = Self::default();
        let mut it = args.into_iter();
        if let Some(s) = it.next() {
            out.seed = s.parse().map_err(|_| DemoError::Usage(format!("bad seed {s:?}")))?;
        }
        if let Some(s) = it.next() {
            out.width = s.parse().map_err(|_| DemoError::Usage(format!("bad width {s:?}")))?;
        }
        if let Some(s) = it.next() {
            out.height = s.parse().map_err(|_| DemoError::Usage(format!("bad height {s:?}")))?;
        }
        Ok(out)
    }
}

/// One forager's walk to a meal.
#[derive(Debug, Clone)]
pub struct Trip {
    pub forager: Point,
    pub food: Point,
    pub path: Vec<Point>,
    pub eaten: f64,
}

/// The food cell worth the most to a forager at `from`: quantity minus
/// straight-line distance, nearest first on ties.
pub fn pick_food(world: &World, from: Point) -> Option<Point> {
    world
        .resources()
        .map(|(p, qty)| (p, qty - f64::from(chebyshev(from, p))))
        .max_by(|a, b| {
            a.1.total_cmp(&b.1)
                .then_with(|| chebyshev(from, b.0).cmp(&chebyshev(from, a.0)))
        })
        .map(|(p, _)| p)
}

/// Send each forager in turn to its best food and eat all of it.
///
/// The world changes after every meal, so later foragers plan against what
/// earlier ones left. Foragers with no reachable food are skipped.
pub fn forage(world: &mut World, foragers: &[Point]) -> Result<Vec<Trip>, DemoError> {
    let mut trips = Vec::new();
    for &forager in foragers {
        let Some(food) = pick_food(world, forager) else {
            log::info!("forager at {forager}: no food left");
            continue;
        };
        let path: Vec<Point> = Pathfinder::new(&*world)
            .find_path(forager, food)?
            .iter()
            .map(|n| n.position)
            .collect();
        if path.is_empty() {
            log::info!("forager at {forager}: food at {food} is out of reach");
            continue;
        }
        let eaten = world.take_resource(food, f64::INFINITY)?;
        log::info!(
            "forager at {forager}: ate {eaten} at {food} after {} steps",
            path.len() - 1
        );
        trips.push(Trip {
            forager,
            food,
            path,
            eaten,
        });
    }
    Ok(trips)
}
