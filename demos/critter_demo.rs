//! Scatter a world, drop a few foragers on it, and path each one to food.
//!
//! Run: cargo run --bin critter-demo -- [seed] [width] [height]
//! Set `RUST_LOG=debug` to see every search.

use critter_core::Point;
use critter_demos::{DemoArgs, DemoError, forage};
use critter_world::{MapGen, ScatterConfig, World};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn run() -> Result<(), DemoError> {
    let args = DemoArgs::parse(std::env::args().skip(1))?;
    log::info!("seed {} on a {}x{} world", args.seed, args.width, args.height);

    let mut mg = MapGen::with_world(
        World::new(args.width, args.height)?,
        StdRng::seed_from_u64(args.seed),
    );
    mg.scatter(&ScatterConfig::default())?;

    let mut foragers: Vec<Point> = Vec::with_capacity(args.foragers);
    for _ in 0..args.foragers {
        if let Some(p) = mg.random_empty_cell() {
            foragers.push(p);
        }
    }
    let mut world = mg.into_world();

    println!("{world}");
    let trips = forage(&mut world, &foragers)?;
    for trip in &trips {
        println!(
            "forager {} -> food {} ({} steps, ate {})",
            trip.forager,
            trip.food,
            trip.path.len() - 1,
            trip.eaten
        );
        println!("{}", world.render_path(&trip.path));
    }
    println!("{} of {} foragers fed", trips.len(), foragers.len());
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
