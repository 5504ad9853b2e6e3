use std::collections::HashMap;
use std::collections::hash_map::Entry;

use critter_core::Point;

use crate::config::PathConfig;
use crate::distance::{manhattan, resource_at};
use crate::neighbors::Neighbors;
use crate::node::SearchNode;
use crate::pqueue::IndexedMinQueue;
use crate::traits::GridWorld;
use crate::PathError;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The target was dequeued; the path is complete.
    Reached,
    /// The frontier ran dry before reaching the target.
    Exhausted,
    /// The iteration bound was hit first.
    IterationLimit,
    /// Start or target is out of bounds or not traversable.
    InvalidEndpoint,
}

/// Outcome of [`Pathfinder::search`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchReport {
    /// Nodes from start to target inclusive; empty unless
    /// [`Termination::Reached`].
    pub path: Vec<SearchNode>,
    /// Frontier pops performed.
    pub expanded: usize,
    pub termination: Termination,
}

impl SearchReport {
    fn failed(termination: Termination, expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            expanded,
            termination,
        }
    }

    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.termination == Termination::Reached
    }

    /// The cells along the path.
    pub fn positions(&self) -> Vec<Point> {
        self.path.iter().map(|n| n.position).collect()
    }

    /// Accumulated cost at the target, if a path was found.
    pub fn cost(&self) -> Option<f64> {
        self.path.last().map(SearchNode::g)
    }
}

/// A* search over a [`GridWorld`].
///
/// Each call to [`find_path`](Self::find_path) builds its own frontier and
/// node set and leaves nothing behind, so a `Pathfinder` can be shared by
/// reference across threads whenever the world can.
pub struct Pathfinder<'w, W: GridWorld + ?Sized> {
    world: &'w W,
    config: PathConfig,
}

impl<'w, W: GridWorld + ?Sized> Pathfinder<'w, W> {
    /// A pathfinder over `world` with the default configuration.
    pub fn new(world: &'w W) -> Self {
        Self::with_config(world, PathConfig::default())
    }

    /// A pathfinder over `world` with explicit tunables.
    pub fn with_config(world: &'w W, config: PathConfig) -> Self {
        Self { world, config }
    }

    /// The world being searched.
    #[inline]
    pub fn world(&self) -> &'w W {
        self.world
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Compute a path from `start` to `target`, both inclusive.
    ///
    /// Returns an empty `Vec` when either endpoint is blocked or out of
    /// bounds, when the target is unreachable, or when the iteration bound
    /// runs out. Errors only on a degenerate world or configuration.
    pub fn find_path(&self, start: Point, target: Point) -> Result<Vec<SearchNode>, PathError> {
        self.search(start, target).map(|report| report.path)
    }

    /// Like [`find_path`](Self::find_path), also reporting how the search
    /// ended and how much work it did.
    pub fn search(&self, start: Point, target: Point) -> Result<SearchReport, PathError> {
        self.validate()?;

        if !self.world.is_passable(start) || !self.world.is_passable(target) {
            log::debug!("search {start} -> {target}: endpoint blocked or out of bounds");
            return Ok(SearchReport::failed(Termination::InvalidEndpoint, 0));
        }

        if start == target {
            let mut node = SearchNode::start(start, self.estimate(start, target));
            node.discovered = true;
            return Ok(SearchReport {
                path: vec![node],
                expanded: 0,
                termination: Termination::Reached,
            });
        }

        let limit = self.config.iteration_limit(self.world.bounds().len());
        let step = self.config.step_cost;

        let mut nodes: HashMap<Point, SearchNode> = HashMap::new();
        let mut open: IndexedMinQueue<Point> = IndexedMinQueue::new();
        let mut nbuf = Neighbors::new();

        let mut seed = SearchNode::start(start, self.estimate(start, target));
        seed.discovered = true;
        open.add_or_update(start, seed.f());
        nodes.insert(start, seed);

        let mut expanded = 0usize;

        let termination = loop {
            if open.is_empty() {
                break Termination::Exhausted;
            }
            if expanded >= limit {
                break Termination::IterationLimit;
            }

            let current = open.remove_min()?;
            expanded += 1;

            if current == target {
                break Termination::Reached;
            }

            let Some(current_g) = nodes.get(&current).map(SearchNode::g) else {
                continue;
            };
            log::trace!("expand {current} g={current_g}");

            let world = self.world;
            let around = nbuf.around(current, self.config.connectivity, |p| world.is_passable(p));

            for &np in around {
                let g = current_g + step;
                match nodes.entry(np) {
                    Entry::Occupied(mut slot) => {
                        let node = slot.get_mut();
                        if node.relax(current, g) {
                            open.add_or_update(np, node.f());
                        }
                    }
                    Entry::Vacant(slot) => {
                        let mut node = SearchNode::new(np, Some(current), g, self.estimate(np, target));
                        node.discovered = true;
                        open.add_or_update(np, node.f());
                        slot.insert(node);
                    }
                }
            }
        };

        match termination {
            Termination::Reached => {
                let path = reconstruct(&nodes, target);
                log::debug!(
                    "search {start} -> {target}: {} steps, {expanded} expansions",
                    path.len().saturating_sub(1)
                );
                Ok(SearchReport {
                    path,
                    expanded,
                    termination,
                })
            }
            Termination::IterationLimit => {
                log::warn!("search {start} -> {target}: gave up after {expanded} expansions");
                Ok(SearchReport::failed(termination, expanded))
            }
            _ => {
                log::debug!("search {start} -> {target}: no path ({expanded} expansions)");
                Ok(SearchReport::failed(termination, expanded))
            }
        }
    }

    /// Heuristic from `from` to `target` under the current configuration.
    fn estimate(&self, from: Point, target: Point) -> f64 {
        let dist = self.config.step_cost * f64::from(manhattan(from, target));
        if self.config.resource_bias {
            dist - resource_at(self.world, target)
        } else {
            dist
        }
    }

    fn validate(&self) -> Result<(), PathError> {
        let (w, h) = (self.world.width(), self.world.height());
        if w <= 0 || h <= 0 {
            return Err(PathError::InvalidArgument(format!(
                "world extents must be positive, got {w}x{h}"
            )));
        }
        let step = self.config.step_cost;
        if !step.is_finite() || step <= 0.0 {
            return Err(PathError::InvalidArgument(format!(
                "step cost must be finite and positive, got {step}"
            )));
        }
        Ok(())
    }
}

/// Follow parent links back from `target` and return the path start-first.
fn reconstruct(nodes: &HashMap<Point, SearchNode>, target: Point) -> Vec<SearchNode> {
    let mut path = Vec::new();
    let mut cur = nodes.get(&target);
    while let Some(node) = cur {
        path.push(*node);
        cur = node.parent.and_then(|p| nodes.get(&p));
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Connectivity;
    use crate::distance::chebyshev;
    use crate::traits::CellState;
    use critter_core::Range;

    /// Small world parsed from rows: `.` empty, `#` terrain, `~` liquid,
    /// `p`/`h` critters, digits are food of that quantity.
    struct Sketch {
        rows: Vec<Vec<char>>,
    }

    impl Sketch {
        fn new(rows: &[&str]) -> Self {
            Self {
                rows: rows.iter().map(|r| r.chars().collect()).collect(),
            }
        }

        fn open(width: usize, height: usize) -> Self {
            Self {
                rows: vec![vec!['.'; width]; height],
            }
        }

        fn at(&self, p: Point) -> char {
            self.rows[p.y as usize][p.x as usize]
        }
    }

    impl GridWorld for Sketch {
        fn width(&self) -> i32 {
            self.rows.first().map_or(0, Vec::len) as i32
        }

        fn height(&self) -> i32 {
            self.rows.len() as i32
        }

        fn cell_state(&self, p: Point) -> CellState {
            match self.at(p) {
                '#' => CellState::Terrain,
                '~' => CellState::Liquid,
                'p' => CellState::Passive,
                'h' => CellState::Hostile,
                c if c.is_ascii_digit() => CellState::Resource,
                _ => CellState::Empty,
            }
        }

        fn resource_quantity_at(&self, p: Point) -> Option<f64> {
            self.at(p).to_digit(10).map(f64::from)
        }
    }

    fn assert_walk(path: &[SearchNode], start: Point, target: Point) {
        assert_eq!(path.first().map(|n| n.position), Some(start));
        assert_eq!(path.last().map(|n| n.position), Some(target));
        for pair in path.windows(2) {
            assert!(
                pair[0].position.is_adjacent_8(pair[1].position),
                "{} -> {} is not a single step",
                pair[0].position,
                pair[1].position
            );
        }
    }

    #[test]
    fn same_cell_is_single_node() {
        let w = Sketch::open(3, 3);
        let p = Point::new(1, 1);
        let path = Pathfinder::new(&w).find_path(p, p).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].position, p);
        assert_eq!(path[0].g(), 0.0);
        assert_eq!(path[0].parent, None);
    }

    #[test]
    fn open_grid_diagonal() {
        let w = Sketch::open(5, 5);
        let (s, t) = (Point::new(0, 0), Point::new(4, 4));
        let path = Pathfinder::new(&w).find_path(s, t).unwrap();
        assert_eq!(path.len(), 5);
        assert_walk(&path, s, t);
        assert_eq!(path.last().map(SearchNode::g), Some(4.0));
    }

    #[test]
    fn open_grid_hops_equal_chebyshev() {
        let w = Sketch::open(12, 9);
        let pf = Pathfinder::new(&w);
        let cases = [
            (Point::new(0, 0), Point::new(11, 3)),
            (Point::new(11, 8), Point::new(2, 0)),
            (Point::new(5, 0), Point::new(5, 8)),
            (Point::new(0, 8), Point::new(7, 1)),
        ];
        for (s, t) in cases {
            let path = pf.find_path(s, t).unwrap();
            assert_walk(&path, s, t);
            assert_eq!(path.len() as i32 - 1, chebyshev(s, t), "{s} -> {t}");
        }
    }

    #[test]
    fn costs_accumulate_by_g_not_f() {
        let w = Sketch::open(8, 1);
        let path = Pathfinder::new(&w)
            .find_path(Point::new(0, 0), Point::new(7, 0))
            .unwrap();
        for (i, node) in path.iter().enumerate() {
            assert_eq!(node.g(), i as f64);
            assert_eq!(node.f(), node.g() + node.h());
        }
    }

    #[test]
    fn blocked_endpoints_give_empty_path() {
        let w = Sketch::new(&[
            "..#..", //
            "..~..",
            "..p.h",
        ]);
        let pf = Pathfinder::new(&w);
        let start = Point::new(0, 0);
        for t in [
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(4, 2),
            Point::new(5, 0),
            Point::new(-1, 0),
        ] {
            let report = pf.search(start, t).unwrap();
            assert!(report.path.is_empty(), "expected no path to {t}");
            assert_eq!(report.termination, Termination::InvalidEndpoint);
            assert!(pf.find_path(t, start).unwrap().is_empty());
        }
    }

    #[test]
    fn routes_around_a_wall() {
        let w = Sketch::new(&[
            ".....", //
            ".###.",
            ".#...",
            ".#.#.",
            ".....",
        ]);
        let (s, t) = (Point::new(2, 2), Point::new(0, 2));
        let path = Pathfinder::new(&w).find_path(s, t).unwrap();
        assert_walk(&path, s, t);
        assert!(path.iter().all(|n| w.is_passable(n.position)));
    }

    #[test]
    fn walled_off_target_exhausts() {
        let w = Sketch::new(&[
            "..#..", //
            "..#..",
            "..#..",
        ]);
        let report = Pathfinder::new(&w)
            .search(Point::new(0, 1), Point::new(4, 1))
            .unwrap();
        assert!(report.path.is_empty());
        assert_eq!(report.termination, Termination::Exhausted);
        assert_eq!(report.expanded, 6);
    }

    #[test]
    fn food_target_is_reached() {
        let mut row = vec!['.'; 11];
        row[10] = '9';
        let w = Sketch { rows: vec![row] };
        let (s, t) = (Point::new(0, 0), Point::new(10, 0));
        let pf = Pathfinder::new(&w);
        assert_eq!(pf.estimate(s, t), 1.0);
        let path = pf.find_path(s, t).unwrap();
        assert_eq!(path.len(), 11);
        assert_walk(&path, s, t);
    }

    #[test]
    fn food_cells_are_walkable() {
        let w = Sketch::new(&[
            "###", //
            ".5.",
            "###",
        ]);
        let path = Pathfinder::new(&w)
            .find_path(Point::new(0, 1), Point::new(2, 1))
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[1].position, Point::new(1, 1));
    }

    #[test]
    fn resource_bias_can_be_disabled() {
        let w = Sketch::new(&["....9"]);
        let cfg = PathConfig {
            resource_bias: false,
            ..PathConfig::default()
        };
        let pf = Pathfinder::with_config(&w, cfg);
        assert_eq!(pf.estimate(Point::new(0, 0), Point::new(4, 0)), 4.0);
    }

    #[test]
    fn iteration_limit_gives_up() {
        let w = Sketch::open(20, 20);
        let cfg = PathConfig {
            max_iterations: Some(3),
            ..PathConfig::default()
        };
        let report = Pathfinder::with_config(&w, cfg)
            .search(Point::new(0, 0), Point::new(19, 19))
            .unwrap();
        assert!(report.path.is_empty());
        assert_eq!(report.termination, Termination::IterationLimit);
        assert_eq!(report.expanded, 3);
    }

    #[test]
    fn four_way_connectivity_takes_manhattan_hops() {
        let w = Sketch::open(6, 6);
        let cfg = PathConfig {
            connectivity: Connectivity::Four,
            ..PathConfig::default()
        };
        let (s, t) = (Point::new(0, 0), Point::new(3, 4));
        let path = Pathfinder::with_config(&w, cfg).find_path(s, t).unwrap();
        assert_eq!(path.len() as i32 - 1, manhattan(s, t));
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0].position, pair[1].position), 1);
        }
    }

    #[test]
    fn step_cost_scales_g() {
        let w = Sketch::open(4, 1);
        let cfg = PathConfig {
            step_cost: 2.5,
            ..PathConfig::default()
        };
        let report = Pathfinder::with_config(&w, cfg)
            .search(Point::new(0, 0), Point::new(3, 0))
            .unwrap();
        assert_eq!(report.cost(), Some(7.5));
        assert_eq!(
            report.positions(),
            Range::sized(4, 1).iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn degenerate_inputs_are_errors() {
        let empty = Sketch { rows: Vec::new() };
        let err = Pathfinder::new(&empty)
            .find_path(Point::ZERO, Point::ZERO)
            .unwrap_err();
        assert!(matches!(err, PathError::InvalidArgument(_)));

        let w = Sketch::open(2, 2);
        let cfg = PathConfig {
            step_cost: 0.0,
            ..PathConfig::default()
        };
        let err = Pathfinder::with_config(&w, cfg)
            .find_path(Point::ZERO, Point::new(1, 1))
            .unwrap_err();
        assert!(matches!(err, PathError::InvalidArgument(_)));
    }
}
