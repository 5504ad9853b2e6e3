use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use critter_core::Point;

/// One cell as explored during a single search.
///
/// Identity is the position alone: two nodes at the same cell compare equal
/// and hash the same whatever their costs, so a node can stand in for its
/// cell in sets and maps while better paths to it are found.
///
/// `f` is kept equal to `g + h`; the costs are only writable through
/// [`SearchNode::set_g`].
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub position: Point,
    /// Cell this node was reached from; `None` for the start node.
    pub parent: Option<Point>,
    /// Set once the node has entered the frontier.
    pub discovered: bool,
    g: f64,
    h: f64,
    f: f64,
}

impl SearchNode {
    /// A node at `position` reached through `parent` with path cost `g` and
    /// heuristic estimate `h`.
    pub fn new(position: Point, parent: Option<Point>, g: f64, h: f64) -> Self {
        Self {
            position,
            parent,
            discovered: false,
            g,
            h,
            f: g + h,
        }
    }

    /// The seed node of a search: no parent, zero path cost.
    pub fn start(position: Point, h: f64) -> Self {
        Self::new(position, None, 0.0, h)
    }

    /// Accumulated path cost from the start.
    #[inline]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Heuristic estimate to the target, fixed at creation.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// `g + h`.
    #[inline]
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Replace the path cost, keeping `f` in step.
    #[inline]
    pub fn set_g(&mut self, g: f64) {
        self.g = g;
        self.f = g + self.h;
    }

    /// Record a cheaper way in: through `parent` at cost `g`.
    ///
    /// Returns `false` and leaves the node alone when `g` is no improvement.
    pub fn relax(&mut self, parent: Point, g: f64) -> bool {
        if self.discovered && g >= self.g {
            return false;
        }
        self.parent = Some(parent);
        self.set_g(g);
        self.discovered = true;
        true
    }

    /// Search order: lower `f` first, then lower `h`.
    pub fn cmp_priority(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.h.total_cmp(&other.h))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for SearchNode {}

impl Hash for SearchNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn f_tracks_g() {
        let mut n = SearchNode::new(Point::new(1, 1), None, 2.0, 3.0);
        assert_eq!(n.f(), 5.0);
        n.set_g(7.0);
        assert_eq!(n.g(), 7.0);
        assert_eq!(n.h(), 3.0);
        assert_eq!(n.f(), 10.0);
    }

    #[test]
    fn start_node_has_no_parent_and_zero_cost() {
        let n = SearchNode::start(Point::ZERO, 4.0);
        assert_eq!(n.parent, None);
        assert_eq!(n.g(), 0.0);
        assert_eq!(n.f(), 4.0);
        assert!(!n.discovered);
    }

    #[test]
    fn equality_ignores_costs() {
        let a = SearchNode::new(Point::new(2, 3), None, 1.0, 1.0);
        let b = SearchNode::new(Point::new(2, 3), Some(Point::ZERO), 9.0, -4.0);
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn priority_breaks_ties_on_h() {
        let near = SearchNode::new(Point::new(0, 0), None, 4.0, 1.0);
        let far = SearchNode::new(Point::new(1, 0), None, 1.0, 4.0);
        let cheap = SearchNode::new(Point::new(2, 0), None, 1.0, 1.0);
        let mut nodes = vec![far, near, cheap];
        nodes.sort_by(SearchNode::cmp_priority);
        let order: Vec<_> = nodes.iter().map(|n| n.position.x).collect();
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn relax_only_improves() {
        let mut n = SearchNode::new(Point::new(5, 5), None, 0.0, 2.0);
        assert!(n.relax(Point::new(4, 4), 6.0));
        assert!(n.discovered);
        assert!(!n.relax(Point::new(4, 5), 6.0));
        assert_eq!(n.parent, Some(Point::new(4, 4)));
        assert!(n.relax(Point::new(4, 5), 3.0));
        assert_eq!(n.parent, Some(Point::new(4, 5)));
        assert_eq!(n.f(), 5.0);
    }
}
