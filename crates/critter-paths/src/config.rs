/// Which cells count as neighbours of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// N, E, S, W only.
    Four,
    /// All eight compass directions; diagonal moves cost the same as
    /// orthogonal ones.
    #[default]
    Eight,
}

/// Tunables for a [`Pathfinder`](crate::Pathfinder).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    pub connectivity: Connectivity,
    /// Cost of a single move. Must be finite and positive.
    pub step_cost: f64,
    /// Cap on the number of frontier pops. The world's cell count is always
    /// an upper bound; this can only lower it.
    pub max_iterations: Option<usize>,
    /// Subtract the target's resource quantity from the heuristic, pulling
    /// the search toward rich cells. With this off, paths are shortest.
    pub resource_bias: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            step_cost: 1.0,
            max_iterations: None,
            resource_bias: true,
        }
    }
}

impl PathConfig {
    /// The iteration bound for a world with `cells` cells.
    pub(crate) fn iteration_limit(&self, cells: usize) -> usize {
        match self.max_iterations {
            Some(n) => n.min(cells),
            None => cells,
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: PathConfig = serde_json::from_str(r#"{"connectivity":"Four"}"#).unwrap();
        assert_eq!(cfg.connectivity, Connectivity::Four);
        assert_eq!(cfg.step_cost, 1.0);
        assert!(cfg.resource_bias);
    }
}
