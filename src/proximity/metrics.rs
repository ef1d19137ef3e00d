//! Built-in proximity metrics.

use super::types::ZoneProximity;
use crate::model::Zone;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Absolute difference of zone numbers: `Zone 1` to `Zone 3` is 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericDistance;

impl ZoneProximity for NumericDistance {
    fn name(&self) -> &str {
        "NumericDistance"
    }

    fn distance(&self, a: Zone, b: Zone) -> u32 {
        a.0.abs_diff(b.0)
    }
}

/// Hop count over an undirected zone adjacency graph.
///
/// Zones with no path between them are at [`AdjacencyGraph::UNREACHABLE`],
/// so they still compare as farther than any connected zone.
///
/// # Examples
///
/// ```
/// use u_dispatch::model::Zone;
/// use u_dispatch::proximity::{AdjacencyGraph, ZoneProximity};
///
/// let graph = AdjacencyGraph::new()
///     .with_edge(Zone(1), Zone(2))
///     .with_edge(Zone(2), Zone(7));
///
/// assert_eq!(graph.distance(Zone(1), Zone(7)), 2);
/// assert_eq!(graph.distance(Zone(7), Zone(1)), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    neighbors: BTreeMap<Zone, BTreeSet<Zone>>,
}

impl AdjacencyGraph {
    /// Distance reported for disconnected zones.
    pub const UNREACHABLE: u32 = u32::MAX;

    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an undirected edge. Self-loops are ignored.
    pub fn with_edge(mut self, a: Zone, b: Zone) -> Self {
        self.add_edge(a, b);
        self
    }

    /// Adds an undirected edge in place. Self-loops are ignored.
    pub fn add_edge(&mut self, a: Zone, b: Zone) {
        if a == b {
            return;
        }
        self.neighbors.entry(a).or_default().insert(b);
        self.neighbors.entry(b).or_default().insert(a);
    }

    /// Number of zones that appear in at least one edge.
    pub fn zone_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Breadth-first hop count from `from` to `to`.
    fn hops(&self, from: Zone, to: Zone) -> Option<u32> {
        if from == to {
            return Some(0);
        }

        let mut seen = BTreeSet::from([from]);
        let mut frontier = VecDeque::from([(from, 0u32)]);

        while let Some((zone, depth)) = frontier.pop_front() {
            let Some(next) = self.neighbors.get(&zone) else {
                continue;
            };
            for &n in next {
                if n == to {
                    return Some(depth + 1);
                }
                if seen.insert(n) {
                    frontier.push_back((n, depth + 1));
                }
            }
        }

        None
    }
}

impl ZoneProximity for AdjacencyGraph {
    fn name(&self) -> &str {
        "AdjacencyGraph"
    }

    fn distance(&self, a: Zone, b: Zone) -> u32 {
        self.hops(a, b).unwrap_or(Self::UNREACHABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_distance() {
        let m = NumericDistance;
        assert_eq!(m.distance(Zone(1), Zone(3)), 2);
        assert_eq!(m.distance(Zone(3), Zone(1)), 2);
        assert_eq!(m.distance(Zone(4), Zone(4)), 0);
    }

    #[test]
    fn test_numeric_distance_monotonic() {
        let m = NumericDistance;
        let target = Zone(10);
        let near = m.distance(Zone(9), target);
        let far = m.distance(Zone(2), target);
        assert!(near < far);
    }

    // 1 - 2 - 3 - 4, plus a shortcut 1 - 4 and an isolated pair 8 - 9
    fn sample_graph() -> AdjacencyGraph {
        AdjacencyGraph::new()
            .with_edge(Zone(1), Zone(2))
            .with_edge(Zone(2), Zone(3))
            .with_edge(Zone(3), Zone(4))
            .with_edge(Zone(1), Zone(4))
            .with_edge(Zone(8), Zone(9))
    }

    #[test]
    fn test_graph_shortest_path() {
        let g = sample_graph();
        assert_eq!(g.distance(Zone(1), Zone(3)), 2);
        assert_eq!(g.distance(Zone(1), Zone(4)), 1);
        assert_eq!(g.distance(Zone(2), Zone(4)), 2);
        assert_eq!(g.zone_count(), 6);
    }

    #[test]
    fn test_graph_symmetric_and_zero_on_identity() {
        let g = sample_graph();
        for a in 1..=4 {
            assert_eq!(g.distance(Zone(a), Zone(a)), 0);
            for b in 1..=4 {
                assert_eq!(g.distance(Zone(a), Zone(b)), g.distance(Zone(b), Zone(a)));
                if a != b {
                    assert!(g.distance(Zone(a), Zone(b)) > 0);
                }
            }
        }
    }

    #[test]
    fn test_graph_unreachable() {
        let g = sample_graph();
        assert_eq!(g.distance(Zone(1), Zone(9)), AdjacencyGraph::UNREACHABLE);
        assert_eq!(g.distance(Zone(5), Zone(6)), AdjacencyGraph::UNREACHABLE);
    }

    #[test]
    fn test_self_loop_ignored() {
        let g = AdjacencyGraph::new().with_edge(Zone(1), Zone(1));
        assert_eq!(g.zone_count(), 0);
    }
}
