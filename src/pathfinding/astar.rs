use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

// =============================================================================
// GRAPH
// =============================================================================

/// Anything that can be searched for a path: the tile map, the live world
/// (which also treats pushwalls as blocking), or a test fixture.
pub trait Graph {
    type Node: Copy + Eq + Hash;

    /// Nodes reachable in one step from `node`.
    fn nodes_connected_to(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Heuristic distance between any two nodes.
    fn estimate_distance(&self, a: Self::Node, b: Self::Node) -> f64;

    /// Exact cost of the step between two adjacent nodes.
    fn step_distance(&self, a: Self::Node, b: Self::Node) -> f64;

    /// See [`find_path`].
    fn find_path(&self, start: Self::Node, goal: Self::Node, max_distance: f64) -> Vec<Self::Node> {
        find_path(self, start, goal, max_distance)
    }
}

// =============================================================================
// BEST-FIRST SEARCH
// =============================================================================

/// Frontier entry. Ordered so the `BinaryHeap` pops the lowest total
/// distance first, and the earliest pushed among equals.
struct Frontier<N> {
    node: N,
    travelled: f64,
    total: f64,
    order: u64,
}

impl<N> PartialEq for Frontier<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for Frontier<N> {}

impl<N> PartialOrd for Frontier<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for Frontier<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total
            .total_cmp(&self.total)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Search `graph` from `start` to `goal`.
///
/// Returns the nodes to visit in order, excluding `start` and ending with
/// `goal`. An empty path means `goal` is unreachable, or that every route to
/// it has an estimated length above `max_distance`. When `start == goal`
/// the path is empty as well, since there is nowhere to go.
pub fn find_path<G: Graph + ?Sized>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    max_distance: f64,
) -> Vec<G::Node> {
    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<G::Node, G::Node> = HashMap::new();
    let mut visited = HashSet::from([start]);
    let mut order = 0u64;

    open.push(Frontier {
        node: start,
        travelled: 0.0,
        total: graph.estimate_distance(start, goal),
        order,
    });

    while let Some(current) = open.pop() {
        if current.node == goal {
            return reconstruct_path(&came_from, start, goal);
        }

        for next in graph.nodes_connected_to(current.node) {
            if visited.contains(&next) {
                continue;
            }
            let travelled = current.travelled + graph.step_distance(current.node, next);
            let total = travelled + graph.estimate_distance(next, goal);
            if total > max_distance {
                continue;
            }

            visited.insert(next);
            came_from.insert(next, current.node);
            order += 1;
            open.push(Frontier { node: next, travelled, total, order });
        }
    }

    Vec::new()
}

/// Walk `came_from` back from `goal`, dropping `start`.
fn reconstruct_path<N: Copy + Eq + Hash>(came_from: &HashMap<N, N>, start: N, goal: N) -> Vec<N> {
    let mut path = Vec::new();
    let mut current = goal;

    while current != start {
        path.push(current);
        current = came_from[&current];
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Open grid with a set of blocked cells.
    struct Grid {
        width: i32,
        height: i32,
        blocked: HashSet<(i32, i32)>,
    }

    impl Graph for Grid {
        type Node = (i32, i32);

        fn nodes_connected_to(&self, (x, y): (i32, i32)) -> Vec<(i32, i32)> {
            [(x, y - 1), (x + 1, y), (x, y + 1), (x - 1, y)]
                .into_iter()
                .filter(|&(nx, ny)| nx >= 0 && ny >= 0 && nx < self.width && ny < self.height)
                .filter(|n| !self.blocked.contains(n))
                .collect()
        }

        fn estimate_distance(&self, a: (i32, i32), b: (i32, i32)) -> f64 {
            ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f64
        }

        fn step_distance(&self, _: (i32, i32), _: (i32, i32)) -> f64 {
            1.0
        }
    }

    fn open_grid() -> Grid {
        Grid { width: 10, height: 10, blocked: HashSet::new() }
    }

    #[test]
    fn test_straight_line() {
        let path = open_grid().find_path((0, 0), (5, 0), 100.0);
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&(1, 0)));
        assert_eq!(path.last(), Some(&(5, 0)));
    }

    #[test]
    fn test_start_is_goal() {
        assert!(open_grid().find_path((3, 3), (3, 3), 100.0).is_empty());
    }

    #[test]
    fn test_around_obstacle() {
        let mut grid = open_grid();
        for y in 0..5 {
            grid.blocked.insert((5, y));
        }
        let path = grid.find_path((3, 0), (7, 0), 100.0);
        assert!(!path.is_empty());
        assert_eq!(path.last(), Some(&(7, 0)));
        assert!(path.iter().all(|n| !grid.blocked.contains(n)));
    }

    #[test]
    fn test_unreachable_is_empty() {
        let mut grid = open_grid();
        for y in 0..10 {
            grid.blocked.insert((5, y));
        }
        assert!(grid.find_path((0, 0), (9, 9), 100.0).is_empty());
    }

    #[test]
    fn test_max_distance_prunes() {
        let grid = open_grid();
        assert!(grid.find_path((0, 0), (9, 0), 5.0).is_empty());
        assert_eq!(grid.find_path((0, 0), (4, 0), 5.0).len(), 4);
    }

    #[test]
    fn test_consecutive_nodes_adjacent() {
        let mut grid = open_grid();
        grid.blocked.extend([(2, 2), (2, 3), (2, 4), (3, 2), (4, 2)]);
        let start = (0, 0);
        let path = grid.find_path(start, (9, 9), 100.0);
        let mut prev = start;
        for node in path {
            assert!(grid.nodes_connected_to(prev).contains(&node));
            prev = node;
        }
    }
}
