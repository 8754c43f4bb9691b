//! Perfect-Maze Generation
//!
//! Kruskal-style randomized spanning tree over the cell lattice. Every cell
//! on the odd/odd sublattice is a graph node; the candidate edges are the
//! walls between horizontally or vertically adjacent nodes. Processing the
//! edges in random order and carving only those that join two different
//! disjoint sets yields a spanning tree: every pair of carved cells is
//! connected by exactly one route, with no cycles.

use std::cmp::Ordering;

use tracing::debug;

use crate::core::rng::DeterministicRng;
use crate::maze::grid::{Grid, GridPos};

/// Maze construction failure.
///
/// Callers must treat this as fatal for the session: there is no valid maze
/// to play.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The requested dimensions cannot contain a single cell node.
    #[error("maze dimensions too small: {width}x{height} (need at least 2x2)")]
    TooSmall {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Array-based disjoint-set (union-find) over integer node ids.
///
/// Path compression on `find`, union by rank on `union`. Near-constant-time
/// operations; the generator leans on `union` returning whether a merge
/// actually happened to reject cycle-forming edges.
#[derive(Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Create `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    /// Root of the set containing `node`, compressing the path behind it.
    pub fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = node;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Returns `false` when they were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            Ordering::Less => self.parent[root_a] = root_b,
            Ordering::Greater => self.parent[root_b] = root_a,
            Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

/// An uncarved wall between two adjacent cell nodes.
#[derive(Clone, Copy, Debug)]
struct WallEdge {
    a: usize,
    b: usize,
    between: GridPos,
}

/// Generate a perfect maze.
///
/// Even dimensions are coerced up by one; the construction needs an
/// odd-by-odd grid where odd coordinates are cell nodes and even coordinates
/// are the walls between them. The goal is the first path cell scanning rows
/// last-to-first (and columns last-to-first within each row); the start is
/// the first path cell in forward scan order. The goal is a deterministic
/// tie-break, not the graph-theoretically farthest cell from the start.
pub fn generate(
    width: u32,
    height: u32,
    rng: &mut DeterministicRng,
) -> Result<Grid, GenerateError> {
    if width < 2 || height < 2 {
        return Err(GenerateError::TooSmall { width, height });
    }
    let width = if width % 2 == 0 { width + 1 } else { width };
    let height = if height % 2 == 0 { height + 1 } else { height };
    let (width, height) = (width as usize, height as usize);

    let nodes_x = width / 2;
    let nodes_z = height / 2;
    let node_count = nodes_x * nodes_z;
    let node_id = |nx: usize, nz: usize| nz * nodes_x + nx;
    let node_cell = |nx: usize, nz: usize| GridPos::new(nx * 2 + 1, nz * 2 + 1);

    let mut grid = Grid::filled(width, height, Grid::DEFAULT_CELL_SIZE);

    // Every cell node starts carved, each in its own set.
    let mut sets = DisjointSet::new(node_count);
    for nz in 0..nodes_z {
        for nx in 0..nodes_x {
            grid.carve(node_cell(nx, nz));
        }
    }

    // Candidate edges between horizontally and vertically adjacent nodes.
    let mut edges = Vec::with_capacity(2 * node_count);
    for nz in 0..nodes_z {
        for nx in 0..nodes_x {
            if nx + 1 < nodes_x {
                edges.push(WallEdge {
                    a: node_id(nx, nz),
                    b: node_id(nx + 1, nz),
                    between: GridPos::new(nx * 2 + 2, nz * 2 + 1),
                });
            }
            if nz + 1 < nodes_z {
                edges.push(WallEdge {
                    a: node_id(nx, nz),
                    b: node_id(nx, nz + 1),
                    between: GridPos::new(nx * 2 + 1, nz * 2 + 2),
                });
            }
        }
    }
    rng.shuffle(&mut edges);

    // Spanning-tree construction: an edge is carved only when it joins two
    // different components, so exactly node_count - 1 edges survive.
    let mut carved = 0usize;
    for edge in &edges {
        if sets.union(edge.a, edge.b) {
            grid.carve(edge.between);
            carved += 1;
        }
    }
    debug_assert_eq!(carved + 1, node_count);

    let start = forward_scan(&grid).unwrap_or_default();
    let goal = reverse_scan(&grid).unwrap_or_default();
    grid.set_endpoints(start, goal);

    debug!(width, height, %start, %goal, "maze generated");
    Ok(grid)
}

/// First path cell, rows first-to-last, columns first-to-last.
fn forward_scan(grid: &Grid) -> Option<GridPos> {
    for z in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.is_path(x, z) {
                return Some(GridPos::new(x, z));
            }
        }
    }
    None
}

/// First path cell, rows last-to-first, columns last-to-first.
fn reverse_scan(grid: &Grid) -> Option<GridPos> {
    for z in (0..grid.height()).rev() {
        for x in (0..grid.width()).rev() {
            if grid.is_path(x, z) {
                return Some(GridPos::new(x, z));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Connected + acyclic over the carved cells.
    ///
    /// Every carved passage joins exactly two node cells, so the carved-cell
    /// graph is a tree iff it is connected and has (cells - 1) adjacencies.
    fn is_perfect(grid: &Grid) -> bool {
        let cells: Vec<GridPos> = grid.path_cells().collect();
        if cells.is_empty() {
            return false;
        }

        // Count adjacent carved pairs (right and down only, each pair once).
        let mut adjacencies = 0usize;
        for pos in &cells {
            if grid.is_path(pos.x + 1, pos.z) {
                adjacencies += 1;
            }
            if grid.is_path(pos.x, pos.z + 1) {
                adjacencies += 1;
            }
        }

        // Flood fill from the first carved cell.
        let width = grid.width();
        let mut seen = vec![false; width * grid.height()];
        let mut stack = vec![cells[0]];
        seen[cells[0].z * width + cells[0].x] = true;
        let mut reached = 0usize;
        while let Some(pos) = stack.pop() {
            reached += 1;
            let mut visit = |x: usize, z: usize| {
                if grid.is_path(x, z) && !seen[z * width + x] {
                    seen[z * width + x] = true;
                    stack.push(GridPos::new(x, z));
                }
            };
            if pos.x > 0 {
                visit(pos.x - 1, pos.z);
            }
            if pos.z > 0 {
                visit(pos.x, pos.z - 1);
            }
            visit(pos.x + 1, pos.z);
            visit(pos.x, pos.z + 1);
        }

        reached == cells.len() && adjacencies == cells.len() - 1
    }

    #[test]
    fn test_disjoint_set_union_find() {
        let mut sets = DisjointSet::new(4);
        assert_ne!(sets.find(0), sets.find(1));

        assert!(sets.union(0, 1));
        assert_eq!(sets.find(0), sets.find(1));

        // Already merged
        assert!(!sets.union(1, 0));

        assert!(sets.union(2, 3));
        assert!(sets.union(0, 3));
        let root = sets.find(0);
        for node in 0..4 {
            assert_eq!(sets.find(node), root);
        }
    }

    #[test]
    fn test_generated_maze_is_perfect() {
        for seed in [0, 1, 7, 42, 9999] {
            let mut rng = DeterministicRng::new(seed);
            let grid = generate(15, 15, &mut rng).unwrap();
            assert!(is_perfect(&grid), "seed {seed} produced an imperfect maze");
        }
    }

    #[test]
    fn test_even_dimensions_coerce_up() {
        let grid = generate(10, 8, &mut DeterministicRng::new(3)).unwrap();
        assert_eq!(grid.width(), 11);
        assert_eq!(grid.height(), 9);
    }

    #[test]
    fn test_even_input_matches_next_odd_size() {
        // Generate(w, h) with even inputs behaves identically to
        // Generate(w+1, h+1) under the same seed.
        let even = generate(10, 12, &mut DeterministicRng::new(99)).unwrap();
        let odd = generate(11, 13, &mut DeterministicRng::new(99)).unwrap();

        assert_eq!(even.width(), odd.width());
        assert_eq!(even.height(), odd.height());
        assert_eq!(even.start(), odd.start());
        assert_eq!(even.goal(), odd.goal());
        for z in 0..even.height() {
            for x in 0..even.width() {
                assert_eq!(even.is_path(x, z), odd.is_path(x, z));
            }
        }
    }

    #[test]
    fn test_endpoint_scan_order() {
        let grid = generate(21, 17, &mut DeterministicRng::new(5)).unwrap();
        let start = grid.start();
        let goal = grid.goal();
        assert!(grid.is_path(start.x, start.z));
        assert!(grid.is_path(goal.x, goal.z));

        // No path cell precedes the start in forward scan order, and none
        // follows the goal in reverse scan order.
        for pos in grid.path_cells() {
            assert!(pos.z > start.z || (pos.z == start.z && pos.x >= start.x));
            assert!(pos.z < goal.z || (pos.z == goal.z && pos.x <= goal.x));
        }
    }

    #[test]
    fn test_smallest_maze() {
        // 2x2 coerces to 3x3: a single room.
        let grid = generate(2, 2, &mut DeterministicRng::new(0)).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.path_cells().count(), 1);
        assert_eq!(grid.start(), grid.goal());
    }

    #[test]
    fn test_too_small_dimensions_fail() {
        let mut rng = DeterministicRng::new(0);
        assert!(matches!(
            generate(1, 9, &mut rng),
            Err(GenerateError::TooSmall { .. })
        ));
        assert!(matches!(
            generate(9, 0, &mut rng),
            Err(GenerateError::TooSmall { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_generated_mazes_are_perfect(
            width in 2u32..24,
            height in 2u32..24,
            seed: u64,
        ) {
            let mut rng = DeterministicRng::new(seed);
            let grid = generate(width, height, &mut rng).unwrap();
            prop_assert!(is_perfect(&grid));
        }
    }
}
