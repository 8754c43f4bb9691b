//! Breadth-first routing over carved cells.

use std::collections::VecDeque;

use crate::maze::grid::{Grid, GridPos};

/// Shortest route between two carved cells, endpoints inclusive.
///
/// Returns `None` when either endpoint is a wall or no route exists. In a
/// perfect maze the returned route is the only one.
pub fn shortest_path(grid: &Grid, from: GridPos, to: GridPos) -> Option<Vec<GridPos>> {
    if !grid.is_path(from.x, from.z) || !grid.is_path(to.x, to.z) {
        return None;
    }

    let width = grid.width();
    let index = |pos: GridPos| pos.z * width + pos.x;

    let mut prev: Vec<Option<GridPos>> = vec![None; width * grid.height()];
    let mut visited = vec![false; width * grid.height()];
    let mut queue = VecDeque::new();

    visited[index(from)] = true;
    queue.push_back(from);

    while let Some(pos) = queue.pop_front() {
        if pos == to {
            break;
        }
        for next in neighbors(grid, pos) {
            if !visited[index(next)] {
                visited[index(next)] = true;
                prev[index(next)] = Some(pos);
                queue.push_back(next);
            }
        }
    }

    if !visited[index(to)] {
        return None;
    }

    let mut route = vec![to];
    let mut current = to;
    while let Some(parent) = prev[index(current)] {
        route.push(parent);
        current = parent;
    }
    route.reverse();
    Some(route)
}

fn neighbors(grid: &Grid, pos: GridPos) -> Vec<GridPos> {
    let mut out = Vec::with_capacity(4);
    if pos.x > 0 && grid.is_path(pos.x - 1, pos.z) {
        out.push(GridPos::new(pos.x - 1, pos.z));
    }
    if pos.z > 0 && grid.is_path(pos.x, pos.z - 1) {
        out.push(GridPos::new(pos.x, pos.z - 1));
    }
    if grid.is_path(pos.x + 1, pos.z) {
        out.push(GridPos::new(pos.x + 1, pos.z));
    }
    if grid.is_path(pos.x, pos.z + 1) {
        out.push(GridPos::new(pos.x, pos.z + 1));
    }
    out
}
