//! Collision Oracle and Movement Resolution
//!
//! Maps continuous world coordinates onto the grid and answers wall/free
//! queries. Movement attempts are resolved one axis at a time so a diagonal
//! push against a wall slides along it instead of stopping dead.

use crate::maze::grid::Grid;

/// Horizontal extent of the player, in world units.
pub const PLAYER_RADIUS: f32 = 0.2;

/// Whether the world-space point lies in a wall cell.
///
/// World coordinates map to the nearest cell center: add half a cell and
/// truncate. Any point mapping outside the grid counts as a wall
/// (fail-closed).
pub fn is_wall(grid: &Grid, world_x: f32, world_z: f32) -> bool {
    let grid_x = (world_x / grid.cell_size() + 0.5) as i64;
    let grid_z = (world_z / grid.cell_size() + 0.5) as i64;

    if grid_x < 0 || grid_z < 0 || grid_x >= grid.width() as i64 || grid_z >= grid.height() as i64 {
        return true;
    }

    !grid.is_path(grid_x as usize, grid_z as usize)
}

/// Nine-sample footprint test approximating a circular player of `radius`:
/// the center plus the four cardinal and four diagonal offsets. Blocked when
/// any sample lands in a wall.
pub fn footprint_blocked(grid: &Grid, world_x: f32, world_z: f32, radius: f32) -> bool {
    const OFFSETS: [(f32, f32); 9] = [
        (0.0, 0.0),
        (1.0, 0.0),
        (-1.0, 0.0),
        (0.0, 1.0),
        (0.0, -1.0),
        (1.0, 1.0),
        (1.0, -1.0),
        (-1.0, 1.0),
        (-1.0, -1.0),
    ];

    OFFSETS
        .iter()
        .any(|&(ox, oz)| is_wall(grid, world_x + ox * radius, world_z + oz * radius))
}

/// Resolve a movement attempt against the grid.
///
/// The candidate delta is decomposed into X and Z components; each is
/// applied tentatively and footprint-checked in isolation against the
/// current (already possibly-updated) position. A move blocked on one axis
/// still advances on the other, which is what produces wall sliding.
pub fn resolve_movement(
    grid: &Grid,
    x: f32,
    z: f32,
    dx: f32,
    dz: f32,
    radius: f32,
) -> (f32, f32) {
    let mut out_x = x;
    if !footprint_blocked(grid, x + dx, z, radius) {
        out_x = x + dx;
    }

    let mut out_z = z;
    if !footprint_blocked(grid, out_x, z + dz, radius) {
        out_z = z + dz;
    }

    (out_x, out_z)
}
