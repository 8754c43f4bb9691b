//! Session-Local Game State
//!
//! The grid plus the local player pose, and the derived values the session
//! synchronizer and UX layer read each frame: distance to the goal and the
//! distance-interpolated display tint.

use crate::maze::grid::Grid;

/// Player movement speed, world units per second.
pub const PLAYER_SPEED: f32 = 2.5;

/// Display tint far from the goal.
pub const BASE_TINT: [f32; 3] = [1.0, 1.0, 1.0];

/// Display tint at the goal center.
pub const GOAL_TINT: [f32; 3] = [0.4, 0.2, 1.0];

/// Distance (world units) at which the tint starts shifting toward
/// [`GOAL_TINT`].
pub const TINT_FALLOFF: f32 = 5.0;

/// Player pose in world space. Movement is confined to the XZ plane.
#[derive(Clone, Copy, Debug)]
pub struct PlayerState {
    /// World X.
    pub x: f32,
    /// World Z.
    pub z: f32,
}

/// Per-process game state.
///
/// Each process owns its own maze and its own player; nothing here is
/// shared over the network. The session synchronizer only consumes the
/// derived proximity and tint values.
#[derive(Clone, Debug)]
pub struct GameState {
    /// The generated maze. Immutable for the life of the session.
    pub grid: Grid,
    /// The local player.
    pub player: PlayerState,
    /// Ticks elapsed since the session started.
    pub tick: u64,
}

impl GameState {
    /// Create a state with the player standing on the maze's spawn cell.
    pub fn new(grid: Grid) -> Self {
        let (x, z) = grid.cell_center(grid.start());
        Self {
            grid,
            player: PlayerState { x, z },
            tick: 0,
        }
    }

    /// Straight-line distance from the player to the goal cell center.
    pub fn distance_to_goal(&self) -> f32 {
        let (goal_x, goal_z) = self.grid.cell_center(self.grid.goal());
        let dx = self.player.x - goal_x;
        let dz = self.player.z - goal_z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Display tint interpolated by live distance to the goal.
    ///
    /// [`BASE_TINT`] beyond [`TINT_FALLOFF`] world units, shifting linearly
    /// to [`GOAL_TINT`] at the goal center. Purely cosmetic: the value also
    /// rides along in the unlock message so the client can display the color
    /// the host finished with.
    pub fn goal_tint(&self) -> [f32; 3] {
        let t = (1.0 - self.distance_to_goal() / TINT_FALLOFF).clamp(0.0, 1.0);
        [
            BASE_TINT[0] + (GOAL_TINT[0] - BASE_TINT[0]) * t,
            BASE_TINT[1] + (GOAL_TINT[1] - BASE_TINT[1]) * t,
            BASE_TINT[2] + (GOAL_TINT[2] - BASE_TINT[2]) * t,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DeterministicRng;
    use crate::maze::generator::generate;

    fn assert_tint_eq(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-5, "tint {actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_player_spawns_at_start_center() {
        let grid = generate(15, 15, &mut DeterministicRng::new(4)).unwrap();
        let (sx, sz) = grid.cell_center(grid.start());
        let state = GameState::new(grid);
        assert_eq!((state.player.x, state.player.z), (sx, sz));
    }

    #[test]
    fn test_tint_at_goal_is_goal_color() {
        let grid = generate(15, 15, &mut DeterministicRng::new(4)).unwrap();
        let (gx, gz) = grid.cell_center(grid.goal());
        let mut state = GameState::new(grid);
        state.player = PlayerState { x: gx, z: gz };

        assert!(state.distance_to_goal() < 1e-6);
        assert_tint_eq(state.goal_tint(), GOAL_TINT);
    }

    #[test]
    fn test_tint_far_from_goal_is_base_color() {
        let grid = generate(31, 31, &mut DeterministicRng::new(4)).unwrap();
        let mut state = GameState::new(grid);
        // Park the player far outside the falloff range.
        let (gx, gz) = state.grid.cell_center(state.grid.goal());
        state.player = PlayerState {
            x: gx - 2.0 * TINT_FALLOFF,
            z: gz,
        };

        assert_tint_eq(state.goal_tint(), BASE_TINT);
    }

    #[test]
    fn test_tint_blends_inside_falloff() {
        let grid = generate(31, 31, &mut DeterministicRng::new(4)).unwrap();
        let (gx, gz) = grid.cell_center(grid.goal());
        let mut state = GameState::new(grid);
        state.player = PlayerState {
            x: gx - TINT_FALLOFF / 2.0,
            z: gz,
        };

        let expected = [
            (BASE_TINT[0] + GOAL_TINT[0]) / 2.0,
            (BASE_TINT[1] + GOAL_TINT[1]) / 2.0,
            (BASE_TINT[2] + GOAL_TINT[2]) / 2.0,
        ];
        assert_tint_eq(state.goal_tint(), expected);
    }
}
