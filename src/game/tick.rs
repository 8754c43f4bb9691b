//! Simulation Step
//!
//! One frame of local simulation: apply the input as a movement attempt
//! resolved against the grid, then report the goal proximity and display
//! tint the session synchronizer consumes.

use crate::game::collision::{self, PLAYER_RADIUS};
use crate::game::input::InputFrame;
use crate::game::state::{GameState, PLAYER_SPEED};

/// Tick configuration.
#[derive(Clone, Copy, Debug)]
pub struct TickConfig {
    /// Distance to the goal center that counts as "at the goal".
    pub goal_radius: f32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self { goal_radius: 0.75 }
    }
}

/// Outcome of one tick.
#[derive(Clone, Copy, Debug)]
pub struct TickResult {
    /// The player is within the goal radius this tick.
    pub near_goal: bool,
    /// Current display tint (distance-interpolated).
    pub tint: [f32; 3],
}

/// Advance the simulation one frame.
pub fn tick(
    state: &mut GameState,
    input: &InputFrame,
    dt: f32,
    config: &TickConfig,
) -> TickResult {
    state.tick += 1;

    let (dir_x, dir_z) = input.direction();
    let dx = dir_x * PLAYER_SPEED * dt;
    let dz = dir_z * PLAYER_SPEED * dt;
    let (x, z) = collision::resolve_movement(
        &state.grid,
        state.player.x,
        state.player.z,
        dx,
        dz,
        PLAYER_RADIUS,
    );
    state.player.x = x;
    state.player.z = z;

    TickResult {
        near_goal: state.distance_to_goal() < config.goal_radius,
        tint: state.goal_tint(),
    }
}
