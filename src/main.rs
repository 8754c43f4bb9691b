//! Tandem Maze
//!
//! Two independently launched processes play mirrored maze sessions: the
//! HOST listens and, on reaching its goal, unlocks the CLIENT with a single
//! tinted message. Rendering and real keyboard input are external concerns;
//! this binary drives the player along the solved route so everything from
//! maze generation to the unlock handshake runs end to end.
//!
//! ```text
//! tandem-maze host [--port 8080] [--size 15x15] [--seed N]
//! tandem-maze client [--addr 127.0.0.1] [--port 8080] [--size 15x15]
//! ```

use std::time::Duration;

use anyhow::{bail, Context};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tandem_maze::core::rng::DeterministicRng;
use tandem_maze::game::input::InputFrame;
use tandem_maze::game::state::GameState;
use tandem_maze::game::tick::{tick, TickConfig};
use tandem_maze::maze::generator;
use tandem_maze::maze::grid::GridPos;
use tandem_maze::maze::solver;
use tandem_maze::network::session::{Role, Session, SessionConfig};
use tandem_maze::TICK_RATE;

/// Ticks before an unfinished session gives up (the client never unlocking
/// is an expected degraded outcome, not a hang).
const TICK_BUDGET: u64 = TICK_RATE as u64 * 120;

/// How close the player must be to a route waypoint before advancing to the
/// next one.
const WAYPOINT_EPSILON: f32 = 0.05;

#[derive(Debug)]
struct AppConfig {
    role: Role,
    session: SessionConfig,
    maze_width: u32,
    maze_height: u32,
    seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            role: Role::Host,
            session: SessionConfig::default(),
            maze_width: 15,
            maze_height: 15,
            seed: None,
        }
    }
}

fn parse_args() -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::default();
    let mut args = std::env::args().skip(1);

    let Some(role) = args.next() else {
        bail!("usage: tandem-maze <host|client> [--addr IP] [--port N] [--size WxH] [--seed N]");
    };
    config.role = match role.as_str() {
        "host" => Role::Host,
        "client" => Role::Client,
        other => bail!("unknown role {other:?}, expected \"host\" or \"client\""),
    };

    while let Some(flag) = args.next() {
        let value = args
            .next()
            .with_context(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--port" => config.session.port = value.parse().context("invalid port")?,
            "--addr" => config.session.host_addr = value,
            "--size" => {
                let (w, h) = value
                    .split_once('x')
                    .context("expected WxH, e.g. --size 15x15")?;
                config.maze_width = w.parse().context("invalid width")?;
                config.maze_height = h.parse().context("invalid height")?;
            }
            "--seed" => config.seed = Some(value.parse().context("invalid seed")?),
            other => bail!("unknown flag {other:?}"),
        }
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = parse_args()?;
    info!(
        "tandem-maze v{} starting as {:?}",
        tandem_maze::VERSION,
        config.role
    );

    let mut rng = match config.seed {
        Some(seed) => DeterministicRng::new(seed),
        None => DeterministicRng::from_entropy(),
    };
    let grid = generator::generate(config.maze_width, config.maze_height, &mut rng)
        .context("maze generation failed, session cannot start")?;
    info!(
        width = grid.width(),
        height = grid.height(),
        goal = %grid.goal(),
        "maze ready"
    );
    debug!("layout:\n{grid}");

    let route = solver::shortest_path(&grid, grid.start(), grid.goal())
        .context("generated maze has no route to its goal")?;
    info!(cells = route.len(), "route to goal solved");

    let mut state = GameState::new(grid);
    let mut session = Session::establish(config.role, &config.session).await;
    let mut driver = RouteDriver::new(route);

    let tick_config = TickConfig::default();
    let dt = 1.0 / TICK_RATE as f32;
    let mut interval = tokio::time::interval(Duration::from_micros(1_000_000 / TICK_RATE as u64));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        // Movement is gated until the session says otherwise; a locked
        // client stands still on its spawn cell.
        let input = if session.movement_locked() {
            InputFrame::new()
        } else {
            driver.next_input(&state)
        };

        let result = tick(&mut state, &input, dt, &tick_config);
        session.tick(result.near_goal, result.tint);

        if session.goal_reached() {
            info!(tint = ?result.tint, ticks = state.tick, "session complete");
            break;
        }
        if state.tick >= TICK_BUDGET {
            warn!("tick budget exhausted before reaching the goal (never unlocked?)");
            break;
        }
    }

    Ok(())
}

/// Drives the player along the solved route, one waypoint at a time. Stands
/// in for the out-of-scope renderer/keyboard layer.
struct RouteDriver {
    route: Vec<GridPos>,
    next: usize,
}

impl RouteDriver {
    fn new(route: Vec<GridPos>) -> Self {
        Self { route, next: 0 }
    }

    fn next_input(&mut self, state: &GameState) -> InputFrame {
        while let Some(&waypoint) = self.route.get(self.next) {
            let (wx, wz) = state.grid.cell_center(waypoint);
            let dx = wx - state.player.x;
            let dz = wz - state.player.z;
            if dx.abs() < WAYPOINT_EPSILON && dz.abs() < WAYPOINT_EPSILON {
                self.next += 1;
                continue;
            }
            return InputFrame::with_movement(deflect(dx), deflect(dz));
        }
        InputFrame::new()
    }
}

fn deflect(delta: f32) -> i8 {
    if delta > WAYPOINT_EPSILON {
        InputFrame::MAX_DEFLECTION
    } else if delta < -WAYPOINT_EPSILON {
        -InputFrame::MAX_DEFLECTION
    } else {
        0
    }
}
