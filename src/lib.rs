//! # Tandem Maze
//!
//! Core of a two-party maze game: each process generates its own perfect
//! maze and plays it locally, while a minimal TCP handshake ties the two
//! sessions together. The HOST's movement is free from the start; the
//! CLIENT's movement stays locked until the host reaches its goal and sends
//! a single unlock message carrying a color tint.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       TANDEM MAZE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                 │
//! │  └── rng.rs      - Seedable Xorshift128+ PRNG               │
//! │                                                             │
//! │  maze/           - Maze model and construction              │
//! │  ├── grid.rs     - Cell grid, goal/start cells, world scale │
//! │  ├── generator.rs- Kruskal/union-find spanning tree         │
//! │  └── solver.rs   - BFS route through carved cells           │
//! │                                                             │
//! │  game/           - Per-frame simulation (no I/O)            │
//! │  ├── input.rs    - Movement input frames                    │
//! │  ├── collision.rs- Wall oracle, footprint, wall sliding     │
//! │  ├── state.rs    - Player pose, goal distance, tint         │
//! │  └── tick.rs     - One simulation step                      │
//! │                                                             │
//! │  network/        - Session synchronization                  │
//! │  ├── transport.rs- Non-blocking socket primitives           │
//! │  ├── protocol.rs - UNLOCK wire message                      │
//! │  └── session.rs  - Host/client state machines               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering, fonts, asset loading, and window/input plumbing are external
//! collaborators: they read the [`maze::grid::Grid`] and the player pose
//! each frame and feed raw input plus delta time back into [`game::tick`].
//!
//! All network polling is zero-timeout. The game loop calls the session's
//! `tick` once per frame and is never blocked by the socket layer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod maze;
pub mod network;

// Re-export commonly used types
pub use crate::core::rng::DeterministicRng;
pub use crate::game::input::InputFrame;
pub use crate::game::state::GameState;
pub use crate::maze::grid::{Cell, Grid, GridPos};
pub use crate::network::session::{Role, Session, SessionConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
