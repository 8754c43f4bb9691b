//! Per-frame game logic: input, collision, simulation step. No I/O here.

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;
