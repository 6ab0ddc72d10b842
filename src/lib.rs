//! Bricker - A brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, strategies, game state)
//! - `platform`: Host-side input and prompt adapters
//! - `tuning`: Data-driven game balance and board size

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{BoardConfig, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
}
