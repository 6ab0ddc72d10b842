//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, windowing or terminal dependencies

pub mod collision;
pub mod context;
pub mod entities;
pub mod input;
pub mod state;
pub mod strategy;
pub mod tick;
pub mod world;

pub use collision::{Aabb, Contact, ContactTracker, aabb_contact, reflect_velocity};
pub use context::GameContext;
pub use entities::{Collider, LifeColor, LifeCounter};
pub use input::{Key, KeyInput, Prompt, TickInput};
pub use state::{BrickBehavior, GamePhase, GameState, LOSE_MESSAGE, WIN_MESSAGE};
pub use strategy::{BrickHit, CollisionStrategy, StrategyFactory, StrategyKind};
pub use tick::tick;
pub use world::{Entity, EntityId, EntityKind, Layer, Skin, World};
