//! Brick collision strategies
//!
//! Every brick owns one `CollisionStrategy`. Leaf strategies wrap the shared
//! `BasicCollisionStrategy`, which does the actual removal and counter update;
//! `DoubleStrategy` composes two strategies and never removes anything itself.
//! Because Basic only decrements after a successful removal, a composite that
//! reaches Basic twice still counts the brick once.

use std::fmt;

use glam::Vec2;

use super::context::GameContext;
use super::entities::Collider;
use super::world::EntityId;

pub mod basic;
pub mod bonus;
pub mod double;
pub mod factory;
pub mod turbo;

pub use basic::BasicCollisionStrategy;
pub use bonus::{ExtraBallsStrategy, ExtraPaddleStrategy, ReturnStreakStrategy};
pub use double::DoubleStrategy;
pub use factory::StrategyFactory;
pub use turbo::TurboModeStrategy;

/// Strategy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Basic,
    ExtraBalls,
    ExtraPaddle,
    Turbo,
    ReturnStreak,
    Double,
}

/// What a strategy knows about the brick that was hit, captured before any
/// strategy runs so it stays valid after the brick is removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickHit {
    pub id: EntityId,
    pub center: Vec2,
}

/// Reaction of a brick to being hit
pub trait CollisionStrategy: fmt::Debug {
    /// `brick` was contacted by `other`
    fn on_collision(&self, brick: &BrickHit, other: Collider, ctx: &mut dyn GameContext);

    /// Per-tick hook for stateful strategies
    fn update(&self, _ctx: &mut dyn GameContext) {}

    fn kind(&self) -> StrategyKind;

    /// Levels of `Double` wrapping below this strategy (0 for a leaf)
    fn nesting(&self) -> u32 {
        0
    }

    /// Leaf kinds this strategy resolves to, in firing order
    fn leaves(&self) -> Vec<StrategyKind> {
        vec![self.kind()]
    }
}
