//! Turbo mode: temporary speed boost and skin swap on the main ball
//!
//! One instance is shared by every turbo brick on the board because it tracks
//! the main ball, not a brick. The controller drives `update` once per tick.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use super::{BrickHit, CollisionStrategy, StrategyKind};
use crate::sim::context::GameContext;
use crate::sim::entities::Collider;
use crate::sim::world::Skin;

/// Ball state captured when turbo kicks in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurboSnapshot {
    pub velocity: Vec2,
    pub skin: Skin,
    /// Ball collision count at activation
    pub baseline: u32,
}

#[derive(Debug)]
pub struct TurboModeStrategy {
    basic: Rc<dyn CollisionStrategy>,
    /// `Some` while active
    active: Cell<Option<TurboSnapshot>>,
}

impl TurboModeStrategy {
    pub fn new(basic: Rc<dyn CollisionStrategy>) -> Self {
        Self {
            basic,
            active: Cell::new(None),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get().is_some()
    }

    pub fn snapshot(&self) -> Option<TurboSnapshot> {
        self.active.get()
    }

    /// Drop turbo state without touching the ball (used when the ball is re-served)
    pub fn cancel(&self) {
        self.active.set(None);
    }

    fn activate(&self, ctx: &mut dyn GameContext) {
        let factor = ctx.tuning().turbo_factor;
        let Some(ball) = ctx.main_ball_mut() else {
            return;
        };
        let Some(baseline) = ball.ball_collisions() else {
            return;
        };
        self.active.set(Some(TurboSnapshot {
            velocity: ball.vel,
            skin: ball.skin,
            baseline,
        }));
        ball.vel *= factor;
        ball.skin = Skin::TurboBall;
        log::debug!("Turbo on at collision {baseline}");
    }
}

impl CollisionStrategy for TurboModeStrategy {
    fn on_collision(&self, brick: &BrickHit, other: Collider, ctx: &mut dyn GameContext) {
        self.basic.on_collision(brick, other, ctx);

        if other != Collider::MainBall || self.is_active() {
            return;
        }
        self.activate(ctx);
    }

    fn update(&self, ctx: &mut dyn GameContext) {
        let Some(snapshot) = self.active.get() else {
            return;
        };
        let threshold = ctx.tuning().turbo_collisions;
        let Some(ball) = ctx.main_ball_mut() else {
            return;
        };
        let Some(collisions) = ball.ball_collisions() else {
            return;
        };

        if collisions.saturating_sub(snapshot.baseline) >= threshold {
            ball.vel = snapshot.velocity;
            ball.skin = snapshot.skin;
            self.active.set(None);
            log::debug!("Turbo off after {threshold} collisions");
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Turbo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::strategy::BasicCollisionStrategy;
    use crate::sim::strategy::testing::TestContext;

    fn turbo() -> Rc<TurboModeStrategy> {
        Rc::new(TurboModeStrategy::new(Rc::new(BasicCollisionStrategy)))
    }

    #[test]
    fn test_activation_boosts_and_swaps_skin() {
        let mut ctx = TestContext::new();
        let strategy = turbo();
        let hit = ctx.add_brick(strategy.clone());
        let original = ctx.ball().vel;

        strategy.on_collision(&hit, Collider::MainBall, &mut ctx);

        assert_eq!(ctx.live_bricks, 0);
        assert!(strategy.is_active());
        assert_eq!(ctx.ball().vel, original * 1.4);
        assert_eq!(ctx.ball().skin, Skin::TurboBall);
    }

    #[test]
    fn test_second_hit_while_active_does_not_resnapshot() {
        let mut ctx = TestContext::new();
        let strategy = turbo();
        let first = ctx.add_brick(strategy.clone());
        let second = ctx.add_brick(strategy.clone());
        let original = ctx.ball().vel;

        strategy.on_collision(&first, Collider::MainBall, &mut ctx);
        ctx.bump_ball(2);
        strategy.on_collision(&second, Collider::MainBall, &mut ctx);

        // Second brick still destroyed, speed not compounded
        assert_eq!(ctx.live_bricks, 0);
        assert_eq!(ctx.ball().vel, original * 1.4);
        assert_eq!(strategy.snapshot().map(|s| s.velocity), Some(original));
        assert_eq!(strategy.snapshot().map(|s| s.baseline), Some(0));
    }

    #[test]
    fn test_reverts_after_threshold_collisions() {
        let mut ctx = TestContext::new();
        let strategy = turbo();
        let hit = ctx.add_brick(strategy.clone());
        let original = ctx.ball().vel;

        strategy.on_collision(&hit, Collider::MainBall, &mut ctx);

        ctx.bump_ball(5);
        strategy.update(&mut ctx);
        assert!(strategy.is_active());

        ctx.bump_ball(1);
        strategy.update(&mut ctx);
        assert!(!strategy.is_active());
        assert_eq!(ctx.ball().vel, original);
        assert_eq!(ctx.ball().skin, Skin::Ball);
    }

    #[test]
    fn test_puck_hit_breaks_brick_without_turbo() {
        let mut ctx = TestContext::new();
        let strategy = turbo();
        let hit = ctx.add_brick(strategy.clone());
        let original = ctx.ball().vel;

        strategy.on_collision(&hit, Collider::Puck, &mut ctx);

        assert_eq!(ctx.live_bricks, 0);
        assert!(!strategy.is_active());
        assert_eq!(ctx.ball().vel, original);
    }

    #[test]
    fn test_update_while_idle_is_noop() {
        let mut ctx = TestContext::new();
        let strategy = turbo();
        let original = ctx.ball().vel;

        ctx.bump_ball(10);
        strategy.update(&mut ctx);
        assert_eq!(ctx.ball().vel, original);
        assert_eq!(ctx.ball().skin, Skin::Ball);
    }
}
