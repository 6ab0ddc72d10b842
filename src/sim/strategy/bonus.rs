//! Bonus strategies: extra balls, extra paddle, falling heart
//!
//! Each wraps the shared basic strategy and adds a spawn on top.

use std::f32::consts::PI;
use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use super::{BrickHit, CollisionStrategy, StrategyKind};
use crate::sim::context::GameContext;
use crate::sim::entities::Collider;
use crate::sim::world::{Entity, Layer};

/// Breaks the brick and releases pucks from its center
#[derive(Debug)]
pub struct ExtraBallsStrategy {
    basic: Rc<dyn CollisionStrategy>,
}

impl ExtraBallsStrategy {
    pub fn new(basic: Rc<dyn CollisionStrategy>) -> Self {
        Self { basic }
    }
}

impl CollisionStrategy for ExtraBallsStrategy {
    fn on_collision(&self, brick: &BrickHit, other: Collider, ctx: &mut dyn GameContext) {
        self.basic.on_collision(brick, other, ctx);

        let (count, size, speed) = {
            let t = ctx.tuning();
            (t.puck_count, t.puck_size, t.puck_speed)
        };
        for _ in 0..count {
            // Anywhere in the lower half-turn
            let angle: f32 = ctx.rng().random_range(0.0..PI);
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            ctx.spawn(Entity::puck(brick.center, size, vel), Layer::Default);
        }
        log::debug!("Released {count} pucks at {:?}", brick.center);
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::ExtraBalls
    }
}

/// Breaks the brick and, if none is out yet, adds a second paddle mid-window
#[derive(Debug)]
pub struct ExtraPaddleStrategy {
    basic: Rc<dyn CollisionStrategy>,
}

impl ExtraPaddleStrategy {
    pub fn new(basic: Rc<dyn CollisionStrategy>) -> Self {
        Self { basic }
    }
}

impl CollisionStrategy for ExtraPaddleStrategy {
    fn on_collision(&self, brick: &BrickHit, other: Collider, ctx: &mut dyn GameContext) {
        if other != Collider::MainBall {
            return;
        }
        self.basic.on_collision(brick, other, ctx);

        if ctx.extra_paddles() > 0 {
            return;
        }
        let (center, size) = {
            let t = ctx.tuning();
            (t.window() * 0.5, Vec2::new(t.paddle_width, t.paddle_height))
        };
        ctx.spawn(Entity::extra_paddle(center, size), Layer::Default);
        ctx.increment_extra_paddles();
        log::debug!("Extra paddle spawned");
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::ExtraPaddle
    }
}

/// Breaks the brick and drops a heart only the player's own paddle can catch
#[derive(Debug)]
pub struct ReturnStreakStrategy {
    basic: Rc<dyn CollisionStrategy>,
}

impl ReturnStreakStrategy {
    pub fn new(basic: Rc<dyn CollisionStrategy>) -> Self {
        Self { basic }
    }
}

impl CollisionStrategy for ReturnStreakStrategy {
    fn on_collision(&self, brick: &BrickHit, other: Collider, ctx: &mut dyn GameContext) {
        if other != Collider::MainBall {
            return;
        }
        self.basic.on_collision(brick, other, ctx);

        let Some(catcher) = ctx.original_paddle() else {
            return;
        };
        let (size, speed) = {
            let t = ctx.tuning();
            (t.heart_size, t.heart_fall_speed)
        };
        let heart = Entity::falling_heart(brick.center, size, Vec2::new(0.0, speed), catcher);
        ctx.spawn(heart, Layer::Default);
        log::debug!("Heart dropped at {:?}", brick.center);
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::ReturnStreak
    }
}
