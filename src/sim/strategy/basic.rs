//! Plain brick: remove it and count it

use super::{BrickHit, CollisionStrategy, StrategyKind};
use crate::sim::context::GameContext;
use crate::sim::entities::Collider;

/// Terminal strategy every other strategy delegates to
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCollisionStrategy;

impl CollisionStrategy for BasicCollisionStrategy {
    fn on_collision(&self, brick: &BrickHit, _other: Collider, ctx: &mut dyn GameContext) {
        // The decrement rides on the removal so a repeated hit can't count twice
        if ctx.remove_entity(brick.id) {
            ctx.decrement_live_bricks();
        } else {
            log::debug!("Brick {:?} already removed, not counting again", brick.id);
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Basic
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::sim::strategy::testing::TestContext;

    #[test]
    fn test_basic_removes_and_counts_once() {
        let mut ctx = TestContext::new();
        let basic = Rc::new(BasicCollisionStrategy);
        let hit = ctx.add_brick(basic.clone());
        ctx.add_brick(basic.clone());
        assert_eq!(ctx.live_bricks, 2);

        basic.on_collision(&hit, Collider::MainBall, &mut ctx);
        assert_eq!(ctx.live_bricks, 1);
        assert!(!ctx.world.contains(hit.id));

        // Engine re-fires the same contact in the same frame
        basic.on_collision(&hit, Collider::MainBall, &mut ctx);
        assert_eq!(ctx.live_bricks, 1);
    }
}
