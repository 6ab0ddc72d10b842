//! Composite strategy: run two strategies on the same hit

use std::rc::Rc;

use super::{BrickHit, CollisionStrategy, StrategyKind};
use crate::sim::context::GameContext;
use crate::sim::entities::Collider;

/// Fires `first` then `second`. Whichever reaches Basic first removes the
/// brick; the other only sees the captured `BrickHit`.
#[derive(Debug)]
pub struct DoubleStrategy {
    first: Rc<dyn CollisionStrategy>,
    second: Rc<dyn CollisionStrategy>,
}

impl DoubleStrategy {
    pub fn new(first: Rc<dyn CollisionStrategy>, second: Rc<dyn CollisionStrategy>) -> Self {
        Self { first, second }
    }
}

impl CollisionStrategy for DoubleStrategy {
    fn on_collision(&self, brick: &BrickHit, other: Collider, ctx: &mut dyn GameContext) {
        self.first.on_collision(brick, other, ctx);
        self.second.on_collision(brick, other, ctx);
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Double
    }

    fn nesting(&self) -> u32 {
        1 + self.first.nesting().max(self.second.nesting())
    }

    fn leaves(&self) -> Vec<StrategyKind> {
        let mut leaves = self.first.leaves();
        leaves.extend(self.second.leaves());
        leaves
    }
}
