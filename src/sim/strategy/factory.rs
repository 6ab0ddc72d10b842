//! Randomized strategy construction with bounded composite depth
//!
//! `build` picks uniformly among the five special kinds. A `Double` pick
//! recurses into two sub-picks one level deeper; at `max_depth` a `Double`
//! pick is replaced by a leaf pick, so every tree terminates and nests at most
//! `max_depth` composites deep.

use std::rc::Rc;

use rand::Rng;

use super::{
    BasicCollisionStrategy, CollisionStrategy, DoubleStrategy, ExtraBallsStrategy,
    ExtraPaddleStrategy, ReturnStreakStrategy, StrategyKind, TurboModeStrategy,
};
use crate::tuning::Tuning;

/// Picks available to `build`
const SPECIAL_KINDS: [StrategyKind; 5] = [
    StrategyKind::ExtraBalls,
    StrategyKind::ExtraPaddle,
    StrategyKind::Turbo,
    StrategyKind::ReturnStreak,
    StrategyKind::Double,
];

/// Builds strategies for one board. Holds the shared basic and turbo instances.
#[derive(Debug)]
pub struct StrategyFactory {
    basic: Rc<BasicCollisionStrategy>,
    turbo: Rc<TurboModeStrategy>,
    max_depth: u32,
    basic_weight: u32,
}

impl StrategyFactory {
    pub fn new(tuning: &Tuning) -> Self {
        let basic = Rc::new(BasicCollisionStrategy);
        let turbo = Rc::new(TurboModeStrategy::new(basic.clone()));
        Self {
            basic,
            turbo,
            max_depth: tuning.max_strategy_depth,
            basic_weight: tuning.basic_brick_weight,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The shared basic strategy
    pub fn basic(&self) -> Rc<dyn CollisionStrategy> {
        self.basic.clone()
    }

    /// The shared turbo strategy, for the controller's per-tick update
    pub fn turbo(&self) -> Rc<TurboModeStrategy> {
        self.turbo.clone()
    }

    /// Strategy for a freshly laid brick: basic with `basic_weight`, each
    /// special kind with weight 1.
    pub fn for_brick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rc<dyn CollisionStrategy> {
        let total = self.basic_weight.saturating_add(SPECIAL_KINDS.len() as u32);
        let roll = rng.random_range(0..total);
        match roll.checked_sub(self.basic_weight) {
            None => self.basic(),
            Some(special) => self.build_kind(SPECIAL_KINDS[special as usize], 0, rng),
        }
    }

    /// Random special strategy at the given composite depth
    pub fn build<R: Rng + ?Sized>(&self, depth: u32, rng: &mut R) -> Rc<dyn CollisionStrategy> {
        let kind = pick(rng, true);
        self.build_kind(kind, depth, rng)
    }

    /// Strategy of a given kind. `Double` still draws its children at random.
    pub fn build_kind<R: Rng + ?Sized>(
        &self,
        kind: StrategyKind,
        depth: u32,
        rng: &mut R,
    ) -> Rc<dyn CollisionStrategy> {
        match kind {
            StrategyKind::Basic => self.basic(),
            StrategyKind::ExtraBalls => Rc::new(ExtraBallsStrategy::new(self.basic())),
            StrategyKind::ExtraPaddle => Rc::new(ExtraPaddleStrategy::new(self.basic())),
            StrategyKind::Turbo => self.turbo.clone(),
            StrategyKind::ReturnStreak => Rc::new(ReturnStreakStrategy::new(self.basic())),
            StrategyKind::Double if depth >= self.max_depth => {
                let fallback = pick(rng, false);
                self.build_kind(fallback, depth, rng)
            }
            StrategyKind::Double => {
                let first = pick(rng, true);
                let mut second = pick(rng, true);
                if first == StrategyKind::Double && second == StrategyKind::Double {
                    second = pick(rng, false);
                }
                Rc::new(DoubleStrategy::new(
                    self.build_kind(first, depth + 1, rng),
                    self.build_kind(second, depth + 1, rng),
                ))
            }
        }
    }
}

/// Uniform pick over the special kinds, optionally excluding `Double`
fn pick<R: Rng + ?Sized>(rng: &mut R, allow_double: bool) -> StrategyKind {
    let choices = if allow_double {
        &SPECIAL_KINDS[..]
    } else {
        &SPECIAL_KINDS[..SPECIAL_KINDS.len() - 1]
    };
    choices[rng.random_range(0..choices.len())]
}
