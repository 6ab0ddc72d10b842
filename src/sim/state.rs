//! Game state and round lifecycle
//!
//! `GameState` is the controller: it owns the world, the counters (lives,
//! live bricks, extra paddles) and the board layout, and is the
//! `GameContext` strategies mutate through.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Aabb, ContactTracker};
use super::context::GameContext;
use super::entities::LifeCounter;
use super::strategy::{StrategyFactory, StrategyKind};
use super::world::{Entity, EntityId, EntityKind, Layer, Skin, World};
use crate::tuning::{BoardConfig, Tuning};

/// Shown when the last ball is lost
pub const LOSE_MESSAGE: &str = "You lose! Play again?";
/// Shown when the board is cleared
pub const WIN_MESSAGE: &str = "You win! Play again?";

/// Height of the numeric lives display
const COUNTER_SIZE: f32 = 23.0;
/// Gap between the counter and the heart row
const COUNTER_GAP: f32 = 5.0;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Player declined to play again
    Exited,
}

/// How bricks get their strategy during layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrickBehavior {
    /// Weighted random roll per brick
    #[default]
    Random,
    /// Every brick gets this kind (Double still randomizes its children)
    Fixed(StrategyKind),
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub board: BoardConfig,
    pub behavior: BrickBehavior,
    pub phase: GamePhase,
    /// Remaining lives, `0..=max_lives`
    pub lives: u32,
    /// Bricks still on the board
    pub live_bricks: u32,
    /// Extra paddles currently out
    pub extra_paddles: u32,
    /// Rounds started (restarts included)
    pub round: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: World,
    pub(crate) contacts: ContactTracker,
    rng: Pcg32,
    factory: StrategyFactory,
    main_ball: Option<EntityId>,
    paddle: Option<EntityId>,
}

impl GameState {
    /// New game with random brick behaviors
    pub fn new(seed: u64, tuning: Tuning, board: BoardConfig) -> Self {
        Self::with_behavior(seed, tuning, board, BrickBehavior::Random)
    }

    pub fn with_behavior(
        seed: u64,
        tuning: Tuning,
        board: BoardConfig,
        behavior: BrickBehavior,
    ) -> Self {
        let mut state = Self {
            seed,
            factory: StrategyFactory::new(&tuning),
            lives: tuning.initial_lives,
            tuning,
            board,
            behavior,
            phase: GamePhase::Playing,
            live_bricks: 0,
            extra_paddles: 0,
            round: 0,
            time_ticks: 0,
            world: World::new(),
            contacts: ContactTracker::default(),
            rng: Pcg32::seed_from_u64(seed),
            main_ball: None,
            paddle: None,
        };
        state.initialize_board();
        state
    }

    pub fn main_ball_id(&self) -> Option<EntityId> {
        self.main_ball
    }

    pub fn main_ball(&self) -> Option<&Entity> {
        self.main_ball.and_then(|id| self.world.get(id))
    }

    pub fn paddle_id(&self) -> Option<EntityId> {
        self.paddle
    }

    pub fn factory(&self) -> &StrategyFactory {
        &self.factory
    }

    /// Main ball has dropped past the bottom edge
    pub fn ball_fallen(&self) -> bool {
        self.main_ball()
            .is_some_and(|ball| ball.center().y > self.tuning.window_height)
    }

    /// Wipe every layer and lay out a fresh board with reset counters
    pub fn restart(&mut self) {
        for layer in Layer::ALL {
            let ids: Vec<_> = self.world.in_layer(layer).map(|e| e.id).collect();
            for id in ids {
                self.world.remove(id);
            }
        }

        self.lives = self.tuning.initial_lives;
        self.live_bricks = 0;
        self.extra_paddles = 0;
        self.factory = StrategyFactory::new(&self.tuning);
        self.contacts.clear();
        self.main_ball = None;
        self.paddle = None;

        self.initialize_board();
    }

    /// Spend a life and serve a fresh ball
    pub(crate) fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.factory.turbo().cancel();
        self.serve_ball();
        if let Some(ball) = self.main_ball.and_then(|id| self.world.get_mut(id)) {
            ball.skin = Skin::Ball;
        }
        self.refresh_life_display();
        log::info!("Ball lost, {} lives left", self.lives);
    }

    /// Put the main ball at the window center with a random diagonal velocity
    pub fn serve_ball(&mut self) {
        let vel = self.serve_velocity();
        let center = self.tuning.window() * 0.5;
        if let Some(ball) = self.main_ball.and_then(|id| self.world.get_mut(id)) {
            ball.body.center = center;
            ball.vel = vel;
        }
    }

    fn serve_velocity(&mut self) -> Vec2 {
        let speed = self.tuning.ball_speed;
        let x = if self.rng.random_bool(0.5) { -speed } else { speed };
        let y = if self.rng.random_bool(0.5) { -speed } else { speed };
        Vec2::new(x, y)
    }

    /// Build the whole board: background, ball, paddle, walls, bricks, lives display
    fn initialize_board(&mut self) {
        self.round += 1;
        let window = self.tuning.window();

        self.world.add(Entity::background(window), Layer::Background);

        let ball = Entity::main_ball(window * 0.5, self.tuning.ball_size, Vec2::ZERO);
        self.main_ball = Some(self.world.add(ball, Layer::Default));
        self.serve_ball();

        let paddle_center = Vec2::new(window.x / 2.0, window.y - self.tuning.paddle_from_bottom);
        let paddle_size = Vec2::new(self.tuning.paddle_width, self.tuning.paddle_height);
        let paddle = Entity::paddle(paddle_center, paddle_size);
        self.paddle = Some(self.world.add(paddle, Layer::Default));

        self.create_walls();
        self.create_bricks();
        self.create_life_display();

        log::info!(
            "Round {} started: {}x{} bricks, {} lives",
            self.round,
            self.board.rows,
            self.board.columns,
            self.lives
        );
    }

    /// Left, right and top walls. The bottom stays open.
    fn create_walls(&mut self) {
        let window = self.tuning.window();
        let w = self.tuning.wall_width;
        let walls = [
            Aabb::from_top_left(Vec2::ZERO, Vec2::new(w, window.y)),
            Aabb::from_top_left(Vec2::new(window.x - w, 0.0), Vec2::new(w, window.y)),
            Aabb::from_top_left(Vec2::ZERO, Vec2::new(window.x, w)),
        ];
        for body in walls {
            self.world.add(Entity::wall(body), Layer::Static);
        }
    }

    fn create_bricks(&mut self) {
        let t = &self.tuning;
        let columns = self.board.columns as f32;
        let usable = t.window_width - (2.0 * t.wall_width + 2.0) - (columns - 1.0) * t.brick_gap;
        let size = Vec2::new(usable / columns, t.brick_height);
        let (wall, gap, row_step) = (t.wall_width, t.brick_gap, t.brick_height + t.row_spacing);

        for row in 0..self.board.rows {
            let y = wall + row as f32 * row_step;
            for col in 0..self.board.columns {
                let x = wall + col as f32 * (size.x + gap);
                let strategy = match self.behavior {
                    BrickBehavior::Random => self.factory.for_brick(&mut self.rng),
                    BrickBehavior::Fixed(kind) => self.factory.build_kind(kind, 0, &mut self.rng),
                };
                let body = Aabb::from_top_left(Vec2::new(x, y), size);
                self.world.add(Entity::brick(body, strategy), Layer::Default);
                self.live_bricks += 1;
            }
        }
    }

    /// Heart icons along the bottom-left and the numeric counter above them
    fn create_life_display(&mut self) {
        let t = &self.tuning;
        let heart = t.heart_size;
        let origin = Vec2::new(2.0 * t.wall_width, t.window_height - heart - 2.0);

        let icons: Vec<_> = (0..t.max_lives)
            .map(|slot| {
                let top_left = origin + Vec2::new(slot as f32 * (heart + 1.0), 0.0);
                let body = Aabb::from_top_left(top_left, Vec2::splat(heart));
                Entity::life_icon(slot, body, slot < self.lives)
            })
            .collect();
        let counter_top_left = Vec2::new(
            2.0 * t.wall_width,
            t.window_height - heart - COUNTER_SIZE - COUNTER_GAP,
        );
        let counter = Entity::life_counter(
            Aabb::from_top_left(counter_top_left, Vec2::splat(COUNTER_SIZE)),
            self.lives,
        );

        for icon in icons {
            self.world.add(icon, Layer::Background);
        }
        self.world.add(counter, Layer::Background);
    }

    /// Sync hearts and the numeric counter with `lives`
    pub(crate) fn refresh_life_display(&mut self) {
        let lives = self.lives;
        for entity in self.world.iter_mut() {
            match &mut entity.kind {
                EntityKind::LifeIcon { slot } => {
                    entity.skin = if *slot < lives { Skin::Heart } else { Skin::Hidden };
                }
                EntityKind::LifeCounter(counter) => *counter = LifeCounter::new(lives),
                _ => {}
            }
        }
    }

    /// Read the numeric lives display
    pub fn life_counter(&self) -> Option<&LifeCounter> {
        self.world.in_layer(Layer::Background).find_map(|e| match &e.kind {
            EntityKind::LifeCounter(counter) => Some(counter),
            _ => None,
        })
    }
}

impl GameContext for GameState {
    fn remove_entity(&mut self, id: EntityId) -> bool {
        self.world.remove(id)
    }

    fn spawn(&mut self, entity: Entity, layer: Layer) -> EntityId {
        self.world.add(entity, layer)
    }

    fn decrement_live_bricks(&mut self) {
        if self.live_bricks == 0 {
            log::warn!("Brick counter already at zero");
            return;
        }
        self.live_bricks -= 1;
    }

    fn increment_lives(&mut self) {
        if self.lives < self.tuning.max_lives {
            self.lives += 1;
            self.refresh_life_display();
            log::info!("Life gained, {} lives", self.lives);
        }
    }

    fn extra_paddles(&self) -> u32 {
        self.extra_paddles
    }

    fn increment_extra_paddles(&mut self) {
        self.extra_paddles += 1;
    }

    fn decrement_extra_paddles(&mut self) {
        self.extra_paddles = self.extra_paddles.saturating_sub(1);
    }

    fn main_ball_mut(&mut self) -> Option<&mut Entity> {
        self.main_ball.and_then(|id| self.world.get_mut(id))
    }

    fn original_paddle(&self) -> Option<EntityId> {
        self.paddle
    }

    fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> BoardConfig {
        BoardConfig { rows: 2, columns: 3 }
    }

    #[test]
    fn test_initial_layout() {
        let state = GameState::new(12345, Tuning::default(), small_board());

        assert_eq!(state.lives, 3);
        assert_eq!(state.live_bricks, 6);
        assert_eq!(state.extra_paddles, 0);
        assert_eq!(state.world.count(|k| matches!(k, EntityKind::Brick(_))), 6);
        assert_eq!(state.world.count(|k| matches!(k, EntityKind::Wall)), 3);
        assert_eq!(state.world.count(|k| matches!(k, EntityKind::Ball(_))), 1);
        assert_eq!(state.world.count(|k| matches!(k, EntityKind::Paddle(_))), 1);
        assert_eq!(state.world.count(|k| matches!(k, EntityKind::LifeIcon { .. })), 4);
        assert_eq!(state.world.in_layer(Layer::Static).count(), 3);
    }

    #[test]
    fn test_ball_served_diagonally_from_center() {
        let state = GameState::new(7, Tuning::default(), small_board());
        let ball = state.main_ball().unwrap();
        assert_eq!(ball.center(), Vec2::new(350.0, 250.0));
        assert_eq!(ball.vel.x.abs(), 150.0);
        assert_eq!(ball.vel.y.abs(), 150.0);
    }

    #[test]
    fn test_bricks_fit_between_walls() {
        let state = GameState::new(1, Tuning::default(), BoardConfig { rows: 1, columns: 8 });
        let bricks: Vec<_> = state.world.iter().filter(|e| e.is_brick()).collect();
        let first = bricks.first().unwrap();
        let last = bricks.last().unwrap();

        assert_eq!(first.body.top_left(), Vec2::new(5.0, 5.0));
        assert!(last.body.max().x <= 695.0 + 0.001);
        // 1px gaps between neighbors
        let gap = bricks[1].body.min().x - bricks[0].body.max().x;
        assert!((gap - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_lives_capped_and_display_follows() {
        let mut state = GameState::new(1, Tuning::default(), small_board());
        state.increment_lives();
        assert_eq!(state.lives, 4);
        state.increment_lives();
        assert_eq!(state.lives, 4);

        let visible = state
            .world
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::LifeIcon { .. }) && e.skin == Skin::Heart)
            .count();
        assert_eq!(visible, 4);
        assert_eq!(state.life_counter().map(|c| c.text.as_str()), Some("4"));
    }

    #[test]
    fn test_lose_life_updates_counter_color() {
        let mut state = GameState::new(1, Tuning::default(), small_board());
        state.lose_life();
        let counter = state.life_counter().unwrap();
        assert_eq!(counter.text, "2");
        assert_eq!(counter.color, crate::sim::entities::LifeColor::Yellow);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(99, Tuning::default(), small_board());
        let old_ball = state.main_ball_id().unwrap();

        // Mess up the round
        state.lose_life();
        state.lose_life();
        state.increment_extra_paddles();
        let brick = state.world.iter().find(|e| e.is_brick()).map(|e| e.id).unwrap();
        state.remove_entity(brick);
        state.decrement_live_bricks();
        state.spawn(
            Entity::puck(Vec2::new(100.0, 100.0), 15.0, Vec2::ZERO),
            Layer::Default,
        );

        state.restart();

        assert_eq!(state.lives, 3);
        assert_eq!(state.live_bricks, 6);
        assert_eq!(state.extra_paddles, 0);
        assert_eq!(state.round, 2);
        assert_eq!(state.world.count(|k| matches!(k, EntityKind::Puck(_))), 0);
        assert_eq!(state.world.count(|k| matches!(k, EntityKind::Brick(_))), 6);
        assert_eq!(state.world.count(|k| matches!(k, EntityKind::Ball(_))), 1);
        assert!(!state.world.contains(old_ball));
        assert_eq!(state.life_counter().map(|c| c.text.as_str()), Some("3"));
    }

    #[test]
    fn test_fixed_behavior_layout() {
        let state = GameState::with_behavior(
            3,
            Tuning::default(),
            small_board(),
            BrickBehavior::Fixed(StrategyKind::ExtraBalls),
        );
        let kinds: Vec<_> = state
            .world
            .iter()
            .filter_map(|e| match &e.kind {
                EntityKind::Brick(brick) => Some(brick.strategy().kind()),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![StrategyKind::ExtraBalls; 6]);
    }

    #[test]
    fn test_brick_counter_never_negative() {
        let mut state = GameState::new(1, Tuning::default(), BoardConfig { rows: 1, columns: 1 });
        state.decrement_live_bricks();
        state.decrement_live_bricks();
        assert_eq!(state.live_bricks, 0);
    }
}
