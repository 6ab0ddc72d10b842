//! Board entities: balls, paddles, bricks, pickups
//!
//! Kind-specific state lives in small structs wrapped by `EntityKind`; the
//! shared box/velocity/skin lives on `Entity`.

use std::rc::Rc;

use glam::Vec2;

use super::collision::{Aabb, Contact, reflect_velocity};
use super::input::{Key, KeyInput};
use super::strategy::CollisionStrategy;
use super::world::{Entity, EntityId, EntityKind, Skin};
use crate::tuning::Tuning;

/// Who hit a brick, as far as strategies care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collider {
    MainBall,
    Puck,
    Other,
}

impl Collider {
    /// Main ball or puck
    pub fn is_ball(self) -> bool {
        matches!(self, Collider::MainBall | Collider::Puck)
    }
}

/// The round's main ball
#[derive(Debug, Clone, Default)]
pub struct Ball {
    /// Physical collisions so far; only ever increases
    pub collisions: u32,
}

/// Short-lived bonus ball. Destroys bricks on contact without consulting
/// their strategy.
#[derive(Debug, Clone, Default)]
pub struct PuckBall {
    pub collisions: u32,
}

/// Player paddle. Ignores input on its first update so keys held over from
/// a previous round don't move it.
#[derive(Debug, Clone, Default)]
pub struct Paddle {
    armed: bool,
}

/// Bonus paddle that wears out after a number of ball contacts
#[derive(Debug, Clone, Default)]
pub struct ExtraPaddle {
    pub paddle: Paddle,
    pub hits: u32,
}

impl ExtraPaddle {
    /// Count a contact. True once the hit budget is spent.
    pub fn register_hit(&mut self, other: Collider, limit: u32) -> bool {
        if !other.is_ball() {
            return false;
        }
        self.hits += 1;
        self.hits >= limit
    }
}

/// Life pickup falling from a destroyed brick
#[derive(Debug, Clone)]
pub struct FallingHeart {
    /// The only paddle allowed to catch it
    pub catcher: EntityId,
}

impl FallingHeart {
    pub fn should_collide_with(&self, other: EntityId) -> bool {
        other == self.catcher
    }
}

/// A brick and the behavior it runs when hit
#[derive(Debug, Clone)]
pub struct Brick {
    strategy: Rc<dyn CollisionStrategy>,
}

impl Brick {
    pub fn new(strategy: Rc<dyn CollisionStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> Rc<dyn CollisionStrategy> {
        Rc::clone(&self.strategy)
    }
}

/// Color band of the numeric lives display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeColor {
    Green,
    Yellow,
    Red,
}

impl LifeColor {
    pub fn for_lives(lives: u32) -> Self {
        match lives {
            0 | 1 => LifeColor::Red,
            2 => LifeColor::Yellow,
            _ => LifeColor::Green,
        }
    }
}

/// Numeric lives display
#[derive(Debug, Clone)]
pub struct LifeCounter {
    pub text: String,
    pub color: LifeColor,
}

impl LifeCounter {
    pub fn new(lives: u32) -> Self {
        Self {
            text: lives.to_string(),
            color: LifeColor::for_lives(lives),
        }
    }
}

/// Whether an entity survives its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upkeep {
    Keep,
    Expire,
}

impl Entity {
    pub fn background(window: Vec2) -> Self {
        Entity::new(
            EntityKind::Background,
            Aabb::from_top_left(Vec2::ZERO, window),
            Skin::Background,
        )
    }

    pub fn wall(body: Aabb) -> Self {
        Entity::new(EntityKind::Wall, body, Skin::Wall)
    }

    pub fn main_ball(center: Vec2, size: f32, vel: Vec2) -> Self {
        Entity::new(
            EntityKind::Ball(Ball::default()),
            Aabb::new(center, Vec2::splat(size)),
            Skin::Ball,
        )
        .with_velocity(vel)
    }

    pub fn puck(center: Vec2, size: f32, vel: Vec2) -> Self {
        Entity::new(
            EntityKind::Puck(PuckBall::default()),
            Aabb::new(center, Vec2::splat(size)),
            Skin::Puck,
        )
        .with_velocity(vel)
    }

    pub fn paddle(center: Vec2, size: Vec2) -> Self {
        Entity::new(
            EntityKind::Paddle(Paddle::default()),
            Aabb::new(center, size),
            Skin::Paddle,
        )
    }

    pub fn extra_paddle(center: Vec2, size: Vec2) -> Self {
        Entity::new(
            EntityKind::ExtraPaddle(ExtraPaddle::default()),
            Aabb::new(center, size),
            Skin::Paddle,
        )
    }

    pub fn falling_heart(center: Vec2, size: f32, vel: Vec2, catcher: EntityId) -> Self {
        Entity::new(
            EntityKind::Heart(FallingHeart { catcher }),
            Aabb::new(center, Vec2::splat(size)),
            Skin::Heart,
        )
        .with_velocity(vel)
    }

    pub fn brick(body: Aabb, strategy: Rc<dyn CollisionStrategy>) -> Self {
        Entity::new(EntityKind::Brick(Brick::new(strategy)), body, Skin::Brick)
    }

    pub fn life_icon(slot: u32, body: Aabb, visible: bool) -> Self {
        let skin = if visible { Skin::Heart } else { Skin::Hidden };
        Entity::new(EntityKind::LifeIcon { slot }, body, skin)
    }

    pub fn life_counter(body: Aabb, lives: u32) -> Self {
        Entity::new(EntityKind::LifeCounter(LifeCounter::new(lives)), body, Skin::Text)
    }

    /// How a strategy sees this entity when it hits a brick
    pub fn collider(&self) -> Collider {
        match self.kind {
            EntityKind::Ball(_) => Collider::MainBall,
            EntityKind::Puck(_) => Collider::Puck,
            _ => Collider::Other,
        }
    }

    pub fn is_brick(&self) -> bool {
        matches!(self.kind, EntityKind::Brick(_))
    }

    /// Moving bodies are checked against everything else for overlap
    pub fn is_moving_body(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Ball(_) | EntityKind::Puck(_) | EntityKind::Heart(_)
        )
    }

    /// Pair filter for overlap detection. `self` is a moving body.
    pub fn should_collide_with(&self, other: &Entity) -> bool {
        match &self.kind {
            EntityKind::Ball(_) | EntityKind::Puck(_) => matches!(
                other.kind,
                EntityKind::Wall
                    | EntityKind::Brick(_)
                    | EntityKind::Paddle(_)
                    | EntityKind::ExtraPaddle(_)
            ),
            EntityKind::Heart(heart) => heart.should_collide_with(other.id),
            _ => false,
        }
    }

    /// Collision count for balls and pucks
    pub fn ball_collisions(&self) -> Option<u32> {
        match &self.kind {
            EntityKind::Ball(ball) => Some(ball.collisions),
            EntityKind::Puck(puck) => Some(puck.collisions),
            _ => None,
        }
    }

    /// Reflect off a contact, step out of the overlap and count the hit
    pub fn bounce(&mut self, contact: &Contact) {
        // Already heading out (second contact on the same side this tick)
        if self.vel.dot(contact.normal) < 0.0 {
            self.vel = reflect_velocity(self.vel, contact.normal);
        }
        self.body.center += contact.normal * contact.penetration;
        match &mut self.kind {
            EntityKind::Ball(ball) => ball.collisions += 1,
            EntityKind::Puck(puck) => puck.collisions += 1,
            _ => {}
        }
    }

    /// Per-frame update: motion, paddle steering, expiry checks
    pub fn update(&mut self, dt: f32, input: &dyn KeyInput, tuning: &Tuning) -> Upkeep {
        let window = tuning.window();
        match &mut self.kind {
            EntityKind::Ball(_) => {
                self.integrate(dt);
                Upkeep::Keep
            }
            EntityKind::Puck(_) => {
                self.integrate(dt);
                let y = self.body.center.y;
                if y > window.y || y < 0.0 {
                    Upkeep::Expire
                } else {
                    Upkeep::Keep
                }
            }
            EntityKind::Heart(_) => {
                self.integrate(dt);
                if self.body.top_left().y > window.y {
                    Upkeep::Expire
                } else {
                    Upkeep::Keep
                }
            }
            EntityKind::Paddle(paddle) => {
                let armed = std::mem::replace(&mut paddle.armed, true);
                self.steer(armed, dt, input, tuning.paddle_speed, window.x);
                Upkeep::Keep
            }
            EntityKind::ExtraPaddle(extra) => {
                let armed = std::mem::replace(&mut extra.paddle.armed, true);
                self.steer(armed, dt, input, tuning.paddle_speed, window.x);
                Upkeep::Keep
            }
            _ => Upkeep::Keep,
        }
    }

    fn integrate(&mut self, dt: f32) {
        self.body.center += self.vel * dt;
    }

    /// Horizontal keyboard movement, clamped to the window
    fn steer(&mut self, armed: bool, dt: f32, input: &dyn KeyInput, speed: f32, window_width: f32) {
        if !armed {
            self.vel = Vec2::ZERO;
            return;
        }

        let mut dir = 0.0;
        if input.is_key_pressed(Key::Left) {
            dir -= 1.0;
        }
        if input.is_key_pressed(Key::Right) {
            dir += 1.0;
        }
        self.vel = Vec2::new(dir * speed, 0.0);
        self.integrate(dt);

        let half = self.body.half_extents().x;
        let max = (window_width - half).max(half);
        self.body.center.x = self.body.center.x.clamp(half, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::TickInput;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_paddle_first_update_is_inert() {
        let mut paddle = Entity::paddle(Vec2::new(350.0, 470.0), Vec2::new(100.0, 15.0));
        let mut input = TickInput::default();
        input.press(Key::Right);

        paddle.update(0.1, &input, &tuning());
        assert_eq!(paddle.center().x, 350.0);

        paddle.update(0.1, &input, &tuning());
        assert!((paddle.center().x - 380.0).abs() < 0.001);
    }

    #[test]
    fn test_paddle_clamped_to_window() {
        let mut paddle = Entity::paddle(Vec2::new(60.0, 470.0), Vec2::new(100.0, 15.0));
        let mut input = TickInput::default();
        input.press(Key::Left);

        for _ in 0..20 {
            paddle.update(0.1, &input, &tuning());
        }
        assert_eq!(paddle.body.top_left().x, 0.0);

        input.release(Key::Left);
        input.press(Key::Right);
        for _ in 0..40 {
            paddle.update(0.1, &input, &tuning());
        }
        assert_eq!(paddle.body.max().x, 700.0);
    }

    #[test]
    fn test_puck_expires_above_and_below_window() {
        let input = TickInput::default();
        let mut rising = Entity::puck(Vec2::new(100.0, 2.0), 15.0, Vec2::new(0.0, -100.0));
        assert_eq!(rising.update(0.1, &input, &tuning()), Upkeep::Expire);

        let mut falling = Entity::puck(Vec2::new(100.0, 498.0), 15.0, Vec2::new(0.0, 100.0));
        assert_eq!(falling.update(0.1, &input, &tuning()), Upkeep::Expire);

        let mut inside = Entity::puck(Vec2::new(100.0, 250.0), 15.0, Vec2::new(0.0, 100.0));
        assert_eq!(inside.update(0.1, &input, &tuning()), Upkeep::Keep);
    }

    #[test]
    fn test_heart_expires_once_fully_below() {
        let input = TickInput::default();
        let mut heart = Entity::falling_heart(
            Vec2::new(100.0, 505.0),
            20.0,
            Vec2::new(0.0, 100.0),
            EntityId(7),
        );
        // Top edge still inside the window
        assert_eq!(heart.update(0.01, &input, &tuning()), Upkeep::Keep);
        assert_eq!(heart.update(0.1, &input, &tuning()), Upkeep::Expire);
    }

    #[test]
    fn test_heart_only_collides_with_catcher() {
        let heart = Entity::falling_heart(Vec2::ZERO, 20.0, Vec2::ZERO, EntityId(3));
        let mut original = Entity::paddle(Vec2::ZERO, Vec2::new(100.0, 15.0));
        original.id = EntityId(3);
        let mut extra = Entity::extra_paddle(Vec2::ZERO, Vec2::new(100.0, 15.0));
        extra.id = EntityId(9);

        assert!(heart.should_collide_with(&original));
        assert!(!heart.should_collide_with(&extra));
    }

    #[test]
    fn test_bounce_counts_collisions() {
        let mut ball = Entity::main_ball(Vec2::new(100.0, 100.0), 20.0, Vec2::new(50.0, 80.0));
        let contact = Contact {
            normal: Vec2::new(0.0, -1.0),
            penetration: 2.0,
        };
        ball.bounce(&contact);

        assert_eq!(ball.vel, Vec2::new(50.0, -80.0));
        assert_eq!(ball.center(), Vec2::new(100.0, 98.0));
        assert_eq!(ball.ball_collisions(), Some(1));
    }

    #[test]
    fn test_extra_paddle_wears_out() {
        let mut extra = ExtraPaddle::default();
        assert!(!extra.register_hit(Collider::MainBall, 3));
        assert!(!extra.register_hit(Collider::Other, 3));
        assert!(!extra.register_hit(Collider::Puck, 3));
        assert!(extra.register_hit(Collider::MainBall, 3));
    }

    #[test]
    fn test_life_color_bands() {
        assert_eq!(LifeColor::for_lives(4), LifeColor::Green);
        assert_eq!(LifeColor::for_lives(3), LifeColor::Green);
        assert_eq!(LifeColor::for_lives(2), LifeColor::Yellow);
        assert_eq!(LifeColor::for_lives(1), LifeColor::Red);
        assert_eq!(LifeColor::for_lives(0), LifeColor::Red);
    }
}
