//! Mutation surface handed to strategies and entity collision handlers
//!
//! Strategies never see the controller itself. They get this trait, which
//! covers entity add/remove and the counter adjustments they are allowed.

use rand_pcg::Pcg32;

use super::world::{Entity, EntityId, Layer};
use crate::tuning::Tuning;

pub trait GameContext {
    /// Remove an entity. False if it was already gone.
    fn remove_entity(&mut self, id: EntityId) -> bool;

    /// Add an entity to a layer
    fn spawn(&mut self, entity: Entity, layer: Layer) -> EntityId;

    fn decrement_live_bricks(&mut self);

    /// Grant a life, up to the maximum
    fn increment_lives(&mut self);

    /// Number of extra paddles currently on the board
    fn extra_paddles(&self) -> u32;

    fn increment_extra_paddles(&mut self);

    fn decrement_extra_paddles(&mut self);

    /// The round's main ball, if it exists
    fn main_ball_mut(&mut self) -> Option<&mut Entity>;

    /// The player's own paddle (not an extra one)
    fn original_paddle(&self) -> Option<EntityId>;

    fn tuning(&self) -> &Tuning;

    fn rng(&mut self) -> &mut Pcg32;
}
