//! Fixed timestep simulation tick
//!
//! One call per frame: entity updates, collision delivery, then the
//! controller's rule checks (turbo, lost ball, lose, win, debug win key).

use std::rc::Rc;

use glam::Vec2;

use super::collision::{Contact, aabb_contact};
use super::context::GameContext;
use super::entities::Upkeep;
use super::input::{Key, KeyInput, Prompt};
use super::state::{GamePhase, GameState, LOSE_MESSAGE, WIN_MESSAGE};
use super::strategy::{BrickHit, CollisionStrategy};
use super::world::{EntityId, EntityKind};

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &dyn KeyInput, prompt: &mut dyn Prompt, dt: f32) {
    if state.phase == GamePhase::Exited {
        return;
    }
    state.time_ticks += 1;

    update_entities(state, input, dt);
    resolve_collisions(state);
    check_rules(state, input, prompt);
}

/// Move everything and drop what expired
fn update_entities(state: &mut GameState, input: &dyn KeyInput, dt: f32) {
    for id in state.world.ids() {
        let Some(entity) = state.world.get_mut(id) else {
            continue;
        };
        if entity.update(dt, input, &state.tuning) == Upkeep::Expire {
            state.world.remove(id);
        }
    }
}

/// Find new overlaps and notify both participants, moving body first
fn resolve_collisions(state: &mut GameState) {
    let mut pairs = Vec::new();
    for mover in state.world.iter().filter(|e| e.is_moving_body()) {
        for other in state.world.iter() {
            if other.id == mover.id || !mover.should_collide_with(other) {
                continue;
            }
            if let Some(contact) = aabb_contact(&mover.body, &other.body) {
                pairs.push((mover.id, other.id, contact));
            }
        }
    }

    for (mover, other, contact) in state.contacts.entered(pairs) {
        deliver_collision(state, mover, other, &contact);
        let reverse = Contact {
            normal: -contact.normal,
            ..contact
        };
        deliver_collision(state, other, mover, &reverse);
    }
}

/// What a subject does when hit, captured before any mutation
enum Reaction {
    Bounce,
    PuckBounce,
    Strategy(Rc<dyn CollisionStrategy>, Vec2),
    ExtraPaddleHit,
    HeartCaught,
    Inert,
}

/// Run `subject`'s collision callback against `other`.
///
/// Entities removed earlier in the tick receive nothing.
pub(crate) fn deliver_collision(
    state: &mut GameState,
    subject: EntityId,
    other: EntityId,
    contact: &Contact,
) {
    let (Some(subject_entity), Some(other_entity)) =
        (state.world.get(subject), state.world.get(other))
    else {
        return;
    };
    let collider = other_entity.collider();
    let other_is_brick = other_entity.is_brick();

    let reaction = match &subject_entity.kind {
        EntityKind::Ball(_) => Reaction::Bounce,
        EntityKind::Puck(_) => Reaction::PuckBounce,
        EntityKind::Brick(brick) => Reaction::Strategy(brick.strategy(), subject_entity.center()),
        EntityKind::ExtraPaddle(_) => Reaction::ExtraPaddleHit,
        EntityKind::Heart(_) => Reaction::HeartCaught,
        _ => Reaction::Inert,
    };

    match reaction {
        Reaction::Bounce => {
            if let Some(ball) = state.world.get_mut(subject) {
                ball.bounce(contact);
            }
        }
        Reaction::PuckBounce => {
            if let Some(puck) = state.world.get_mut(subject) {
                puck.bounce(contact);
            }
            // Pucks break bricks outright, whatever the brick's strategy
            if other_is_brick && state.remove_entity(other) {
                state.decrement_live_bricks();
            }
        }
        Reaction::Strategy(strategy, center) => {
            let hit = BrickHit { id: subject, center };
            strategy.on_collision(&hit, collider, state);
        }
        Reaction::ExtraPaddleHit => {
            let limit = state.tuning.extra_paddle_hits;
            let worn_out = match state.world.get_mut(subject).map(|e| &mut e.kind) {
                Some(EntityKind::ExtraPaddle(extra)) => extra.register_hit(collider, limit),
                _ => false,
            };
            if worn_out && state.remove_entity(subject) {
                state.decrement_extra_paddles();
                log::debug!("Extra paddle worn out");
            }
        }
        Reaction::HeartCaught => {
            state.increment_lives();
            state.remove_entity(subject);
        }
        Reaction::Inert => {}
    }
}

/// Controller checks, in order. At most one prompt per tick.
fn check_rules(state: &mut GameState, input: &dyn KeyInput, prompt: &mut dyn Prompt) {
    let turbo = state.factory().turbo();
    turbo.update(state);

    let fallen = state.ball_fallen();
    if fallen && state.lives > 0 {
        state.lose_life();
    }
    if fallen && state.lives == 0 {
        finish_round(state, prompt, LOSE_MESSAGE);
        return;
    }

    if state.live_bricks == 0 {
        finish_round(state, prompt, WIN_MESSAGE);
        return;
    }

    if input.was_key_pressed_this_frame(Key::ForceWin) {
        log::info!("Force-win key pressed");
        finish_round(state, prompt, WIN_MESSAGE);
    }
}

/// Ask to play again; restart on yes, exit on no
fn finish_round(state: &mut GameState, prompt: &mut dyn Prompt, message: &str) {
    log::info!("Round {} over: {message}", state.round);
    if prompt.ask_yes_no(message) {
        state.restart();
    } else {
        log::info!("Player declined another round");
        state.phase = GamePhase::Exited;
    }
}
