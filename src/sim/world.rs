//! Entity store
//!
//! Stands in for the engine's game-object collection: entities live in
//! layers, are added with a fresh id and removed by id. Removing an id that is
//! already gone returns `false` rather than failing, since collision handlers
//! may race to remove the same brick inside one tick.

use glam::Vec2;

use super::collision::Aabb;
use super::entities::{Ball, Brick, ExtraPaddle, FallingHeart, LifeCounter, Paddle, PuckBall};

/// Stable entity handle. Ids are never reused within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Render/update layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Static,
    Default,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Background, Layer::Static, Layer::Default];
}

/// Visual handle. The renderer maps these to images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skin {
    Background,
    Wall,
    Brick,
    Ball,
    TurboBall,
    Puck,
    Paddle,
    Heart,
    Text,
    Hidden,
}

/// What an entity is, plus its kind-specific state
#[derive(Debug)]
pub enum EntityKind {
    Background,
    Wall,
    /// One heart slot of the lives display
    LifeIcon { slot: u32 },
    LifeCounter(LifeCounter),
    Brick(Brick),
    Ball(Ball),
    Puck(PuckBall),
    Paddle(Paddle),
    ExtraPaddle(ExtraPaddle),
    Heart(FallingHeart),
}

/// A game object: a box with a velocity and a skin
#[derive(Debug)]
pub struct Entity {
    pub id: EntityId,
    pub layer: Layer,
    pub body: Aabb,
    pub vel: Vec2,
    pub skin: Skin,
    pub kind: EntityKind,
}

impl Entity {
    /// Unplaced entity; `World::add` assigns id and layer
    pub fn new(kind: EntityKind, body: Aabb, skin: Skin) -> Self {
        Self {
            id: EntityId(0),
            layer: Layer::Default,
            body,
            vel: Vec2::ZERO,
            skin,
            kind,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn center(&self) -> Vec2 {
        self.body.center
    }
}

/// All live entities, sorted by id for deterministic iteration
#[derive(Debug)]
pub struct World {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to a layer and return its new id
    pub fn add(&mut self, mut entity: Entity, layer: Layer) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        entity.layer = layer;
        // Ids only grow, so pushing keeps the vec sorted
        self.entities.push(entity);
        id
    }

    /// Remove by id. Returns false if the entity was already gone.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.entities.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(|i| &mut self.entities[i])
    }

    pub fn in_layer(&self, layer: Layer) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.layer == layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Snapshot of current ids, safe to walk while adding/removing
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Count entities matching a predicate on their kind
    pub fn count(&self, pred: impl Fn(&EntityKind) -> bool) -> usize {
        self.entities.iter().filter(|e| pred(&e.kind)).count()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }
}
