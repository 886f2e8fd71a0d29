//! Entity store
//!
//! Owns every live simulation object. Entities are kept sorted by id so
//! iteration order is stable from tick to tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::scroll::Motion;

/// Stable handle to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Coin,
    Hazard,
    Ground,
    Ceiling,
}

/// Collision category used for rule lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    Coin,
    Hazard,
    GroundOrCeiling,
}

impl EntityKind {
    pub fn category(self) -> Category {
        match self {
            EntityKind::Player => Category::Player,
            EntityKind::Coin => Category::Coin,
            EntityKind::Hazard => Category::Hazard,
            EntityKind::Ground | EntityKind::Ceiling => Category::GroundOrCeiling,
        }
    }

    /// Coins and hazards come and go; everything else lives for the session
    pub fn is_transient(self) -> bool {
        matches!(self, EntityKind::Coin | EntityKind::Hazard)
    }
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Centre position
    pub pos: Vec2,
    /// Full extents
    pub size: Vec2,
    /// Velocity (only integrated for the player)
    pub vel: Vec2,
    pub motion: Motion,
}

impl Entity {
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Axis-aligned collision bounds
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Owner of all live entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    /// Sorted by id
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a stationary entity and return its id
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2, size: Vec2) -> EntityId {
        self.spawn_moving(kind, pos, size, Motion::Fixed)
    }

    /// Create an entity with a motion profile
    pub fn spawn_moving(&mut self, kind: EntityKind, pos: Vec2, size: Vec2, motion: Motion) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        // Ids only grow, so pushing keeps the vector sorted
        self.entities.push(Entity {
            id,
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            motion,
        });
        id
    }

    /// Remove an entity. Returns false if it was already gone.
    pub fn destroy(&mut self, id: EntityId) -> bool {
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
        let index = self.index_of(id)?;
        self.entities.get_mut(index)
    }

    /// Visit every entity of a category in id order
    pub fn for_each_of_category(&self, category: Category, mut f: impl FnMut(&Entity)) {
        self.entities
            .iter()
            .filter(|e| e.category() == category)
            .for_each(|e| f(e));
    }

    /// Number of live entities of a kind
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Remove every coin and hazard. Returns how many were removed.
    pub fn clear_all_transient(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !e.kind.is_transient());
        before - self.entities.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }
}
