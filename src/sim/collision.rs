//! Collision detection and contact classification
//!
//! Two kinds of overlap matter here. Solid collisions (player against ground
//! or ceiling) push the player out and never touch the score. Contact tests
//! (player against coin or hazard) block nothing and instead raise a gameplay
//! event. Which one applies comes from an explicit pairwise rule table.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Category, EntityId, EntityStore};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Inclusive point test
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Result of a solid collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Direction to push the moving body out (unit y axis)
    pub normal: Vec2,
    /// Penetration depth along `normal`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Vertical separation of a moving box from a solid box.
///
/// Only resolves along y: the player never moves horizontally, so solids are
/// always entered from above or below. `prev` is the mover before this step;
/// the sweep from `prev` to `mover` is tested, so a fast step cannot skip a
/// thin solid, and the push direction is the side `prev` started on.
pub fn vertical_collision(prev: &Aabb, mover: &Aabb, solid: &Aabb) -> CollisionResult {
    let swept = Aabb {
        min: prev.min.min(mover.min),
        max: prev.max.max(mover.max),
    };
    if !swept.overlaps(solid) {
        return CollisionResult::miss();
    }

    let (normal, penetration) = if prev.center().y >= solid.center().y {
        (Vec2::Y, solid.max.y - mover.min.y)
    } else {
        (Vec2::NEG_Y, mover.max.y - solid.min.y)
    };
    if penetration <= 0.0 {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        normal,
        penetration,
    }
}

/// What happens when two categories meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactRule {
    /// Player × Coin: score and remove the coin
    Collect,
    /// Player × Hazard: remove the hazard and end the run
    GameOver,
    /// Player × Ground/Ceiling: physical constraint only
    Solid,
}

impl ContactRule {
    /// Contact tests raise gameplay events; solid rules are handled by physics
    pub fn is_contact_test(self) -> bool {
        !matches!(self, ContactRule::Solid)
    }
}

/// Pairwise rule table. Symmetric: argument order never changes the result.
pub fn contact_rule(a: Category, b: Category) -> Option<ContactRule> {
    use Category::*;
    match (a, b) {
        (Player, Coin) | (Coin, Player) => Some(ContactRule::Collect),
        (Player, Hazard) | (Hazard, Player) => Some(ContactRule::GameOver),
        (Player, GroundOrCeiling) | (GroundOrCeiling, Player) => Some(ContactRule::Solid),
        _ => None,
    }
}

/// A classified player contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub player: EntityId,
    pub other: EntityId,
    pub rule: ContactRule,
}

/// Find every overlapping pair with a contact-test rule.
///
/// Roles come from category membership, so a coin found as the first body of
/// a pair is handled the same as one found second.
pub fn find_contacts(store: &EntityStore) -> Vec<Contact> {
    let entities: Vec<_> = store.iter().collect();
    let mut contacts = Vec::new();

    for (i, a) in entities.iter().enumerate() {
        for b in &entities[i + 1..] {
            let Some(rule) = contact_rule(a.category(), b.category()) else {
                continue;
            };
            if !rule.is_contact_test() || !a.bounds().overlaps(&b.bounds()) {
                continue;
            }
            let (player, other) = if a.category() == Category::Player {
                (a.id, b.id)
            } else {
                (b.id, a.id)
            };
            contacts.push(Contact { player, other, rule });
        }
    }

    contacts
}

/// Consequences of one frame's contacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactOutcome {
    /// Coins removed this frame
    pub collected: Vec<EntityId>,
    /// Hazards removed this frame
    pub hazards_hit: Vec<EntityId>,
}

impl ContactOutcome {
    pub fn coins_collected(&self) -> u32 {
        self.collected.len() as u32
    }

    pub fn hazard_hit(&self) -> bool {
        !self.hazards_hit.is_empty()
    }
}

/// Apply contacts: remove the touched coin or hazard.
///
/// An entity already removed this frame is skipped, so each coin or hazard
/// yields at most one event no matter how many pairs it appears in.
pub fn resolve_contacts(store: &mut EntityStore, contacts: &[Contact]) -> ContactOutcome {
    let mut outcome = ContactOutcome::default();

    for contact in contacts {
        if !store.destroy(contact.other) {
            continue;
        }
        match contact.rule {
            ContactRule::Collect => outcome.collected.push(contact.other),
            ContactRule::GameOver => outcome.hazards_hit.push(contact.other),
            ContactRule::Solid => {}
        }
    }

    outcome
}
