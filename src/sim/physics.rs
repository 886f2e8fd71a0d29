//! Player physics
//!
//! Semi-implicit Euler: velocity first (impulse, then gravity), then position.
//! Ground and ceiling are solid with zero restitution: the player is pushed
//! out and loses the velocity component driving it into the surface.

use glam::Vec2;

use super::collision::{Aabb, vertical_collision};
use super::entity::{Category, EntityId, EntityStore};
use crate::consts::{GRAVITY, JUMP_IMPULSE};

/// Advance the player by one step. `jump` adds a single upward impulse.
pub fn integrate_player(store: &mut EntityStore, player: EntityId, jump: bool, dt: f32) {
    let Some(body) = store.get_mut(player) else {
        return;
    };

    let prev = body.bounds();
    if jump {
        body.vel.y += JUMP_IMPULSE;
    }
    body.vel.y -= GRAVITY * dt;
    body.pos += body.vel * dt;

    resolve_solids(store, player, prev);
}

/// Push the player out of every ground tile and the ceiling it crossed or
/// overlaps. `prev` is the player's bounds before this step's move.
pub fn resolve_solids(store: &mut EntityStore, player: EntityId, prev: Aabb) {
    let mut solids: Vec<Aabb> = Vec::new();
    store.for_each_of_category(Category::GroundOrCeiling, |e| solids.push(e.bounds()));

    let Some(body) = store.get_mut(player) else {
        return;
    };

    for solid in &solids {
        let result = vertical_collision(&prev, &body.bounds(), solid);
        if !result.hit {
            continue;
        }
        body.pos += result.normal * result.penetration;
        if body.vel.dot(result.normal) < 0.0 {
            body.vel.y = 0.0;
        }
    }
}

/// Whether the player is resting on a solid surface
pub fn is_grounded(store: &EntityStore, player: EntityId) -> bool {
    let Some(body) = store.get(player) else {
        return false;
    };
    // Check a sliver below the feet
    let feet = body.bounds();
    let sensor = Aabb {
        min: Vec2::new(feet.min.x, feet.min.y - 0.5),
        max: Vec2::new(feet.max.x, feet.min.y + 0.5),
    };

    let mut grounded = false;
    store.for_each_of_category(Category::GroundOrCeiling, |e| {
        let solid = e.bounds();
        if solid.overlaps(&sensor) && solid.center().y < body.pos.y {
            grounded = true;
        }
    });
    grounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::entity::EntityKind;

    /// Player above a single ground slab and below a ceiling
    fn world() -> (EntityStore, EntityId) {
        // Top surface at y = -240, bottom of the ceiling at y = 280
        world_of_height(600.0)
    }

    fn world_of_height(height: f32) -> (EntityStore, EntityId) {
        let half = height / 2.0;
        let mut store = EntityStore::new();
        let player = store.spawn(EntityKind::Player, Vec2::ZERO, Vec2::new(60.0, 80.0));
        store.spawn(EntityKind::Ground, Vec2::new(0.0, -half + 30.0), Vec2::new(800.0, 60.0));
        store.spawn(EntityKind::Ceiling, Vec2::new(0.0, half - 10.0), Vec2::new(800.0, 20.0));
        (store, player)
    }

    /// Jump every `period` ticks and check the player never leaves the world
    fn assert_stays_below_ceiling(height: f32, period: u32) {
        let (mut store, player) = world_of_height(height);
        let highest = height / 2.0 - 20.0 - 40.0;
        let lowest = -height / 2.0 + 60.0 + 40.0;
        for i in 0..1200 {
            integrate_player(&mut store, player, i % period == 0, SIM_DT);
            let y = store.get(player).unwrap().pos.y;
            assert!(y <= highest + 0.001, "tick {i}: y={y} above {highest}");
            assert!(y >= lowest - 0.001, "tick {i}: y={y} below {lowest}");
        }
    }

    fn step(store: &mut EntityStore, player: EntityId, jump: bool, ticks: u32) {
        for i in 0..ticks {
            integrate_player(store, player, jump && i == 0, SIM_DT);
        }
    }

    #[test]
    fn test_gravity_pulls_down() {
        let (mut store, player) = world();
        step(&mut store, player, false, 10);
        let body = store.get(player).unwrap();
        assert!(body.vel.y < 0.0);
        assert!(body.pos.y < 0.0);
        assert_eq!(body.pos.x, 0.0);
    }

    #[test]
    fn test_rests_on_ground() {
        let (mut store, player) = world();
        step(&mut store, player, false, 600);
        let body = store.get(player).unwrap();
        // Feet on the top surface: centre at -240 + 40
        assert!((body.pos.y - (-200.0)).abs() < 0.001);
        assert_eq!(body.vel.y, 0.0);
        assert!(is_grounded(&store, player));
    }

    #[test]
    fn test_jump_adds_impulse() {
        let (mut store, player) = world();
        step(&mut store, player, false, 600);
        step(&mut store, player, true, 1);
        let body = store.get(player).unwrap();
        assert!((body.vel.y - (JUMP_IMPULSE - GRAVITY * SIM_DT)).abs() < 0.001);
        assert!(body.pos.y > -200.0);
        assert!(!is_grounded(&store, player));
    }

    #[test]
    fn test_ceiling_stops_ascent() {
        let (mut store, player) = world();
        for _ in 0..120 {
            integrate_player(&mut store, player, true, SIM_DT);
        }
        let body = store.get(player).unwrap();
        // Head against the ceiling: centre at 280 - 40
        assert!(body.pos.y <= 240.0 + 0.001);
        assert!((body.pos.y - 240.0).abs() < 0.001);
    }

    #[test]
    fn test_rapid_jumps_never_leave_world() {
        for height in [600.0, 1334.0] {
            for period in [1, 2, 3, 4] {
                assert_stays_below_ceiling(height, period);
            }
        }
    }

    #[test]
    fn test_missing_player_is_ignored() {
        let (mut store, player) = world();
        store.destroy(player);
        let before = store.clone();
        integrate_player(&mut store, player, true, SIM_DT);
        assert_eq!(store, before);
    }
}
