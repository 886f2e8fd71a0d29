//! Scrolling world: motion profiles and the looping ground strip
//!
//! Every scrolling entity carries a declared [`Motion`]. Positions are derived
//! from elapsed time each tick instead of chained move/reset actions, so a
//! paused world simply stops advancing and resumes where it left off.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityStore};

/// Remaining lifetime below this counts as expired (absorbs f32 step drift)
const LIFETIME_EPSILON: f32 = 1e-4;

/// How an entity moves between ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Not moved by the scroll pass (player, ceiling)
    Fixed,
    /// Constant velocity, despawned once `remaining` seconds have elapsed
    Linear { velocity: Vec2, remaining: f32 },
    /// Ground tile cycling through the seamless strip
    GroundLoop(GroundLoop),
}

impl Motion {
    /// Leftward travel that covers `distance` in `duration` seconds, then expires
    pub fn timed_left(distance: f32, duration: f32) -> Self {
        let speed = if duration > 0.0 { distance / duration } else { 0.0 };
        Motion::Linear {
            velocity: Vec2::new(-speed, 0.0),
            remaining: duration,
        }
    }

    /// Advance by `dt`, updating `pos`. Returns true when the entity should despawn.
    pub fn advance(&mut self, pos: &mut Vec2, dt: f32) -> bool {
        match self {
            Motion::Fixed => false,
            Motion::Linear { velocity, remaining } => {
                let step = dt.min(*remaining).max(0.0);
                *pos += *velocity * step;
                *remaining -= dt;
                *remaining <= LIFETIME_EPSILON
            }
            Motion::GroundLoop(ground) => {
                ground.advance(dt);
                pos.x = ground.x();
                false
            }
        }
    }
}

/// Closed-form position of one ground tile.
///
/// Phase 1 moves the tile left by `lead_distance` (one tile width per slot
/// index, plus one) so it exits the left edge. It then jumps right by `span`
/// (world width plus a tile) and repeats a full-span move followed by the
/// same jump forever. Staggered lead distances keep the tiles contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundLoop {
    /// Tile centre at layout time
    pub origin_x: f32,
    /// Distance covered before the first reset
    pub lead_distance: f32,
    /// Reset jump and loop length (world width + tile width)
    pub span: f32,
    /// Scroll speed (units/s)
    pub speed: f32,
    /// Time spent scrolling so far
    pub elapsed: f32,
}

impl GroundLoop {
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Duration of the initial partial move
    pub fn lead_time(&self) -> f32 {
        self.lead_distance / self.speed
    }

    /// Duration of one full loop
    pub fn period(&self) -> f32 {
        self.span / self.speed
    }

    /// Current tile centre
    pub fn x(&self) -> f32 {
        if self.speed <= 0.0 {
            return self.origin_x;
        }
        let lead_time = self.lead_time();
        if self.elapsed < lead_time {
            return self.origin_x - self.speed * self.elapsed;
        }
        let loop_start = self.origin_x - self.lead_distance + self.span;
        let into_loop = (self.elapsed - lead_time) % self.period();
        loop_start - self.speed * into_loop
    }
}

/// Lay out the ground strip: `ceil(world_width / tile_width) + 1` tiles placed
/// edge to edge from the left edge of the world.
pub fn layout_ground(world_width: f32, tile_width: f32, speed: f32) -> Vec<GroundLoop> {
    if tile_width <= 0.0 || world_width <= 0.0 {
        log::warn!("Degenerate ground geometry (world {world_width}, tile {tile_width}); no ground laid");
        return Vec::new();
    }

    let tile_count = (world_width / tile_width).ceil() as usize + 1;
    let left = -world_width / 2.0;
    let span = world_width + tile_width;

    (0..tile_count)
        .map(|i| {
            let slot = i as f32;
            GroundLoop {
                origin_x: left + tile_width / 2.0 + tile_width * slot,
                lead_distance: tile_width + tile_width * slot,
                span,
                speed,
                elapsed: 0.0,
            }
        })
        .collect()
}

/// Advance every scrolling entity by `dt` and despawn the ones whose motion
/// expired. Returns the despawned ids.
pub fn advance_scrolling(store: &mut EntityStore, dt: f32) -> Vec<EntityId> {
    let mut expired = Vec::new();
    for entity in store.iter_mut() {
        if entity.motion.advance(&mut entity.pos, dt) {
            expired.push(entity.id);
        }
    }

    for &id in &expired {
        store.destroy(id);
        log::debug!("Despawned {id:?} off the left edge");
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::entity::EntityKind;

    #[test]
    fn test_layout_ground_tile_count_and_coverage() {
        let tiles = layout_ground(800.0, 100.0, 100.0);
        assert_eq!(tiles.len(), 9);

        // Contiguous, left edges from -400 to 400, covering [-400, 500)
        for (i, tile) in tiles.iter().enumerate() {
            let left_edge = tile.x() - 50.0;
            assert!((left_edge - (-400.0 + 100.0 * i as f32)).abs() < 0.001);
        }
        let right_edge = tiles.last().unwrap().x() + 50.0;
        assert!((right_edge - 500.0).abs() < 0.001);
    }

    #[test]
    fn test_layout_ground_rounds_up() {
        assert_eq!(layout_ground(750.0, 100.0, 100.0).len(), 9);
        assert!(layout_ground(800.0, 0.0, 100.0).is_empty());
    }

    #[test]
    fn test_ground_loop_resets_to_right_edge() {
        let mut tile = layout_ground(800.0, 100.0, 100.0)[0];
        // Tile 0 leads by one tile width: 1 second at 100 units/s
        tile.advance(0.5);
        assert!((tile.x() - (-400.0)).abs() < 0.001);
        tile.advance(0.5);
        // Just reset: centre one half-tile past the right edge
        assert!((tile.x() - 450.0).abs() < 0.001);
        // Full loop is 9 seconds
        tile.advance(9.0);
        assert!((tile.x() - 450.0).abs() < 0.01);
    }

    #[test]
    fn test_ground_strip_stays_contiguous() {
        let mut tiles = layout_ground(800.0, 100.0, 100.0);
        for _ in 0..1000 {
            for tile in &mut tiles {
                tile.advance(SIM_DT);
            }
            let mut xs: Vec<f32> = tiles.iter().map(|t| t.x()).collect();
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in xs.windows(2) {
                assert!((pair[1] - pair[0] - 100.0).abs() < 0.05);
            }
        }
    }

    #[test]
    fn test_timed_motion_expires_at_travel_time() {
        let mut store = EntityStore::new();
        let id = store.spawn(EntityKind::Hazard, Vec2::new(425.0, 0.0), Vec2::splat(50.0));
        store.get_mut(id).unwrap().motion = Motion::timed_left(850.0, 4.0);

        for _ in 0..239 {
            advance_scrolling(&mut store, SIM_DT);
        }
        assert!(store.contains(id));

        let despawned = advance_scrolling(&mut store, SIM_DT);
        assert_eq!(despawned, vec![id]);
        assert!(!store.contains(id));
    }

    #[test]
    fn test_timed_motion_covers_distance() {
        let mut motion = Motion::timed_left(850.0, 4.0);
        let mut pos = Vec2::new(425.0, 10.0);
        let mut steps = 0;
        while !motion.advance(&mut pos, SIM_DT) {
            steps += 1;
        }
        assert_eq!(steps, 239);
        assert!((pos.x - (-425.0)).abs() < 0.1);
        assert_eq!(pos.y, 10.0);
    }
}
