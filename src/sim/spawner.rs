//! Coin and hazard spawning
//!
//! New pickups enter just past the right edge at a random height and scroll
//! across the world in a fixed travel time before despawning on the left.

use glam::Vec2;
use rand::Rng;

use super::entity::{EntityId, EntityKind, EntityStore};
use super::scroll::Motion;
use crate::consts::PICKUP_TRAVEL_TIME;
use crate::settings::WorldConfig;

/// Vertical range a spawned entity's centre may take
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnBand {
    pub min_y: f32,
    pub max_y: f32,
}

impl SpawnBand {
    /// Band keeping an entity of `entity_height` fully on screen.
    ///
    /// When the entity is taller than the world the band collapses to the
    /// midpoint instead of inverting.
    pub fn new(world_height: f32, entity_height: f32) -> Self {
        let margin = entity_height / 2.0;
        let min_y = -world_height / 2.0 + margin;
        let max_y = world_height / 2.0 - margin;
        if max_y < min_y {
            let mid = (min_y + max_y) / 2.0;
            log::warn!("Spawn band inverted ({min_y}..{max_y}); clamping to {mid}");
            return Self { min_y: mid, max_y: mid };
        }
        Self { min_y, max_y }
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.min_y && y <= self.max_y
    }

    /// Uniform draw within the band
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.max_y <= self.min_y {
            return self.min_y;
        }
        rng.random_range(self.min_y..=self.max_y)
    }
}

pub fn spawn_coin(store: &mut EntityStore, config: &WorldConfig, rng: &mut impl Rng) -> EntityId {
    spawn_scrolling(store, EntityKind::Coin, config.coin_size, config, rng)
}

pub fn spawn_hazard(store: &mut EntityStore, config: &WorldConfig, rng: &mut impl Rng) -> EntityId {
    spawn_scrolling(store, EntityKind::Hazard, config.hazard_size, config, rng)
}

fn spawn_scrolling(
    store: &mut EntityStore,
    kind: EntityKind,
    size: Vec2,
    config: &WorldConfig,
    rng: &mut impl Rng,
) -> EntityId {
    let y = SpawnBand::new(config.world_height, size.y).sample(rng);
    let pos = Vec2::new(config.half_width() + size.x / 2.0, y);
    let motion = Motion::timed_left(config.world_width + size.x, PICKUP_TRAVEL_TIME);

    let id = store.spawn_moving(kind, pos, size, motion);
    log::debug!("Spawned {kind:?} {id:?} at y={y:.1}");
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_at_right_edge_moving_left() {
        let config = WorldConfig::default();
        let mut store = EntityStore::new();
        let mut rng = Pcg32::seed_from_u64(1);

        let id = spawn_coin(&mut store, &config, &mut rng);
        let coin = store.get(id).unwrap();
        assert_eq!(coin.kind, EntityKind::Coin);
        assert_eq!(coin.pos.x, config.half_width() + config.coin_size.x / 2.0);
        match coin.motion {
            Motion::Linear { velocity, remaining } => {
                assert_eq!(remaining, PICKUP_TRAVEL_TIME);
                let expected = (config.world_width + config.coin_size.x) / PICKUP_TRAVEL_TIME;
                assert!((velocity.x + expected).abs() < 0.001);
                assert_eq!(velocity.y, 0.0);
            }
            other => panic!("unexpected motion {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_band_clamps() {
        let band = SpawnBand::new(30.0, 50.0);
        assert_eq!(band.min_y, band.max_y);
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(band.sample(&mut rng), band.min_y);
    }

    #[test]
    fn test_hazard_uses_hazard_size() {
        let config = WorldConfig::default();
        let mut store = EntityStore::new();
        let mut rng = Pcg32::seed_from_u64(9);
        let id = spawn_hazard(&mut store, &config, &mut rng);
        let hazard = store.get(id).unwrap();
        assert_eq!(hazard.kind, EntityKind::Hazard);
        assert_eq!(hazard.size, config.hazard_size);
    }

    proptest! {
        #[test]
        fn prop_spawn_within_band(
            seed in any::<u64>(),
            world_height in 1.0f32..2000.0,
            entity_height in 1.0f32..300.0,
        ) {
            let config = WorldConfig {
                world_height,
                coin_size: Vec2::new(40.0, entity_height),
                hazard_size: Vec2::new(50.0, entity_height),
                ..Default::default()
            };
            let band = SpawnBand::new(world_height, entity_height);
            let mut store = EntityStore::new();
            let mut rng = Pcg32::seed_from_u64(seed);

            for _ in 0..8 {
                let coin = spawn_coin(&mut store, &config, &mut rng);
                let hazard = spawn_hazard(&mut store, &config, &mut rng);
                prop_assert!(band.contains(store.get(coin).unwrap().pos.y));
                prop_assert!(band.contains(store.get(hazard).unwrap().pos.y));
            }
        }
    }
}
