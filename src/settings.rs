//! World geometry configuration
//!
//! Supplied by the host at startup and treated as opaque by the simulation.
//! Persisted as JSON next to the high score record.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World and sprite geometry (world units, origin at the world centre, y up)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Visible world width
    pub world_width: f32,
    /// Visible world height
    pub world_height: f32,

    // === Ground strip ===
    /// Width of one ground tile
    pub ground_tile_width: f32,
    /// Height of one ground tile
    pub ground_tile_height: f32,
    /// Thickness of the ceiling body along the top edge
    pub ceiling_thickness: f32,

    // === Sprites ===
    pub player_size: Vec2,
    pub coin_size: Vec2,
    pub hazard_size: Vec2,
    /// Fixed horizontal position of the player
    pub player_x: f32,

    // === Game over overlay ===
    /// Centre of the restart control
    pub restart_center: Vec2,
    /// Size of the restart control
    pub restart_size: Vec2,

    /// Spawn RNG seed (random when unset)
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,

            ground_tile_width: 100.0,
            ground_tile_height: 60.0,
            ceiling_thickness: 20.0,

            player_size: Vec2::new(60.0, 80.0),
            coin_size: Vec2::new(40.0, 40.0),
            hazard_size: Vec2::new(50.0, 50.0),
            player_x: -250.0,

            restart_center: Vec2::new(0.0, -200.0),
            restart_size: Vec2::new(120.0, 120.0),

            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn half_width(&self) -> f32 {
        self.world_width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.world_height / 2.0
    }

    /// Where the player starts each session: centred vertically at `player_x`
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.player_x, 0.0)
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid world config JSON")
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read world config {}", path.display()))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    /// Load config from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Using default world config: {err:#}");
                Self::default()
            }
        }
    }

    /// Write config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("failed to encode world config")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write world config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WorldConfig::from_json(r#"{ "world_width": 1334.0, "seed": 7 }"#).unwrap();
        assert_eq!(config.world_width, 1334.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.world_height, WorldConfig::default().world_height);
        assert_eq!(config.coin_size, WorldConfig::default().coin_size);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(WorldConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = WorldConfig::load_or_default(dir.path().join("missing.json"));
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coin_run.json");
        let config = WorldConfig {
            world_height: 900.0,
            player_size: Vec2::new(10.0, 20.0),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(WorldConfig::load(&path).unwrap(), config);
    }
}
