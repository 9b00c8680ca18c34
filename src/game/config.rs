use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::platform::GfxInfo;

/// Largest grid edge accepted, in tiles
pub const MAX_GRID_TILES: i32 = 256;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the grid in tiles (desktop backends only; devices report their own)
    pub grid_width: i32,
    /// Height of the grid in tiles
    pub grid_height: i32,
    /// Pixels per tile
    pub tile_px: i32,

    /// Milliseconds between snake moves
    pub tick_ms: u32,
    /// Update calls per second the movement interval is derived from
    pub frame_rate: u32,

    /// Points awarded for each food eaten
    pub score_per_food: u32,
    /// Points needed to advance one level
    pub points_per_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 20,
            tile_px: 8,
            tick_ms: 150,
            frame_rate: 60,
            score_per_food: 10,
            points_per_level: 50,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Read a JSON configuration file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry and timing the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        // The initial snake extends two tiles left of center
        ensure!(
            self.grid_width >= 4,
            "grid width must be at least 4 tiles (got {})",
            self.grid_width
        );
        ensure!(
            self.grid_width <= MAX_GRID_TILES && self.grid_height <= MAX_GRID_TILES,
            "grid must be at most {MAX_GRID_TILES}x{MAX_GRID_TILES} tiles (got {}x{})",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_height >= 1,
            "grid height must be at least 1 tile (got {})",
            self.grid_height
        );
        ensure!(self.tile_px > 0, "tile size must be positive");
        ensure!(self.frame_rate > 0, "frame rate must be positive");
        ensure!(self.points_per_level > 0, "points per level must be positive");
        Ok(())
    }

    /// Update calls between two snake moves, at least 1
    pub fn move_interval(&self) -> u32 {
        let frames = u64::from(self.frame_rate) * u64::from(self.tick_ms) / 1000;
        frames.clamp(1, u64::from(u32::MAX)) as u32
    }

    /// Geometry a desktop backend reports for this configuration
    pub fn gfx(&self) -> GfxInfo {
        GfxInfo::new(self.grid_width, self.grid_height, self.tile_px)
    }
}
