use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::game::Grid;

pub const CONFIG_PATH: &str = "lucia_snake.json";

/// Tunables read from `lucia_snake.json`. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cols: i32,
    pub rows: i32,
    /// Milliseconds between logical ticks
    pub tick_interval_ms: u32,
    /// Minimum swipe length in pixels
    pub swipe_threshold: f32,
    /// Body sprite intensity steps, newest segment first
    pub segment_steps: Vec<u8>,
    pub music_volume: f32,
    pub asset_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: 8,
            rows: 12,
            tick_interval_ms: 440,
            swipe_threshold: 30.0,
            segment_steps: vec![100, 95, 90, 85, 80, 75, 70, 65, 60, 55, 50],
            music_volume: 0.5,
            asset_dir: "assets".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text).context("parsing config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the config through macroquad's loader, which also works on wasm.
    pub async fn load(path: &str) -> Result<Self> {
        let text = macroquad::file::load_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("reading {path}: {e}"))?;
        Self::from_json(&text).with_context(|| format!("loading {path}"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.cols < 1 || self.rows < 1 {
            bail!("grid must be at least 1x1, got {}x{}", self.cols, self.rows);
        }
        if self.segment_steps.is_empty() {
            bail!("segment_steps must not be empty");
        }
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be positive");
        }
        if self.swipe_threshold <= 0.0 {
            bail!("swipe_threshold must be positive");
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.cols, self.rows)
    }

    pub fn tick_interval(&self) -> f32 {
        self.tick_interval_ms as f32 / 1000.0
    }

    pub fn palette_len(&self) -> usize {
        self.segment_steps.len()
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume.clamp(0.0, 1.0)
    }
}
