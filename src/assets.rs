use anyhow::{Result, anyhow};
use macroquad::audio::{self, PlaySoundParams, Sound};
use macroquad::logging::{info, warn};
use macroquad::prelude::*;

use crate::config::Config;
use crate::render::Sprite;

/// Loaded textures. Any sprite that failed to load stays `None` and is drawn
/// with a fallback shape.
pub struct Sprites {
    board: Option<Texture2D>,
    finish: Option<Texture2D>,
    head: Option<Texture2D>,
    food: Option<Texture2D>,
    segments: Vec<Option<Texture2D>>,
}

impl Sprites {
    pub async fn load(config: &Config) -> Self {
        let dir = &config.asset_dir;
        let mut segments = Vec::with_capacity(config.segment_steps.len());
        for step in &config.segment_steps {
            segments.push(load_sprite(&format!("{dir}/flower-segment-{step}.png")).await);
        }
        let sprites = Self {
            board: load_sprite(&format!("{dir}/Spielfeld.png")).await,
            finish: load_sprite(&format!("{dir}/Spielfeld-finish.png")).await,
            head: load_sprite(&format!("{dir}/lucia-snake-head-2.png")).await,
            food: load_sprite(&format!("{dir}/music-note-food.png")).await,
            segments,
        };
        info!("sprites loaded: {} of {}", sprites.loaded(), sprites.segments.len() + 4);
        sprites
    }

    pub fn get(&self, sprite: Sprite) -> Option<&Texture2D> {
        match sprite {
            Sprite::Board => self.board.as_ref(),
            Sprite::Finish => self.finish.as_ref(),
            Sprite::Head => self.head.as_ref(),
            Sprite::Food => self.food.as_ref(),
            Sprite::Segment(level) => {
                let last = self.segments.len().checked_sub(1)?;
                self.segments[level.min(last)].as_ref()
            }
        }
    }

    pub fn palette_len(&self) -> usize {
        self.segments.len()
    }

    fn loaded(&self) -> usize {
        [&self.board, &self.finish, &self.head, &self.food]
            .into_iter()
            .chain(self.segments.iter())
            .filter(|t| t.is_some())
            .count()
    }
}

async fn try_load_texture(path: &str) -> Result<Texture2D> {
    let texture = load_texture(path)
        .await
        .map_err(|e| anyhow!("loading sprite {path}: {e}"))?;
    texture.set_filter(FilterMode::Linear);
    Ok(texture)
}

async fn load_sprite(path: &str) -> Option<Texture2D> {
    match try_load_texture(path).await {
        Ok(t) => Some(t),
        Err(err) => {
            warn!("{:#}, using fallback shape", err);
            None
        }
    }
}

/// Looping background track, started on the first user interaction since
/// browsers block autoplay.
pub struct Music {
    sound: Option<Sound>,
    volume: f32,
    started: bool,
}

impl Music {
    pub async fn load(config: &Config) -> Self {
        let path = format!("{}/bg-music.ogg", config.asset_dir);
        let sound = match audio::load_sound(&path).await {
            Ok(s) => Some(s),
            Err(err) => {
                warn!("loading music {}: {}, playing silently", path, err);
                None
            }
        };
        Self { sound, volume: config.music_volume(), started: false }
    }

    pub fn start_once(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        if let Some(sound) = &self.sound {
            audio::play_sound(sound, PlaySoundParams { looped: true, volume: self.volume });
        }
    }
}
