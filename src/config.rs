use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::AssetError;
use crate::geometry::{Rect, vector};
use crate::logging::TracingConfig;

/// Driver settings. Every field has a default, so a config file only needs
/// the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Size of the software bitmap, upscaled to the window when presented.
    pub render_width: usize,
    pub render_height: usize,
    /// Longest wall-clock slice simulated per frame, in seconds.
    pub max_time_step: f64,
    /// Fixed simulation sub-step, in seconds.
    pub world_time_step: f64,
    pub asset_dir: PathBuf,
    pub levels_file: String,
    pub font_file: String,
    pub audio_enabled: bool,
    pub tracing: TracingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: "Rampage".to_string(),
            window_width: 960,
            window_height: 600,
            render_width: 320,
            render_height: 200,
            max_time_step: 1.0 / 20.0,
            world_time_step: 1.0 / 120.0,
            asset_dir: PathBuf::from("assets"),
            levels_file: "levels.json".to_string(),
            font_file: "font.json".to_string(),
            audio_enabled: true,
            tracing: TracingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Read a JSON config. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|source| AssetError::Io { path: path.to_path_buf(), source })?;
        let config = serde_json::from_str(&text)
            .map_err(|source| AssetError::Json { path: path.to_path_buf(), source })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn levels_path(&self) -> PathBuf {
        self.asset_dir.join(&self.levels_file)
    }

    pub fn font_path(&self) -> PathBuf {
        self.asset_dir.join(&self.font_file)
    }

    pub fn textures_dir(&self) -> PathBuf {
        self.asset_dir.join("textures")
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.asset_dir.join("sounds")
    }
}

/// Region of the bitmap guaranteed to be unobscured. HUD elements are
/// positioned against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeArea(pub Rect);

impl SafeArea {
    /// The whole bitmap.
    pub fn full(width: usize, height: usize) -> Self {
        Self(Rect::new(vector(0.0, 0.0), vector(width as f64, height as f64)))
    }

    /// Inset by the given margins in pixels.
    pub fn inset(width: usize, height: usize, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self(Rect::new(
            vector(left, top),
            vector(width as f64 - right, height as f64 - bottom),
        ))
    }

    pub fn rect(&self) -> Rect {
        self.0
    }
}
