//! Game configuration, read from an optional `amaze.toml`.
//!
//! Every field has a default so a partial file only overrides what it names.
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "amaze.toml";
pub const CONFIG_ENV_VAR: &str = "AMAZE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub map: MapConfig,
    pub player: PlayerConfig,
    pub timing: TimingConfig,
    pub storage: StorageConfig,
    pub leaderboard: LeaderboardConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            title: "AMaze".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub path: PathBuf,
    /// Distance the player is kept away from every map edge.
    pub inset: f32,
    pub spawn: [f32; 2],
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/maps/desert.toml"),
            inset: 32.0,
            spawn: [250.0, 80.0],
        }
    }
}

impl MapConfig {
    pub fn spawn(&self) -> Vec2 {
        Vec2::new(self.spawn[0], self.spawn[1])
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Units per second along each held direction.
    pub speed: f32,
    pub sprite_size: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { speed: 250.0, sprite_size: 28.0 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds a win/lose screen stays up before moving on by itself.
    pub result_delay: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { result_delay: 5.0 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub difficulty_path: PathBuf,
    pub leaderboard_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            difficulty_path: PathBuf::from("difficulty.txt"),
            leaderboard_path: PathBuf::from("leaderboard.txt"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub name_max_len: usize,
    pub visible_rows: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { name_max_len: 10, visible_rows: 10 }
    }
}

impl GameConfig {
    pub fn from_toml_str(src: &str, origin: &Path) -> Result<Self> {
        toml::from_str(src).map_err(|source| Error::Config { path: origin.to_path_buf(), source })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&src, path)
    }

    /// Loads `path` if it exists, otherwise falls back to the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let cfg = Self::load(path)?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Config path from `AMAZE_CONFIG`, or `amaze.toml` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}
