//! AMaze: a top-down desert maze against the clock.
//!
//! The library holds every piece of game logic and has no windowing
//! dependency; the `amaze` binary drives it with raylib.
//!
//! Modules:
//! - `core`: map lookup, movement, countdown, menus and the scene controller
//! - `storage`: difficulty and leaderboard files
//! - `config`: TOML game configuration
//! - `error`: crate error type

pub mod config;
pub mod core;
pub mod error;
pub mod storage;

pub use crate::config::GameConfig;
pub use crate::core::scene::{AppContext, Flow, GameEvent, Scene, SceneController};
pub use crate::error::{Error, Result};
