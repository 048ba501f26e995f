//! Core game types and logic (map, movement, timer, scenes).
//!
//! Re-exports:
//! - `tilemap`: map asset loading and per-pixel tile properties
//! - `player`: player position, held keys and sprite pose
//! - `movement`: per-tick movement resolver with collision and exit checks
//! - `countdown`: whole-second countdown timer
//! - `session`: one run through the maze
//! - `scene`: scene controller and application context

pub mod countdown;
pub mod difficulty;
pub mod direction;
pub mod input;
pub mod menu;
pub mod movement;
pub mod player;
pub mod scene;
pub mod session;
pub mod tilemap;
pub mod viewport;
