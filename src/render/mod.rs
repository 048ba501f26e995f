//! Drawing for every scene.
//!
//! Re-exports:
//! - `textures`: sprite/tile textures with procedural fallbacks
//! - `palette`: random label colors, re-rolled per scene
//! - `map_view`: scrolling tile map, player sprite and HUD timer
//! - `screens`: menus, result screens, score entry and leaderboard

pub mod map_view;
pub mod palette;
pub mod screens;
pub mod textures;

use raylib::prelude::*;

use amaze::{AppContext, Scene};
use palette::Palette;
use textures::TextureManager;

pub fn draw_scene(
    d: &mut RaylibDrawHandle,
    scene: &Scene,
    ctx: &AppContext,
    texman: &TextureManager,
    palette: &Palette,
    time_sec: f32,
) {
    let screen = (ctx.config.window.width, ctx.config.window.height);
    match scene {
        Scene::Menu(menu) => screens::draw_menu(d, menu, texman, palette, screen, time_sec),
        Scene::Play(session) => map_view::draw_play(d, session, ctx, texman, time_sec),
        Scene::Win(result) => screens::draw_result(d, result, true, texman, palette, screen),
        Scene::Lose(result) => screens::draw_result(d, result, false, texman, palette, screen),
        Scene::ScoreSubmit(form) => screens::draw_score_form(d, form, palette, screen, time_sec),
        Scene::Leaderboard(view) => screens::draw_leaderboard(d, view, palette, screen),
    }
}

/// Rough width of `text` in the default font, for centering.
pub fn text_width(text: &str, font_size: i32) -> i32 {
    (text.chars().count() as f32 * font_size as f32 * 0.6) as i32
}

pub fn draw_text_centered(d: &mut RaylibDrawHandle, text: &str, cx: i32, cy: i32, font_size: i32, color: Color) {
    let w = text_width(text, font_size);
    d.draw_text(text, cx - w / 2, cy - font_size / 2, font_size, color);
}
