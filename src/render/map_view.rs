//! Top-down view of the map, following the player.
use raylib::prelude::*;

use amaze::AppContext;
use amaze::core::player::Pose;
use amaze::core::session::PlaySession;
use amaze::core::tilemap::TileMap;
use amaze::core::viewport::Viewport;

use crate::render::textures::TextureManager;

const HUD_FONT: i32 = 24;

fn draw_cell(d: &mut RaylibDrawHandle, texman: &TextureManager, glyph: char, x: i32, y: i32, size: i32) {
    if let Some(tex) = texman.tile(glyph) {
        let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
        let dst = Rectangle::new(x as f32, y as f32, size as f32, size as f32);
        d.draw_texture_pro(tex, src, dst, Vector2::zero(), 0.0, Color::WHITE);
        return;
    }
    let base = TextureManager::tile_color(glyph);
    d.draw_rectangle(x, y, size, size, base);
    // exit gets a checker so it reads at a glance
    if glyph == 'g' {
        let half = size / 2;
        let light = TextureManager::mix(base, Color::WHITE, 96);
        d.draw_rectangle(x, y, half, half, light);
        d.draw_rectangle(x + half, y + half, size - half, size - half, light);
    }
}

pub fn draw_map(d: &mut RaylibDrawHandle, map: &TileMap, viewport: &Viewport, texman: &TextureManager) {
    let ts = map.tile_size();
    let origin = viewport.origin();
    let screen = viewport.screen_size();
    let first_col = (origin.x / ts).floor().max(0.0) as usize;
    let first_row = (origin.y / ts).floor().max(0.0) as usize;
    let last_col = (((origin.x + screen.x) / ts).ceil() as usize).min(map.cols());
    let last_row = (((origin.y + screen.y) / ts).ceil() as usize).min(map.rows());
    let size = ts.ceil() as i32;
    for row in first_row..last_row {
        for col in first_col..last_col {
            let Some(glyph) = map.glyph(col, row) else { continue };
            let x = (col as f32 * ts - origin.x).round() as i32;
            let y = (row as f32 * ts - origin.y).round() as i32;
            draw_cell(d, texman, glyph, x, y, size);
        }
    }
}

// Stand-in sprite: a body with a nose pointing where the player faces.
fn draw_fallback_player(d: &mut RaylibDrawHandle, center: Vector2, size: f32, pose: Pose, time_sec: f32) {
    let bob = match pose {
        Pose::Walking(_) => (time_sec * 16.0).sin() * 2.0,
        Pose::Standing(_) => 0.0,
    };
    let c = Vector2::new(center.x, center.y + bob);
    d.draw_circle_v(c, size * 0.5, Color::new(70, 90, 200, 255));
    let dir = pose.direction().vector();
    let tip = Vector2::new(c.x + dir.x * size * 0.7, c.y + dir.y * size * 0.7);
    let side = Vector2::new(-dir.y, dir.x);
    let a = Vector2::new(c.x + side.x * size * 0.3, c.y + side.y * size * 0.3);
    let b = Vector2::new(c.x - side.x * size * 0.3, c.y - side.y * size * 0.3);
    // raylib culls clockwise triangles
    let cross = (b.x - a.x) * (tip.y - a.y) - (b.y - a.y) * (tip.x - a.x);
    let (a, b) = if cross > 0.0 { (b, a) } else { (a, b) };
    d.draw_triangle(a, b, tip, Color::new(250, 220, 120, 255));
}

pub fn draw_player(
    d: &mut RaylibDrawHandle,
    session: &PlaySession,
    size: f32,
    texman: &TextureManager,
    time_sec: f32,
) {
    let player = session.player();
    let p = session.viewport().world_to_screen(player.render_pos());
    let center = Vector2::new(p.x, p.y);
    match texman.frame(&player.pose.asset_name(), time_sec) {
        Some(tex) => {
            let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
            let dst = Rectangle::new(center.x - size * 0.5, center.y - size * 0.5, size, size);
            d.draw_texture_pro(tex, src, dst, Vector2::zero(), 0.0, Color::WHITE);
        }
        None => draw_fallback_player(d, center, size, player.pose, time_sec),
    }
}

pub fn draw_play(
    d: &mut RaylibDrawHandle,
    session: &PlaySession,
    ctx: &AppContext,
    texman: &TextureManager,
    time_sec: f32,
) {
    d.clear_background(Color::BLACK);
    draw_map(d, &ctx.map, session.viewport(), texman);
    draw_player(d, session, ctx.config.player.sprite_size, texman, time_sec);

    let w = ctx.config.window.width;
    let text = session.countdown().text();
    let color = if session.countdown().remaining() <= 10 { Color::RED } else { Color::WHITE };
    d.draw_rectangle(w - 120, 24, 100, 34, Color::new(0, 0, 0, 150));
    crate::render::draw_text_centered(d, text, w - 70, 41, HUD_FONT, color);
    d.draw_text(session.difficulty().label(), 12, 12, 18, Color::new(255, 255, 255, 180));
}
