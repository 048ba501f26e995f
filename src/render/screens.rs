//! Menu, result, score entry and leaderboard screens.
use raylib::prelude::*;

use amaze::core::menu::Menu;
use amaze::core::scene::{LeaderboardView, MenuPage, MenuScene, ResultScreen, ScoreForm};

use crate::render::draw_text_centered;
use crate::render::palette::Palette;
use crate::render::textures::TextureManager;

type Screen = (i32, i32);

fn draw_background(d: &mut RaylibDrawHandle, texman: &TextureManager, palette: &Palette, (w, h): Screen, time_sec: f32) {
    match texman.frame("menu_background", 0.0) {
        Some(tex) => {
            // slow breathe between 1x and 2x
            let scale = 1.5 + 0.5 * (time_sec * 0.8).sin();
            let tw = tex.width as f32 * scale;
            let th = tex.height as f32 * scale;
            let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
            let dst = Rectangle::new((w as f32 - tw) * 0.5, (h as f32 - th) * 0.5, tw, th);
            d.draw_texture_pro(tex, src, dst, Vector2::zero(), 0.0, Color::WHITE);
        }
        None => {
            let bottom = TextureManager::mix(palette.background, Color::BLACK, 160);
            d.draw_rectangle_gradient_v(0, 0, w, h, palette.background, bottom);
        }
    }
}

fn draw_items(d: &mut RaylibDrawHandle, menu: &Menu, palette: &Palette, x: i32, y0: i32, gap: i32, size: i32, right_align: bool) {
    for (i, item) in menu.items.iter().enumerate() {
        let selected = i == menu.selected();
        let font = if selected { size + size / 4 } else { size };
        let color = if selected { palette.accent } else { palette.item };
        let y = y0 + i as i32 * gap;
        if right_align {
            let tw = crate::render::text_width(&item.label, font);
            d.draw_text(&item.label, x - tw, y, font, color);
        } else {
            draw_text_centered(d, &item.label, x, y, font, color);
        }
    }
}

pub fn draw_menu(
    d: &mut RaylibDrawHandle,
    scene: &MenuScene,
    texman: &TextureManager,
    palette: &Palette,
    (w, h): Screen,
    time_sec: f32,
) {
    d.clear_background(Color::BLACK);
    draw_background(d, texman, palette, (w, h), time_sec);
    match scene.page {
        MenuPage::Main => {
            draw_text_centered(d, &scene.menu.title, w / 2, 70, 60, palette.title);
            draw_items(d, &scene.menu, palette, w - 50, 150, 80, 50, true);
        }
        MenuPage::Difficulty => {
            draw_text_centered(d, &scene.menu.title, w / 2, 90, 40, palette.title);
            draw_items(d, &scene.menu, palette, w / 2, h / 2 - 40, 60, 25, false);
        }
        MenuPage::QuitConfirm => {
            draw_text_centered(d, &scene.menu.title, w / 2, h - 300, 25, palette.title);
            // side by side, like a dialog
            for (i, item) in scene.menu.items.iter().enumerate() {
                let selected = i == scene.menu.selected();
                let font = if selected { 25 } else { 20 };
                let color = if selected { palette.accent } else { palette.item };
                let x = if i == 0 { 360 } else { 600 };
                draw_text_centered(d, &item.label, x, h - 250, font, color);
            }
        }
    }
}

pub fn draw_result(
    d: &mut RaylibDrawHandle,
    result: &ResultScreen,
    won: bool,
    texman: &TextureManager,
    palette: &Palette,
    (w, h): Screen,
) {
    d.clear_background(palette.background);
    let (label, sprite) = if won { ("You Win!", "game_win") } else { ("You Lose!", "game_lose") };
    draw_text_centered(d, label, w / 2, h / 2 - 150, 40, palette.title);
    match texman.frame(sprite, result.shown_for) {
        Some(tex) => {
            let x = w / 2 - tex.width / 2;
            let y = h - 200 - tex.height / 2;
            d.draw_texture(tex, x, y, Color::WHITE);
        }
        None => {
            let face = if won { Color::GOLD } else { Color::MAROON };
            d.draw_circle(w / 2, h - 200, 60.0, face);
        }
    }
    if let Some(secs) = result.elapsed_secs {
        draw_text_centered(d, &format!("Time: {secs} s"), w / 2, h / 2 - 90, 24, palette.item);
    }
}

pub fn draw_score_form(d: &mut RaylibDrawHandle, form: &ScoreForm, palette: &Palette, (w, h): Screen, time_sec: f32) {
    d.clear_background(palette.background);
    draw_text_centered(d, &form.menu.title, w / 2, h / 2 - 120, 20, palette.title);
    let caret = if (time_sec * 2.0) as i64 % 2 == 0 { "_" } else { " " };
    let entry = format!("Enter your name : {}{}", form.name.value(), caret);
    draw_text_centered(d, &entry, w / 2, h / 2 - 40, 20, palette.item);
    draw_text_centered(d, &format!("Your time: {:03}", form.elapsed_secs), w / 2, h / 2 - 80, 20, palette.item);
    for (i, item) in form.menu.items.iter().enumerate() {
        let selected = i == form.menu.selected();
        let font = if selected { 25 } else { 20 };
        let color = if selected { palette.accent } else { palette.item };
        let x = if i == 0 { w / 2 - 80 } else { w / 2 + 80 };
        draw_text_centered(d, &item.label, x, h / 2, font, color);
    }
}

const BOARD_HEADER_SIZE: i32 = 30;
const BOARD_ROW_SIZE: i32 = 20;
const BOARD_ROW_GAP: i32 = 25;

fn board_header_y(h: i32) -> i32 {
    h / 2 - 120
}

/// Top of the text of leaderboard row `index`, just below the centred header.
fn board_row_y(h: i32, index: usize) -> i32 {
    board_header_y(h) + BOARD_HEADER_SIZE / 2 + 15 + index as i32 * BOARD_ROW_GAP
}

pub fn draw_leaderboard(d: &mut RaylibDrawHandle, view: &LeaderboardView, palette: &Palette, (w, h): Screen) {
    d.clear_background(palette.background);
    draw_text_centered(d, "AMaze Leaderboard", w / 2, 50, 40, palette.title);
    draw_text_centered(d, LeaderboardView::HEADER, w / 2, board_header_y(h), BOARD_HEADER_SIZE, palette.accent);
    let x = w / 2 - 140;
    for (i, line) in view.lines().iter().enumerate() {
        d.draw_text(line, x, board_row_y(h, i), BOARD_ROW_SIZE, palette.item);
    }
    if view.rows.is_empty() {
        draw_text_centered(d, "No times yet", w / 2, h / 2, 20, palette.item);
    }
    draw_text_centered(d, "Press ESC to go back", w / 2, h - 50, 40, palette.title);
}
