use raylib::prelude::*;
use std::collections::HashMap;

use amaze::core::direction::Direction;

/// Walking animations are numbered frames: `assets/walking_right_0.png`, `_1`, ...
const MAX_WALK_FRAMES: usize = 8;
const WALK_FPS: f32 = 8.0;

pub struct TextureManager {
    tiles: HashMap<char, Texture2D>,
    sprites: HashMap<String, Vec<Texture2D>>,
}

fn tile_file(glyph: char) -> Option<&'static str> {
    match glyph {
        '#' => Some("assets/tiles/rock.png"),
        'c' => Some("assets/tiles/cactus.png"),
        '.' => Some("assets/tiles/sand.png"),
        ',' => Some("assets/tiles/dune.png"),
        'g' => Some("assets/tiles/exit.png"),
        _ => None,
    }
}

fn load(rl: &mut RaylibHandle, thread: &RaylibThread, path: &str) -> Option<Texture2D> {
    let img = Image::load_image(path).ok()?;
    match rl.load_texture_from_image(thread, &img) {
        Ok(tex) => Some(tex),
        Err(e) => {
            log::warn!("could not upload {}: {}", path, e);
            None
        }
    }
}

impl TextureManager {
    /// Loads whatever sprite and tile images exist; the rest is drawn procedurally.
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread) -> Self {
        let mut tm = Self { tiles: HashMap::new(), sprites: HashMap::new() };

        for glyph in ['#', 'c', '.', ',', 'g'] {
            if let Some(path) = tile_file(glyph) {
                if let Some(tex) = load(rl, thread, path) { tm.tiles.insert(glyph, tex); }
            }
        }

        for dir in Direction::ALL {
            let standing = format!("standing_{}", dir.name());
            if let Some(tex) = load(rl, thread, &format!("assets/{standing}.png")) {
                tm.sprites.insert(standing, vec![tex]);
            }
            let walking = format!("walking_{}", dir.name());
            let frames: Vec<Texture2D> = (0..MAX_WALK_FRAMES)
                .map_while(|i| load(rl, thread, &format!("assets/{walking}_{i}.png")))
                .collect();
            if !frames.is_empty() { tm.sprites.insert(walking, frames); }
        }

        for name in ["menu_background", "game_win", "game_lose"] {
            if let Some(tex) = load(rl, thread, &format!("assets/{name}.png")) {
                tm.sprites.insert(name.to_string(), vec![tex]);
            }
        }

        log::info!(
            "textures: {} tile kinds, {} sprites (missing ones use fallbacks)",
            tm.tiles.len(),
            tm.sprites.len()
        );
        tm
    }

    pub fn tile(&self, glyph: char) -> Option<&Texture2D> {
        self.tiles.get(&glyph)
    }

    /// Current frame of a sprite, cycling animations at a fixed rate.
    pub fn frame(&self, name: &str, time_sec: f32) -> Option<&Texture2D> {
        let frames = self.sprites.get(name)?;
        let i = (time_sec.max(0.0) * WALK_FPS) as usize % frames.len();
        frames.get(i)
    }

    /// Flat color for tiles without an image.
    pub fn tile_color(glyph: char) -> Color {
        match glyph {
            '#' => Color::new(122, 86, 54, 255),
            'c' => Color::new(58, 128, 62, 255),
            '.' => Color::new(226, 196, 138, 255),
            ',' => Color::new(208, 174, 112, 255),
            'g' => Color::new(30, 160, 30, 255),
            _ => Self::color_from_char(glyph),
        }
    }

    fn color_from_char(c: char) -> Color {
        let k = c as u32;
        let r = ((k * 97) % 200 + 40) as u8;
        let g = ((k * 57) % 200 + 40) as u8;
        let b = ((k * 31) % 200 + 40) as u8;
        Color::new(r, g, b, 255)
    }

    #[inline]
    pub fn mix(a: Color, b: Color, t: u8) -> Color {
        let ta = t as u16;
        let na = 255u16 - ta;
        let mixc = |x: u8, y: u8| -> u8 { (((x as u16)*na + (y as u16)*ta) / 255) as u8 };
        Color::new(mixc(a.r,b.r), mixc(a.g,b.g), mixc(a.b,b.b), mixc(a.a,b.a))
    }
}
