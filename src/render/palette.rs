use rand::Rng;
use raylib::prelude::*;

pub fn random_rgb<R: Rng>(rng: &mut R) -> Color {
    Color::new(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255), 255)
}

/// Label and background colors of the current screen.
#[derive(Copy, Clone, Debug)]
pub struct Palette {
    pub background: Color,
    pub title: Color,
    pub item: Color,
    pub accent: Color,
}

impl Palette {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            background: random_rgb(rng),
            title: random_rgb(rng),
            item: random_rgb(rng),
            accent: random_rgb(rng),
        }
    }
}
