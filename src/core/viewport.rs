//! Scrolling viewport that follows the player over the map.
use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    screen: Vec2,
    world: Vec2,
    focus: Vec2,
}

impl Viewport {
    pub fn new(screen: Vec2, world: Vec2) -> Self {
        Self { screen, world, focus: screen * 0.5 }
    }

    pub fn set_focus(&mut self, p: Vec2) {
        self.focus = p;
    }

    pub fn focus(&self) -> Vec2 {
        self.focus
    }

    /// Top-left world corner of the visible area, kept inside the map.
    pub fn origin(&self) -> Vec2 {
        let clamp_axis = |focus: f32, screen: f32, world: f32| -> f32 {
            let max = (world - screen).max(0.0);
            (focus - screen * 0.5).clamp(0.0, max)
        };
        Vec2::new(
            clamp_axis(self.focus.x, self.screen.x, self.world.x),
            clamp_axis(self.focus.y, self.screen.y, self.world.y),
        )
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        p - self.origin()
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen
    }
}
