//! Player data: position, held keys and sprite pose.
use glam::Vec2;

use crate::core::direction::Direction;

/// Which sprite set the frontend should show.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pose {
    Standing(Direction),
    Walking(Direction),
}

impl Pose {
    pub fn direction(self) -> Direction {
        match self {
            Pose::Standing(d) | Pose::Walking(d) => d,
        }
    }

    /// Texture key, e.g. `walking_left`.
    pub fn asset_name(self) -> String {
        match self {
            Pose::Standing(d) => format!("standing_{}", d.name()),
            Pose::Walking(d) => format!("walking_{}", d.name()),
        }
    }
}

/// Timed transition between two positions, sampled by the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Glide {
    from: Vec2,
    to: Vec2,
    duration: f32,
    elapsed: f32,
}

impl Glide {
    pub fn at(p: Vec2) -> Self {
        Self { from: p, to: p, duration: 0.0, elapsed: 0.0 }
    }

    pub fn new(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self { from, to, duration: duration.max(0.0), elapsed: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn current(&self) -> Vec2 {
        if self.is_done() { return self.to; }
        self.from.lerp(self.to, self.elapsed / self.duration)
    }

}

#[derive(Clone, Debug)]
pub struct Player {
    /// Committed position; collision and win checks read this.
    pub pos: Vec2,
    pub pose: Pose,
    // most recent press last
    held: Vec<Direction>,
    glide: Glide,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            pose: Pose::Standing(Direction::Right),
            held: Vec::with_capacity(4),
            glide: Glide::at(spawn),
        }
    }

    pub fn press(&mut self, dir: Direction) {
        self.held.retain(|&d| d != dir);
        self.held.push(dir);
        self.pose = Pose::Walking(dir);
    }

    pub fn release(&mut self, dir: Direction) {
        if !self.is_held(dir) { return; }
        self.held.retain(|&d| d != dir);
        self.pose = match self.held.last() {
            Some(&d) => Pose::Walking(d),
            None => Pose::Standing(dir),
        };
    }

    /// Matches the held set to the keys actually down, in `Direction::ALL` order.
    pub fn sync_held(&mut self, down: &[Direction]) {
        for dir in Direction::ALL {
            match (self.is_held(dir), down.contains(&dir)) {
                (true, false) => self.release(dir),
                (false, true) => self.press(dir),
                _ => {}
            }
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held.contains(&dir)
    }

    pub fn is_walking(&self) -> bool {
        !self.held.is_empty()
    }

    /// Commits `target` and glides the drawn sprite there over `dt`.
    pub fn move_to(&mut self, target: Vec2, dt: f32) {
        self.glide = Glide::new(self.glide.current(), target, dt);
        self.pos = target;
    }

    /// Jumps without a transition.
    pub fn place(&mut self, p: Vec2) {
        self.pos = p;
        self.glide = Glide::at(p);
    }

    pub fn advance(&mut self, dt: f32) {
        self.glide.advance(dt);
    }

    pub fn render_pos(&self) -> Vec2 {
        self.glide.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_of_last_key_stands_facing_it() {
        let mut p = Player::new(Vec2::ZERO);
        p.press(Direction::Up);
        assert_eq!(p.pose, Pose::Walking(Direction::Up));
        p.press(Direction::Left);
        assert_eq!(p.pose, Pose::Walking(Direction::Left));
        p.release(Direction::Left);
        assert_eq!(p.pose, Pose::Walking(Direction::Up));
        p.release(Direction::Up);
        assert_eq!(p.pose, Pose::Standing(Direction::Up));
        assert!(!p.is_walking());
        assert_eq!(p.pose.asset_name(), "standing_up");
    }

    #[test]
    fn releasing_an_unheld_key_changes_nothing() {
        let mut p = Player::new(Vec2::ZERO);
        p.press(Direction::Down);
        p.release(Direction::Right);
        assert_eq!(p.pose, Pose::Walking(Direction::Down));
    }

    #[test]
    fn sync_drops_keys_that_are_no_longer_down() {
        let mut p = Player::new(Vec2::ZERO);
        p.press(Direction::Right);
        p.press(Direction::Up);
        p.sync_held(&[Direction::Right]);
        assert!(!p.is_held(Direction::Up));
        assert_eq!(p.pose, Pose::Walking(Direction::Right));
        p.sync_held(&[]);
        assert!(!p.is_walking());
        assert_eq!(p.pose, Pose::Standing(Direction::Right));
        p.sync_held(&[Direction::Down]);
        assert_eq!(p.pose, Pose::Walking(Direction::Down));
    }

    #[test]
    fn glide_interpolates_then_lands() {
        let mut p = Player::new(Vec2::new(0.0, 0.0));
        p.move_to(Vec2::new(10.0, 0.0), 0.5);
        assert_eq!(p.pos, Vec2::new(10.0, 0.0));
        assert_eq!(p.render_pos(), Vec2::new(0.0, 0.0));
        p.advance(0.25);
        assert_eq!(p.render_pos(), Vec2::new(5.0, 0.0));
        p.advance(1.0);
        assert_eq!(p.render_pos(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn zero_length_glide_is_immediate() {
        let g = Glide::new(Vec2::ZERO, Vec2::ONE, 0.0);
        assert!(g.is_done());
        assert_eq!(g.current(), Vec2::ONE);
    }
}
