//! Per-tick movement, collision and win detection.
//!
//! Every held direction is resolved on its own, in `Direction::ALL` order, so a
//! diagonal walk into a wall only loses the axis that hits it.
use glam::Vec2;

use crate::core::direction::Direction;
use crate::core::player::Player;
use crate::core::tilemap::TileMap;
use crate::core::viewport::Viewport;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementParams {
    pub speed: f32,
    pub inset: f32,
    pub map_size: Vec2,
    pub spawn: Vec2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// The player stepped onto a winnable tile this tick.
    Reached,
    /// A previous tick already reached the exit; nothing happened.
    Done,
}

#[derive(Debug, Clone)]
pub struct MovementResolver {
    params: MovementParams,
    done: bool,
}

// Off-map counts as solid.
fn cell_solid(map: &TileMap, p: Vec2) -> bool {
    map.get_at_pixel(p).map(|t| t.collidable()).unwrap_or(true)
}

// Samples the straight path at half-tile spacing so a long frame cannot skip a wall.
fn path_blocked(map: &TileMap, from: Vec2, to: Vec2) -> bool {
    let spacing = map.tile_size() * 0.5;
    let samples = ((to - from).length() / spacing).ceil().max(1.0) as usize;
    (1..=samples).any(|i| cell_solid(map, from.lerp(to, i as f32 / samples as f32)))
}

fn within(v: f32, lo: f32, hi: f32) -> bool {
    v >= lo && v <= hi
}

impl MovementResolver {
    pub fn new(params: MovementParams) -> Self {
        Self { params, done: false }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn step(&mut self, player: &mut Player, map: &TileMap, viewport: &mut Viewport, dt: f32) -> StepOutcome {
        if self.done { return StepOutcome::Done; }
        let dt = dt.max(0.0);
        player.advance(dt);

        let p = &self.params;
        let (lo, hi) = (Vec2::splat(p.inset), p.map_size - Vec2::splat(p.inset));
        let start = player.pos;
        let mut pos = start;
        for dir in Direction::ALL {
            if !player.is_held(dir) { continue; }
            let candidate = pos + dir.vector() * p.speed * dt;
            if path_blocked(map, pos, candidate) {
                log::debug!("{} blocked at ({:.1}, {:.1})", dir.name(), candidate.x, candidate.y);
                continue;
            }
            let mut delta = candidate - pos;
            if !within(candidate.x, lo.x, hi.x) { delta.x = 0.0; }
            if !within(candidate.y, lo.y, hi.y) { delta.y = 0.0; }
            pos += delta;
        }
        if player.is_walking() {
            player.move_to(pos, dt);
        }
        viewport.set_focus(pos);

        if map.get_at_pixel(pos).map(|t| t.winnable()).unwrap_or(false) {
            log::info!("exit reached at ({:.1}, {:.1})", pos.x, pos.y);
            player.place(p.spawn);
            viewport.set_focus(p.spawn);
            self.done = true;
            return StepOutcome::Reached;
        }
        StepOutcome::Continue
    }
}
