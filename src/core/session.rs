//! One run through the maze: player, movement, countdown and camera.
use crate::config::GameConfig;
use crate::core::countdown::{Countdown, Tick};
use crate::core::difficulty::Difficulty;
use crate::core::input::FrameInput;
use crate::core::movement::{MovementParams, MovementResolver, StepOutcome};
use crate::core::player::Player;
use crate::core::tilemap::TileMap;
use crate::core::viewport::Viewport;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Continue,
    Won { elapsed_secs: u32 },
    Lost,
}

#[derive(Clone, Debug)]
pub struct PlaySession {
    difficulty: Difficulty,
    player: Player,
    resolver: MovementResolver,
    countdown: Countdown,
    viewport: Viewport,
}

impl PlaySession {
    pub fn start(config: &GameConfig, map: &TileMap, difficulty: Difficulty) -> Self {
        let spawn = config.map.spawn();
        let params = MovementParams {
            speed: config.player.speed,
            inset: config.map.inset,
            map_size: map.pixel_size(),
            spawn,
        };
        let screen = glam::Vec2::new(config.window.width as f32, config.window.height as f32);
        let mut viewport = Viewport::new(screen, map.pixel_size());
        viewport.set_focus(spawn);
        log::info!(
            "new game on {} ({} s on the clock)",
            difficulty.label(),
            difficulty.countdown_secs()
        );
        Self {
            difficulty,
            player: Player::new(spawn),
            resolver: MovementResolver::new(params),
            countdown: Countdown::new(difficulty.countdown_secs()),
            viewport,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Time taken so far, scored against the difficulty budget.
    pub fn elapsed_secs(&self) -> u32 {
        self.difficulty.budget_secs().saturating_sub(self.countdown.remaining())
    }

    pub fn update(&mut self, map: &TileMap, input: &FrameInput, dt: f32) -> SessionOutcome {
        // a tap can report both edges in one frame
        for &dir in &input.pressed {
            self.player.press(dir);
        }
        for &dir in &input.released {
            self.player.release(dir);
        }
        if let Some(down) = &input.down {
            self.player.sync_held(down);
        }

        match self.resolver.step(&mut self.player, map, &mut self.viewport, dt) {
            StepOutcome::Reached => {
                let elapsed_secs = self.elapsed_secs();
                log::info!("won in {} s", elapsed_secs);
                return SessionOutcome::Won { elapsed_secs };
            }
            StepOutcome::Done => return SessionOutcome::Continue,
            StepOutcome::Continue => {}
        }

        match self.countdown.tick(dt) {
            Tick::Expired => SessionOutcome::Lost,
            Tick::Idle | Tick::Ticked => SessionOutcome::Continue,
        }
    }
}
