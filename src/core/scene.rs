//! Top-level scene state machine.
//!
//! Every frame the frontend hands the controller a `FrameInput` and the frame
//! time; the controller updates the active scene and switches scenes on win,
//! loss, timeouts and menu actions.
use crate::config::GameConfig;
use crate::core::difficulty::Difficulty;
use crate::core::input::FrameInput;
use crate::core::menu::{Menu, MenuAction, TextEntry};
use crate::core::session::{PlaySession, SessionOutcome};
use crate::core::tilemap::TileMap;
use crate::error::Result;
use crate::storage::{DifficultyStore, Leaderboard, ScoreEntry};

/// Everything a scene may read or persist, passed in explicitly each frame.
pub struct AppContext {
    pub config: GameConfig,
    pub map: TileMap,
    pub difficulty: DifficultyStore,
    pub leaderboard: Leaderboard,
}

impl AppContext {
    pub fn new(config: GameConfig, map: TileMap) -> Self {
        let difficulty = DifficultyStore::new(config.storage.difficulty_path.clone());
        let leaderboard = Leaderboard::new(config.storage.leaderboard_path.clone());
        Self { config, map, difficulty, leaderboard }
    }

    /// Loads the map named by the config.
    pub fn load(config: GameConfig) -> Result<Self> {
        let map = TileMap::load(&config.map.path)?;
        Ok(Self::new(config, map))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneKind {
    Menu,
    Play,
    Win,
    Lose,
    ScoreSubmit,
    Leaderboard,
}

/// Notifications for the presentation layer (sound, effects).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    SceneChanged(SceneKind),
    /// The player moved this frame.
    Stepped,
    Won { elapsed_secs: u32 },
    Lost,
    DifficultyChanged(Difficulty),
    ScoreSubmitted(ScoreEntry),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuPage {
    Main,
    Difficulty,
    QuitConfirm,
}

#[derive(Clone, Debug)]
pub struct MenuScene {
    pub page: MenuPage,
    pub menu: Menu,
}

impl MenuScene {
    pub fn main() -> Self {
        Self { page: MenuPage::Main, menu: Menu::main() }
    }
}

/// Win or lose screen; `shown_for` counts up to the auto-advance delay.
#[derive(Clone, Debug)]
pub struct ResultScreen {
    pub elapsed_secs: Option<u32>,
    pub shown_for: f32,
}

#[derive(Clone, Debug)]
pub struct ScoreForm {
    pub elapsed_secs: u32,
    pub name: TextEntry,
    pub menu: Menu,
}

#[derive(Clone, Debug)]
pub struct LeaderboardView {
    pub rows: Vec<ScoreEntry>,
}

impl LeaderboardView {
    pub const HEADER: &'static str = "RANK  TIME    NAME";

    /// One display line per row: rank, zero-padded seconds, name.
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}.     {:03}        {}", i + 1, e.elapsed_secs, e.name))
            .collect()
    }
}

#[derive(Clone, Debug)]
pub enum Scene {
    Menu(MenuScene),
    Play(Box<PlaySession>),
    Win(ResultScreen),
    Lose(ResultScreen),
    ScoreSubmit(ScoreForm),
    Leaderboard(LeaderboardView),
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Menu(_) => SceneKind::Menu,
            Scene::Play(_) => SceneKind::Play,
            Scene::Win(_) => SceneKind::Win,
            Scene::Lose(_) => SceneKind::Lose,
            Scene::ScoreSubmit(_) => SceneKind::ScoreSubmit,
            Scene::Leaderboard(_) => SceneKind::Leaderboard,
        }
    }
}

enum Next {
    Stay,
    Go(Scene),
    Quit,
}

pub struct SceneController {
    scene: Scene,
    events: Vec<GameEvent>,
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneController {
    pub fn new() -> Self {
        Self { scene: Scene::Menu(MenuScene::main()), events: Vec::new() }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Events raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn update(&mut self, ctx: &AppContext, input: &FrameInput, dt: f32) -> Result<Flow> {
        let next = match &mut self.scene {
            Scene::Menu(menu) => Self::update_menu(menu, ctx, input, &mut self.events)?,
            Scene::Play(session) => Self::update_play(session, ctx, input, dt, &mut self.events),
            Scene::Win(screen) => {
                if Self::result_done(screen, ctx, input, dt) {
                    let elapsed_secs = screen.elapsed_secs.unwrap_or(0);
                    Next::Go(Scene::ScoreSubmit(ScoreForm {
                        elapsed_secs,
                        name: TextEntry::new(ctx.config.leaderboard.name_max_len),
                        menu: Menu::score_submit(),
                    }))
                } else {
                    Next::Stay
                }
            }
            Scene::Lose(screen) => {
                if Self::result_done(screen, ctx, input, dt) {
                    Next::Go(Scene::Menu(MenuScene::main()))
                } else {
                    Next::Stay
                }
            }
            Scene::ScoreSubmit(form) => Self::update_score_form(form, ctx, input, &mut self.events)?,
            Scene::Leaderboard(_) => {
                if input.back || input.confirm {
                    Next::Go(Scene::Menu(MenuScene::main()))
                } else {
                    Next::Stay
                }
            }
        };

        match next {
            Next::Stay => Ok(Flow::Continue),
            Next::Go(scene) => {
                self.switch(scene);
                Ok(Flow::Continue)
            }
            Next::Quit => {
                log::info!("quit requested");
                Ok(Flow::Quit)
            }
        }
    }

    fn switch(&mut self, scene: Scene) {
        let from = self.scene.kind();
        let to = scene.kind();
        self.scene = scene;
        if from != to {
            log::info!("scene {:?} -> {:?}", from, to);
            self.events.push(GameEvent::SceneChanged(to));
        }
    }

    fn result_done(screen: &mut ResultScreen, ctx: &AppContext, input: &FrameInput, dt: f32) -> bool {
        screen.shown_for += dt.max(0.0);
        input.confirm || screen.shown_for >= ctx.config.timing.result_delay
    }

    fn update_menu(
        scene: &mut MenuScene,
        ctx: &AppContext,
        input: &FrameInput,
        events: &mut Vec<GameEvent>,
    ) -> Result<Next> {
        if input.back {
            return Ok(match scene.page {
                MenuPage::Main => Next::Quit,
                MenuPage::Difficulty => Next::Go(Scene::Menu(MenuScene::main())),
                // escape must not quit from the confirmation page
                MenuPage::QuitConfirm => Next::Stay,
            });
        }
        let Some(action) = scene.menu.handle(input) else {
            return Ok(Next::Stay);
        };
        let next = match action {
            MenuAction::NewGame => {
                let difficulty = ctx.difficulty.load()?;
                Next::Go(Scene::Play(Box::new(PlaySession::start(&ctx.config, &ctx.map, difficulty))))
            }
            MenuAction::OpenDifficulty => {
                let current = ctx.difficulty.load()?;
                scene.page = MenuPage::Difficulty;
                scene.menu = Menu::difficulty(current);
                Next::Stay
            }
            MenuAction::SetDifficulty(d) => {
                ctx.difficulty.save(d)?;
                events.push(GameEvent::DifficultyChanged(d));
                *scene = MenuScene::main();
                Next::Stay
            }
            MenuAction::OpenLeaderboard => {
                let rows = ctx.leaderboard.ranked(ctx.config.leaderboard.visible_rows)?;
                Next::Go(Scene::Leaderboard(LeaderboardView { rows }))
            }
            MenuAction::OpenQuit => {
                scene.page = MenuPage::QuitConfirm;
                scene.menu = Menu::quit_confirm();
                Next::Stay
            }
            MenuAction::Back | MenuAction::Cancel => {
                *scene = MenuScene::main();
                Next::Stay
            }
            MenuAction::Quit => Next::Quit,
            MenuAction::Submit => Next::Stay,
        };
        Ok(next)
    }

    fn update_play(
        session: &mut PlaySession,
        ctx: &AppContext,
        input: &FrameInput,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) -> Next {
        if input.back {
            log::info!("run abandoned");
            return Next::Go(Scene::Menu(MenuScene::main()));
        }
        let before = session.player().pos;
        match session.update(&ctx.map, input, dt) {
            SessionOutcome::Continue => {
                if session.player().pos != before {
                    events.push(GameEvent::Stepped);
                }
                Next::Stay
            }
            SessionOutcome::Won { elapsed_secs } => {
                events.push(GameEvent::Won { elapsed_secs });
                Next::Go(Scene::Win(ResultScreen { elapsed_secs: Some(elapsed_secs), shown_for: 0.0 }))
            }
            SessionOutcome::Lost => {
                events.push(GameEvent::Lost);
                Next::Go(Scene::Lose(ResultScreen { elapsed_secs: None, shown_for: 0.0 }))
            }
        }
    }

    fn update_score_form(
        form: &mut ScoreForm,
        ctx: &AppContext,
        input: &FrameInput,
        events: &mut Vec<GameEvent>,
    ) -> Result<Next> {
        if input.back {
            return Ok(Next::Go(Scene::Menu(MenuScene::main())));
        }
        form.name.handle(input);
        match form.menu.handle(input) {
            Some(MenuAction::Submit) => {
                if form.name.value().trim().is_empty() {
                    log::debug!("ignoring submit without a name");
                    return Ok(Next::Stay);
                }
                let entry = ScoreEntry::new(form.elapsed_secs, form.name.value());
                ctx.leaderboard.submit(&entry)?;
                events.push(GameEvent::ScoreSubmitted(entry));
                Ok(Next::Go(Scene::Menu(MenuScene::main())))
            }
            Some(MenuAction::Cancel) => Ok(Next::Go(Scene::Menu(MenuScene::main()))),
            _ => Ok(Next::Stay),
        }
    }
}
