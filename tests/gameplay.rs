use std::fs;
use std::path::{Path, PathBuf};

use amaze::core::direction::Direction;
use amaze::core::difficulty::Difficulty;
use amaze::core::input::FrameInput;
use amaze::core::scene::SceneKind;
use amaze::core::tilemap::TileMap;
use amaze::{AppContext, Flow, GameConfig, GameEvent, SceneController};
use tempfile::TempDir;

// Walls use `x` here so the literal holds no `"#` sequence.
const CORRIDOR: &str = r#"
tile_size = 32
rows = [
    "xxxxx",
    "x..gx",
    "xxxxx",
]

[legend]
"x" = { Collidable = true }
"." = {}
"g" = { Winnable = true }
"#;

fn context(dir: &TempDir) -> AppContext {
    let map = TileMap::from_toml_str(CORRIDOR, Path::new("corridor.toml")).unwrap();
    let mut config = GameConfig::default();
    config.map.spawn = [48.0, 48.0];
    config.map.inset = 8.0;
    config.player.speed = 32.0;
    config.storage.difficulty_path = dir.path().join("difficulty.txt");
    config.storage.leaderboard_path = dir.path().join("leaderboard.txt");
    AppContext::new(config, map)
}

fn step(c: &mut SceneController, ctx: &AppContext, input: FrameInput, dt: f32) -> Flow {
    c.update(ctx, &input, dt).unwrap()
}

#[test]
fn winning_appends_exactly_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);
    fs::write(ctx.leaderboard.path(), "42,ana\n7,bo\n").unwrap();
    ctx.difficulty.save(Difficulty::Medium).unwrap();

    let mut c = SceneController::new();
    step(&mut c, &ctx, FrameInput::confirm(), 0.0);
    assert_eq!(c.scene().kind(), SceneKind::Play);
    for _ in 0..9 {
        step(&mut c, &ctx, FrameInput::none(), 1.0);
    }
    step(&mut c, &ctx, FrameInput::press(Direction::Right), 1.0);
    step(&mut c, &ctx, FrameInput::none(), 1.0);
    assert_eq!(c.scene().kind(), SceneKind::Win);
    // medium: 120 s budget, 121 on the clock, ten ticks
    assert!(c.drain_events().contains(&GameEvent::Won { elapsed_secs: 9 }));

    // the win screen moves on by itself
    step(&mut c, &ctx, FrameInput::none(), 2.5);
    assert_eq!(c.scene().kind(), SceneKind::Win);
    step(&mut c, &ctx, FrameInput::none(), 2.5);
    assert_eq!(c.scene().kind(), SceneKind::ScoreSubmit);

    step(&mut c, &ctx, FrameInput::typed("kit,ty"), 0.0);
    step(&mut c, &ctx, FrameInput::confirm(), 0.0);
    assert_eq!(c.scene().kind(), SceneKind::Menu);

    let written = fs::read_to_string(ctx.leaderboard.path()).unwrap();
    assert_eq!(written, "42,ana\n7,bo\n9,kitty\n");
    let ranked: Vec<u32> = ctx.leaderboard.ranked(10).unwrap().iter().map(|e| e.elapsed_secs).collect();
    assert_eq!(ranked, vec![7, 9, 42]);
}

#[test]
fn cancelling_the_form_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);
    let mut c = SceneController::new();
    step(&mut c, &ctx, FrameInput::confirm(), 0.0);
    step(&mut c, &ctx, FrameInput::press(Direction::Right), 1.0);
    step(&mut c, &ctx, FrameInput::none(), 1.0);
    step(&mut c, &ctx, FrameInput::confirm(), 0.0);
    assert_eq!(c.scene().kind(), SceneKind::ScoreSubmit);
    step(&mut c, &ctx, FrameInput::typed("nobody"), 0.0);
    step(&mut c, &ctx, FrameInput::press(Direction::Right), 0.0);
    step(&mut c, &ctx, FrameInput::confirm(), 0.0);
    assert_eq!(c.scene().kind(), SceneKind::Menu);
    assert!(!ctx.leaderboard.path().exists());
}

#[test]
fn hard_run_is_lost_once_after_61_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);
    ctx.difficulty.save(Difficulty::Hard).unwrap();
    let mut c = SceneController::new();
    step(&mut c, &ctx, FrameInput::confirm(), 0.0);
    c.drain_events();

    for _ in 0..60 {
        step(&mut c, &ctx, FrameInput::none(), 1.0);
    }
    assert_eq!(c.scene().kind(), SceneKind::Play);
    step(&mut c, &ctx, FrameInput::none(), 1.0);
    assert_eq!(c.scene().kind(), SceneKind::Lose);

    step(&mut c, &ctx, FrameInput::none(), 1.0);
    let lost = c.drain_events().iter().filter(|e| **e == GameEvent::Lost).count();
    assert_eq!(lost, 1);
    assert!(!ctx.leaderboard.path().exists());
}

#[test]
fn garbage_difficulty_file_starts_an_easy_game() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);
    fs::write(ctx.difficulty.path(), "seven\n").unwrap();
    let mut c = SceneController::new();
    step(&mut c, &ctx, FrameInput::confirm(), 0.0);
    assert_eq!(c.scene().kind(), SceneKind::Play);
    assert_eq!(fs::read_to_string(ctx.difficulty.path()).unwrap().trim(), "0");
}

#[test]
fn bundled_map_loads_with_a_free_spawn() {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "assets", "maps", "desert.toml"].iter().collect();
    let map = TileMap::load(&path).unwrap();
    assert_eq!((map.cols(), map.rows()), (40, 40));
    let spawn = GameConfig::default().map.spawn();
    let tile = map.get_at_pixel(spawn).unwrap();
    assert!(!tile.collidable());
    assert!((0..40).any(|r| (0..40).any(|c| map.tile(c, r).is_some_and(|t| t.winnable()))));
}
