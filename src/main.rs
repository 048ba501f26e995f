// main.rs
mod audio_manager;
mod process_events;
mod render;

use anyhow::Context;
use raylib::prelude::*;

use amaze::core::scene::SceneKind;
use amaze::{AppContext, Flow, GameConfig, GameEvent, Scene, SceneController};
use audio_manager::AudioManager;
use process_events::process_events;
use render::palette::Palette;
use render::textures::TextureManager;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = GameConfig::default_path();
    let config = GameConfig::load_or_default(&config_path)
        .with_context(|| format!("reading config {}", config_path.display()))?;
    let ctx = AppContext::load(config).context("loading map")?;

    let (mut window, raylib_thread) = raylib::init()
        .size(ctx.config.window.width, ctx.config.window.height)
        .title(&ctx.config.window.title)
        .build();
    window.set_target_fps(ctx.config.window.target_fps);
    // Escape belongs to the scenes, not to raylib
    window.set_exit_key(None);

    let texman = TextureManager::new(&mut window, &raylib_thread);
    let mut audio = AudioManager::new();
    match audio.as_mut() {
        Some(a) => {
            a.load_sfx_auto();
            a.play_music_loop_auto();
        }
        None => log::warn!("no audio device, running silent"),
    }

    let mut rng = rand::thread_rng();
    let mut palette = Palette::random(&mut rng);
    let mut controller = SceneController::new();

    while !window.window_should_close() {
        let input = process_events(&mut window);
        let dt = window.get_frame_time();
        let in_menu = matches!(controller.scene(), Scene::Menu(_) | Scene::ScoreSubmit(_));

        if controller.update(&ctx, &input, dt)? == Flow::Quit {
            break;
        }

        if let Some(a) = audio.as_mut() {
            if in_menu && (input.confirm || !input.pressed.is_empty()) {
                a.play_blip();
            }
        }

        for event in controller.drain_events() {
            match event {
                GameEvent::SceneChanged(kind) => {
                    palette = Palette::random(&mut rng);
                    if let Some(a) = audio.as_mut() {
                        a.stop_steps();
                        if kind == SceneKind::Play {
                            a.stop_music();
                        } else if kind == SceneKind::Menu {
                            a.play_music_loop_auto();
                        }
                    }
                }
                GameEvent::Stepped => {
                    if let Some(a) = audio.as_mut() { a.play_step(); }
                }
                GameEvent::Won { .. } => {
                    if let Some(a) = audio.as_ref() { a.play_win(); }
                }
                GameEvent::Lost => {
                    if let Some(a) = audio.as_ref() { a.play_lose(); }
                }
                GameEvent::DifficultyChanged(_) | GameEvent::ScoreSubmitted(_) => {}
            }
        }

        let time_sec = window.get_time() as f32;
        let mut d = window.begin_drawing(&raylib_thread);
        render::draw_scene(&mut d, controller.scene(), &ctx, &texman, &palette, time_sec);
    }

    log::info!("bye");
    Ok(())
}
