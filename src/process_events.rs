use raylib::prelude::*;

use amaze::core::direction::Direction;
use amaze::core::input::FrameInput;

fn key_for(dir: Direction) -> KeyboardKey {
    match dir {
        Direction::Right => KeyboardKey::KEY_RIGHT,
        Direction::Left => KeyboardKey::KEY_LEFT,
        Direction::Up => KeyboardKey::KEY_UP,
        Direction::Down => KeyboardKey::KEY_DOWN,
    }
}

/// Collects this frame's key edges and typed text.
pub fn process_events(window: &mut RaylibHandle) -> FrameInput {
    let mut input = FrameInput::none();
    let mut down = Vec::with_capacity(4);
    for dir in Direction::ALL {
        let key = key_for(dir);
        if window.is_key_pressed(key) {
            input.pressed.push(dir);
        }
        if window.is_key_released(key) {
            input.released.push(dir);
        }
        if window.is_key_down(key) {
            down.push(dir);
        }
    }
    input.down = Some(down);
    input.confirm = window.is_key_pressed(KeyboardKey::KEY_ENTER) || window.is_key_pressed(KeyboardKey::KEY_KP_ENTER);
    input.back = window.is_key_pressed(KeyboardKey::KEY_ESCAPE);
    input.backspace = window.is_key_pressed(KeyboardKey::KEY_BACKSPACE);
    while let Some(c) = window.get_char_pressed() {
        input.typed.push(c);
    }
    input
}
