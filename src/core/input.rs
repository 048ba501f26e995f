//! One frame of player input, independent of the windowing backend.
use crate::core::direction::Direction;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Direction keys that went down this frame.
    pub pressed: Vec<Direction>,
    /// Direction keys that came up this frame.
    pub released: Vec<Direction>,
    /// Direction keys down at the end of the frame, when the backend polls them.
    pub down: Option<Vec<Direction>>,
    pub confirm: bool,
    pub back: bool,
    pub backspace: bool,
    /// Printable characters typed this frame, in order.
    pub typed: String,
}

impl FrameInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn press(dir: Direction) -> Self {
        Self { pressed: vec![dir], ..Self::default() }
    }

    pub fn confirm() -> Self {
        Self { confirm: true, ..Self::default() }
    }

    pub fn back() -> Self {
        Self { back: true, ..Self::default() }
    }

    pub fn backspace() -> Self {
        Self { backspace: true, ..Self::default() }
    }

    pub fn typed(text: &str) -> Self {
        Self { typed: text.to_string(), ..Self::default() }
    }
}
