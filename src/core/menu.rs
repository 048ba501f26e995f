//! Keyboard-driven menus: a title, some items and a highlighted selection.
use crate::core::difficulty::Difficulty;
use crate::core::direction::Direction;
use crate::core::input::FrameInput;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    NewGame,
    OpenDifficulty,
    OpenLeaderboard,
    OpenQuit,
    SetDifficulty(Difficulty),
    Back,
    Quit,
    Submit,
    Cancel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(label: &str, action: MenuAction) -> Self {
        Self { label: label.to_string(), action }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub title: String,
    pub items: Vec<MenuItem>,
    selected: usize,
}

impl Menu {
    pub fn new(title: &str, items: Vec<MenuItem>) -> Self {
        Self { title: title.to_string(), items, selected: 0 }
    }

    pub fn main() -> Self {
        Self::new(
            "AMaze",
            vec![
                MenuItem::new("New Game", MenuAction::NewGame),
                MenuItem::new("Difficulty", MenuAction::OpenDifficulty),
                MenuItem::new("High Scores", MenuAction::OpenLeaderboard),
                MenuItem::new("Quit", MenuAction::OpenQuit),
            ],
        )
    }

    /// Difficulty picker with `current` preselected.
    pub fn difficulty(current: Difficulty) -> Self {
        let items = Difficulty::ALL
            .iter()
            .map(|&d| MenuItem::new(d.label(), MenuAction::SetDifficulty(d)))
            .collect();
        let mut menu = Self::new("Choose a difficulty level", items);
        menu.selected = current.level() as usize;
        menu
    }

    pub fn quit_confirm() -> Self {
        Self::new(
            "Do you really wish to quit AMaze?",
            vec![
                MenuItem::new("Oops, Sorry!", MenuAction::Back),
                MenuItem::new("Yes, Please!", MenuAction::Quit),
            ],
        )
    }

    pub fn score_submit() -> Self {
        Self::new(
            "Congratulations! Your time is eligible for leaderboard entry!",
            vec![MenuItem::new("SUBMIT", MenuAction::Submit), MenuItem::new("CANCEL", MenuAction::Cancel)],
        )
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() { return; }
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn select_prev(&mut self) {
        if self.items.is_empty() { return; }
        self.selected = (self.selected + self.items.len() - 1) % self.items.len();
    }

    /// Moves the highlight and returns the action of an activated item.
    pub fn handle(&mut self, input: &FrameInput) -> Option<MenuAction> {
        for &dir in &input.pressed {
            match dir {
                Direction::Up | Direction::Left => self.select_prev(),
                Direction::Down | Direction::Right => self.select_next(),
            }
        }
        if input.confirm {
            return self.selected_item().map(|i| i.action);
        }
        None
    }
}

/// Single-line text field for the leaderboard name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEntry {
    value: String,
    max_len: usize,
}

impl TextEntry {
    pub fn new(max_len: usize) -> Self {
        Self { value: String::new(), max_len }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Commas would split a leaderboard record, so they are refused.
    pub fn accepts(&self, c: char) -> bool {
        !c.is_control() && c != ',' && self.value.chars().count() < self.max_len
    }

    pub fn push(&mut self, c: char) -> bool {
        if !self.accepts(c) { return false; }
        self.value.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn handle(&mut self, input: &FrameInput) {
        if input.backspace { self.backspace(); }
        for c in input.typed.chars() {
            self.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_ways() {
        let mut m = Menu::main();
        assert_eq!(m.handle(&FrameInput::press(Direction::Up)), None);
        assert_eq!(m.selected(), 3);
        m.handle(&FrameInput::press(Direction::Down));
        assert_eq!(m.selected(), 0);
        m.handle(&FrameInput::press(Direction::Down));
        assert_eq!(m.handle(&FrameInput::confirm()), Some(MenuAction::OpenDifficulty));
    }

    #[test]
    fn difficulty_menu_preselects_current_level() {
        let mut m = Menu::difficulty(Difficulty::Hard);
        assert_eq!(m.selected(), 2);
        assert_eq!(m.handle(&FrameInput::confirm()), Some(MenuAction::SetDifficulty(Difficulty::Hard)));
    }

    #[test]
    fn quit_confirm_defaults_to_staying() {
        let mut m = Menu::quit_confirm();
        assert_eq!(m.handle(&FrameInput::confirm()), Some(MenuAction::Back));
        m.handle(&FrameInput::press(Direction::Right));
        assert_eq!(m.handle(&FrameInput::confirm()), Some(MenuAction::Quit));
    }

    #[test]
    fn text_entry_limits_and_filters() {
        let mut e = TextEntry::new(10);
        e.handle(&FrameInput::typed("Ana,Maria\n Lopez"));
        assert_eq!(e.value(), "AnaMaria L");
        assert!(!e.push('x'));
        e.handle(&FrameInput::backspace());
        assert_eq!(e.value(), "AnaMaria ");
    }

    #[test]
    fn empty_menu_is_inert() {
        let mut m = Menu::new("empty", Vec::new());
        m.select_next();
        m.select_prev();
        assert_eq!(m.handle(&FrameInput::confirm()), None);
    }
}
