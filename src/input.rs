//! Keyboard input state
//!
//! The host writes key-down/key-up into an `InputState`; the simulation only reads it.

use serde::{Deserialize, Serialize};

const KEY_COUNT: usize = 8;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Missile,
    /// Starts a game from the start/over screens
    Confirm,
    /// Spends the power meter
    Activate,
}

impl Key {
    /// Map a browser `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "KeyZ" => Some(Key::Fire),
            "KeyX" => Some(Key::Missile),
            "Enter" => Some(Key::Confirm),
            "Space" => Some(Key::Activate),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held state of every key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; KEY_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key down. Returns true only on an up -> down transition
    /// (auto-repeat while held returns false).
    pub fn press(&mut self, key: Key) -> bool {
        let was_down = std::mem::replace(&mut self.held[key.index()], true);
        !was_down
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Horizontal axis from the arrow keys (-1, 0, 1); both held cancel out
    pub fn horizontal(&self) -> f32 {
        axis(self.is_down(Key::Left), self.is_down(Key::Right))
    }

    /// Vertical axis in screen space (down is positive)
    pub fn vertical(&self) -> f32 {
        axis(self.is_down(Key::Up), self.is_down(Key::Down))
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_reports_only_transitions() {
        let mut input = InputState::new();
        assert!(input.press(Key::Confirm));
        assert!(!input.press(Key::Confirm)); // auto-repeat
        assert!(input.is_down(Key::Confirm));

        input.release(Key::Confirm);
        assert!(!input.is_down(Key::Confirm));
        assert!(input.press(Key::Confirm));
    }

    #[test]
    fn test_axes() {
        let mut input = InputState::new();
        input.press(Key::Left);
        input.press(Key::Down);
        assert_eq!(input.horizontal(), -1.0);
        assert_eq!(input.vertical(), 1.0);

        input.press(Key::Right);
        assert_eq!(input.horizontal(), 0.0);
    }

    #[test]
    fn test_browser_codes() {
        assert_eq!(Key::from_code("KeyZ"), Some(Key::Fire));
        assert_eq!(Key::from_code("Space"), Some(Key::Activate));
        assert_eq!(Key::from_code("Enter"), Some(Key::Confirm));
        assert_eq!(Key::from_code("KeyQ"), None);
    }
}
