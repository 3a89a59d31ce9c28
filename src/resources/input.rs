//! Pointer and keyboard state for camera controls.
//!
//! Platform adapters translate window events into [`InputEvent`]s and feed
//! them to [`Input::apply`]. The scene host owns one [`Input`], keeps its
//! screen size in sync with the viewport and clears the per-frame deltas in
//! [`Input::end_frame`].

use std::hash::Hash;

use glam::Vec2;
use rustc_hash::FxHashSet;

/// Keys the orbit controls react to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A window event after platform translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Key(Key, ButtonState),
    Button(MouseButton, ButtonState),
    /// Cursor position in physical pixels.
    CursorMoved(Vec2),
    CursorLeft,
    /// Wheel movement in lines.
    Scroll(Vec2),
    Resized { width: u32, height: u32 },
}

/// Held set plus the subset that went down this frame.
#[derive(Debug, Clone)]
struct Held<T> {
    down: FxHashSet<T>,
    pressed: FxHashSet<T>,
}

impl<T: Copy + Eq + Hash> Held<T> {
    fn new() -> Self {
        Self {
            down: FxHashSet::default(),
            pressed: FxHashSet::default(),
        }
    }

    fn set(&mut self, item: T, state: ButtonState) {
        match state {
            // 按住不放时的重复事件不算新的按下
            ButtonState::Pressed => {
                if self.down.insert(item) {
                    self.pressed.insert(item);
                }
            }
            ButtonState::Released => {
                self.down.remove(&item);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Input {
    keys: Held<Key>,
    buttons: Held<MouseButton>,
    /// `None` while the cursor is outside the window.
    cursor: Option<Vec2>,
    cursor_delta: Vec2,
    scroll_delta: Vec2,
    screen_size: Vec2,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: Held::new(),
            buttons: Held::new(),
            cursor: None,
            cursor_delta: Vec2::ZERO,
            scroll_delta: Vec2::ZERO,
            screen_size: Vec2::ZERO,
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key, state) => self.keys.set(key, state),
            InputEvent::Button(button, state) => self.buttons.set(button, state),
            InputEvent::CursorMoved(position) => {
                // 光标刚进入窗口时没有位移
                if let Some(previous) = self.cursor {
                    self.cursor_delta += position - previous;
                }
                self.cursor = Some(position);
            }
            InputEvent::CursorLeft => self.cursor = None,
            InputEvent::Scroll(delta) => self.scroll_delta += delta,
            InputEvent::Resized { width, height } => self.set_screen_size(width, height),
        }
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    /// Drops this frame's presses and deltas. Held buttons stay held.
    pub fn end_frame(&mut self) {
        self.keys.pressed.clear();
        self.buttons.pressed.clear();
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    #[must_use]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys.down.contains(&key)
    }

    /// Whether `key` went down during the current frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys.pressed.contains(&key)
    }

    #[must_use]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons.down.contains(&button)
    }

    #[must_use]
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    #[must_use]
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    #[must_use]
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    #[must_use]
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cursor_position_has_no_delta() {
        let mut input = Input::new();
        input.apply(InputEvent::CursorMoved(Vec2::new(10.0, 10.0)));
        assert_eq!(input.cursor_delta(), Vec2::ZERO);

        input.apply(InputEvent::CursorMoved(Vec2::new(13.0, 6.0)));
        assert_eq!(input.cursor_delta(), Vec2::new(3.0, -4.0));

        input.apply(InputEvent::CursorLeft);
        input.apply(InputEvent::CursorMoved(Vec2::new(100.0, 100.0)));
        assert_eq!(input.cursor_delta(), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn press_lasts_one_frame_hold_persists() {
        let mut input = Input::new();
        input.apply(InputEvent::Key(Key::ArrowLeft, ButtonState::Pressed));
        assert!(input.key_pressed(Key::ArrowLeft));
        assert!(input.key_down(Key::ArrowLeft));

        input.end_frame();
        input.apply(InputEvent::Key(Key::ArrowLeft, ButtonState::Pressed));
        assert!(!input.key_pressed(Key::ArrowLeft));
        assert!(input.key_down(Key::ArrowLeft));

        input.apply(InputEvent::Key(Key::ArrowLeft, ButtonState::Released));
        assert!(!input.key_down(Key::ArrowLeft));
    }

    #[test]
    fn scroll_accumulates_until_end_of_frame() {
        let mut input = Input::new();
        input.apply(InputEvent::Scroll(Vec2::new(0.0, 1.0)));
        input.apply(InputEvent::Scroll(Vec2::new(0.0, 2.0)));
        assert_eq!(input.scroll_delta(), Vec2::new(0.0, 3.0));
        input.end_frame();
        assert_eq!(input.scroll_delta(), Vec2::ZERO);
    }
}
