//! Winit 输入事件适配器
//!
//! Maps winit window events onto [`InputEvent`]s.

use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::resources::input::{ButtonState, InputEvent, Key, MouseButton};

/// Wheel lines per scrolled pixel, so touchpads and wheels zoom alike.
const LINES_PER_PIXEL: f32 = 0.01;

fn key(physical_key: PhysicalKey) -> Option<Key> {
    match physical_key {
        PhysicalKey::Code(KeyCode::Escape) => Some(Key::Escape),
        PhysicalKey::Code(KeyCode::ArrowUp) => Some(Key::ArrowUp),
        PhysicalKey::Code(KeyCode::ArrowDown) => Some(Key::ArrowDown),
        PhysicalKey::Code(KeyCode::ArrowLeft) => Some(Key::ArrowLeft),
        PhysicalKey::Code(KeyCode::ArrowRight) => Some(Key::ArrowRight),
        _ => None,
    }
}

fn button(button: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as W;
    match button {
        W::Left => MouseButton::Left,
        W::Right => MouseButton::Right,
        W::Middle => MouseButton::Middle,
        W::Back => MouseButton::Other(3),
        W::Forward => MouseButton::Other(4),
        W::Other(id) => MouseButton::Other(id),
    }
}

fn state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

/// `None` for events the controls do not care about.
#[must_use]
pub fn translate(event: &WindowEvent) -> Option<InputEvent> {
    let translated = match event {
        WindowEvent::KeyboardInput { event, .. } => InputEvent::Key(key(event.physical_key)?, state(event.state)),
        WindowEvent::MouseInput { state: s, button: b, .. } => InputEvent::Button(button(*b), state(*s)),
        WindowEvent::CursorMoved { position, .. } => {
            InputEvent::CursorMoved(Vec2::new(position.x as f32, position.y as f32))
        }
        WindowEvent::CursorLeft { .. } => InputEvent::CursorLeft,
        WindowEvent::MouseWheel { delta, .. } => InputEvent::Scroll(match delta {
            MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
            MouseScrollDelta::PixelDelta(p) => Vec2::new(p.x as f32, p.y as f32) * LINES_PER_PIXEL,
        }),
        WindowEvent::Resized(size) => InputEvent::Resized {
            width: size.width,
            height: size.height,
        },
        _ => return None,
    };
    Some(translated)
}

/// Whether `event` is a fresh press of Escape.
#[must_use]
pub fn is_escape_pressed(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed
                && !event.repeat
                && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
    )
}
