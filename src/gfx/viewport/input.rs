//! Platform-independent input events
//!
//! The controller only understands these semantic events. [`InputTranslator`]
//! turns winit window events into them, tracking the cursor position because
//! winit reports button presses without one.

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Keys the controller reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Run/pause toggle (Space)
    ToggleRun,
    Escape,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// One discrete input event, positions in physical screen pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Close,
    KeyDown(Key),
    KeyUp(Key),
    PointerMove { x: i32, y: i32 },
    PointerDown { button: PointerButton, x: i32, y: i32 },
    PointerUp { button: PointerButton, x: i32, y: i32 },
    Scroll(ScrollDirection),
}

pub fn key_from_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Space => Key::ToggleRun,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

pub fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

/// Direction of a wheel delta; `None` for a purely horizontal or empty one
pub fn scroll_direction(delta: MouseScrollDelta) -> Option<ScrollDirection> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => y,
    };
    if y > 0.0 {
        Some(ScrollDirection::Up)
    } else if y < 0.0 {
        Some(ScrollDirection::Down)
    } else {
        None
    }
}

/// Converts winit window events into [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputTranslator {
    cursor: (i32, i32),
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::Close),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let key = key_from_code(*code);
                Some(match state {
                    ElementState::Pressed => InputEvent::KeyDown(key),
                    ElementState::Released => InputEvent::KeyUp(key),
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x.round() as i32, position.y.round() as i32);
                Some(InputEvent::PointerMove {
                    x: self.cursor.0,
                    y: self.cursor.1,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = pointer_button(*button);
                let (x, y) = self.cursor;
                Some(match state {
                    ElementState::Pressed => InputEvent::PointerDown { button, x, y },
                    ElementState::Released => InputEvent::PointerUp { button, x, y },
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                scroll_direction(*delta).map(InputEvent::Scroll)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from_code(KeyCode::Space), Key::ToggleRun);
        assert_eq!(key_from_code(KeyCode::Escape), Key::Escape);
        assert_eq!(key_from_code(KeyCode::KeyA), Key::Other);
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(pointer_button(MouseButton::Left), PointerButton::Primary);
        assert_eq!(pointer_button(MouseButton::Middle), PointerButton::Middle);
        assert_eq!(pointer_button(MouseButton::Right), PointerButton::Secondary);
        assert_eq!(pointer_button(MouseButton::Back), PointerButton::Other);
    }

    #[test]
    fn test_scroll_direction() {
        assert_eq!(
            scroll_direction(MouseScrollDelta::LineDelta(0.0, 1.0)),
            Some(ScrollDirection::Up)
        );
        assert_eq!(
            scroll_direction(MouseScrollDelta::LineDelta(0.0, -2.0)),
            Some(ScrollDirection::Down)
        );
        assert_eq!(
            scroll_direction(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 12.5))),
            Some(ScrollDirection::Up)
        );
        assert_eq!(scroll_direction(MouseScrollDelta::LineDelta(3.0, 0.0)), None);
    }

    #[test]
    fn test_translate_close() {
        let mut translator = InputTranslator::new();
        assert_eq!(
            translator.translate(&WindowEvent::CloseRequested),
            Some(InputEvent::Close)
        );
        assert_eq!(translator.translate(&WindowEvent::Focused(true)), None);
    }
}
