//! Winit event translation
//!
//! Turns `winit` window events into the crate's [`PlatformEvent`] vocabulary.
//! The collector is stateful because winit reports keyboard modifiers as a
//! separate event stream; the current modifier set is folded into every key
//! event. Window creation and the OS loop itself stay with the embedder -
//! this module only translates what arrives.

use tracing::trace;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, WindowAttributes};

use super::{Button, Key, KeyCode, Modifiers, PlatformEvent, WindowEventKind};
use crate::config::{InputConfig, WindowConfig};
use crate::window::WindowId;

/// Translates winit window events into platform events
pub struct WinitCollector {
    mods: Modifiers,
    wheel_line_px: f32,
}

impl WinitCollector {
    /// Creates a collector with default wheel translation
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    /// Creates a collector using the configured wheel line size
    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            mods: Modifiers::empty(),
            wheel_line_px: config.wheel_line_px,
        }
    }

    /// The modifier set as of the last event seen
    pub fn modifiers(&self) -> Modifiers {
        self.mods
    }

    /// Translate one winit window event
    ///
    /// `window` is the registry id the embedder assigned to the winit window
    /// the event arrived on. A single input event can produce more than one
    /// platform event (a printable key press yields both a key-down and a
    /// text-input event), hence the `Vec`.
    pub fn handle_window_event(
        &mut self,
        window: WindowId,
        event: &WindowEvent,
    ) -> Vec<PlatformEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                vec![PlatformEvent::MouseMotion {
                    x: position.x as f32,
                    y: position.y as f32,
                }]
            }

            WindowEvent::CursorEntered { .. } => {
                vec![PlatformEvent::Window {
                    window,
                    event: WindowEventKind::PointerEntered,
                }]
            }

            WindowEvent::CursorLeft { .. } => {
                vec![PlatformEvent::Window {
                    window,
                    event: WindowEventKind::PointerLeft,
                }]
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = translate_button(*button) else {
                    trace!(?button, "ignoring unmapped mouse button");
                    return Vec::new();
                };
                match state {
                    ElementState::Pressed => vec![PlatformEvent::MouseButtonDown { button }],
                    ElementState::Released => vec![PlatformEvent::MouseButtonUp { button }],
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
                    MouseScrollDelta::PixelDelta(pos) => {
                        (pos.y as f32 / self.wheel_line_px).round() as i32
                    }
                };
                if lines == 0 {
                    return Vec::new();
                }
                // winit never reports a pre-flipped wheel axis
                vec![PlatformEvent::MouseWheel {
                    delta: lines,
                    flipped: false,
                }]
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                let mut mods = Modifiers::empty();
                mods.set(Modifiers::SHIFT, state.shift_key());
                mods.set(Modifiers::CTRL, state.control_key());
                mods.set(Modifiers::ALT, state.alt_key());
                mods.set(Modifiers::META, state.super_key());
                self.mods = mods;
                Vec::new()
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let code = match event.physical_key {
                    PhysicalKey::Code(code) => translate_key(code),
                    PhysicalKey::Unidentified(_) => KeyCode::Other,
                };
                let key = Key {
                    code,
                    mods: self.mods,
                };
                match event.state {
                    ElementState::Pressed => {
                        let mut out = vec![PlatformEvent::KeyDown(key)];
                        // Control chords never reach text input
                        if !self.mods.intersects(Modifiers::CTRL | Modifiers::META)
                            && let Some(text) = &event.text
                        {
                            out.push(PlatformEvent::TextInput(text.to_string()));
                        }
                        out
                    }
                    ElementState::Released => vec![PlatformEvent::KeyUp(key)],
                }
            }

            WindowEvent::CloseRequested => {
                vec![PlatformEvent::Window {
                    window,
                    event: WindowEventKind::CloseRequested,
                }]
            }

            WindowEvent::Focused(false) => {
                vec![PlatformEvent::Window {
                    window,
                    event: WindowEventKind::FocusLost,
                }]
            }

            WindowEvent::Moved(_) => {
                vec![PlatformEvent::Window {
                    window,
                    event: WindowEventKind::Moved,
                }]
            }

            WindowEvent::Resized(_) => {
                vec![PlatformEvent::Window {
                    window,
                    event: WindowEventKind::Resized,
                }]
            }

            other => {
                trace!(event = ?other, "ignoring untranslated window event");
                Vec::new()
            }
        }
    }
}

impl Default for WinitCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates winit window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated);

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attrs
}

fn translate_button(button: winit::event::MouseButton) -> Option<Button> {
    use winit::event::MouseButton as WB;
    match button {
        WB::Left => Some(Button::Left),
        WB::Right => Some(Button::Right),
        WB::Middle => Some(Button::Middle),
        WB::Back => Some(Button::Back),
        WB::Forward => Some(Button::Forward),
        WB::Other(_) => None,
    }
}

fn translate_key(key: winit::keyboard::KeyCode) -> KeyCode {
    use winit::keyboard::KeyCode as WK;
    match key {
        WK::KeyA => KeyCode::A,
        WK::KeyB => KeyCode::B,
        WK::KeyC => KeyCode::C,
        WK::KeyD => KeyCode::D,
        WK::KeyE => KeyCode::E,
        WK::KeyF => KeyCode::F,
        WK::KeyG => KeyCode::G,
        WK::KeyH => KeyCode::H,
        WK::KeyI => KeyCode::I,
        WK::KeyJ => KeyCode::J,
        WK::KeyK => KeyCode::K,
        WK::KeyL => KeyCode::L,
        WK::KeyM => KeyCode::M,
        WK::KeyN => KeyCode::N,
        WK::KeyO => KeyCode::O,
        WK::KeyP => KeyCode::P,
        WK::KeyQ => KeyCode::Q,
        WK::KeyR => KeyCode::R,
        WK::KeyS => KeyCode::S,
        WK::KeyT => KeyCode::T,
        WK::KeyU => KeyCode::U,
        WK::KeyV => KeyCode::V,
        WK::KeyW => KeyCode::W,
        WK::KeyX => KeyCode::X,
        WK::KeyY => KeyCode::Y,
        WK::KeyZ => KeyCode::Z,

        WK::Digit0 => KeyCode::Num0,
        WK::Digit1 => KeyCode::Num1,
        WK::Digit2 => KeyCode::Num2,
        WK::Digit3 => KeyCode::Num3,
        WK::Digit4 => KeyCode::Num4,
        WK::Digit5 => KeyCode::Num5,
        WK::Digit6 => KeyCode::Num6,
        WK::Digit7 => KeyCode::Num7,
        WK::Digit8 => KeyCode::Num8,
        WK::Digit9 => KeyCode::Num9,

        WK::Space => KeyCode::Space,
        WK::Enter => KeyCode::Enter,
        WK::Escape => KeyCode::Escape,
        WK::Backspace => KeyCode::Backspace,
        WK::Delete => KeyCode::Delete,
        WK::Insert => KeyCode::Insert,
        WK::Tab => KeyCode::Tab,

        WK::Home => KeyCode::Home,
        WK::End => KeyCode::End,
        WK::PageUp => KeyCode::PageUp,
        WK::PageDown => KeyCode::PageDown,
        WK::ArrowLeft => KeyCode::Left,
        WK::ArrowRight => KeyCode::Right,
        WK::ArrowUp => KeyCode::Up,
        WK::ArrowDown => KeyCode::Down,

        WK::F1 => KeyCode::F1,
        WK::F2 => KeyCode::F2,
        WK::F3 => KeyCode::F3,
        WK::F4 => KeyCode::F4,
        WK::F5 => KeyCode::F5,
        WK::F6 => KeyCode::F6,
        WK::F7 => KeyCode::F7,
        WK::F8 => KeyCode::F8,
        WK::F9 => KeyCode::F9,
        WK::F10 => KeyCode::F10,
        WK::F11 => KeyCode::F11,
        WK::F12 => KeyCode::F12,

        _ => KeyCode::Other,
    }
}
