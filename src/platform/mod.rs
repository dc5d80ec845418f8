//! Platform event vocabulary and the consumed event-source interface
//!
//! The platform event source is an external collaborator: something that owns
//! the OS connection and can block on it with a deadline, poll it without
//! blocking, and report a monotonic millisecond clock. The loop consumes that
//! interface through [`EventSource`]; it never owns platform bootstrap or
//! window creation.
//!
//! [`ChannelSource`] is the reference implementation, backed by a standard
//! mpsc channel so any thread (including a real windowing backend pumping its
//! own loop) can feed events in. The `winit` submodule translates winit
//! window events into this vocabulary.

mod channel;
pub mod winit;

use std::sync::Arc;
use std::time::Duration;

pub use channel::ChannelSource;

use crate::window::WindowId;

bitflags::bitflags! {
    /// Keyboard modifier set
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl Button {
    /// The primary button, which claims keyboard focus and mouse capture
    pub fn is_primary(self) -> bool {
        matches!(self, Self::Left)
    }
}

/// Key code, normalized across backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,

    // Editing and whitespace
    Space,
    Enter,
    Escape,
    Backspace,
    Delete,
    Insert,
    Tab,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Left,
    Right,
    Up,
    Down,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Anything the backend reports that has no normalized code
    Other,
}

/// A key transition with the modifier set held at the time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl Key {
    /// Create a key with no modifiers held
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::empty(),
        }
    }
}

/// Window-scoped platform event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEventKind {
    /// The pointer entered this window
    PointerEntered,
    /// The pointer left this window
    PointerLeft,
    /// The user asked to close this window
    CloseRequested,
    /// This window lost input focus
    FocusLost,
    /// This window was moved
    Moved,
    /// This window was resized
    Resized,
}

/// A low-level platform event
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Process-wide quit request
    Quit,
    /// A mouse button went down
    MouseButtonDown { button: Button },
    /// A mouse button went up
    MouseButtonUp { button: Button },
    /// Wheel movement in lines; `flipped` marks platforms that report the
    /// wheel axis inverted
    MouseWheel { delta: i32, flipped: bool },
    /// Pointer motion in raw (physical pixel) window coordinates
    MouseMotion { x: f32, y: f32 },
    /// A key went down
    KeyDown(Key),
    /// A key went up
    KeyUp(Key),
    /// Committed text input (UTF-8)
    TextInput(String),
    /// An event scoped to one window
    Window {
        window: WindowId,
        event: WindowEventKind,
    },
    /// Synthetic event injected to unblock the loop's wait so queued
    /// cross-thread callbacks run promptly
    Wake,
}

/// Wakes the loop's blocking wait from any thread
pub trait LoopWaker: Send + Sync {
    /// Inject a [`PlatformEvent::Wake`] into the event stream
    fn wake(&self);
}

/// The platform event source consumed by the loop
pub trait EventSource {
    /// Block until an event arrives or the timeout elapses
    fn wait_timeout(&mut self, timeout: Duration) -> Option<PlatformEvent>;

    /// Take the next already-queued event without blocking
    fn poll(&mut self) -> Option<PlatformEvent>;

    /// Monotonic milliseconds since an arbitrary epoch
    fn now(&self) -> u64;

    /// A handle that can unblock [`EventSource::wait_timeout`] from any thread
    fn waker(&self) -> Arc<dyn LoopWaker>;
}
