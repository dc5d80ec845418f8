//! Window hosts and the window registry
//!
//! A window is an opaque render and hit-test surface owned by the windowing
//! collaborator. The loop needs only the small [`WindowHost`] surface: a
//! scale factor for unit conversion, the next scheduled repaint time, a
//! capability-parameterized hit test, a render entry point, and lifecycle
//! notifications. All of it runs on the loop thread, so hosts are shared as
//! `Rc<RefCell<dyn WindowHost>>`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::BoxError;
use crate::geometry::Point;
use crate::input::{Capability, HitResult};

/// Stable identifier for a registered window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u32);

/// The window surface consumed by the loop and the input router
pub trait WindowHost {
    /// Pixels per unit; raw pointer coordinates are divided by this
    fn scale_factor(&self) -> f32;

    /// Absolute monotonic time (ms) when this window next wants to repaint,
    /// or `None` when nothing is scheduled
    fn next_repaint(&self) -> Option<u64>;

    /// Topmost element at `pos` implementing `capability`
    ///
    /// A miss is the common case and is reported as [`HitResult::default`],
    /// never as an error.
    fn hit_test(&self, pos: Point, capability: Capability) -> HitResult;

    /// Render one frame at the loop's current time
    fn render(&mut self, now: u64) -> Result<(), BoxError>;

    /// The user asked to close this window
    fn close_requested(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// This window lost input focus (keyboard focus is already cleared)
    fn focus_lost(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// This window was moved
    fn moved(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// This window was resized
    fn resized(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Shared handle to a registered window host
pub type WindowRef = Rc<RefCell<dyn WindowHost>>;

/// Mapping from window id to host, owned by the shell
///
/// Windows register themselves on creation. An unknown id on a window-scoped
/// event is a programming error, not a recoverable condition.
#[derive(Default)]
pub struct WindowRegistry {
    windows: HashMap<WindowId, WindowRef>,
}

impl WindowRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a window under its id, replacing any previous host
    pub fn register(&mut self, id: WindowId, window: WindowRef) {
        self.windows.insert(id, window);
    }

    /// Removes a window, returning its host if it was registered
    pub fn remove(&mut self, id: WindowId) -> Option<WindowRef> {
        self.windows.remove(&id)
    }

    /// Looks up a window by id
    pub fn get(&self, id: WindowId) -> Option<WindowRef> {
        self.windows.get(&id).cloned()
    }

    /// Looks up a window that must exist
    ///
    /// Panics when the id is unknown: a window-scoped event for an
    /// unregistered window violates the registration invariant.
    pub fn expect(&self, id: WindowId) -> WindowRef {
        self.get(id)
            .unwrap_or_else(|| panic!("window {id:?} is not registered"))
    }

    /// The earliest scheduled repaint across all windows
    pub fn min_next_repaint(&self) -> Option<u64> {
        self.windows
            .values()
            .filter_map(|window| window.borrow().next_repaint())
            .min()
    }

    /// Snapshot of all registered windows
    pub fn entries(&self) -> Vec<(WindowId, WindowRef)> {
        self.windows
            .iter()
            .map(|(id, window)| (*id, Rc::clone(window)))
            .collect()
    }

    /// Number of registered windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no windows are registered
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
