//! Element capability interfaces
//!
//! An element is any hit-testable object. Capabilities are independent: an
//! element may implement none, one, or several, and the router only ever
//! calls the capability a given interaction needs. [`Element`] exposes each
//! capability as an optional accessor rather than one monolithic interface,
//! so hit tests can be parameterized by the capability they require.

use std::rc::Rc;

use super::focus::FocusManager;
use super::hit::{BatchRef, HitResult};
use crate::geometry::Point;
use crate::platform::{Button, Key};
use crate::shell::QuitSignal;

/// Capability a hit test is parameterized by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Enter/exit/click ([`MouseTarget`])
    Mouse,
    /// Hover motion ([`MouseMoveTarget`])
    MouseMove,
    /// Press-and-move ([`MouseDragTarget`])
    Drag,
    /// Wheel input ([`MouseScrollTarget`])
    Scroll,
    /// Mouse capture ([`MouseFocusTarget`])
    MouseFocus,
}

/// A hit-testable object, polymorphic over an optional set of capabilities
///
/// The default accessors all return `None`; implementors opt in to exactly
/// the interactions they support.
pub trait Element {
    /// Enter/exit/click handling
    fn mouse(&self) -> Option<&dyn MouseTarget> {
        None
    }

    /// Hover-motion handling
    fn mouse_move(&self) -> Option<&dyn MouseMoveTarget> {
        None
    }

    /// Drag handling
    fn drag(&self) -> Option<&dyn MouseDragTarget> {
        None
    }

    /// Wheel handling
    fn scroll(&self) -> Option<&dyn MouseScrollTarget> {
        None
    }

    /// Mouse-capture lifecycle notifications
    fn mouse_focus(&self) -> Option<&dyn MouseFocusTarget> {
        None
    }

    /// Whether this element implements `capability`
    ///
    /// Hit-test providers filter candidates on this when answering a
    /// parameterized query.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Mouse => self.mouse().is_some(),
            Capability::MouseMove => self.mouse_move().is_some(),
            Capability::Drag => self.drag().is_some(),
            Capability::Scroll => self.scroll().is_some(),
            Capability::MouseFocus => self.mouse_focus().is_some(),
        }
    }
}

/// Context handed to element callbacks
///
/// Lets element-driven side effects loop back into focus management (and
/// request shutdown) without any global router instance. The borrow lasts
/// only for the duration of one callback.
pub struct EventCtx<'a> {
    /// The focus manager, for claiming or releasing focus mid-callback
    pub focus: &'a mut FocusManager,
    /// The loop's quit signal
    pub quit: &'a QuitSignal,
}

impl EventCtx<'_> {
    /// Ask the loop to stop after the current iteration
    pub fn request_quit(&self) {
        self.quit.request();
    }
}

/// Enter/exit/click interactions
pub trait MouseTarget {
    /// The pointer started hovering this element
    fn mouse_enter(&self, _hit: &HitResult, _ctx: &mut EventCtx<'_>) {}

    /// The pointer stopped hovering this element
    fn mouse_exit(&self, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {}

    /// A button was pressed and released without the pointer leaving this
    /// element in between
    fn mouse_click(&self, button: Button, batch: &BatchRef, ctx: &mut EventCtx<'_>);
}

/// Hover-motion interactions
pub trait MouseMoveTarget {
    /// The pointer moved while hovering this element (and no drag claimed
    /// the motion)
    fn mouse_move(&self, pos: Point, batch: &BatchRef, ctx: &mut EventCtx<'_>);
}

/// Press-and-move interactions
///
/// While a drag is in progress the owner receives every pointer motion;
/// hover-move dispatch is suppressed until the button is released.
pub trait MouseDragTarget {
    /// A button went down over this element
    fn begin_drag(&self, _pos: Point, _button: Button, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {
    }

    /// The pointer moved while this element owns the press
    fn drag(&self, pos: Point, button: Button, batch: &BatchRef, ctx: &mut EventCtx<'_>);

    /// The owning button was released
    fn end_drag(&self, _pos: Point, _button: Button, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {}
}

/// Wheel interactions
pub trait MouseScrollTarget {
    /// Wheel movement over this element, in sign-normalized lines
    fn scroll(&self, delta: i32, batch: &BatchRef, ctx: &mut EventCtx<'_>);
}

/// Mouse-capture lifecycle notifications
pub trait MouseFocusTarget {
    /// Capture was granted (`true`) or released (`false`)
    fn focus_changed(&self, focused: bool);
}

/// Keyboard focus target
///
/// Keyboard targets are handed to the focus manager directly; nothing
/// hit-tests for them, so they need not be [`Element`]s.
pub trait KeyboardTarget {
    /// A key went down while this target held focus
    fn key_down(&self, _key: Key, _ctx: &mut EventCtx<'_>) {}

    /// A key went up while this target held focus
    fn key_up(&self, _key: Key, _ctx: &mut EventCtx<'_>) {}

    /// Committed text input
    fn text_input(&self, _text: &str, _ctx: &mut EventCtx<'_>) {}

    /// Focus was gained (`true`) or lost (`false`)
    fn focus_changed(&self, focused: bool);

    /// Called once per loop pass while this target holds *active* focus;
    /// the place for caret blink and selection upkeep
    fn update_selected(&self, _ctx: &mut EventCtx<'_>) {}
}
