//! Input routing system
//!
//! Turns translated platform events into targeted element interactions:
//! - Tracks the pointer position, the hovered element, and the element
//!   owning an in-progress button press or drag
//! - Arbitrates keyboard focus, the default focus fallback, and mouse
//!   capture, with loss/gain lifecycle notifications
//! - Hit-tests elements by the capability an interaction needs, never
//!   assuming an element implements more than it declares
//!
//! # Architecture
//!
//! ```text
//! PlatformEvent (shell) → InputRouter ──→ hit test (WindowHost)
//!                              │
//!                              ├──→ capability targets (enter/exit/drag/click/scroll)
//!                              │            │
//!                              └──→ FocusManager ←── EventCtx (element side effects)
//! ```
//!
//! Element callbacks receive an [`EventCtx`] borrowing the [`FocusManager`],
//! so an element can claim or release focus from inside its own handler
//! without any global router instance.

mod focus;
mod hit;
mod router;
mod targets;

pub use focus::FocusManager;
pub use hit::{BatchRef, HitResult, HitTarget, RenderBatch};
pub use router::InputRouter;
pub use targets::{
    Capability, Element, EventCtx, KeyboardTarget, MouseDragTarget, MouseFocusTarget,
    MouseMoveTarget, MouseScrollTarget, MouseTarget,
};
