//! Pointer state machine and input facade
//!
//! One router exists per shell. It tracks which window contains the pointer,
//! the pointer position in unit space, the hovered element, and the element
//! owning an in-progress button press, and dispatches the resulting
//! enter/exit/move/drag/click/scroll interactions. Keyboard events route
//! through the owned [`FocusManager`].
//!
//! Hover transitions are deliberately not computed on every raw motion
//! event: [`InputRouter::update`] runs once per loop pass after the event
//! drain, so enter/exit notifications fire at most once per frame no matter
//! how many motion events arrived.

use tracing::trace;

use super::focus::FocusManager;
use super::hit::HitResult;
use super::targets::{Capability, EventCtx};
use crate::geometry::Point;
use crate::platform::{Button, Key};
use crate::shell::QuitSignal;
use crate::window::{WindowId, WindowRef};

/// Routes translated platform events to elements and focus targets
pub struct InputRouter {
    over_window: Option<(WindowId, WindowRef)>,
    position: Point,
    hovering: HitResult,
    pressed: HitResult,
    pressed_button: Option<Button>,
    focus: FocusManager,
    quit: QuitSignal,
}

impl InputRouter {
    /// Creates a router with no pointer window and empty focus state
    pub fn new(quit: QuitSignal) -> Self {
        Self {
            over_window: None,
            position: Point::default(),
            hovering: HitResult::default(),
            pressed: HitResult::default(),
            pressed_button: None,
            focus: FocusManager::new(),
            quit,
        }
    }

    /// Current pointer position in unit space
    pub fn position(&self) -> Point {
        self.position
    }

    /// The button currently held down, if any
    pub fn pressed_button(&self) -> Option<Button> {
        self.pressed_button
    }

    /// The focus manager
    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    /// The focus manager, mutably
    pub fn focus_mut(&mut self) -> &mut FocusManager {
        &mut self.focus
    }

    /// Hit test the pointer-containing window at the current position
    ///
    /// Misses - including "no window contains the pointer" - are empty
    /// results, not errors.
    pub fn hit_test(&self, capability: Capability) -> HitResult {
        match &self.over_window {
            Some((_, window)) => window.borrow().hit_test(self.position, capability),
            None => HitResult::default(),
        }
    }

    /// Pointer motion in raw window coordinates
    ///
    /// Converts to unit space through the containing window's scale factor
    /// and updates the stored position. While a button is down and the
    /// press-owner can drag, the motion goes to the drag in progress;
    /// otherwise the hovered element's move handler (if any) runs. No-op
    /// when no window contains the pointer.
    pub fn mouse_move(&mut self, raw_x: f32, raw_y: f32) {
        let Some((_, window)) = self.over_window.clone() else {
            return;
        };
        let scale = window.borrow().scale_factor();
        self.position = Point::new(raw_x / scale, raw_y / scale);
        let position = self.position;

        if let Some(button) = self.pressed_button
            && let Some(owner) = self.pressed.target.clone()
            && let Some(drag) = owner.element.drag()
        {
            let mut ctx = EventCtx {
                focus: &mut self.focus,
                quit: &self.quit,
            };
            drag.drag(position, button, &owner.batch, &mut ctx);
            return;
        }

        if let Some(hover) = self.hovering.target.clone()
            && let Some(mover) = hover.element.mouse_move()
        {
            let mut ctx = EventCtx {
                focus: &mut self.focus,
                quit: &self.quit,
            };
            mover.mouse_move(position, &hover.batch, &mut ctx);
        }
    }

    /// A button went down
    ///
    /// Ignored while another button is already held; only one concurrent
    /// press is tracked. A primary press abandons any active keyboard focus
    /// and releases mouse capture unless the capture owner (or its batch
    /// subtree) is under the pointer. The hovered element becomes the
    /// press-owner and, when drag-capable, its drag begins.
    pub fn mouse_down(&mut self, button: Button) {
        if self.pressed_button.is_some() {
            return;
        }

        if button.is_primary() {
            if self.focus.active_keyboard().is_some() {
                self.focus.set_keyboard_focus(None);
            }
            if let Some(active) = self.focus.active_mouse() {
                let hit = self.hit_test(Capability::MouseFocus);
                let inside = match &hit.target {
                    Some(target) => {
                        std::rc::Rc::ptr_eq(&target.element, &active)
                            || target.batch.has_owner(&active)
                    }
                    None => false,
                };
                if !inside {
                    self.focus.set_mouse_focus(None);
                }
            }
        }

        self.pressed = self.hovering.clone();
        self.pressed_button = Some(button);

        if let Some(owner) = self.pressed.target.clone()
            && let Some(drag) = owner.element.drag()
        {
            let position = self.position;
            let mut ctx = EventCtx {
                focus: &mut self.focus,
                quit: &self.quit,
            };
            drag.begin_drag(position, button, &owner.batch, &mut ctx);
        }
    }

    /// A button went up
    ///
    /// Ignored unless it matches the held button. Ends the drag when the
    /// press-owner had one, then fires a click iff the pointer never left
    /// the press-owner (hover target still equals press-owner). Press state
    /// clears unconditionally.
    pub fn mouse_up(&mut self, button: Button) {
        if self.pressed_button != Some(button) {
            return;
        }

        if let Some(owner) = self.pressed.target.clone() {
            if let Some(drag) = owner.element.drag() {
                let position = self.position;
                let mut ctx = EventCtx {
                    focus: &mut self.focus,
                    quit: &self.quit,
                };
                drag.end_drag(position, button, &owner.batch, &mut ctx);
            }
            if self.pressed.same_target(&self.hovering)
                && let Some(mouse) = owner.element.mouse()
            {
                let mut ctx = EventCtx {
                    focus: &mut self.focus,
                    quit: &self.quit,
                };
                mouse.mouse_click(button, &owner.batch, &mut ctx);
            }
        }

        self.pressed_button = None;
        self.pressed = HitResult::default();
    }

    /// Wheel movement, already sign-normalized by the loop
    ///
    /// Hit tests for a scroll-capable element under the pointer; nothing
    /// found means nothing happens.
    pub fn mouse_scroll(&mut self, delta: i32) {
        let hit = self.hit_test(Capability::Scroll);
        if let Some(target) = hit.target
            && let Some(scroll) = target.element.scroll()
        {
            let mut ctx = EventCtx {
                focus: &mut self.focus,
                quit: &self.quit,
            };
            scroll.scroll(delta, &target.batch, &mut ctx);
        }
    }

    /// Once per loop pass, after the event drain
    ///
    /// Re-hit-tests for the hovered element and fires exit-then-enter when
    /// it changed, then gives the active keyboard focus its periodic
    /// selection update.
    pub fn update(&mut self) {
        let current = self.hit_test(Capability::Mouse);
        if !current.same_target(&self.hovering) {
            if let Some(old) = self.hovering.target.clone()
                && let Some(mouse) = old.element.mouse()
            {
                let mut ctx = EventCtx {
                    focus: &mut self.focus,
                    quit: &self.quit,
                };
                mouse.mouse_exit(&old.batch, &mut ctx);
            }
            self.hovering = current;
            if let Some(new) = self.hovering.target.clone()
                && let Some(mouse) = new.element.mouse()
            {
                let hit = self.hovering.clone();
                let mut ctx = EventCtx {
                    focus: &mut self.focus,
                    quit: &self.quit,
                };
                mouse.mouse_enter(&hit, &mut ctx);
            }
        }

        if let Some(active) = self.focus.active_keyboard() {
            let mut ctx = EventCtx {
                focus: &mut self.focus,
                quit: &self.quit,
            };
            active.update_selected(&mut ctx);
        }
    }

    /// The pointer entered `window`
    pub fn mouse_enter_window(&mut self, id: WindowId, window: WindowRef) {
        trace!(window = ?id, "pointer entered window");
        self.over_window = Some((id, window));
    }

    /// The pointer left `window`; stale exits for other windows are ignored
    pub fn mouse_exit_window(&mut self, id: WindowId) {
        if self.over_window.as_ref().is_some_and(|(over, _)| *over == id) {
            trace!(window = ?id, "pointer left window");
            self.over_window = None;
        }
    }

    /// A key went down; routed to the current keyboard focus, dropped when
    /// no target exists
    pub fn key_down(&mut self, key: Key) {
        if let Some(target) = self.focus.current_keyboard() {
            let mut ctx = EventCtx {
                focus: &mut self.focus,
                quit: &self.quit,
            };
            target.key_down(key, &mut ctx);
        }
    }

    /// A key went up; routed like [`InputRouter::key_down`]
    pub fn key_up(&mut self, key: Key) {
        if let Some(target) = self.focus.current_keyboard() {
            let mut ctx = EventCtx {
                focus: &mut self.focus,
                quit: &self.quit,
            };
            target.key_up(key, &mut ctx);
        }
    }

    /// Committed text input; routed like [`InputRouter::key_down`]
    pub fn text_input(&mut self, text: &str) {
        if let Some(target) = self.focus.current_keyboard() {
            let mut ctx = EventCtx {
                focus: &mut self.focus,
                quit: &self.quit,
            };
            target.text_input(text, &mut ctx);
        }
    }
}
