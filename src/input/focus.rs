//! Keyboard and mouse focus arbitration
//!
//! At most one active keyboard focus, one default (fallback) keyboard focus,
//! and one mouse capture exist at a time. Key and text routing goes to the
//! active keyboard target when set, else the default; when neither exists
//! the events are dropped. Targets are compared by identity, and transitions
//! notify loss before gain.

use std::rc::Rc;

use super::targets::{Element, KeyboardTarget};

/// Owns the focus state and arbitrates transitions
#[derive(Default)]
pub struct FocusManager {
    active_keyboard: Option<Rc<dyn KeyboardTarget>>,
    default_keyboard: Option<Rc<dyn KeyboardTarget>>,
    active_mouse: Option<Rc<dyn Element>>,
}

impl FocusManager {
    /// Creates a manager with no targets
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves active keyboard focus to `target`, or clears it with `None`
    ///
    /// No-op when `target` is already active. Otherwise the previously
    /// routed-to target (active, or default when none was active) is
    /// notified of the loss, the focus swaps, and the newly routed-to target
    /// is notified of the gain. When the routed-to object does not actually
    /// change - clearing an active focus that *is* the default - neither
    /// notification fires.
    pub fn set_keyboard_focus(&mut self, target: Option<Rc<dyn KeyboardTarget>>) {
        if same_keyboard(&self.active_keyboard, &target) {
            return;
        }
        let prior = self.current_keyboard();
        let next = target.clone().or_else(|| self.default_keyboard.clone());
        let rerouted = !same_keyboard(&prior, &next);
        if rerouted && let Some(prior) = &prior {
            prior.focus_changed(false);
        }
        self.active_keyboard = target;
        if rerouted && let Some(next) = self.current_keyboard() {
            next.focus_changed(true);
        }
    }

    /// Replaces the fallback keyboard target without any notification
    ///
    /// The default is not itself made active; it only receives routing when
    /// no element claims focus explicitly.
    pub fn set_default_keyboard_focus(&mut self, target: Option<Rc<dyn KeyboardTarget>>) {
        self.default_keyboard = target;
    }

    /// Moves mouse capture to `target`, or releases it with `None`
    ///
    /// Independent of keyboard focus; same swap/notify protocol. The element
    /// is notified through its mouse-focus capability when it declares one.
    pub fn set_mouse_focus(&mut self, target: Option<Rc<dyn Element>>) {
        if same_element(&self.active_mouse, &target) {
            return;
        }
        if let Some(prior) = &self.active_mouse
            && let Some(focus) = prior.mouse_focus()
        {
            focus.focus_changed(false);
        }
        self.active_mouse = target;
        if let Some(next) = &self.active_mouse
            && let Some(focus) = next.mouse_focus()
        {
            focus.focus_changed(true);
        }
    }

    /// The explicitly focused keyboard target, if any
    pub fn active_keyboard(&self) -> Option<Rc<dyn KeyboardTarget>> {
        self.active_keyboard.clone()
    }

    /// The target key and text events route to: active if set, else default
    pub fn current_keyboard(&self) -> Option<Rc<dyn KeyboardTarget>> {
        self.active_keyboard
            .clone()
            .or_else(|| self.default_keyboard.clone())
    }

    /// The element holding mouse capture, if any
    pub fn active_mouse(&self) -> Option<Rc<dyn Element>> {
        self.active_mouse.clone()
    }
}

fn same_keyboard(a: &Option<Rc<dyn KeyboardTarget>>, b: &Option<Rc<dyn KeyboardTarget>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn same_element(a: &Option<Rc<dyn Element>>, b: &Option<Rc<dyn Element>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
