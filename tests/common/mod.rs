//! Shared fakes for the integration suite
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tide_pool::error::{BoxError, Fault, FaultSink};
use tide_pool::geometry::{Point, Rect};
use tide_pool::input::{
    BatchRef, Capability, Element, EventCtx, HitResult, KeyboardTarget, MouseDragTarget,
    MouseFocusTarget, MouseMoveTarget, MouseScrollTarget, MouseTarget, RenderBatch,
};
use tide_pool::platform::{Button, EventSource, Key, LoopWaker, PlatformEvent};
use tide_pool::window::{WindowHost, WindowRef};

/// Chronological log shared by all fakes in one test
pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

/// Element fake that records every capability callback it receives
///
/// Starts with only the mouse (enter/exit/click) capability; opt in to the
/// rest with the `with_*` builders before wrapping in `Rc`.
pub struct TestElement {
    pub name: &'static str,
    pub log: Log,
    mouse: bool,
    moves: bool,
    drags: bool,
    scrolls: bool,
    focusable: bool,
}

impl TestElement {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            mouse: true,
            moves: false,
            drags: false,
            scrolls: false,
            focusable: false,
        }
    }

    pub fn with_moves(mut self) -> Self {
        self.moves = true;
        self
    }

    pub fn with_drag(mut self) -> Self {
        self.drags = true;
        self
    }

    pub fn with_scroll(mut self) -> Self {
        self.scrolls = true;
        self
    }

    pub fn with_mouse_focus(mut self) -> Self {
        self.focusable = true;
        self
    }

    fn push(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

impl Element for TestElement {
    fn mouse(&self) -> Option<&dyn MouseTarget> {
        if self.mouse { Some(self) } else { None }
    }

    fn mouse_move(&self) -> Option<&dyn MouseMoveTarget> {
        if self.moves { Some(self) } else { None }
    }

    fn drag(&self) -> Option<&dyn MouseDragTarget> {
        if self.drags { Some(self) } else { None }
    }

    fn scroll(&self) -> Option<&dyn MouseScrollTarget> {
        if self.scrolls { Some(self) } else { None }
    }

    fn mouse_focus(&self) -> Option<&dyn MouseFocusTarget> {
        if self.focusable { Some(self) } else { None }
    }
}

impl MouseTarget for TestElement {
    fn mouse_enter(&self, _hit: &HitResult, _ctx: &mut EventCtx<'_>) {
        self.push(format!("enter {}", self.name));
    }

    fn mouse_exit(&self, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {
        self.push(format!("exit {}", self.name));
    }

    fn mouse_click(&self, button: Button, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {
        self.push(format!("click {} {:?}", self.name, button));
    }
}

impl MouseMoveTarget for TestElement {
    fn mouse_move(&self, pos: Point, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {
        self.push(format!("move {} {},{}", self.name, pos.x, pos.y));
    }
}

impl MouseDragTarget for TestElement {
    fn begin_drag(&self, pos: Point, button: Button, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {
        self.push(format!("begin {} {:?} {},{}", self.name, button, pos.x, pos.y));
    }

    fn drag(&self, pos: Point, button: Button, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {
        self.push(format!("drag {} {:?} {},{}", self.name, button, pos.x, pos.y));
    }

    fn end_drag(&self, pos: Point, button: Button, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {
        self.push(format!("end {} {:?} {},{}", self.name, button, pos.x, pos.y));
    }
}

impl MouseScrollTarget for TestElement {
    fn scroll(&self, delta: i32, _batch: &BatchRef, _ctx: &mut EventCtx<'_>) {
        self.push(format!("scroll {} {}", self.name, delta));
    }
}

impl MouseFocusTarget for TestElement {
    fn focus_changed(&self, focused: bool) {
        self.push(format!("mouse-focus {} {}", self.name, focused));
    }
}

/// Keyboard focus fake recording routing and lifecycle
pub struct TestKeyboard {
    pub name: &'static str,
    pub log: Log,
}

impl TestKeyboard {
    pub fn new(name: &'static str, log: &Log) -> Rc<Self> {
        Rc::new(Self {
            name,
            log: log.clone(),
        })
    }

    fn push(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

impl KeyboardTarget for TestKeyboard {
    fn key_down(&self, key: Key, _ctx: &mut EventCtx<'_>) {
        self.push(format!("key-down {} {:?}", self.name, key.code));
    }

    fn key_up(&self, key: Key, _ctx: &mut EventCtx<'_>) {
        self.push(format!("key-up {} {:?}", self.name, key.code));
    }

    fn text_input(&self, text: &str, _ctx: &mut EventCtx<'_>) {
        self.push(format!("text {} {}", self.name, text));
    }

    fn focus_changed(&self, focused: bool) {
        self.push(format!("focus {} {}", self.name, focused));
    }

    fn update_selected(&self, _ctx: &mut EventCtx<'_>) {
        self.push(format!("update-selected {}", self.name));
    }
}

/// Element whose click claims keyboard focus through the callback context
pub struct FocusClaimingElement {
    pub name: &'static str,
    pub log: Log,
    pub keyboard: Rc<TestKeyboard>,
}

impl FocusClaimingElement {
    pub fn new(name: &'static str, log: &Log, keyboard: Rc<TestKeyboard>) -> Self {
        Self {
            name,
            log: log.clone(),
            keyboard,
        }
    }
}

impl Element for FocusClaimingElement {
    fn mouse(&self) -> Option<&dyn MouseTarget> {
        Some(self)
    }
}

impl MouseTarget for FocusClaimingElement {
    fn mouse_click(&self, _button: Button, _batch: &BatchRef, ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push(format!("click {}", self.name));
        ctx.focus.set_keyboard_focus(Some(self.keyboard.clone()));
    }
}

/// Render batch fake with an explicit owner list for subtree checks
pub struct TestBatch {
    owners: Vec<Rc<dyn Element>>,
}

impl TestBatch {
    /// A batch owned by nothing
    pub fn detached() -> BatchRef {
        Rc::new(Self { owners: Vec::new() })
    }

    /// A batch whose parent chain contains `owners`
    pub fn owned_by(owners: &[&Rc<dyn Element>]) -> BatchRef {
        Rc::new(Self {
            owners: owners.iter().map(|o| Rc::clone(o)).collect(),
        })
    }
}

impl RenderBatch for TestBatch {
    fn has_owner(&self, element: &Rc<dyn Element>) -> bool {
        self.owners.iter().any(|owner| Rc::ptr_eq(owner, element))
    }
}

/// One hit-testable entry in a window's scene
pub struct SceneEntry {
    pub rect: Rect,
    pub element: Rc<dyn Element>,
    pub batch: BatchRef,
}

/// Window host fake with a flat scene list and recorded lifecycle
///
/// Hit tests return the topmost (last pushed) entry whose rectangle contains
/// the query point and whose element supports the requested capability.
pub struct TestWindow {
    pub scale: f32,
    pub next_repaint: Cell<Option<u64>>,
    pub scene: RefCell<Vec<SceneEntry>>,
    pub log: Log,
    pub fail_render: Cell<bool>,
}

impl TestWindow {
    pub fn new(log: &Log) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            scale: 1.0,
            next_repaint: Cell::new(None),
            scene: RefCell::new(Vec::new()),
            log: log.clone(),
            fail_render: Cell::new(false),
        }))
    }

    pub fn with_scale(log: &Log, scale: f32) -> Rc<RefCell<Self>> {
        let window = Self::new(log);
        window.borrow_mut().scale = scale;
        window
    }

    pub fn place(&self, rect: Rect, element: Rc<dyn Element>, batch: BatchRef) {
        self.scene.borrow_mut().push(SceneEntry {
            rect,
            element,
            batch,
        });
    }
}

impl WindowHost for TestWindow {
    fn scale_factor(&self) -> f32 {
        self.scale
    }

    fn next_repaint(&self) -> Option<u64> {
        self.next_repaint.get()
    }

    fn hit_test(&self, pos: Point, capability: Capability) -> HitResult {
        for entry in self.scene.borrow().iter().rev() {
            if entry.rect.contains(pos) && entry.element.supports(capability) {
                return HitResult::hit(
                    Rc::clone(&entry.element),
                    Rc::clone(&entry.batch),
                    entry.rect,
                );
            }
        }
        HitResult::miss()
    }

    fn render(&mut self, now: u64) -> Result<(), BoxError> {
        if self.fail_render.get() {
            return Err("render exploded".into());
        }
        self.log.borrow_mut().push(format!("render@{now}"));
        Ok(())
    }

    fn close_requested(&mut self) -> Result<(), BoxError> {
        self.log.borrow_mut().push("close".to_string());
        Ok(())
    }

    fn focus_lost(&mut self) -> Result<(), BoxError> {
        self.log.borrow_mut().push("focus-lost".to_string());
        Ok(())
    }

    fn moved(&mut self) -> Result<(), BoxError> {
        self.log.borrow_mut().push("moved".to_string());
        Ok(())
    }

    fn resized(&mut self) -> Result<(), BoxError> {
        self.log.borrow_mut().push("resized".to_string());
        Ok(())
    }
}

/// Upcast a concrete test window to the registry's host type
pub fn as_host(window: &Rc<RefCell<TestWindow>>) -> WindowRef {
    window.clone()
}

/// Waker that only counts wake requests
pub struct CountingWaker {
    count: Arc<AtomicUsize>,
}

impl CountingWaker {
    pub fn new() -> (Arc<Self>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                count: count.clone(),
            }),
            count,
        )
    }
}

impl LoopWaker for CountingWaker {
    fn wake(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scripted event source for driving the shell deterministically
///
/// The clock is virtual: a timed-out wait advances it by the requested
/// timeout, or by the handle's `timeout_advance` when set (to simulate a
/// coarse clock reading earlier than the deadline). Every requested wait
/// timeout is recorded on the handle.
pub struct ScriptedSource {
    shared: Arc<ScriptShared>,
}

struct ScriptShared {
    queue: Mutex<VecDeque<PlatformEvent>>,
    now: AtomicU64,
    waits: Mutex<Vec<u64>>,
    timeout_advance: Mutex<Option<u64>>,
    wake_count: AtomicUsize,
}

/// Inspection/feeding handle kept by the test after the shell takes the source
#[derive(Clone)]
pub struct ScriptHandle {
    shared: Arc<ScriptShared>,
}

impl ScriptedSource {
    pub fn new() -> (Self, ScriptHandle) {
        let shared = Arc::new(ScriptShared {
            queue: Mutex::new(VecDeque::new()),
            now: AtomicU64::new(0),
            waits: Mutex::new(Vec::new()),
            timeout_advance: Mutex::new(None),
            wake_count: AtomicUsize::new(0),
        });
        (
            Self {
                shared: shared.clone(),
            },
            ScriptHandle { shared },
        )
    }
}

impl ScriptHandle {
    pub fn push(&self, event: PlatformEvent) {
        self.shared
            .queue
            .lock()
            .expect("scripted queue poisoned")
            .push_back(event);
    }

    pub fn set_now(&self, now: u64) {
        self.shared.now.store(now, Ordering::SeqCst);
    }

    /// Make timed-out waits advance the clock by `advance` instead of the
    /// full timeout
    pub fn set_timeout_advance(&self, advance: u64) {
        *self
            .shared
            .timeout_advance
            .lock()
            .expect("scripted source poisoned") = Some(advance);
    }

    pub fn waits(&self) -> Vec<u64> {
        self.shared
            .waits
            .lock()
            .expect("scripted source poisoned")
            .clone()
    }

    pub fn wakes(&self) -> usize {
        self.shared.wake_count.load(Ordering::SeqCst)
    }
}

impl EventSource for ScriptedSource {
    fn wait_timeout(&mut self, timeout: Duration) -> Option<PlatformEvent> {
        let timeout = timeout.as_millis() as u64;
        self.shared
            .waits
            .lock()
            .expect("scripted source poisoned")
            .push(timeout);
        let next = self
            .shared
            .queue
            .lock()
            .expect("scripted queue poisoned")
            .pop_front();
        if next.is_none() {
            let advance = self
                .shared
                .timeout_advance
                .lock()
                .expect("scripted source poisoned")
                .unwrap_or(timeout);
            let now = self.shared.now.load(Ordering::SeqCst);
            self.shared
                .now
                .store(now.saturating_add(advance), Ordering::SeqCst);
        }
        next
    }

    fn poll(&mut self) -> Option<PlatformEvent> {
        self.shared
            .queue
            .lock()
            .expect("scripted queue poisoned")
            .pop_front()
    }

    fn now(&self) -> u64 {
        self.shared.now.load(Ordering::SeqCst)
    }

    fn waker(&self) -> Arc<dyn LoopWaker> {
        Arc::new(ScriptWaker {
            shared: self.shared.clone(),
        })
    }
}

struct ScriptWaker {
    shared: Arc<ScriptShared>,
}

impl LoopWaker for ScriptWaker {
    fn wake(&self) {
        self.shared.wake_count.fetch_add(1, Ordering::SeqCst);
        self.shared
            .queue
            .lock()
            .expect("scripted queue poisoned")
            .push_back(PlatformEvent::Wake);
    }
}

/// Fault sink that collects fault descriptions for assertions
#[derive(Default)]
pub struct CollectingSink {
    pub faults: Rc<RefCell<Vec<String>>>,
}

impl CollectingSink {
    pub fn new() -> (Box<Self>, Rc<RefCell<Vec<String>>>) {
        let faults = Rc::new(RefCell::new(Vec::new()));
        (
            Box::new(Self {
                faults: faults.clone(),
            }),
            faults,
        )
    }
}

impl FaultSink for CollectingSink {
    fn report(&mut self, fault: &Fault) {
        self.faults.borrow_mut().push(fault.to_string());
    }
}
