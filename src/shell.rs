//! The event loop
//!
//! One [`Shell`] owns everything that must stay on the loop thread: the
//! platform event source, the window registry, the input router, and the
//! dispatch queue. Each iteration waits for platform events with a deadline
//! derived from the earliest scheduled repaint, drains everything that is
//! immediately available, runs the once-per-pass input update, and renders
//! every window. Faults in any one step are reported and isolated; nothing
//! short of a programming error stops the loop.

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};
use std::time::Duration;

use tracing::{debug, info};

use crate::config::ShellConfig;
use crate::dispatch::DispatchQueue;
use crate::error::{Fault, FaultSink, LogFaultSink};
use crate::input::InputRouter;
use crate::platform::{EventSource, PlatformEvent, WindowEventKind};
use crate::window::{WindowId, WindowRegistry};

/// Process-wide quit flag
///
/// Clones share the flag; any thread may request a quit and the loop's
/// caller checks it between iterations. There is no other termination path.
#[derive(Clone, Default)]
pub struct QuitSignal(Arc<AtomicBool>);

impl QuitSignal {
    /// Creates an unset signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop after the current iteration
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a quit was requested
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The event loop core
pub struct Shell<S: EventSource> {
    config: ShellConfig,
    source: S,
    windows: WindowRegistry,
    router: InputRouter,
    dispatch: DispatchQueue,
    faults: Box<dyn FaultSink>,
    quit: QuitSignal,
    loop_thread: ThreadId,
    now: u64,
}

impl<S: EventSource> Shell<S> {
    /// Creates a shell around a platform event source
    ///
    /// The calling thread becomes the loop thread; all UI state the shell
    /// owns must only ever be touched from it.
    pub fn new(config: ShellConfig, source: S) -> Self {
        info!(profile = %config.profile, "starting shell");
        let now = source.now();
        let dispatch = DispatchQueue::new(source.waker());
        let quit = QuitSignal::new();
        Self {
            config,
            source,
            windows: WindowRegistry::new(),
            router: InputRouter::new(quit.clone()),
            dispatch,
            faults: Box::new(LogFaultSink),
            quit,
            loop_thread: thread::current().id(),
            now,
        }
    }

    /// The shell configuration
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The window registry
    pub fn windows(&mut self) -> &mut WindowRegistry {
        &mut self.windows
    }

    /// The input router
    pub fn router(&mut self) -> &mut InputRouter {
        &mut self.router
    }

    /// A queue handle for posting callbacks from any thread
    pub fn dispatcher(&self) -> DispatchQueue {
        self.dispatch.clone()
    }

    /// A handle to the quit flag
    pub fn quit_signal(&self) -> QuitSignal {
        self.quit.clone()
    }

    /// Replaces the fault-surfacing collaborator
    pub fn set_fault_sink(&mut self, sink: Box<dyn FaultSink>) {
        self.faults = sink;
    }

    /// The loop's monotonic time (ms), updated once per iteration
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Whether the calling thread is the loop thread
    pub fn is_loop_thread(&self) -> bool {
        thread::current().id() == self.loop_thread
    }

    /// Run until a quit is requested
    pub fn run(&mut self) {
        info!("entering event loop");
        while !self.quit.is_set() {
            self.pump();
            self.render_all();
        }
        info!("event loop exited");
    }

    /// One event pass: wait, drain, update
    ///
    /// Blocks on the event source until an event arrives or the earliest
    /// scheduled repaint is due (never less than 1 ms away), then drains
    /// every immediately available event and runs the router's
    /// once-per-pass update. When the wait timed out but the clock still
    /// reads earlier than the deadline, the loop time is clamped forward so
    /// scheduled repaints fire on time even under a coarse clock.
    pub fn pump(&mut self) {
        let min_next = self.windows.min_next_repaint().unwrap_or(u64::MAX - 1);
        let timeout = min_next
            .saturating_sub(self.source.now())
            .saturating_add(1);
        let mut next = self.source.wait_timeout(Duration::from_millis(timeout));

        self.now = self.source.now();
        if next.is_none() && self.now < min_next {
            self.now = min_next;
        }

        while let Some(event) = next {
            if let Err(fault) = self.dispatch_event(event) {
                self.faults.report(&fault);
            }
            next = self.source.poll();
        }

        self.router.update();
    }

    /// Render every registered window at the loop's current time
    ///
    /// A failing window is reported and skipped; the rest still render.
    pub fn render_all(&mut self) {
        for (id, window) in self.windows.entries() {
            if let Err(source) = window.borrow_mut().render(self.now) {
                self.faults.report(&Fault::Render { window: id, source });
            }
        }
    }

    fn dispatch_event(&mut self, event: PlatformEvent) -> Result<(), Fault> {
        match event {
            PlatformEvent::Quit => {
                info!("quit requested by platform");
                self.quit.request();
            }
            PlatformEvent::MouseButtonDown { button } => self.router.mouse_down(button),
            PlatformEvent::MouseButtonUp { button } => self.router.mouse_up(button),
            PlatformEvent::MouseWheel { delta, flipped } => {
                let mut delta = -delta;
                if flipped {
                    delta = -delta;
                }
                if self.config.input.natural_scroll {
                    delta = -delta;
                }
                self.router.mouse_scroll(delta);
            }
            PlatformEvent::MouseMotion { x, y } => self.router.mouse_move(x, y),
            PlatformEvent::KeyDown(key) => self.router.key_down(key),
            PlatformEvent::KeyUp(key) => self.router.key_up(key),
            PlatformEvent::TextInput(text) => self.router.text_input(&text),
            PlatformEvent::Window { window, event } => {
                self.dispatch_window_event(window, event)?;
            }
            PlatformEvent::Wake => {
                debug!("draining dispatch queue");
                self.dispatch.drain(&mut *self.faults);
            }
        }
        Ok(())
    }

    fn dispatch_window_event(
        &mut self,
        id: WindowId,
        kind: WindowEventKind,
    ) -> Result<(), Fault> {
        // Unknown ids violate the registration invariant; expect() is the
        // generic unhandled-fault path for that programming error.
        let window = self.windows.expect(id);
        let result = match kind {
            WindowEventKind::PointerEntered => {
                self.router.mouse_enter_window(id, Rc::clone(&window));
                Ok(())
            }
            WindowEventKind::PointerLeft => {
                self.router.mouse_exit_window(id);
                Ok(())
            }
            WindowEventKind::CloseRequested => window.borrow_mut().close_requested(),
            WindowEventKind::FocusLost => {
                self.router.focus_mut().set_keyboard_focus(None);
                window.borrow_mut().focus_lost()
            }
            WindowEventKind::Moved => window.borrow_mut().moved(),
            WindowEventKind::Resized => window.borrow_mut().resized(),
        };
        result.map_err(|source| Fault::WindowEvent {
            window: id,
            kind,
            source,
        })
    }
}
