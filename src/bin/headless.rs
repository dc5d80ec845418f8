//! Headless shell demo
//!
//! Drives the event loop without any OS windowing: a background thread feeds
//! scripted pointer events through a [`ChannelSource`] and posts a callback
//! through the dispatch queue, a stub window host repaints on a 16 ms
//! schedule, and a single clickable element requests quit when it is hit.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use tide_pool::config::ShellConfig;
use tide_pool::error::BoxError;
use tide_pool::geometry::{Point, Rect};
use tide_pool::input::{
    BatchRef, Capability, Element, EventCtx, HitResult, MouseTarget, RenderBatch,
};
use tide_pool::platform::{Button, ChannelSource, PlatformEvent, WindowEventKind};
use tide_pool::shell::Shell;
use tide_pool::window::{WindowHost, WindowId};

struct DemoBatch;

impl RenderBatch for DemoBatch {
    fn has_owner(&self, _element: &Rc<dyn Element>) -> bool {
        false
    }
}

struct QuitButton;

impl Element for QuitButton {
    fn mouse(&self) -> Option<&dyn MouseTarget> {
        Some(self)
    }
}

impl MouseTarget for QuitButton {
    fn mouse_click(&self, button: Button, _batch: &BatchRef, ctx: &mut EventCtx<'_>) {
        info!(?button, "quit button clicked");
        ctx.request_quit();
    }
}

struct DemoWindow {
    rect: Rect,
    button: Rc<dyn Element>,
    batch: BatchRef,
    next_repaint: u64,
    frames: u32,
}

impl DemoWindow {
    fn new() -> Self {
        Self {
            rect: Rect::new(10.0, 10.0, 40.0, 20.0),
            button: Rc::new(QuitButton),
            batch: Rc::new(DemoBatch),
            next_repaint: 0,
            frames: 0,
        }
    }
}

impl WindowHost for DemoWindow {
    fn scale_factor(&self) -> f32 {
        1.0
    }

    fn next_repaint(&self) -> Option<u64> {
        Some(self.next_repaint)
    }

    fn hit_test(&self, pos: Point, capability: Capability) -> HitResult {
        if self.rect.contains(pos) && self.button.supports(capability) {
            HitResult::hit(Rc::clone(&self.button), Rc::clone(&self.batch), self.rect)
        } else {
            HitResult::miss()
        }
    }

    fn render(&mut self, now: u64) -> Result<(), BoxError> {
        self.frames += 1;
        self.next_repaint = now + 16;
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ShellConfig::load_from_env().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using default configuration");
        ShellConfig::default()
    });

    let source = ChannelSource::new();
    let events = source.sender();
    let mut shell = Shell::new(config, source);

    let id = WindowId(1);
    let window = Rc::new(RefCell::new(DemoWindow::new()));
    shell.windows().register(id, window.clone());

    let dispatcher = shell.dispatcher();
    let feeder = thread::spawn(move || {
        dispatcher.post(|| {
            info!("hello from the background thread");
            Ok(())
        });

        let script = [
            PlatformEvent::Window {
                window: id,
                event: WindowEventKind::PointerEntered,
            },
            PlatformEvent::MouseMotion { x: 25.0, y: 18.0 },
            PlatformEvent::MouseButtonDown {
                button: Button::Left,
            },
            PlatformEvent::MouseButtonUp {
                button: Button::Left,
            },
            // Backstop in case the click lands before hover is established
            PlatformEvent::Quit,
        ];
        for event in script {
            thread::sleep(Duration::from_millis(30));
            if events.send(event).is_err() {
                break;
            }
        }
    });

    shell.run();
    feeder.join().expect("feeder thread panicked");

    info!(frames = window.borrow().frames, "demo finished");
}
