//! Channel-backed event source
//!
//! The reference [`EventSource`]: a standard mpsc channel whose receiving end
//! is the loop's event queue. `recv_timeout` provides the timed wait,
//! `try_recv` the non-blocking poll, and any cloned sender can inject events
//! from other threads - which is also how the wake signal travels.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use super::{EventSource, LoopWaker, PlatformEvent};

/// Event source fed through an mpsc channel
pub struct ChannelSource {
    tx: Sender<PlatformEvent>,
    rx: Receiver<PlatformEvent>,
    epoch: Instant,
}

impl ChannelSource {
    /// Creates a new source with an empty queue
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            epoch: Instant::now(),
        }
    }

    /// A sender for feeding events in from any thread
    pub fn sender(&self) -> Sender<PlatformEvent> {
        self.tx.clone()
    }
}

impl Default for ChannelSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for ChannelSource {
    fn wait_timeout(&mut self, timeout: Duration) -> Option<PlatformEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    fn poll(&mut self) -> Option<PlatformEvent> {
        self.rx.try_recv().ok()
    }

    fn now(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn waker(&self) -> Arc<dyn LoopWaker> {
        Arc::new(ChannelWaker {
            tx: self.tx.clone(),
        })
    }
}

struct ChannelWaker {
    tx: Sender<PlatformEvent>,
}

impl LoopWaker for ChannelWaker {
    fn wake(&self) {
        // The source keeps its own sender alive, so this can only fail after
        // the source itself is gone - nothing left to wake.
        let _ = self.tx.send(PlatformEvent::Wake);
    }
}
