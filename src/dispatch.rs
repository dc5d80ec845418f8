//! Cross-thread dispatch queue
//!
//! Background threads produce work; only the loop thread may touch UI state.
//! [`DispatchQueue::post`] appends a callback to a lock-protected FIFO and -
//! only when the queue transitions from empty to non-empty - asks the
//! platform waker to unblock the loop's wait. The loop drains the queue when
//! the wake event arrives, running every callback on the loop thread.
//!
//! The lock is held for enqueue and dequeue only, never while a callback
//! runs, so callbacks are free to post more work re-entrantly.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{BoxError, Fault, FaultSink};
use crate::platform::LoopWaker;

type Callback = Box<dyn FnOnce() -> Result<(), BoxError> + Send>;

struct QueueShared {
    pending: Mutex<VecDeque<Callback>>,
    waker: Arc<dyn LoopWaker>,
}

/// FIFO of callbacks marshaled onto the loop thread
///
/// Clones share the same queue; hand clones to background threads and keep
/// one on the shell for draining.
#[derive(Clone)]
pub struct DispatchQueue {
    shared: Arc<QueueShared>,
}

impl DispatchQueue {
    /// Creates an empty queue that wakes the loop through `waker`
    pub fn new(waker: Arc<dyn LoopWaker>) -> Self {
        Self {
            shared: Arc::new(QueueShared {
                pending: Mutex::new(VecDeque::new()),
                waker,
            }),
        }
    }

    /// Queue `callback` to run on the loop thread
    ///
    /// Callable from any thread. Multiple posts before the wake event is
    /// processed coalesce into a single wake.
    pub fn post<F>(&self, callback: F)
    where
        F: FnOnce() -> Result<(), BoxError> + Send + 'static,
    {
        let should_wake = {
            let mut pending = self.shared.pending.lock().expect("dispatch queue poisoned");
            let was_empty = pending.is_empty();
            pending.push_back(Box::new(callback));
            was_empty
        };
        if should_wake {
            self.shared.waker.wake();
        }
    }

    /// Run queued callbacks until the queue is empty
    ///
    /// Called by the loop when the wake event arrives. Each callback runs
    /// outside the lock; a failing callback is reported to `faults` and
    /// draining continues with the next one.
    pub fn drain(&self, faults: &mut dyn FaultSink) {
        loop {
            let next = {
                let mut pending = self.shared.pending.lock().expect("dispatch queue poisoned");
                pending.pop_front()
            };
            let Some(callback) = next else {
                break;
            };
            if let Err(source) = callback() {
                faults.report(&Fault::Callback { source });
            }
        }
    }

    /// Number of callbacks waiting to run
    pub fn len(&self) -> usize {
        self.shared
            .pending
            .lock()
            .expect("dispatch queue poisoned")
            .len()
    }

    /// Whether no callbacks are waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
