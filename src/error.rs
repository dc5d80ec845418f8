//! Fault taxonomy and surfacing
//!
//! Hit-test misses and absent focus targets are expected absences and never
//! reach this module. What does reach it are the recoverable per-iteration
//! faults: a window rejecting a render or lifecycle call, or a queued
//! callback failing. Each is caught at the dispatch boundary, handed to the
//! [`FaultSink`], and the loop moves on to the next event, window, or
//! callback.

use thiserror::Error;
use tracing::error;

use crate::platform::WindowEventKind;
use crate::window::WindowId;

/// Boxed error returned by window hosts and queued callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A recoverable fault isolated during one loop iteration
#[derive(Debug, Error)]
pub enum Fault {
    /// A window failed to render; other windows still render this pass
    #[error("window {window:?} failed to render: {source}")]
    Render {
        window: WindowId,
        #[source]
        source: BoxError,
    },

    /// A window host rejected a lifecycle notification
    #[error("window {window:?} failed handling {kind:?}: {source}")]
    WindowEvent {
        window: WindowId,
        kind: WindowEventKind,
        #[source]
        source: BoxError,
    },

    /// A queued cross-thread callback failed; draining continues
    #[error("queued callback failed: {source}")]
    Callback {
        #[source]
        source: BoxError,
    },
}

/// Out-of-band fault display collaborator
///
/// The loop never aborts on a recoverable fault; it reports the fault here
/// and continues. Embedders can install a sink that raises an error screen,
/// records metrics, or whatever else fits the application.
pub trait FaultSink {
    /// Surface one isolated fault
    fn report(&mut self, fault: &Fault);
}

/// Default sink: structured error log
#[derive(Debug, Default)]
pub struct LogFaultSink;

impl FaultSink for LogFaultSink {
    fn report(&mut self, fault: &Fault) {
        error!(error = %fault, "fault isolated, loop continues");
    }
}
