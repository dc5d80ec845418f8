//! Tide Pool
//!
//! Input routing and event-loop core for a desktop GUI toolkit: translates a
//! stream of low-level platform events into targeted hover, drag, click and
//! focus interactions against a tree of hit-testable elements, and marshals
//! background work onto the single UI loop thread.

/// Profile-based configuration loading
pub mod config;

/// Cross-thread dispatch queue for running callbacks on the loop thread
pub mod dispatch;

/// Fault taxonomy and the fault-surfacing collaborator
pub mod error;

/// Trivial input-space geometry
pub mod geometry;

/// Input routing - hit testing, pointer state, and focus management
pub mod input;

/// Platform event vocabulary and the consumed event-source interface
pub mod platform;

/// The event loop
pub mod shell;

/// Window hosts and the window registry
pub mod window;
