//! Hit-test results
//!
//! A hit test asks a window for the topmost element at a point that
//! implements one capability. The result carries the element together with
//! the render batch that owns it and the element's rectangle in batch-local
//! space. Misses are the common case and are plain empty values.

use std::rc::Rc;

use super::targets::Element;
use crate::geometry::Rect;

/// Interface onto the render batch owning a hit element
///
/// Batches belong to the rendering collaborator; the router only needs
/// enough of them to hand back to element callbacks and to answer the
/// capture-subtree question.
pub trait RenderBatch {
    /// Whether `element` owns this batch or any batch above it
    ///
    /// Mouse capture survives a primary click only when the clicked batch
    /// sits inside the capture owner's subtree; the batch parent chain is
    /// the authority on that containment.
    fn has_owner(&self, element: &Rc<dyn Element>) -> bool;
}

/// Shared handle to a render batch
pub type BatchRef = Rc<dyn RenderBatch>;

/// The element a hit test found, with its owning batch
#[derive(Clone)]
pub struct HitTarget {
    pub element: Rc<dyn Element>,
    pub batch: BatchRef,
}

/// Result of a capability hit test; the default value is a miss
#[derive(Clone, Default)]
pub struct HitResult {
    /// The topmost matching element, if any
    pub target: Option<HitTarget>,
    /// The element's rectangle in batch-local space (zero on a miss)
    pub rect: Rect,
}

impl HitResult {
    /// A hit on `element` inside `batch`
    pub fn hit(element: Rc<dyn Element>, batch: BatchRef, rect: Rect) -> Self {
        Self {
            target: Some(HitTarget { element, batch }),
            rect,
        }
    }

    /// An empty result
    pub fn miss() -> Self {
        Self::default()
    }

    /// Whether nothing was hit
    pub fn is_miss(&self) -> bool {
        self.target.is_none()
    }

    /// Whether both results point at the same element (by identity),
    /// counting two misses as equal
    pub fn same_target(&self, other: &Self) -> bool {
        match (&self.target, &other.target) {
            (Some(a), Some(b)) => Rc::ptr_eq(&a.element, &b.element),
            (None, None) => true,
            _ => false,
        }
    }
}
