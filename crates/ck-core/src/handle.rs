//! `RelinkableHandle<T>` — a shared reference cell whose target can be
//! replaced after the handle has been distributed.
//!
//! A handle is logically "the curve currently known by this name". It is
//! registered (empty) before any dependent object is constructed, cloned
//! into every index and calibration instrument that forwards off that
//! curve, and linked to the concrete curve once the bootstrap finishes.
//! Because clones share the inner cell, relinking through one clone is
//! visible through all of them.

use std::sync::{Arc, RwLock};

/// A shared, relinkable reference to a value of type `T`.
///
/// The cell starts empty; [`link_to`](RelinkableHandle::link_to) fills it
/// (or repoints it). Reads take a snapshot `Arc<T>` so callers never hold
/// the lock across their own computation.
pub struct RelinkableHandle<T: ?Sized> {
    cell: Arc<RwLock<Option<Arc<T>>>>,
}

impl<T: ?Sized> RelinkableHandle<T> {
    /// Create a new handle, initially empty.
    pub fn empty() -> Self {
        Self {
            cell: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a handle already linked to `target`.
    pub fn new(target: Arc<T>) -> Self {
        Self {
            cell: Arc::new(RwLock::new(Some(target))),
        }
    }

    /// Point the handle at `target`. Visible through every clone.
    pub fn link_to(&self, target: Arc<T>) {
        let mut guard = self.cell.write().expect("handle lock poisoned");
        *guard = Some(target);
    }

    /// Return `true` if the handle currently has no target.
    pub fn is_empty(&self) -> bool {
        self.cell.read().expect("handle lock poisoned").is_none()
    }

    /// Snapshot the current target, or `None` if the handle is empty.
    pub fn current(&self) -> Option<Arc<T>> {
        self.cell.read().expect("handle lock poisoned").clone()
    }
}

impl<T: ?Sized> Clone for RelinkableHandle<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: ?Sized> Default for RelinkableHandle<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> std::fmt::Debug for RelinkableHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "RelinkableHandle(empty)")
        } else {
            write!(f, "RelinkableHandle(linked)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relink_is_visible_through_clones() {
        let h: RelinkableHandle<i32> = RelinkableHandle::empty();
        let alias = h.clone();
        assert!(alias.is_empty());

        h.link_to(Arc::new(42));
        assert_eq!(alias.current().map(|v| *v), Some(42));

        h.link_to(Arc::new(7));
        assert_eq!(alias.current().map(|v| *v), Some(7));
    }

    #[test]
    fn clones_share_the_cell_but_fresh_handles_do_not() {
        let a: RelinkableHandle<i32> = RelinkableHandle::empty();
        let b: RelinkableHandle<i32> = RelinkableHandle::empty();
        a.link_to(Arc::new(1));
        assert!(b.is_empty());
    }
}
