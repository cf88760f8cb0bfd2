//! Reference-shared mutable list storage.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::Value;

/// Handle to a mutable sequence of values.
///
/// Cloning the handle aliases the storage: a mutation through one handle is
/// observed by every other. Storage is freed when the last handle drops.
///
/// The lock keeps `Value` `Send + Sync` so the dispatch table can be shared
/// across threads. Callers that mutate one list from several execution
/// contexts must still serialize those calls themselves.
#[derive(Clone, Default)]
pub struct SharedList(Arc<RwLock<Vec<Value>>>);

impl SharedList {
    #[inline]
    pub(super) fn new(items: Vec<Value>) -> Self {
        SharedList(Arc::new(RwLock::new(items)))
    }

    /// Current element count.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    /// Check if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Element at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    /// Replace the element at `index`, returning the previous element.
    ///
    /// Returns `None` and leaves the list untouched when `index` is out of range.
    pub fn set(&self, index: usize, value: Value) -> Option<Value> {
        let mut items = self.0.write();
        items.get_mut(index).map(|slot| std::mem::replace(slot, value))
    }

    /// Append an element.
    pub fn push(&self, value: Value) {
        self.0.write().push(value);
    }

    /// Insert before `index`; `index == len` appends.
    ///
    /// Returns `false` and leaves the list untouched when `index > len`.
    pub fn insert(&self, index: usize, value: Value) -> bool {
        let mut items = self.0.write();
        if index > items.len() {
            return false;
        }
        items.insert(index, value);
        true
    }

    /// Remove and return the element at `index`, if in range.
    pub fn remove(&self, index: usize) -> Option<Value> {
        let mut items = self.0.write();
        (index < items.len()).then(|| items.remove(index))
    }

    /// Remove every element.
    pub fn clear(&self) {
        self.0.write().clear();
    }

    /// Copy of the current elements.
    ///
    /// Element values are cloned handles, so nested lists stay aliased.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    /// Check whether two handles alias the same storage.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.snapshot()).finish()
    }
}
