//! Shared immutable heap storage.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted immutable storage for heap-backed values.
///
/// The constructor is `pub(super)`: only `Value` factory methods allocate.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Heap<T>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Check whether two handles share one allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
