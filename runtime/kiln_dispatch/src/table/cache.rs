//! Resolution cache.
//!
//! Maps a call site plus the observed argument tags to the binding that
//! resolution picked. The table is immutable, so an entry never goes stale.
//! Only successful resolutions are stored; failures are recomputed.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use kiln_value::ValueTag;

use super::BindingId;
use crate::signature::ShapeKind;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(super) struct CacheKey {
    receiver: ValueTag,
    kind: ShapeKind,
    name: Box<str>,
    args: SmallVec<[ValueTag; 4]>,
}

impl CacheKey {
    pub(super) fn new(receiver: ValueTag, kind: ShapeKind, name: &str, args: &[ValueTag]) -> Self {
        Self {
            receiver,
            kind,
            name: name.into(),
            args: SmallVec::from_slice(args),
        }
    }
}

#[derive(Default)]
pub(super) struct ResolutionCache {
    entries: RwLock<FxHashMap<CacheKey, BindingId>>,
}

impl ResolutionCache {
    pub(super) fn get(&self, key: &CacheKey) -> Option<BindingId> {
        self.entries.read().get(key).copied()
    }

    pub(super) fn insert(&self, key: CacheKey, id: BindingId) {
        self.entries.write().insert(key, id);
    }

    pub(super) fn len(&self) -> usize {
        self.entries.read().len()
    }
}
