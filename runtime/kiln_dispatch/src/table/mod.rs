//! The dispatch table.
//!
//! Primitive libraries register `(signature, native)` pairs on a
//! [`DispatchTableBuilder`] at start-up. [`DispatchTableBuilder::build`]
//! freezes them into a [`DispatchTable`], which has no mutation API: it is
//! built once and only read afterwards, so lookups from several threads need
//! no locking (the optional resolution cache has its own lock).
//!
//! # Resolution
//!
//! 1. Candidates are the bindings indexed under the receiver's exact tag and
//!    under an `any` receiver, with the same call shape, name and arity.
//! 2. Candidates whose predicates reject the runtime tags are dropped.
//! 3. One survivor wins outright; several are ranked by [`specificity`].

mod cache;
mod specificity;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use kiln_value::{ambiguous_method, no_matching_method, EvalError, EvalResult, Value, ValueTag};

use crate::config::DispatchConfig;
use crate::error::RegistrationError;
use crate::marshal::{pack_args, CallArgs};
use crate::runtime::Runtime;
use crate::signature::{parse_signature, ShapeKind, Signature, TypePredicate};

use cache::{CacheKey, ResolutionCache};
use specificity::Selection;

/// Native implementation of a primitive.
pub type NativeFn = fn(&dyn Runtime, &CallArgs) -> EvalResult;

/// Index of a binding in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u32);

impl BindingId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A signature paired with its native implementation.
pub struct Binding {
    pub signature: Signature,
    pub native: NativeFn,
}

impl Binding {
    /// Run the native with already-marshalled arguments.
    #[inline]
    pub fn call(&self, runtime: &dyn Runtime, args: &CallArgs) -> EvalResult {
        (self.native)(runtime, args)
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("signature", &self.signature.source)
            .finish_non_exhaustive()
    }
}

/// Index key shared by overloads of one call site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DispatchKey {
    pub receiver: TypePredicate,
    pub kind: ShapeKind,
    pub name: Box<str>,
    pub arity: usize,
}

impl DispatchKey {
    pub fn new(receiver: TypePredicate, kind: ShapeKind, name: &str, arity: usize) -> Self {
        Self {
            receiver,
            kind,
            name: name.into(),
            arity,
        }
    }

    /// The key a signature is indexed under.
    pub fn of(signature: &Signature) -> Self {
        Self::new(
            signature.receiver.predicate,
            signature.kind(),
            signature.name(),
            signature.arity(),
        )
    }
}

type Index = FxHashMap<DispatchKey, SmallVec<[BindingId; 2]>>;

/// Collects bindings during start-up.
#[derive(Default)]
pub struct DispatchTableBuilder {
    bindings: Vec<Binding>,
    index: Index,
    config: DispatchConfig,
}

impl DispatchTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration the built table will use.
    #[must_use]
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse `signature` and register `native` under it.
    ///
    /// Fails with `MalformedSignature` if the text does not parse, and with
    /// `DuplicateSignature` if the same pattern is already registered.
    #[tracing::instrument(level = "debug", skip(self, native))]
    pub fn register(
        &mut self,
        signature: &str,
        native: NativeFn,
    ) -> Result<BindingId, RegistrationError> {
        let signature = parse_signature(signature)?;
        let key = DispatchKey::of(&signature);

        let overloads = self.index.entry(key).or_default();
        if let Some(existing) = overloads
            .iter()
            .map(|id| &self.bindings[id.index()].signature)
            .find(|existing| existing.same_pattern(&signature))
        {
            return Err(RegistrationError::DuplicateSignature {
                signature: signature.source.to_string(),
                existing: existing.source.to_string(),
            });
        }

        let Ok(raw) = u32::try_from(self.bindings.len()) else {
            unreachable!("more than u32::MAX primitive bindings");
        };
        let id = BindingId(raw);
        overloads.push(id);
        self.bindings.push(Binding { signature, native });
        Ok(id)
    }

    /// Register a library's entries in order, stopping at the first failure.
    pub fn register_all(&mut self, entries: &[(&str, NativeFn)]) -> Result<(), RegistrationError> {
        for &(signature, native) in entries {
            self.register(signature, native)?;
        }
        Ok(())
    }

    /// Number of bindings registered so far.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Freeze the bindings into a read-only table.
    #[tracing::instrument(level = "debug", skip_all, fields(bindings = self.bindings.len()))]
    pub fn build(self) -> DispatchTable {
        let cache = self.config.cache.then(ResolutionCache::default);
        tracing::debug!(keys = self.index.len(), cache = self.config.cache, "dispatch table built");
        DispatchTable {
            bindings: self.bindings,
            index: self.index,
            config: self.config,
            cache,
        }
    }
}

/// Read-only registry of primitive bindings.
pub struct DispatchTable {
    bindings: Vec<Binding>,
    index: Index,
    config: DispatchConfig,
    cache: Option<ResolutionCache>,
}

impl DispatchTable {
    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder::new()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// The binding `id` names, or `None` if `id` came from another table.
    pub fn binding(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.index())
    }

    /// Binding for an id this table handed out itself.
    fn resolved(&self, id: BindingId) -> &Binding {
        &self.bindings[id.index()]
    }

    /// Signature text of every binding whose receiver predicate accepts
    /// `tag`, in registration order.
    pub fn signatures_for(&self, tag: ValueTag) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|binding| binding.signature.receiver.predicate.matches(tag))
            .map(|binding| &*binding.signature.source)
            .collect()
    }

    /// Number of cached resolutions (zero when caching is disabled).
    pub fn cached_resolutions(&self) -> usize {
        self.cache.as_ref().map_or(0, ResolutionCache::len)
    }

    /// Find the binding for a call.
    ///
    /// `args` excludes the receiver. For an indexed assignment it holds the
    /// index arguments followed by the assigned value.
    pub fn resolve(
        &self,
        receiver: ValueTag,
        kind: ShapeKind,
        name: &str,
        args: &[Value],
    ) -> Result<&Binding, EvalError> {
        self.resolve_id(receiver, kind, name, args)
            .map(|id| self.resolved(id))
    }

    /// Like [`resolve`](Self::resolve), returning the binding's id.
    pub fn resolve_id(
        &self,
        receiver: ValueTag,
        kind: ShapeKind,
        name: &str,
        args: &[Value],
    ) -> Result<BindingId, EvalError> {
        let tags: SmallVec<[ValueTag; 4]> = args.iter().map(Value::tag).collect();

        let Some(cache) = &self.cache else {
            return self.resolve_uncached(receiver, kind, name, &tags);
        };

        let key = CacheKey::new(receiver, kind, name, &tags);
        if let Some(id) = cache.get(&key) {
            tracing::trace!(method = name, "resolution cache hit");
            return Ok(id);
        }
        let id = self.resolve_uncached(receiver, kind, name, &tags)?;
        cache.insert(key, id);
        Ok(id)
    }

    fn resolve_uncached(
        &self,
        receiver: ValueTag,
        kind: ShapeKind,
        name: &str,
        tags: &[ValueTag],
    ) -> Result<BindingId, EvalError> {
        let arity = tags.len();
        let exact = self
            .index
            .get(&DispatchKey::new(TypePredicate::Exact(receiver), kind, name, arity));
        let any = self
            .index
            .get(&DispatchKey::new(TypePredicate::Any, kind, name, arity));

        let mut candidates: SmallVec<[BindingId; 4]> =
            exact.into_iter().chain(any).flatten().copied().collect();
        candidates.sort_unstable();

        let matching: SmallVec<[BindingId; 4]> = candidates
            .iter()
            .copied()
            .filter(|&id| self.resolved(id).signature.accepts(receiver, tags))
            .collect();

        tracing::trace!(
            method = name,
            candidates = candidates.len(),
            matching = matching.len(),
            "resolving primitive"
        );

        let call_name = kind.call_name(name);
        match specificity::select(self, &matching, self.config.ambiguity) {
            Selection::Unique(id) => Ok(id),
            Selection::None => Err(no_matching_method(receiver, &call_name, arity)),
            Selection::Ambiguous(ids) => Err(ambiguous_method(
                receiver,
                &call_name,
                ids.iter()
                    .map(|&id| self.resolved(id).signature.source.to_string())
                    .collect(),
            )),
        }
    }

    /// Resolve, marshal and run a call.
    ///
    /// This is the whole call path an evaluator needs: it packs `receiver`
    /// and `args` the same way an evaluator would, then unpacks them for the
    /// resolved binding.
    #[tracing::instrument(
        level = "trace",
        skip(self, runtime, receiver, args),
        fields(receiver = %receiver.tag())
    )]
    pub fn invoke(
        &self,
        runtime: &dyn Runtime,
        receiver: Value,
        kind: ShapeKind,
        name: &str,
        args: Vec<Value>,
    ) -> EvalResult {
        let binding = self.resolve(receiver.tag(), kind, name, &args)?;
        let packed = pack_args(kind, receiver, args);
        Self::call_packed(runtime, binding, &packed)
    }

    /// Marshal an evaluator-packed argument tuple and run `binding`.
    pub fn call_packed(runtime: &dyn Runtime, binding: &Binding, packed: &Value) -> EvalResult {
        let args = CallArgs::unpack(&binding.signature, packed)
            .map_err(|err| err.with_note(format!("binding: {}", binding.signature)))?;
        binding.call(runtime, &args)
    }
}
