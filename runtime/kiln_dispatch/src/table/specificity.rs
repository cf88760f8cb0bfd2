//! Specificity ranking between matching candidates.
//!
//! Every candidate handed to [`select`] already accepts the runtime tags, so
//! at each position (receiver first, then parameters) its predicate is
//! either the argument's exact tag or `any`. Candidate A is at least as
//! specific as B when A is exact wherever B is exact. The winner must be at
//! least as specific as every other candidate.
//!
//! Registration rejects identical patterns, so two distinct candidates never
//! have the same exact positions and at most one candidate can win.

use smallvec::SmallVec;

use super::{BindingId, DispatchTable};
use crate::config::AmbiguityPolicy;
use crate::signature::Signature;

pub(super) enum Selection {
    Unique(BindingId),
    Ambiguous(SmallVec<[BindingId; 4]>),
    None,
}

/// Exact-tag flags per position, receiver first.
fn exact_positions(signature: &Signature) -> SmallVec<[bool; 5]> {
    std::iter::once(&signature.receiver)
        .chain(signature.params())
        .map(|param| param.predicate.is_exact())
        .collect()
}

/// Whether `a` is exact at every position where `b` is exact.
fn at_least_as_specific(a: &[bool], b: &[bool]) -> bool {
    a.iter().zip(b).all(|(&a_exact, &b_exact)| a_exact || !b_exact)
}

/// Pick the binding for a call from candidates sorted by registration.
pub(super) fn select(
    table: &DispatchTable,
    candidates: &[BindingId],
    policy: AmbiguityPolicy,
) -> Selection {
    match candidates {
        [] => return Selection::None,
        [only] => return Selection::Unique(*only),
        _ => {}
    }

    let ranks: SmallVec<[SmallVec<[bool; 5]>; 4]> = candidates
        .iter()
        .map(|&id| exact_positions(&table.resolved(id).signature))
        .collect();

    if let Some(winner) = ranks
        .iter()
        .position(|rank| ranks.iter().all(|other| at_least_as_specific(rank, other)))
    {
        return Selection::Unique(candidates[winner]);
    }

    // No total order. Keep the candidates nothing else strictly beats.
    let maximal: SmallVec<[BindingId; 4]> = ranks
        .iter()
        .enumerate()
        .filter(|(i, rank)| {
            !ranks.iter().enumerate().any(|(j, other)| {
                j != *i && at_least_as_specific(other, rank) && !at_least_as_specific(rank, other)
            })
        })
        .map(|(i, _)| candidates[i])
        .collect();

    match policy {
        AmbiguityPolicy::Strict => Selection::Ambiguous(maximal),
        AmbiguityPolicy::RegistrationOrder => maximal
            .first()
            .copied()
            .map_or(Selection::None, Selection::Unique),
    }
}
