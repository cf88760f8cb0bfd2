//! Index normalization and shared result helpers.

use kiln_dispatch::Runtime;
use kiln_value::{EvalError, EvalErrorKind, Value};

/// Apply negative-index normalization without bounds checking.
///
/// `None` when the result would be negative or does not fit a `usize`.
fn normalize(index: i64, len: usize) -> Option<usize> {
    let normalized = if index < 0 {
        index.checked_add(i64::try_from(len).ok()?)?
    } else {
        index
    };
    usize::try_from(normalized).ok()
}

/// The `OutOfBoundsError` for `index` as the program supplied it.
#[cold]
pub fn bounds_error(rt: &dyn Runtime, index: i64, len: usize) -> EvalError {
    rt.raise(EvalErrorKind::OutOfBounds { index, len })
}

/// Position of an existing element: normalized and checked against `[0, len)`.
pub fn element_index(rt: &dyn Runtime, index: i64, len: usize) -> Result<usize, EvalError> {
    normalize(index, len)
        .filter(|&i| i < len)
        .ok_or_else(|| bounds_error(rt, index, len))
}

/// The `OutOfBoundsError` for a position between elements, where `len`
/// itself is valid.
#[cold]
pub fn boundary_error(rt: &dyn Runtime, index: i64, len: usize) -> EvalError {
    rt.raise_error(
        EvalErrorKind::OutOfBounds { index, len },
        format!("index {index} is out of bounds [0, {len}]"),
    )
}

/// Position between elements: normalized and checked against `[0, len]`.
///
/// Used where pointing one past the end is meaningful (insertion, slice ends).
pub fn boundary_index(rt: &dyn Runtime, index: i64, len: usize) -> Result<usize, EvalError> {
    normalize(index, len)
        .filter(|&i| i <= len)
        .ok_or_else(|| boundary_error(rt, index, len))
}

/// Convert a collection length to an `Int` value.
#[inline]
pub fn len_to_value(rt: &dyn Runtime, len: usize) -> Value {
    rt.int(i64::try_from(len).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

    use super::*;
    use kiln_dispatch::DefaultRuntime;

    #[test]
    fn negative_indices_count_from_the_end() {
        let rt = DefaultRuntime;
        assert_eq!(element_index(&rt, 0, 3).unwrap(), 0);
        assert_eq!(element_index(&rt, -1, 3).unwrap(), 2);
        assert_eq!(element_index(&rt, -3, 3).unwrap(), 0);
    }

    #[test]
    fn element_index_rejects_len_and_beyond() {
        let rt = DefaultRuntime;
        for index in [3, 4, -4, i64::MIN, i64::MAX] {
            let err = element_index(&rt, index, 3).unwrap_err();
            assert_eq!(err.kind, EvalErrorKind::OutOfBounds { index, len: 3 });
        }
        assert!(element_index(&rt, 0, 0).is_err());
        assert!(element_index(&rt, -1, 0).is_err());
    }

    #[test]
    fn boundary_index_allows_one_past_the_end() {
        let rt = DefaultRuntime;
        assert_eq!(boundary_index(&rt, 3, 3).unwrap(), 3);
        assert_eq!(boundary_index(&rt, 0, 0).unwrap(), 0);
        assert_eq!(boundary_index(&rt, -1, 3).unwrap(), 2);
        assert!(boundary_index(&rt, -4, 3).is_err());

        let err = boundary_index(&rt, 4, 3).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::OutOfBounds { index: 4, len: 3 });
        assert_eq!(err.message, "index 4 is out of bounds [0, 3]");
    }

    #[test]
    fn bounds_error_reports_supplied_index() {
        let err = bounds_error(&DefaultRuntime, -7, 3);
        assert_eq!(err.message, "index -7 is out of bounds [0, 3)");
    }

    #[test]
    fn len_to_value_is_an_int() {
        assert_eq!(len_to_value(&DefaultRuntime, 42), Value::int(42));
    }
}
