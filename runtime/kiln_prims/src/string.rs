//! String primitives.
//!
//! Strings are immutable; every operation returns a new value. Indices and
//! counts are in characters, not bytes.

use std::cmp::Ordering;

use kiln_dispatch::{CallArgs, NativeFn, Runtime};
use kiln_value::{EvalErrorKind, EvalResult, Value};

use crate::helpers::{boundary_index, bounds_error, element_index, len_to_value};

/// Built-in string signatures, in registration order.
pub const STRING_PRIMITIVES: &[(&str, NativeFn)] = &[
    ("(_ String)[index Int]", index),
    ("(_ String) count", count),
    ("(_ String) +(right String)", concat),
    ("(_ String) ==(right String)", equals),
    ("(_ String) !=(right String)", not_equals),
    ("(_ String) contains?(needle String)", contains),
    ("(_ String) split(delimiter String)", split),
    ("(_ String) substring(start Int)", substring_from),
    ("(_ String) substring(start Int, end Int)", substring),
    ("(_ String) compareTo(other String)", compare_to),
];

/// One-character string at a character index.
fn index(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let s = args.receiver_str()?;
    let index = args.int(0)?;
    let len = s.chars().count();
    let position = element_index(rt, index, len)?;
    s.chars()
        .nth(position)
        .map(|c| rt.string(c.to_string()))
        .ok_or_else(|| bounds_error(rt, index, len))
}

fn count(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    Ok(len_to_value(rt, args.receiver_str()?.chars().count()))
}

fn concat(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let left = args.receiver_str()?;
    let right = args.str(0)?;
    Ok(rt.string(format!("{left}{right}")))
}

fn equals(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    Ok(rt.bool(args.receiver_str()? == args.str(0)?))
}

fn not_equals(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    Ok(rt.bool(args.receiver_str()? != args.str(0)?))
}

fn contains(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    Ok(rt.bool(args.receiver_str()?.contains(args.str(0)?)))
}

/// Split on a literal delimiter. An empty delimiter splits into characters.
fn split(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let s = args.receiver_str()?;
    let delimiter = args.str(0)?;
    let pieces: Vec<Value> = if delimiter.is_empty() {
        s.chars().map(|c| rt.string(c.to_string())).collect()
    } else {
        s.split(delimiter)
            .map(|piece| rt.string(piece.to_string()))
            .collect()
    };
    Ok(Value::list(pieces))
}

/// Characters from `start` to the end of the string.
fn substring_from(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let s = args.receiver_str()?;
    let from = boundary_index(rt, args.int(0)?, s.chars().count())?;
    Ok(rt.string(s.chars().skip(from).collect()))
}

/// Characters in `[start, end)`; both ends accept negative indices.
fn substring(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let s = args.receiver_str()?;
    let (start, end) = (args.int(0)?, args.int(1)?);
    let len = s.chars().count();
    let from = boundary_index(rt, start, len)?;
    let to = boundary_index(rt, end, len)?;
    if from > to {
        return Err(rt.raise_error(
            EvalErrorKind::OutOfBounds { index: start, len },
            format!("substring start {start} is past its end {end}"),
        ));
    }
    Ok(rt.string(s.chars().take(to).skip(from).collect()))
}

/// `-1`, `0` or `1`, comparing by character sequence.
fn compare_to(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let ordering = args.receiver_str()?.cmp(args.str(0)?);
    Ok(rt.int(match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }))
}
