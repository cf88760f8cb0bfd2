//! List primitives.
//!
//! Lists are reference-shared: every mutation here is visible through all
//! handles to the same list.

use kiln_dispatch::{CallArgs, NativeFn, Runtime};
use kiln_value::EvalResult;

use crate::helpers::{boundary_error, boundary_index, bounds_error, element_index, len_to_value};

/// Built-in list signatures, in registration order.
pub const LIST_PRIMITIVES: &[(&str, NativeFn)] = &[
    ("(is List) count", count),
    ("(is List)[index is Int]", index),
    ("(is List)[index is Int] = (item)", index_assign),
    ("(is List) add(item)", add),
    ("(is List) clear()", clear),
    ("(is List) insert(index is Int, item)", insert),
    ("(is List) removeAt(index is Int)", remove_at),
];

fn count(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    Ok(len_to_value(rt, args.receiver_list()?.len()))
}

fn index(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let list = args.receiver_list()?;
    let index = args.int(0)?;
    let len = list.len();
    let position = element_index(rt, index, len)?;
    list.get(position).ok_or_else(|| bounds_error(rt, index, len))
}

/// Replace in place and evaluate to the assigned item.
fn index_assign(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let list = args.receiver_list()?;
    let index = args.int(0)?;
    let item = args.param(1)?;
    let len = list.len();
    let position = element_index(rt, index, len)?;
    list.set(position, item.clone()).ok_or_else(|| bounds_error(rt, index, len))?;
    Ok(item.clone())
}

fn add(_rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let item = args.param(0)?;
    args.receiver_list()?.push(item.clone());
    Ok(item.clone())
}

fn clear(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    args.receiver_list()?.clear();
    Ok(rt.nothing())
}

/// Insert before `index`. `index == count` appends.
fn insert(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let list = args.receiver_list()?;
    let index = args.int(0)?;
    let item = args.param(1)?;
    let len = list.len();
    let position = boundary_index(rt, index, len)?;
    if !list.insert(position, item.clone()) {
        return Err(boundary_error(rt, index, len));
    }
    Ok(rt.nothing())
}

fn remove_at(rt: &dyn Runtime, args: &CallArgs) -> EvalResult {
    let list = args.receiver_list()?;
    let index = args.int(0)?;
    let len = list.len();
    let position = element_index(rt, index, len)?;
    list.remove(position).ok_or_else(|| bounds_error(rt, index, len))
}
