//! List primitives driven through the full dispatch path.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use kiln_dispatch::{DefaultRuntime, DispatchConfig, DispatchTable, ShapeKind};
use kiln_prims::builtin_table;
use kiln_value::{EvalErrorKind, EvalResult, Value};
use pretty_assertions::assert_eq;

fn table() -> DispatchTable {
    builtin_table(DispatchConfig::default()).unwrap()
}

fn call(
    table: &DispatchTable,
    receiver: &Value,
    kind: ShapeKind,
    name: &str,
    args: Vec<Value>,
) -> EvalResult {
    table.invoke(&DefaultRuntime, receiver.clone(), kind, name, args)
}

fn sample() -> Value {
    Value::list(vec![Value::int(10), Value::int(20), Value::int(30)])
}

#[test]
fn count_and_index_scenario() {
    let table = table();
    let list = sample();

    assert_eq!(call(&table, &list, ShapeKind::Getter, "count", vec![]).unwrap(), Value::int(3));
    assert_eq!(
        call(&table, &list, ShapeKind::Indexer, "", vec![Value::int(1)]).unwrap(),
        Value::int(20)
    );
    assert_eq!(
        call(&table, &list, ShapeKind::Indexer, "", vec![Value::int(-1)]).unwrap(),
        Value::int(30)
    );

    let err = call(&table, &list, ShapeKind::Indexer, "", vec![Value::int(5)]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::OutOfBounds { index: 5, len: 3 });
    assert_eq!(err.to_string(), "OutOfBoundsError: index 5 is out of bounds [0, 3)");
}

#[test]
fn index_assign_scenario() {
    let table = table();
    let list = sample();

    let assigned = call(
        &table,
        &list,
        ShapeKind::IndexedAssign,
        "",
        vec![Value::int(1), Value::int(99)],
    )
    .unwrap();
    assert_eq!(assigned, Value::int(99));
    assert_eq!(
        call(&table, &list, ShapeKind::Indexer, "", vec![Value::int(1)]).unwrap(),
        Value::int(99)
    );
}

#[test]
fn assignment_is_visible_through_aliases() {
    let table = table();
    let list = sample();
    let alias = list.clone();

    call(
        &table,
        &list,
        ShapeKind::IndexedAssign,
        "",
        vec![Value::int(0), Value::string("x")],
    )
    .unwrap();
    assert_eq!(
        call(&table, &alias, ShapeKind::Indexer, "", vec![Value::int(0)]).unwrap(),
        Value::string("x")
    );
}

#[test]
fn add_clear_and_count() {
    let table = table();
    let list = Value::list(vec![]);

    for n in 0..4 {
        let added = call(&table, &list, ShapeKind::Method, "add", vec![Value::int(n)]).unwrap();
        assert_eq!(added, Value::int(n));
    }
    assert_eq!(call(&table, &list, ShapeKind::Getter, "count", vec![]).unwrap(), Value::int(4));

    assert_eq!(
        call(&table, &list, ShapeKind::Method, "clear", vec![]).unwrap(),
        Value::Nothing
    );
    assert_eq!(call(&table, &list, ShapeKind::Getter, "count", vec![]).unwrap(), Value::int(0));
}

#[test]
fn insert_and_remove_at() {
    let table = table();
    let list = sample();

    call(
        &table,
        &list,
        ShapeKind::Method,
        "insert",
        vec![Value::int(3), Value::int(40)],
    )
    .unwrap();
    assert_eq!(
        call(&table, &list, ShapeKind::Method, "removeAt", vec![Value::int(0)]).unwrap(),
        Value::int(10)
    );
    assert_eq!(
        list.as_list().unwrap().snapshot(),
        vec![Value::int(20), Value::int(30), Value::int(40)]
    );
}

#[test]
fn string_index_on_a_list_has_no_match() {
    let table = table();
    let err =
        call(&table, &sample(), ShapeKind::Indexer, "", vec![Value::string("a")]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NoMatchingMethod {
            receiver: kiln_value::ValueTag::List,
            name: "[]".into(),
            arity: 1,
        }
    );
}

#[test]
fn getter_is_not_callable_as_method() {
    let table = table();
    let err = call(&table, &sample(), ShapeKind::Method, "count", vec![]).unwrap_err();
    assert_eq!(err.kind.class_name(), "NoMatchingMethodError");
}

#[test]
fn insert_range_includes_the_end() {
    let table = table();
    let list = Value::list(vec![Value::int(1), Value::int(2)]);

    let err = call(
        &table,
        &list,
        ShapeKind::Method,
        "insert",
        vec![Value::int(3), Value::int(0)],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "OutOfBoundsError: index 3 is out of bounds [0, 2]");

    call(
        &table,
        &list,
        ShapeKind::Method,
        "insert",
        vec![Value::int(2), Value::int(0)],
    )
    .unwrap();
    assert_eq!(call(&table, &list, ShapeKind::Getter, "count", vec![]).unwrap(), Value::int(3));
}
