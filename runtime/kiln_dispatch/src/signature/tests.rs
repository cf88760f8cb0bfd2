#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;
use crate::error::RegistrationError;
use kiln_value::ValueTag;
use pretty_assertions::assert_eq;

fn parse(text: &str) -> Signature {
    parse_signature(text).unwrap_or_else(|err| panic!("{text}: {err}"))
}

fn offset_of(text: &str) -> usize {
    match parse_signature(text) {
        Err(RegistrationError::MalformedSignature { offset, .. }) => offset,
        other => panic!("expected malformed signature for {text}, got {other:?}"),
    }
}

fn exact(tag: ValueTag) -> TypePredicate {
    TypePredicate::Exact(tag)
}

#[test]
fn getter_with_is_receiver() {
    let sig = parse("(is List) count");
    assert_eq!(sig.receiver, Param::typed(exact(ValueTag::List)));
    assert_eq!(sig.shape, CallShape::Getter { name: "count".into() });
    assert_eq!(sig.kind(), ShapeKind::Getter);
    assert_eq!(sig.arity(), 0);
}

#[test]
fn bare_type_and_is_are_equivalent() {
    let with_is = parse("(is String) count");
    let bare = parse("(String) count");
    let named = parse("(_ String) count");
    assert!(with_is.same_pattern(&bare));
    assert!(with_is.same_pattern(&named));
    assert_eq!(named.receiver.binding.as_deref(), Some("_"));
}

#[test]
fn method_with_untyped_param() {
    let sig = parse("(is List) add(item)");
    assert_eq!(
        sig.shape,
        CallShape::Method {
            name: "add".into(),
            params: vec![Param::new(Some("item"), TypePredicate::Any)],
        }
    );
}

#[test]
fn method_with_no_params_is_not_a_getter() {
    let sig = parse("(is List) clear()");
    assert_eq!(sig.kind(), ShapeKind::Method);
    assert_eq!(sig.arity(), 0);
    assert_eq!(sig.name(), "clear");
}

#[test]
fn method_params_comma_or_space_separated() {
    let commas = parse("(is List) insert(index is Int, item)");
    let spaces = parse("(is List) insert(index is Int item)");
    assert!(commas.same_pattern(&spaces));
    let preds: Vec<_> = commas.params().map(|p| p.predicate).collect();
    assert_eq!(preds, vec![exact(ValueTag::Int), TypePredicate::Any]);
}

#[test]
fn indexer_with_bare_type() {
    let sig = parse("(_ String)[index Int]");
    assert_eq!(
        sig.shape,
        CallShape::Indexer {
            params: vec![Param::new(Some("index"), exact(ValueTag::Int))],
        }
    );
    assert_eq!(sig.call_name(), "[]");
    assert_eq!(sig.name(), "");
}

#[test]
fn indexed_assign_puts_value_last() {
    let sig = parse("(is List)[index is Int] = (item)");
    assert_eq!(sig.kind(), ShapeKind::IndexedAssign);
    assert_eq!(sig.arity(), 2);
    let bindings: Vec<_> = sig.params().map(|p| p.binding.as_deref()).collect();
    assert_eq!(bindings, vec![Some("index"), Some("item")]);
    assert_eq!(sig.call_name(), "[]=");
}

#[test]
fn indexed_assign_without_spaces() {
    let sig = parse("(is List)[index is Int]=(item is Int)");
    assert_eq!(
        sig.shape,
        CallShape::IndexedAssign {
            params: vec![Param::new(Some("index"), exact(ValueTag::Int))],
            value: Param::new(Some("item"), exact(ValueTag::Int)),
        }
    );
}

#[test]
fn operators() {
    let plus = parse("(_ String) +(right String)");
    assert_eq!(plus.kind(), ShapeKind::Operator);
    assert_eq!(plus.name(), "+");
    assert_eq!(plus.arity(), 1);

    let eq = parse("(_ String) ==(right String)");
    assert_eq!(eq.name(), "==");
}

#[test]
fn predicate_suffix_in_method_names() {
    assert_eq!(parse("(_ String) contains?(needle String)").name(), "contains?");
}

#[test]
fn source_is_preserved_for_display() {
    let text = "(is List)[index is Int] = (item)";
    assert_eq!(parse(text).to_string(), text);
}

#[test]
fn accepts_checks_receiver_and_params() {
    let sig = parse("(is List)[index is Int] = (item)");
    assert!(sig.accepts(ValueTag::List, &[ValueTag::Int, ValueTag::String]));
    assert!(!sig.accepts(ValueTag::String, &[ValueTag::Int, ValueTag::String]));
    assert!(!sig.accepts(ValueTag::List, &[ValueTag::Bool, ValueTag::String]));
    assert!(!sig.accepts(ValueTag::List, &[ValueTag::Int]));

    let any = parse("(thing) describe");
    assert!(any.accepts(ValueTag::Tuple, &[]));
}

#[test]
fn same_pattern_ignores_names_but_not_predicates() {
    let a = parse("(is List) add(item)");
    let b = parse("(list List) add(x)");
    let c = parse("(is List) add(item Int)");
    let d = parse("(is List) push(item)");
    assert!(a.same_pattern(&b));
    assert!(!a.same_pattern(&c));
    assert!(!a.same_pattern(&d));
}

#[test]
fn unknown_type_is_malformed() {
    let err = parse_signature("(is List)[index is Integer]").unwrap_err();
    assert_eq!(
        err,
        RegistrationError::MalformedSignature {
            signature: "(is List)[index is Integer]".into(),
            offset: 19,
            reason: "unknown type `Integer`".into(),
        }
    );
}

#[test]
fn malformed_offsets_point_at_the_problem() {
    // missing receiver clause
    assert_eq!(offset_of("count"), 0);
    // empty receiver
    assert_eq!(offset_of("() count"), 1);
    // `is` without a type
    assert_eq!(offset_of("(is) count"), 3);
    // no call shape
    assert_eq!(offset_of("(is List)"), 9);
    // unterminated parameter list
    assert_eq!(offset_of("(is List) add(item"), 18);
    // trailing input
    assert_eq!(offset_of("(is List) count extra"), 16);
    // bare `=` operator
    assert_eq!(offset_of("(is List) =(item)"), 10);
    // indexed assignment without a value
    assert_eq!(offset_of("(is List)[index is Int] = ()"), 27);
    // stray character
    assert_eq!(offset_of("(is List) add(item.)"), 18);
    // trailing comma
    assert_eq!(offset_of("(is List) insert(index Int,)"), 27);
}

#[test]
fn malformed_message_mentions_signature() {
    let err = parse_signature("(is List) add(item").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed signature `(is List) add(item` at offset 18: expected a parameter or `)`"
    );
}
