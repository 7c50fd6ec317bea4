//! Schema inference tests

use super::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;
use test_case::test_case;

fn sample(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => panic!("not a sample: {other}"),
    }
}

fn build_names(registry: &mut SchemaRegistry, samples: &[Value]) -> Vec<String> {
    samples
        .iter()
        .map(|s| build(registry, &sample(s.clone())).name.clone())
        .collect()
}

// ============================================================================
// Type guessing
// ============================================================================

#[test_case(json!("text"), ScalarKind::String ; "string")]
#[test_case(json!(true), ScalarKind::Bool ; "bool true")]
#[test_case(json!(false), ScalarKind::Bool ; "bool false")]
#[test_case(json!(42), ScalarKind::Int32 ; "integer")]
#[test_case(json!(-7), ScalarKind::Int32 ; "negative integer")]
#[test_case(json!(u64::MAX), ScalarKind::Int32 ; "unsigned integer")]
#[test_case(json!(2.5), ScalarKind::Double ; "float")]
#[test_case(json!(2.0), ScalarKind::Double ; "integral float")]
fn test_infer_scalar(value: Value, expected: ScalarKind) {
    assert_eq!(infer(&value), expected);
    assert_eq!(classify(&value), Some(expected));
}

#[test]
fn test_infer_unsupported_falls_back_to_int32() {
    let value = json!({"key": "value"});
    assert_eq!(classify(&value), None);
    assert_eq!(infer(&value), ScalarKind::Int32);
}

#[test]
fn test_classify_null_has_no_kind() {
    assert_eq!(classify(&Value::Null), None);
}

// ============================================================================
// Naming
// ============================================================================

#[test_case(0, "MsgZero")]
#[test_case(1, "MsgOne")]
#[test_case(13, "MsgThirteen")]
#[test_case(20, "MsgTwenty")]
#[test_case(21, "MsgTwoOne")]
#[test_case(30, "MsgThirty")]
#[test_case(35, "MsgThreeFive")]
#[test_case(99, "MsgNineNine")]
#[test_case(100, "MsgTenZero")]
#[test_case(123, "MsgTwelveThree")]
fn test_allocate(count: usize, expected: &str) {
    assert_eq!(allocate(count), expected);
}

#[test]
fn test_allocate_is_unique() {
    let names: HashSet<String> = (0..2000).map(allocate).collect();
    assert_eq!(names.len(), 2000);
}

#[test]
fn test_names_follow_creation_order_not_content() {
    let mut a = SchemaRegistry::new();
    let mut b = SchemaRegistry::new();

    build(&mut a, &sample(json!([1])));
    build(&mut b, &sample(json!(["x", "y", true])));

    assert_eq!(a.entries()[0].name, "MsgZero");
    assert_eq!(b.entries()[0].name, "MsgZero");
}

// ============================================================================
// Field comparison
// ============================================================================

#[test]
fn test_compare_equal() {
    let a = FieldSignature::scalar(ScalarKind::Int32, 1);
    assert_eq!(a.compare(&a.clone()), FieldMatch::Equal);

    let none = FieldSignature::missing(2);
    assert_eq!(none.compare(&FieldSignature::missing(2)), FieldMatch::Equal);
}

#[test]
fn test_compare_alias_compatible() {
    let typed = FieldSignature::scalar(ScalarKind::String, 2);
    let missing = FieldSignature::missing(2);

    assert_eq!(typed.compare(&missing), FieldMatch::AliasCompatible);
    assert_eq!(missing.compare(&typed), FieldMatch::AliasCompatible);
}

#[test]
fn test_compare_incompatible() {
    let int = FieldSignature::scalar(ScalarKind::Int32, 1);
    let string = FieldSignature::scalar(ScalarKind::String, 1);
    assert_eq!(int.compare(&string), FieldMatch::Incompatible);

    // Untyped but not nullable on either side
    let mut untyped = FieldSignature::missing(1);
    untyped.nullable = false;
    assert_eq!(int.compare(&untyped), FieldMatch::Incompatible);

    // Same kind, different nullability
    let mut nullable_int = int.clone();
    nullable_int.nullable = true;
    assert_eq!(nullable_int.compare(&int), FieldMatch::Incompatible);
}

#[test]
fn test_widen_adopts_concrete_type_and_name() {
    let mut stored = FieldSignature::missing(3);
    stored.widen(&FieldSignature::scalar(ScalarKind::Double, 3));

    assert_eq!(
        stored.declared_type,
        Some(DeclaredType::Scalar(ScalarKind::Double))
    );
    assert_eq!(stored.name, "field3");
    assert!(stored.nullable);
}

#[test]
fn test_widen_never_drops_type() {
    let mut stored = FieldSignature::message("MsgZero", 1);
    stored.widen(&FieldSignature::missing(1));

    assert_eq!(
        stored.declared_type,
        Some(DeclaredType::Message("MsgZero".to_string()))
    );
    assert_eq!(stored.name, "msg1");
    assert!(stored.nullable);
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_resolve_dedup_is_idempotent() {
    let fields = vec![
        FieldSignature::scalar(ScalarKind::Int32, 1),
        FieldSignature::scalar(ScalarKind::String, 2),
    ];

    let mut registry = SchemaRegistry::new();
    let first = registry.resolve(fields.clone()).clone();
    let (index, outcome) = registry.resolve_with_outcome(fields);

    assert_eq!(index, 0);
    assert_eq!(outcome, Resolution::Existing);
    assert_eq!(registry.entries()[0], first);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.stats().deduplicated, 1);
}

#[test]
fn test_identical_shapes_never_grow_registry() {
    let mut registry = SchemaRegistry::new();
    let names = build_names(
        &mut registry,
        &[
            json!([1, "a", true, 2.5]),
            json!([9, "zz", false, 0.1]),
            json!([-3, "", true, 1e10]),
        ],
    );

    assert_eq!(names, vec!["MsgZero"; 3]);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_null_then_value_widens() {
    let mut registry = SchemaRegistry::new();
    let names = build_names(&mut registry, &[json!([1, null]), json!([1, "x"])]);

    assert_eq!(names, vec!["MsgZero", "MsgZero"]);
    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.entries()[0].fields[1],
        FieldSignature {
            declared_type: Some(DeclaredType::Scalar(ScalarKind::String)),
            name: "field2".to_string(),
            position: 2,
            nullable: true,
        }
    );
    assert_eq!(registry.stats().merged, 1);
}

#[test]
fn test_value_then_null_widens() {
    let mut registry = SchemaRegistry::new();
    build_names(&mut registry, &[json!([1, "x"]), json!([1, null])]);

    assert_eq!(registry.len(), 1);
    let field = &registry.entries()[0].fields[1];
    assert_eq!(
        field.declared_type,
        Some(DeclaredType::Scalar(ScalarKind::String))
    );
    assert_eq!(field.name, "field2");
    assert!(field.nullable);
}

#[test]
fn test_widened_type_survives_more_nulls() {
    let mut registry = SchemaRegistry::new();
    build_names(
        &mut registry,
        &[json!([1, null]), json!([1, "x"]), json!([1, null])],
    );

    assert_eq!(registry.len(), 1);
    assert!(registry.entries()[0].fields[1].is_typed());
}

#[test]
fn test_conflicting_types_are_not_merged() {
    let mut registry = SchemaRegistry::new();
    let names = build_names(&mut registry, &[json!([1, "x"]), json!([1, 2])]);

    assert_eq!(names, vec!["MsgZero", "MsgOne"]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_arity_mismatch_creates_new_entry() {
    let mut registry = SchemaRegistry::new();
    build_names(&mut registry, &[json!([1]), json!([1, 2])]);

    assert_eq!(registry.len(), 2);
}

#[test]
fn test_several_alias_fields_merge_together() {
    let mut registry = SchemaRegistry::new();
    build_names(&mut registry, &[json!([null, null]), json!([1, "x"])]);

    assert_eq!(registry.len(), 1);
    let fields = &registry.entries()[0].fields;
    assert_eq!(fields[0].type_name(), "int32");
    assert_eq!(fields[1].type_name(), "string");
    assert!(fields.iter().all(|f| f.nullable));
}

#[test]
fn test_first_mergeable_entry_wins() {
    let mut registry = SchemaRegistry::new();
    let names = build_names(
        &mut registry,
        &[json!([1, "x"]), json!([true, "x"]), json!([null, "x"])],
    );

    assert_eq!(names, vec!["MsgZero", "MsgOne", "MsgZero"]);
    assert!(registry.entries()[0].fields[0].nullable);
    assert!(!registry.entries()[1].fields[0].nullable);
}

#[test]
fn test_widened_entry_rejects_non_null_shape() {
    let mut registry = SchemaRegistry::new();
    let names = build_names(
        &mut registry,
        &[json!([1, null]), json!([1, "x"]), json!([1, "y"])],
    );

    // The widened field is nullable, the new one is not
    assert_eq!(names, vec!["MsgZero", "MsgZero", "MsgOne"]);
}

// ============================================================================
// Shape building
// ============================================================================

#[test]
fn test_nested_message_registered_first() {
    let mut registry = SchemaRegistry::new();
    let top = build(&mut registry, &sample(json!([1, "a", [2, 3]]))).clone();

    assert_eq!(registry.len(), 2);

    let nested = &registry.entries()[0];
    assert_eq!(nested.name, "MsgZero");
    assert_eq!(
        nested.fields,
        vec![
            FieldSignature::scalar(ScalarKind::Int32, 1),
            FieldSignature::scalar(ScalarKind::Int32, 2),
        ]
    );

    assert_eq!(top.name, "MsgOne");
    assert_eq!(
        top.fields,
        vec![
            FieldSignature::scalar(ScalarKind::Int32, 1),
            FieldSignature::scalar(ScalarKind::String, 2),
            FieldSignature::message("MsgZero", 3),
        ]
    );
}

#[test]
fn test_field_names_and_positions() {
    let mut registry = SchemaRegistry::new();
    let message = build(&mut registry, &sample(json!(["a", null, [true]]))).clone();

    let names: Vec<_> = message.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["field1", "none2", "msg3"]);

    let positions: Vec<_> = message.fields.iter().map(|f| f.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    assert!(message.fields[1].nullable);
    assert!(message.fields[1].declared_type.is_none());
    assert!(!message.fields[2].nullable);
}

#[test]
fn test_nested_shapes_are_shared() {
    let mut registry = SchemaRegistry::new();
    let top = build(&mut registry, &sample(json!([[1, "a"], [2, "b"]]))).clone();

    assert_eq!(registry.len(), 2);
    assert_eq!(top.references().collect::<Vec<_>>(), vec!["MsgZero", "MsgZero"]);
}

#[test]
fn test_nested_merge_keeps_parent() {
    let mut registry = SchemaRegistry::new();
    let names = build_names(&mut registry, &[json!([[1, null]]), json!([[1, "x"]])]);

    assert_eq!(names, vec!["MsgOne", "MsgOne"]);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.entries()[0].fields[1].type_name(), "string");
}

#[test]
fn test_empty_sample() {
    let mut registry = SchemaRegistry::new();
    build_names(&mut registry, &[json!([]), json!([])]);

    assert_eq!(registry.len(), 1);
    assert!(registry.entries()[0].is_empty());
}

#[test]
fn test_shape_builder_counts() {
    let mut builder = ShapeBuilder::new();
    let samples = vec![
        sample(json!([{"a": 1}, 2])),
        sample(json!([3, 4])),
    ];

    let names = builder.build_all(&samples);

    assert_eq!(names, vec!["MsgZero", "MsgZero"]);
    assert_eq!(builder.sample_count(), 2);
    assert_eq!(builder.fallback_count(), 1);
    assert_eq!(builder.registry().len(), 1);
}

#[test]
fn test_declaration_order_is_reversed() {
    let mut registry = SchemaRegistry::new();
    build(&mut registry, &sample(json!([1, [2]])));

    let order: Vec<_> = registry.declaration_order().map(|m| m.name.as_str()).collect();
    assert_eq!(order, vec!["MsgOne", "MsgZero"]);
}

// ============================================================================
// Rename
// ============================================================================

#[test]
fn test_rename_rewrites_references() {
    let mut registry = SchemaRegistry::new();
    build(&mut registry, &sample(json!([1, [2]])));

    assert!(registry.rename("MsgZero", "Inner"));
    assert!(registry.get("MsgZero").is_none());
    assert_eq!(
        registry.get("MsgOne").unwrap().fields[1].declared_type,
        Some(DeclaredType::Message("Inner".to_string()))
    );
}

#[test]
fn test_rename_rejects_unknown_and_taken_names() {
    let mut registry = SchemaRegistry::new();
    build(&mut registry, &sample(json!([1, [2]])));

    assert!(!registry.rename("MsgSeven", "Main"));
    assert!(!registry.rename("MsgZero", "MsgOne"));
    assert!(registry.rename("MsgOne", "MsgOne"));
}

// ============================================================================
// Shared registry
// ============================================================================

#[test]
fn test_shared_registry_across_threads() {
    let shared = SharedRegistry::new();
    let samples: Vec<Vec<Value>> = (0..8)
        .map(|i| {
            // A single typed sample; a second one would not match the widened entry
            if i == 3 {
                sample(json!([i, "x", [i, "b"]]))
            } else {
                sample(json!([i, null, [i, "a"]]))
            }
        })
        .collect();

    std::thread::scope(|scope| {
        for s in &samples {
            let shared = shared.clone();
            scope.spawn(move || shared.build(s));
        }
    });

    let registry = shared.snapshot();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.entries()[1].fields[1].type_name(), "string");
    assert!(registry.entries()[1].fields[1].nullable);
}
