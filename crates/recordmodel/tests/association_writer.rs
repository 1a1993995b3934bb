//! Association writer semantics: linking, inverse wiring, failure modes.

use recordmodel::prelude::*;

// A tree node with a self-referential `parent` association and a declared
// inverse pointing back at the assigning record.
static NODE_ATTRS: [AttributeInfo; 3] = [
    AttributeInfo::new("id", ColumnType::BigInt).primary_key(true),
    AttributeInfo::new("parent", ColumnType::BigInt).nullable(true),
    AttributeInfo::new("child_id", ColumnType::BigInt).nullable(true),
];
static NODE_REFLECTIONS: [Reflection; 2] = [
    Reflection::new("parent", node)
        .foreign_key("parent")
        .inverse_of("child"),
    Reflection::new("child", node).foreign_key("child_id"),
];
static NODE: ModelDescriptor = ModelDescriptor::new("Node", "nodes")
    .attributes(&NODE_ATTRS)
    .reflections(&NODE_REFLECTIONS);
fn node() -> &'static ModelDescriptor {
    &NODE
}

// A model of a different class, for mismatch checks.
static TAG_ATTRS: [AttributeInfo; 1] =
    [AttributeInfo::new("id", ColumnType::BigInt).primary_key(true)];
static TAG: ModelDescriptor = ModelDescriptor::new("Tag", "tags").attributes(&TAG_ATTRS);

// A model without any primary key, used as an association target.
static NOTE_ATTRS: [AttributeInfo; 1] =
    [AttributeInfo::new("body", ColumnType::Text).nullable(true)];
static NOTE: ModelDescriptor = ModelDescriptor::new("Note", "notes").attributes(&NOTE_ATTRS);
fn note() -> &'static ModelDescriptor {
    &NOTE
}

static PIN_ATTRS: [AttributeInfo; 2] = [
    AttributeInfo::new("id", ColumnType::BigInt).primary_key(true),
    AttributeInfo::new("note_id", ColumnType::BigInt).nullable(true),
];
static PIN_REFLECTIONS: [Reflection; 1] = [Reflection::new("note", note).foreign_key("note_id")];
static PIN: ModelDescriptor = ModelDescriptor::new("Pin", "pins")
    .attributes(&PIN_ATTRS)
    .reflections(&PIN_REFLECTIONS);

fn saved_node(id: i64) -> Record {
    let record = Record::new(&NODE).unwrap();
    record.write_attribute("id", Value::BigInt(id)).unwrap();
    record.clear_changes();
    record
}

#[test]
fn foreign_key_follows_the_target_primary_key() {
    let parent = saved_node(10);
    let child = saved_node(11);

    child.set("parent", &parent).unwrap();
    assert_eq!(child.read_attribute("parent"), Some(Value::BigInt(10)));
    assert_eq!(child.changed(), vec!["parent"]);
}

#[test]
fn unsaved_target_leaves_the_foreign_key_null() {
    let parent = Record::new(&NODE).unwrap();
    let child = saved_node(1);

    child.set("parent", &parent).unwrap();
    assert_eq!(child.read_attribute("parent"), Some(Value::Null));
    let cached = child.association("parent").expect("target should be cached");
    assert!(Record::ptr_eq(&cached, &parent));
}

#[test]
fn wrong_class_is_a_type_mismatch() {
    let child = saved_node(2);
    let tag = Record::new(&TAG).unwrap();

    let err = child.set("parent", &tag).unwrap_err();
    match err {
        Error::Association(e) => assert_eq!(e.association, "parent"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(child.association("parent").is_none());
}

#[test]
fn readonly_receiver_is_rejected() {
    let parent = saved_node(3);
    let child = saved_node(4);
    child.mark_readonly();

    let err = child.set("parent", &parent).unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
}

#[test]
fn target_without_primary_key_is_rejected() {
    let pin = Record::new(&PIN).unwrap();
    let orphan = Record::new(&NOTE).unwrap();

    let err = pin.set("note", &orphan).unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
}

#[test]
fn assigning_null_unlinks() {
    let parent = saved_node(5);
    let child = saved_node(6);

    child.set("parent", &parent).unwrap();
    assert!(child.association("parent").is_some());

    // Through the dual setter, NULL takes the scalar path and the stale
    // cache entry survives; unlinking through the association writer
    // clears both.
    recordmodel::associations::write(
        &child,
        NODE.find_reflection("parent").unwrap(),
        Settable::Value(Value::Null),
    )
    .unwrap();
    assert_eq!(child.read_attribute("parent"), Some(Value::Null));
    assert!(child.association("parent").is_none());
}

#[test]
fn inverse_is_wired_weakly_on_the_target() {
    let parent = saved_node(7);
    let child = saved_node(8);

    child.set("parent", &parent).unwrap();
    let back = parent.association("child").expect("inverse should be cached");
    assert!(Record::ptr_eq(&back, &child));

    // The inverse does not keep the child alive.
    drop(back);
    drop(child);
    assert!(parent.association("child").is_none());
}

#[test]
fn self_assignment_links_without_deadlocking() {
    let lone = saved_node(9);
    lone.set("parent", &lone).unwrap();

    assert_eq!(lone.read_attribute("parent"), Some(Value::BigInt(9)));
    let cached = lone.association("parent").expect("self link should be cached");
    assert!(Record::ptr_eq(&cached, &lone));
}
