//! Dual-purpose setter generation and call-time dispatch.

use recordmodel::prelude::*;

// A self-referential model whose `parent` association is stored in a column
// that is also named `parent`.
static PAGE_ATTRS: [AttributeInfo; 3] = [
    AttributeInfo::new("id", ColumnType::BigInt).primary_key(true),
    AttributeInfo::new("title", ColumnType::Text).nullable(true),
    AttributeInfo::new("parent", ColumnType::BigInt).nullable(true),
];
static PAGE_REFLECTIONS: [Reflection; 1] = [Reflection::new("parent", page).foreign_key("parent")];
static PAGE: ModelDescriptor = ModelDescriptor::new("Page", "pages")
    .attributes(&PAGE_ATTRS)
    .reflections(&PAGE_REFLECTIONS);
fn page() -> &'static ModelDescriptor {
    &PAGE
}

// Conventional foreign-key naming: no collision, nothing to generate.
static EMPLOYEE_ATTRS: [AttributeInfo; 2] = [
    AttributeInfo::new("id", ColumnType::BigInt).primary_key(true),
    AttributeInfo::new("manager_id", ColumnType::BigInt).nullable(true),
];
static EMPLOYEE_REFLECTIONS: [Reflection; 1] =
    [Reflection::new("manager", employee).foreign_key("manager_id")];
static EMPLOYEE: ModelDescriptor = ModelDescriptor::new("Employee", "employees")
    .attributes(&EMPLOYEE_ATTRS)
    .reflections(&EMPLOYEE_REFLECTIONS);
fn employee() -> &'static ModelDescriptor {
    &EMPLOYEE
}

// No configured foreign key at all: also nothing to generate.
static TOPIC_ATTRS: [AttributeInfo; 2] = [
    AttributeInfo::new("id", ColumnType::BigInt).primary_key(true),
    AttributeInfo::new("parent_id", ColumnType::BigInt).nullable(true),
];
static TOPIC_REFLECTIONS: [Reflection; 1] = [Reflection::new("parent", topic)];
static TOPIC: ModelDescriptor = ModelDescriptor::new("Topic", "topics")
    .attributes(&TOPIC_ATTRS)
    .reflections(&TOPIC_REFLECTIONS);
fn topic() -> &'static ModelDescriptor {
    &TOPIC
}

// The colliding name is an alias for a differently-named column.
static CATEGORY_ATTRS: [AttributeInfo; 2] = [
    AttributeInfo::new("id", ColumnType::BigInt).primary_key(true),
    AttributeInfo::new("parent", ColumnType::BigInt)
        .column("parent_ref")
        .nullable(true),
];
static CATEGORY_REFLECTIONS: [Reflection; 1] =
    [Reflection::new("parent", category).foreign_key("parent")];
static CATEGORY: ModelDescriptor = ModelDescriptor::new("Category", "categories")
    .attributes(&CATEGORY_ATTRS)
    .reflections(&CATEGORY_REFLECTIONS);
fn category() -> &'static ModelDescriptor {
    &CATEGORY
}

#[test]
fn colliding_foreign_key_generates_exactly_one_setter() {
    PAGE.build().unwrap();
    assert!(PAGE.generated_methods().contains("parent"));
    assert_eq!(PAGE.generated_methods().len(), 1);
}

#[test]
fn conventional_foreign_key_generates_nothing() {
    EMPLOYEE.build().unwrap();
    assert!(EMPLOYEE.generated_methods().is_empty());
}

#[test]
fn unconfigured_foreign_key_generates_nothing() {
    TOPIC.build().unwrap();
    assert!(TOPIC.generated_methods().is_empty());
}

#[test]
fn scalar_goes_to_the_attribute_writer() {
    let child = Record::new(&PAGE).unwrap();
    let written = child.set("parent", 42i64).unwrap();
    assert_eq!(written, Value::BigInt(42));
    assert_eq!(child.read_attribute("parent"), Some(Value::BigInt(42)));
    assert!(child.is_changed("parent"));
    // The association subsystem was never involved.
    assert!(child.association("parent").is_none());
}

#[test]
fn record_goes_to_the_association_writer() {
    let root = Record::new(&PAGE).unwrap();
    root.write_attribute("id", Value::BigInt(7)).unwrap();

    let child = Record::new(&PAGE).unwrap();
    let written = child.set("parent", &root).unwrap();
    assert_eq!(written, Value::BigInt(7));
    assert_eq!(child.read_attribute("parent"), Some(Value::BigInt(7)));

    let cached = child.association("parent").expect("target should be cached");
    assert!(Record::ptr_eq(&cached, &root));
}

#[test]
fn class_handle_dispatches_like_an_instance() {
    let child = Record::new(&PAGE).unwrap();
    // Routed to the association writer, which rejects a bare class.
    let err = child.set("parent", &PAGE).unwrap_err();
    assert!(matches!(err, Error::Association(_)));
    // Nothing was written through the attribute path either.
    assert_eq!(child.read_attribute("parent"), None);
}

#[test]
fn null_takes_the_scalar_path() {
    let child = Record::new(&PAGE).unwrap();
    child.set("parent", 9i64).unwrap();
    let written = child.set("parent", Value::Null).unwrap();
    assert_eq!(written, Value::Null);
    assert_eq!(child.read_attribute("parent"), Some(Value::Null));
}

#[test]
fn attribute_writer_failures_propagate_unchanged() {
    let child = Record::new(&PAGE).unwrap();
    let err = child.set("parent", "not-a-key").unwrap_err();
    match err {
        Error::TypeCast(e) => {
            assert_eq!(e.column, "parent");
            assert_eq!(e.expected, "BIGINT");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn aliased_column_is_resolved_at_generation_time() {
    CATEGORY.build().unwrap();
    assert!(CATEGORY.generated_methods().contains("parent"));

    let node = Record::new(&CATEGORY).unwrap();
    node.set("parent", 5i64).unwrap();
    assert_eq!(node.read_attribute("parent_ref"), Some(Value::BigInt(5)));
    assert_eq!(node.get("parent"), Some(Value::BigInt(5)));
}

#[test]
fn applying_twice_leaves_one_equivalent_setter() {
    PAGE.build().unwrap();
    let extension = RecursiveAssociationExtension;
    extension.apply(&PAGE, &PAGE_REFLECTIONS[0]);
    extension.apply(&PAGE, &PAGE_REFLECTIONS[0]);
    assert_eq!(PAGE.generated_methods().len(), 1);

    let child = Record::new(&PAGE).unwrap();
    child.set("parent", 3i64).unwrap();
    assert_eq!(child.read_attribute("parent"), Some(Value::BigInt(3)));
}

#[test]
fn extension_declares_no_options() {
    assert!(RecursiveAssociationExtension.declared_options().is_empty());
}

#[test]
fn ungenerated_models_still_assign_both_ways() {
    let boss = Record::new(&EMPLOYEE).unwrap();
    boss.write_attribute("id", Value::BigInt(1)).unwrap();

    let worker = Record::new(&EMPLOYEE).unwrap();
    worker.set("manager", &boss).unwrap();
    assert_eq!(worker.read_attribute("manager_id"), Some(Value::BigInt(1)));

    worker.set("manager_id", 2i64).unwrap();
    assert_eq!(worker.read_attribute("manager_id"), Some(Value::BigInt(2)));
}
