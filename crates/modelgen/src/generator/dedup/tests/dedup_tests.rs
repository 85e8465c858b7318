use std::collections::BTreeMap;

use serde_json::json;

use crate::generator::{
  dedup::{ModelDeduplicator, StructuralKey},
  model::{DataType, Field, Model, ModelKind},
  tests::support::{enumeration, model, with_plain_field},
};

fn pet(name: &str) -> Model {
  with_plain_field(with_plain_field(model(name), "id", "int"), "name", "str")
}

#[test]
fn test_structural_key_ignores_name_and_location() {
  let first = pet("Pet");
  let mut second = pet("Animal");
  second.module_path = vec!["zoo".to_string()];
  second.description = Some("different docs".to_string());

  assert_eq!(
    StructuralKey::from_model(&first).unwrap(),
    StructuralKey::from_model(&second).unwrap()
  );
}

#[test]
fn test_structural_key_respects_field_order_and_template_data() {
  let forward = pet("Pet");
  let reversed = with_plain_field(with_plain_field(model("Pet"), "name", "str"), "id", "int");
  assert_ne!(
    StructuralKey::from_model(&forward).unwrap(),
    StructuralKey::from_model(&reversed).unwrap()
  );

  let mut annotated = pet("Pet");
  annotated.extra_template_data = BTreeMap::from([("config".to_string(), json!({"frozen": true}))]);
  assert_ne!(
    StructuralKey::from_model(&forward).unwrap(),
    StructuralKey::from_model(&annotated).unwrap()
  );
}

#[test]
fn test_structural_key_is_canonical_json() {
  let mut annotated = model("Pet");
  annotated.extra_template_data = BTreeMap::from([("b".to_string(), json!(1)), ("a".to_string(), json!({"z": 1, "y": 2}))]);

  let key = StructuralKey::from_model(&annotated).unwrap();
  assert_eq!(
    key.as_str(),
    r#"{"base_classes":[],"extra_template_data":{"a":{"y":2,"z":1},"b":1},"fields":[]}"#
  );
}

#[test]
fn test_first_model_is_kept_as_canonical() {
  let mut dedup = ModelDeduplicator::new();

  let kept = dedup.process(pet("Pet")).unwrap();
  assert_eq!(kept, pet("Pet"));
  assert_eq!(dedup.collapsed(), 0);
}

#[test]
fn test_composite_duplicate_becomes_derived_model() {
  let mut dedup = ModelDeduplicator::new();
  dedup.process(pet("Pet")).unwrap();

  let mut copy = pet("Copy");
  copy.description = Some("Same shape".to_string());
  let derived = dedup.process(copy).unwrap();

  assert_eq!(derived.name, "Copy");
  assert_eq!(derived.kind, ModelKind::Composite);
  assert!(derived.fields.is_empty());
  assert_eq!(derived.base_classes, vec!["Pet".to_string()]);
  assert_eq!(derived.description.as_deref(), Some("Same shape"));
  assert_eq!(dedup.canonical_of("Copy"), Some("Pet"));
  assert_eq!(dedup.collapsed(), 1);
}

#[test]
fn test_enumeration_duplicate_is_kept_and_aliased() {
  let mut dedup = ModelDeduplicator::new();
  dedup.process(enumeration("Color", &["RED", "GREEN"])).unwrap();

  let duplicate = dedup.process(enumeration("Colour", &["RED", "GREEN"])).unwrap();

  assert_eq!(duplicate, enumeration("Colour", &["RED", "GREEN"]));
  assert_eq!(dedup.canonical_of("Colour"), Some("Color"));
}

#[test]
fn test_references_to_duplicates_are_rewritten() {
  let mut dedup = ModelDeduplicator::new();
  dedup.process(enumeration("Color", &["RED"])).unwrap();
  dedup.process(enumeration("Colour", &["RED"])).unwrap();

  let mut models = vec![
    Model::builder()
      .name("Paint")
      .fields(vec![
        Field::new("shade", DataType::new("Colour")),
        Field::new("shades", DataType::container("List", vec![DataType::new("Colour")])),
        Field::new("label", DataType::new("str")),
      ])
      .build(),
  ];
  dedup.rewrite_references(&mut models);

  let hints: Vec<String> = models[0].fields.iter().map(|field| field.data_type.type_hint()).collect();
  assert_eq!(hints, vec!["Color", "List[Color]", "str"]);
}

#[test]
fn test_distinct_structures_are_not_collapsed() {
  let mut dedup = ModelDeduplicator::new();
  dedup.process(pet("Pet")).unwrap();
  let other = dedup.process(with_plain_field(model("Tag"), "label", "str")).unwrap();

  assert_eq!(other.fields.len(), 1);
  assert_eq!(dedup.collapsed(), 0);
}
