use crate::generator::{
  model::Model,
  partition::{ModuleKey, UnitKind, UnitSlot, partition_units},
  tests::support::{model, model_in},
};

fn key(parts: &[&str]) -> ModuleKey {
  parts.iter().map(ToString::to_string).collect()
}

fn planned<'a>(slot: Option<&'a UnitSlot>) -> (UnitKind, Vec<&'a str>) {
  match slot {
    Some(UnitSlot::Planned(plan)) => (plan.kind, plan.models.iter().map(|model| model.name.as_str()).collect()),
    other => panic!("expected a planned unit, got {other:?}"),
  }
}

#[test]
fn test_root_models_form_single_root_unit() {
  let partition = partition_units(vec![model("A"), model("B")]);

  assert_eq!(partition.len(), 1);
  assert_eq!(planned(partition.get(&["__init__.py"])), (UnitKind::RootInit, vec!["A", "B"]));
}

#[test]
fn test_leaf_namespace_becomes_module_file() {
  let partition = partition_units(vec![model("Root"), model_in(&["pets"], "Dog")]);

  let keys: Vec<&ModuleKey> = partition.keys().collect();
  assert_eq!(keys, vec![&key(&["__init__.py"]), &key(&["pets.py"])], "placeholders keep their slot once filled");
  assert_eq!(planned(partition.get(&["pets.py"])), (UnitKind::Leaf, vec!["Dog"]));
  assert_eq!(planned(partition.get(&["__init__.py"])), (UnitKind::RootInit, vec!["Root"]));
}

#[test]
fn test_namespace_with_children_becomes_package_init() {
  let models: Vec<Model> = vec![
    model_in(&["a"], "Parent"),
    model_in(&["a", "b"], "Child"),
    model_in(&["a", "b", "c"], "Grandchild"),
  ];

  let partition = partition_units(models);

  assert_eq!(planned(partition.get(&["a", "b", "c.py"])), (UnitKind::Leaf, vec!["Grandchild"]));
  assert_eq!(
    planned(partition.get(&["a", "b", "__init__.py"])),
    (UnitKind::PackageInit, vec!["Child"])
  );
  assert_eq!(
    planned(partition.get(&["a", "__init__.py"])),
    (UnitKind::PackageInit, vec!["Parent"])
  );
  assert!(matches!(partition.get(&["__init__.py"]), Some(UnitSlot::Placeholder)));
  assert_eq!(partition.len(), 4);
}

#[test]
fn test_every_ancestor_gets_placeholder() {
  let partition = partition_units(vec![model_in(&["x", "y", "z"], "Deep")]);

  let keys: Vec<&ModuleKey> = partition.keys().collect();
  assert_eq!(
    keys,
    vec![
      &key(&["__init__.py"]),
      &key(&["x", "__init__.py"]),
      &key(&["x", "y", "__init__.py"]),
      &key(&["x", "y", "z.py"]),
    ]
  );
  assert!(matches!(partition.get(&["x", "__init__.py"]), Some(UnitSlot::Placeholder)));
  assert!(matches!(partition.get(&["x", "y", "__init__.py"]), Some(UnitSlot::Placeholder)));
}

#[test]
fn test_model_order_within_unit_is_preserved() {
  let models = vec![
    model_in(&["shop"], "Order"),
    model("Standalone"),
    model_in(&["shop"], "Customer"),
    model_in(&["shop"], "Address"),
  ];

  let partition = partition_units(models);

  assert_eq!(
    planned(partition.get(&["shop.py"])),
    (UnitKind::Leaf, vec!["Order", "Customer", "Address"])
  );
}

#[test]
fn test_empty_input_has_no_units() {
  assert!(partition_units(vec![]).is_empty());
}
