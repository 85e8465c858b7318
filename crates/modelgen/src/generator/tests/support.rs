use std::collections::BTreeSet;

use crate::generator::{
  model::{DataType, Field, Model, ModelKind},
  partition::{INIT_FILE, UnitKind, UnitPlan},
};

pub(crate) fn model(name: &str) -> Model {
  Model::builder().name(name).build()
}

pub(crate) fn model_in(module: &[&str], name: &str) -> Model {
  Model::builder()
    .name(name)
    .module_path(module.iter().map(ToString::to_string).collect())
    .build()
}

pub(crate) fn enumeration(name: &str, members: &[&str]) -> Model {
  Model::builder()
    .name(name)
    .kind(ModelKind::Enumeration)
    .fields(members.iter().map(|member| Field::new(*member, DataType::new("str"))).collect())
    .build()
}

/// Replaces the reference set without touching fields.
pub(crate) fn with_references(mut model: Model, references: &[&str]) -> Model {
  model.reference_classes = references.iter().map(ToString::to_string).collect::<BTreeSet<_>>();
  model
}

pub(crate) fn with_base(mut model: Model, base: &str) -> Model {
  model.base_classes.push(base.to_string());
  model.reference_classes.insert(base.to_string());
  model
}

/// Adds a field typed as the model `qualified` (e.g. `a.b.Pet`) and records the reference.
pub(crate) fn with_model_field(mut model: Model, field_name: &str, qualified: &str) -> Model {
  let (module, name) = qualified.rsplit_once('.').unwrap_or(("", qualified));
  model.fields.push(Field::new(field_name, DataType::model(module, name)).required());
  model.reference_classes.insert(qualified.to_string());
  model
}

pub(crate) fn with_plain_field(mut model: Model, field_name: &str, type_name: &str) -> Model {
  model.fields.push(Field::new(field_name, DataType::new(type_name)).required());
  model
}

pub(crate) fn position(order: &[String], name: &str) -> usize {
  order
    .iter()
    .position(|candidate| candidate == name)
    .unwrap_or_else(|| panic!("{name} missing from {order:?}"))
}

pub(crate) fn unit_plan(module: &[&str], kind: UnitKind, models: Vec<Model>) -> UnitPlan {
  let module_path: Vec<String> = module.iter().map(ToString::to_string).collect();
  let mut key = module_path.clone();
  key.push(INIT_FILE.to_string());
  UnitPlan {
    key,
    module_path,
    kind,
    models,
  }
}
