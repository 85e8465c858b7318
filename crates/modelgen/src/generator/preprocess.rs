//! Field preprocessors and model registration.
//!
//! Preprocessors run once per field when a model is registered with a
//! [`ModelCollector`], in the order they were configured.

use crate::generator::{
  model::{Field, Model},
  naming::case::CaseConverter,
  orchestrator::AssemblyOptions,
};

pub trait FieldPreprocessor {
  fn apply(&mut self, field: &mut Field);
}

/// Renames fields to `snake_case`, keeping the original name as the field alias
/// whenever the conversion changed it.
#[derive(Debug, Default)]
pub struct SnakeCaseFields {
  converter: CaseConverter,
}

impl SnakeCaseFields {
  pub fn new(converter: CaseConverter) -> Self {
    Self { converter }
  }
}

impl FieldPreprocessor for SnakeCaseFields {
  fn apply(&mut self, field: &mut Field) {
    if field.name.is_empty() {
      return;
    }
    let snake = self.converter.to_snake_case(&field.name);
    if snake != field.name {
      field.alias = Some(std::mem::replace(&mut field.name, snake));
    }
  }
}

/// Marks every field so that a `None` default is omitted from the rendered output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StripDefaultNone;

impl FieldPreprocessor for StripDefaultNone {
  fn apply(&mut self, field: &mut Field) {
    field.strip_default_none = true;
  }
}

/// Accumulates models produced by a front-end, running the configured field
/// preprocessors at registration time.
#[derive(Default)]
pub struct ModelCollector {
  preprocessors: Vec<Box<dyn FieldPreprocessor>>,
  models: Vec<Model>,
}

impl ModelCollector {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds the preprocessor chain selected by `options`: case conversion first,
  /// then default stripping.
  pub fn from_options(options: &AssemblyOptions) -> Self {
    let mut collector = Self::new();
    if options.snake_case_field {
      collector = collector.with_preprocessor(SnakeCaseFields::default());
    }
    if options.strip_default_none {
      collector = collector.with_preprocessor(StripDefaultNone);
    }
    collector
  }

  #[must_use]
  pub fn with_preprocessor(mut self, preprocessor: impl FieldPreprocessor + 'static) -> Self {
    self.preprocessors.push(Box::new(preprocessor));
    self
  }

  pub fn register(&mut self, mut model: Model) {
    for preprocessor in &mut self.preprocessors {
      for field in &mut model.fields {
        preprocessor.apply(field);
      }
    }
    self.models.push(model);
  }

  pub fn len(&self) -> usize {
    self.models.len()
  }

  pub fn is_empty(&self) -> bool {
    self.models.is_empty()
  }

  pub fn into_models(self) -> Vec<Model> {
    self.models
  }
}

impl Extend<Model> for ModelCollector {
  fn extend<T: IntoIterator<Item = Model>>(&mut self, iter: T) {
    for model in iter {
      self.register(model);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generator::model::DataType;

  fn model_with_fields(names: &[&str]) -> Model {
    Model::builder()
      .name("Pet")
      .fields(names.iter().map(|name| Field::new(*name, DataType::new("str"))).collect())
      .build()
  }

  #[test]
  fn test_snake_case_fields_keeps_alias() {
    let mut collector = ModelCollector::new().with_preprocessor(SnakeCaseFields::default());
    collector.register(model_with_fields(&["petName", "age", ""]));

    let models = collector.into_models();
    let fields = &models[0].fields;
    assert_eq!(fields[0].name, "pet_name");
    assert_eq!(fields[0].alias.as_deref(), Some("petName"));
    assert_eq!(fields[1].name, "age");
    assert_eq!(fields[1].alias, None, "unchanged names should not gain an alias");
    assert_eq!(fields[2].name, "");
  }

  #[test]
  fn test_from_options_applies_in_order() {
    let options = AssemblyOptions::builder()
      .snake_case_field(true)
      .strip_default_none(true)
      .build();
    let mut collector = ModelCollector::from_options(&options);
    collector.extend([model_with_fields(&["ownerId"])]);

    assert_eq!(collector.len(), 1);
    let models = collector.into_models();
    let field = &models[0].fields[0];
    assert_eq!(field.name, "owner_id");
    assert!(field.strip_default_none);
  }

  #[test]
  fn test_no_preprocessors_leaves_fields_untouched() {
    let mut collector = ModelCollector::from_options(&AssemblyOptions::default());
    collector.register(model_with_fields(&["ownerId"]));

    let models = collector.into_models();
    assert_eq!(models[0].fields[0].name, "ownerId");
    assert!(!models[0].fields[0].strip_default_none);
  }
}
