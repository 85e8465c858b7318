use serde::{Deserialize, Serialize};

/// Back-reference to the schema location a type reference originated from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reference {
  pub path: String,
}

impl Reference {
  pub fn new(path: impl Into<String>) -> Self {
    Self { path: path.into() }
  }
}

/// A type reference appearing anywhere inside a model.
///
/// `type_name` starts out as the referenced model's bare name (or a builtin such as
/// `str`) and is rewritten by the resolver into its import-qualified form. A set
/// `module_name` marks the reference as modular: the target lives in that namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataType {
  #[serde(rename = "type")]
  pub type_name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub module_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reference: Option<Reference>,
  /// Generic wrapper such as `List` or `Dict`; `data_types` holds its parameters.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub container: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub data_types: Vec<DataType>,
}

impl DataType {
  pub fn new(type_name: impl Into<String>) -> Self {
    Self {
      type_name: type_name.into(),
      ..Default::default()
    }
  }

  /// Reference to a model living in `module` (dotted namespace).
  pub fn model(module: &str, name: impl Into<String>) -> Self {
    Self {
      type_name: name.into(),
      module_name: (!module.is_empty()).then(|| module.to_string()),
      ..Default::default()
    }
  }

  pub fn container(container: impl Into<String>, data_types: Vec<DataType>) -> Self {
    let container = container.into();
    Self {
      type_name: container.clone(),
      container: Some(container),
      data_types,
      ..Default::default()
    }
  }

  #[must_use]
  pub fn with_reference(mut self, path: impl Into<String>) -> Self {
    self.reference = Some(Reference::new(path));
    self
  }

  pub fn is_modular(&self) -> bool {
    self.container.is_none() && self.module_name.as_deref().is_some_and(|module| !module.is_empty())
  }

  pub fn full_name(&self) -> String {
    match self.module_name.as_deref() {
      Some(module) if self.is_modular() => format!("{module}.{}", self.type_name),
      _ => self.type_name.clone(),
    }
  }

  /// Textual annotation for rendering, e.g. `List[d.Pet]`.
  pub fn type_hint(&self) -> String {
    match &self.container {
      Some(container) if !self.data_types.is_empty() => {
        let parameters: Vec<String> = self.data_types.iter().map(DataType::type_hint).collect();
        format!("{container}[{}]", parameters.join(", "))
      }
      Some(container) => container.clone(),
      None => self.type_name.clone(),
    }
  }

  pub fn visit<'a, F>(&'a self, visitor: &mut F)
  where
    F: FnMut(&'a DataType),
  {
    visitor(self);
    for nested in &self.data_types {
      nested.visit(visitor);
    }
  }

  pub fn visit_mut<F>(&mut self, visitor: &mut F)
  where
    F: FnMut(&mut DataType),
  {
    visitor(self);
    for nested in &mut self.data_types {
      nested.visit_mut(visitor);
    }
  }
}
