//! In-memory model graph handed over by the schema front-end.
//!
//! Models arrive fully shaped: name, kind, base classes and field list are
//! fixed. The assembly stages only mutate `reference_classes`, the textual
//! `type_name` of each [`DataType`], and the imports collected per unit.

mod data_type;
mod imports;

use std::{
  collections::{BTreeMap, BTreeSet},
  path::PathBuf,
};

pub use data_type::{DataType, Reference};
pub use imports::{FUTURE_MODULE, Import, Imports, parse_statements};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

/// Closed set of model kinds. Each kind carries its own duplicate-collapsing rule,
/// see [`Model::into_duplicate_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModelKind {
  #[default]
  Composite,
  Enumeration,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub alias: Option<String>,
  pub data_type: DataType,
  #[serde(default)]
  pub required: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default)]
  pub strip_default_none: bool,
}

impl Field {
  pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
    Self {
      name: name.into(),
      data_type,
      ..Default::default()
    }
  }

  #[must_use]
  pub fn required(mut self) -> Self {
    self.required = true;
    self
  }

  #[must_use]
  pub fn with_default(mut self, value: Value) -> Self {
    self.default = Some(value);
    self
  }
}

/// A generated type definition destined for emitted source text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, bon::Builder)]
pub struct Model {
  #[builder(into)]
  pub name: String,
  #[serde(default)]
  #[builder(default)]
  pub kind: ModelKind,
  #[serde(default)]
  #[builder(default)]
  pub fields: Vec<Field>,
  #[serde(default)]
  #[builder(default)]
  pub base_classes: Vec<String>,
  /// Names of the models this one depends on. Models outside the root namespace
  /// are named by their qualified name (`a.b.Name`).
  #[serde(default)]
  #[builder(default)]
  pub reference_classes: BTreeSet<String>,
  /// Type references that do not belong to a field (generic parameters, root types).
  #[serde(default)]
  #[builder(default)]
  pub extra_data_types: Vec<DataType>,
  #[serde(default)]
  #[builder(default)]
  pub module_path: Vec<String>,
  #[serde(default)]
  pub source_path: Option<PathBuf>,
  #[serde(default)]
  #[builder(default)]
  pub imports: Vec<Import>,
  #[serde(default)]
  #[builder(into)]
  pub description: Option<String>,
  #[serde(default)]
  #[builder(default)]
  pub extra_template_data: BTreeMap<String, Value>,
}

impl Model {
  /// Dotted namespace of the model, empty for the root namespace.
  pub fn module_name(&self) -> String {
    self.module_path.join(".")
  }

  /// Graph-wide identifier: `module.Name`, or the bare name at the root.
  pub fn qualified_name(&self) -> String {
    if self.module_path.is_empty() {
      self.name.clone()
    } else {
      format!("{}.{}", self.module_name(), self.name)
    }
  }

  pub fn is_self_referencing(&self) -> bool {
    self.reference_classes.contains(&self.qualified_name())
  }

  /// All type references in pre-order: field types (with their generic parameters)
  /// followed by the extra data types.
  pub fn data_types(&self) -> Vec<&DataType> {
    let mut collected = vec![];
    for data_type in self
      .fields
      .iter()
      .map(|field| &field.data_type)
      .chain(&self.extra_data_types)
    {
      data_type.visit(&mut |visited| collected.push(visited));
    }
    collected
  }

  /// Visits every type reference mutably, in the same order as [`Model::data_types`],
  /// handing the visitor this model's reference set alongside.
  pub fn visit_data_types_mut<F>(&mut self, mut visitor: F)
  where
    F: FnMut(&mut DataType, &mut BTreeSet<String>),
  {
    let Self {
      fields,
      extra_data_types,
      reference_classes,
      ..
    } = self;

    let data_types = fields
      .iter_mut()
      .map(|field| &mut field.data_type)
      .chain(extra_data_types.iter_mut());

    for data_type in data_types {
      data_type.visit_mut(&mut |visited| visitor(visited, reference_classes));
    }
  }

  /// Collapses a structural duplicate of `canonical`.
  ///
  /// Enumerations are kept as they are; their references are redirected through
  /// a name alias instead. Composite models become a zero-field subclass of the
  /// canonical model.
  #[must_use]
  pub fn into_duplicate_of(self, canonical: &str) -> Self {
    match self.kind {
      ModelKind::Enumeration => self,
      ModelKind::Composite => Self {
        name: self.name,
        kind: ModelKind::Composite,
        base_classes: vec![canonical.to_string()],
        module_path: self.module_path,
        source_path: self.source_path,
        description: self.description,
        ..Default::default()
      },
    }
  }
}
