use std::{collections::BTreeMap, hash::Hash};

use anyhow::Context;
use json_canon::to_string as to_canonical_json;
use serde::Serialize;
use serde_json::Value;

use crate::generator::model::{Field, Model};

#[derive(Serialize)]
struct StructuralParts<'a> {
  base_classes: &'a [String],
  extra_template_data: &'a BTreeMap<String, Value>,
  fields: &'a [Field],
}

/// Opaque structural identity of a model: its base classes, extra template data
/// and fields, ignoring the model's own name and location.
///
/// Two models with the same key render to the same body apart from the class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralKey(String);

impl StructuralKey {
  /// Serializes the structural parts to RFC 8785 canonical JSON, so map key order
  /// never distinguishes two models while field order still does.
  pub fn from_model(model: &Model) -> anyhow::Result<Self> {
    let parts = StructuralParts {
      base_classes: &model.base_classes,
      extra_template_data: &model.extra_template_data,
      fields: &model.fields,
    };
    let value = serde_json::to_value(&parts)
      .with_context(|| format!("Failed to serialize model '{}' for deduplication", model.name))?;
    let canonical_json = to_canonical_json(&value).context("Failed to create canonical JSON string")?;
    Ok(Self(canonical_json))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Hash for StructuralKey {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    let hash = blake3::hash(self.0.as_bytes());
    hash.as_bytes().hash(state);
  }
}
