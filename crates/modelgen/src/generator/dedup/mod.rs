//! Reuse mode: collapses structurally identical models of one unit onto the
//! first model seen with that structure.

mod hashing;

use std::collections::HashMap;

pub use hashing::StructuralKey;

use crate::generator::model::Model;

#[cfg(test)]
mod tests;

#[derive(Debug, Default)]
pub struct ModelDeduplicator {
  canonical: HashMap<StructuralKey, String>,
  /// Duplicate model name to the canonical model name it collapsed onto.
  duplicates: HashMap<String, String>,
}

impl ModelDeduplicator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `model` and returns what should be emitted in its place: the model
  /// itself when its structure is new, otherwise its collapsed duplicate form.
  pub fn process(&mut self, model: Model) -> anyhow::Result<Model> {
    let key = StructuralKey::from_model(&model)?;

    let Some(canonical) = self.canonical.get(&key).cloned() else {
      self.canonical.insert(key, model.name.clone());
      return Ok(model);
    };

    tracing::debug!(model = %model.name, %canonical, kind = %model.kind, "collapsing duplicate model");
    self.duplicates.insert(model.name.clone(), canonical.clone());
    Ok(model.into_duplicate_of(&canonical))
  }

  /// Points every data type naming a duplicate at its canonical model.
  pub fn rewrite_references(&self, models: &mut [Model]) {
    if self.duplicates.is_empty() {
      return;
    }
    for model in models {
      model.visit_data_types_mut(|data_type, _| {
        if let Some(canonical) = self.duplicates.get(&data_type.type_name) {
          data_type.type_name.clone_from(canonical);
        }
      });
    }
  }

  pub fn canonical_of(&self, name: &str) -> Option<&str> {
    self.duplicates.get(name).map(String::as_str)
  }

  pub fn collapsed(&self) -> usize {
    self.duplicates.len()
  }
}
