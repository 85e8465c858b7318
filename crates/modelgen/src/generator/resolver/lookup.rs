use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Where a schema reference path ended up after model generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReference {
  /// Full reference path, e.g. `pets.json#/definitions/Pet`.
  pub path: String,
  pub name: String,
  /// Dotted namespace the model actually lives in.
  #[serde(default)]
  pub module_name: String,
}

impl ResolvedReference {
  pub fn new(path: impl Into<String>, module_name: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      name: name.into(),
      module_name: module_name.into(),
    }
  }

  /// File part of the reference path, before `#/`.
  pub fn source_file(&self) -> &str {
    self.path.split("#/").next().unwrap_or_default()
  }
}

pub trait ReferenceLookup {
  fn lookup(&self, path: &str) -> Option<&ResolvedReference>;
}

#[derive(Debug, Default, Clone)]
pub struct ReferenceIndex {
  references: HashMap<String, ResolvedReference>,
}

impl ReferenceIndex {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, reference: ResolvedReference) {
    self.references.insert(reference.path.clone(), reference);
  }

  pub fn len(&self) -> usize {
    self.references.len()
  }

  pub fn is_empty(&self) -> bool {
    self.references.is_empty()
  }
}

impl FromIterator<ResolvedReference> for ReferenceIndex {
  fn from_iter<T: IntoIterator<Item = ResolvedReference>>(iter: T) -> Self {
    let mut index = Self::new();
    for reference in iter {
      index.insert(reference);
    }
    index
  }
}

impl ReferenceLookup for ReferenceIndex {
  fn lookup(&self, path: &str) -> Option<&ResolvedReference> {
    self.references.get(path)
  }
}
