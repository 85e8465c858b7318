use std::{
  collections::BTreeSet,
  fmt::{self, Display, Formatter},
};

use itertools::Itertools;
use thiserror::Error;

/// A model whose references could not be satisfied by any ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedModel {
  pub name: String,
  pub references: BTreeSet<String>,
}

impl Display for UnresolvedModel {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "[class: {} references: {{{}}}]",
      self.name,
      self.references.iter().join(", ")
    )
  }
}

#[derive(Debug, Error)]
pub enum AssemblyError {
  /// Raised after bounded passes and base-class reordering still leave models with
  /// references outside the remaining set.
  #[error("Unable to resolve model references: {}", .models.iter().join(", "))]
  UnresolvableReferenceGraph { models: Vec<UnresolvedModel> },
}

impl AssemblyError {
  pub fn unresolved(&self) -> &[UnresolvedModel] {
    match self {
      AssemblyError::UnresolvableReferenceGraph { models } => models,
    }
  }
}
