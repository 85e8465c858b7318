use std::collections::{BTreeSet, HashMap};

use super::relative::RelativeImport;
use crate::generator::naming::identifiers::ensure_unique;

/// Hands out collision-free local names for imported modules within one unit.
///
/// The same import location always receives the same name; a different location
/// whose natural name is taken gets a numeric suffix.
#[derive(Debug, Default)]
pub struct AliasRegistry {
  used: BTreeSet<String>,
  assigned: HashMap<(String, String), String>,
}

impl AliasRegistry {
  pub fn seeded<I, S>(reserved: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      used: reserved.into_iter().map(Into::into).collect(),
      assigned: HashMap::new(),
    }
  }

  pub fn add(&mut self, import: &RelativeImport) -> String {
    let key = import.key();
    if let Some(existing) = self.assigned.get(&key) {
      return existing.clone();
    }
    let alias = ensure_unique(&import.import, &self.used);
    self.used.insert(alias.clone());
    self.assigned.insert(key, alias.clone());
    alias
  }

  pub fn len(&self) -> usize {
    self.assigned.len()
  }

  pub fn is_empty(&self) -> bool {
    self.assigned.is_empty()
  }
}
