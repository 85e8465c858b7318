//! Groups ordered models into output units that mirror the namespace tree.
//!
//! A namespace with nested namespaces below it becomes a package-init unit
//! (`a/b/__init__.py`); one without becomes a leaf unit (`a/b.py`). Groups are
//! visited deepest-first so a namespace's children are known before the
//! namespace itself is placed.

use indexmap::IndexMap;
use itertools::Itertools;
use strum::Display;

use crate::generator::model::Model;

pub const INIT_FILE: &str = "__init__.py";
pub const MODULE_EXTENSION: &str = "py";

/// File-path-like key of a unit: namespace directories followed by the file name.
pub type ModuleKey = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum UnitKind {
  RootInit,
  PackageInit,
  Leaf,
}

#[derive(Debug)]
pub struct UnitPlan {
  pub key: ModuleKey,
  pub module_path: Vec<String>,
  pub kind: UnitKind,
  pub models: Vec<Model>,
}

impl UnitPlan {
  pub fn module_name(&self) -> String {
    self.module_path.join(".")
  }
}

#[derive(Debug)]
pub enum UnitSlot {
  /// Package-init created only so a nested namespace has a parent.
  Placeholder,
  Planned(UnitPlan),
}

#[derive(Debug, Default)]
pub struct ModulePartition {
  slots: IndexMap<ModuleKey, UnitSlot>,
}

impl ModulePartition {
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  pub fn keys(&self) -> impl Iterator<Item = &ModuleKey> {
    self.slots.keys()
  }

  pub fn get(&self, key: &[&str]) -> Option<&UnitSlot> {
    let key: ModuleKey = key.iter().map(ToString::to_string).collect();
    self.slots.get(&key)
  }

  pub fn into_slots(self) -> impl Iterator<Item = (ModuleKey, UnitSlot)> {
    self.slots.into_iter()
  }
}

pub fn root_key() -> ModuleKey {
  vec![INIT_FILE.to_string()]
}

fn init_key(namespace: &[String]) -> ModuleKey {
  let mut key = namespace.to_vec();
  key.push(INIT_FILE.to_string());
  key
}

fn leaf_key(parents: &[String], last: &str) -> ModuleKey {
  let mut key = parents.to_vec();
  key.push(format!("{last}.{MODULE_EXTENSION}"));
  key
}

/// Partitions dependency-ordered models into units. Model order inside a unit is
/// the input order.
pub fn partition_units(mut models: Vec<Model>) -> ModulePartition {
  models.sort_by(|left, right| right.module_path.cmp(&left.module_path));

  let mut slots: IndexMap<ModuleKey, UnitSlot> = IndexMap::new();
  let groups = models.into_iter().chunk_by(|model| model.module_path.clone());

  for (module_path, group) in &groups {
    let (key, kind) = match module_path.split_last() {
      None => (root_key(), UnitKind::RootInit),
      Some((last, parents)) => {
        for depth in 0..module_path.len() {
          slots
            .entry(init_key(&module_path[..depth]))
            .or_insert(UnitSlot::Placeholder);
        }
        let init = init_key(&module_path);
        if slots.contains_key(&init) {
          (init, UnitKind::PackageInit)
        } else {
          (leaf_key(parents, last), UnitKind::Leaf)
        }
      }
    };

    tracing::debug!(unit = %key.join("/"), %kind, "planned output unit");
    slots.insert(
      key.clone(),
      UnitSlot::Planned(UnitPlan {
        key,
        module_path,
        kind,
        models: group.collect(),
      }),
    );
  }

  ModulePartition { slots }
}
