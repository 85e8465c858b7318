use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;

use crate::generator::{
  errors::{AssemblyError, UnresolvedModel},
  model::Model,
};

/// Extra placement passes attempted before switching to base-class reordering.
pub const MAX_RECURSION_COUNT: usize = 100;

/// Result of dependency ordering, keyed by qualified model name in emission order.
#[derive(Debug, Default)]
pub struct SortedModels {
  pub models: IndexMap<String, Model>,
  /// Models emitted before one of their own references and needing a deferred update.
  pub require_update: Vec<String>,
  /// Set when the pass budget ran out (or passes stopped making progress) and the
  /// base-class heuristic decided the tail of the order.
  pub fallback_engaged: bool,
}

impl SortedModels {
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.models.keys().map(String::as_str)
  }

  pub fn requires_update(&self, qualified_name: &str) -> bool {
    self.require_update.iter().any(|name| name == qualified_name)
  }

  pub fn into_models(self) -> Vec<Model> {
    self.models.into_values().collect()
  }

  fn place(&mut self, name: String, model: Model, requires_update: bool) {
    if requires_update {
      self.require_update.push(name.clone());
    }
    self.models.insert(name, model);
  }

  /// References of `model` that are neither itself nor already placed.
  fn unresolved_references(&self, model: &Model, name: &str) -> BTreeSet<String> {
    model
      .reference_classes
      .iter()
      .filter(|reference| reference.as_str() != name && !self.models.contains_key(reference.as_str()))
      .cloned()
      .collect()
  }

  /// One placement pass in encounter order; returns the models that must wait.
  fn place_resolvable(&mut self, pending: Vec<Model>) -> Vec<Model> {
    let mut deferred = vec![];
    for model in pending {
      let name = model.qualified_name();
      if self.unresolved_references(&model, &name).is_empty() {
        let self_referencing = model.is_self_referencing();
        self.place(name, model, self_referencing);
      } else {
        deferred.push(model);
      }
    }
    deferred
  }

  /// Final placement of the reordered remainder. References pointing only inside the
  /// remainder form a cycle and are broken in encounter order; anything else fails.
  ///
  /// Every member of a broken cycle is flagged for a deferred update, including the
  /// ones whose references happen to be placed by the time they are reached.
  fn place_remaining(&mut self, ordered: Vec<Model>) -> Result<(), AssemblyError> {
    let remaining: HashSet<String> = ordered.iter().map(Model::qualified_name).collect();
    let mut broken: HashSet<String> = HashSet::new();
    let mut failures = vec![];

    for model in ordered {
      let name = model.qualified_name();
      let unresolved = self.unresolved_references(&model, &name);

      if unresolved.is_empty() {
        let in_broken_cycle = model
          .reference_classes
          .iter()
          .any(|reference| *reference == name || broken.contains(reference));
        self.place(name, model, in_broken_cycle);
      } else if unresolved.iter().all(|reference| remaining.contains(reference)) {
        tracing::debug!(model = %name, references = ?unresolved, "breaking reference cycle");
        broken.insert(name.clone());
        self.place(name, model, true);
      } else {
        failures.push(UnresolvedModel {
          name,
          references: model.reference_classes,
        });
      }
    }

    if failures.is_empty() {
      Ok(())
    } else {
      Err(AssemblyError::UnresolvableReferenceGraph { models: failures })
    }
  }
}

/// Orders models so each one follows the models it references.
///
/// Placement runs as an explicit loop of passes bounded by `max_passes`; there is
/// no recursion, so long reference chains cannot exhaust the stack. When the budget
/// is spent the remainder is reordered by base-class position and placed in one
/// final pass that tolerates cycles.
#[derive(Debug, Clone, Copy)]
pub struct DependencySorter {
  max_passes: usize,
}

impl Default for DependencySorter {
  fn default() -> Self {
    Self {
      max_passes: MAX_RECURSION_COUNT,
    }
  }
}

impl DependencySorter {
  pub fn with_max_passes(max_passes: usize) -> Self {
    Self { max_passes }
  }

  pub fn sort(&self, models: Vec<Model>) -> Result<SortedModels, AssemblyError> {
    let mut sorted = SortedModels::default();
    let mut pending = models;
    let mut remaining_passes = self.max_passes;

    loop {
      let before = pending.len();
      let deferred = sorted.place_resolvable(pending);
      if deferred.is_empty() {
        return Ok(sorted);
      }

      // A pass that placed nothing would repeat identically
      let stalled = deferred.len() == before;
      pending = deferred;
      if remaining_passes == 0 || stalled {
        break;
      }
      remaining_passes -= 1;
    }

    tracing::debug!(
      deferred = pending.len(),
      passes = self.max_passes - remaining_passes,
      "dependency sort falling back to base-class ordering"
    );
    sorted.fallback_engaged = true;

    let ordered = order_by_base_classes(pending, &sorted);
    sorted.place_remaining(ordered)?;
    Ok(sorted)
  }
}

pub fn sort_models(models: Vec<Model>) -> Result<SortedModels, AssemblyError> {
  DependencySorter::default().sort(models)
}

/// Stable-sorts deferred models by the earliest position of a base class that is
/// itself still deferred, models without one first, until the order stops changing.
///
/// Base-class cycles can make the order oscillate; a repeated order or the
/// iteration cap ends the loop.
fn order_by_base_classes(mut deferred: Vec<Model>, sorted: &SortedModels) -> Vec<Model> {
  let iteration_cap = deferred.len().saturating_mul(deferred.len()).saturating_add(1);
  let mut seen_orders: HashSet<Vec<String>> = HashSet::new();

  for _ in 0..iteration_cap {
    let names: Vec<String> = deferred.iter().map(Model::qualified_name).collect();
    if !seen_orders.insert(names.clone()) {
      break;
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (index, name) in names.iter().enumerate() {
      positions.entry(name.as_str()).or_insert(index);
    }

    let ranks: Vec<Option<usize>> = deferred
      .iter()
      .map(|model| {
        model
          .base_classes
          .iter()
          .filter_map(|base| base_class_position(model, base, &positions, sorted))
          .min()
      })
      .collect();

    let mut order: Vec<usize> = (0..deferred.len()).collect();
    order.sort_by_key(|&index| ranks[index]);
    if order.iter().enumerate().all(|(position, &index)| position == index) {
      break;
    }

    let mut slots: Vec<Option<Model>> = deferred.into_iter().map(Some).collect();
    deferred = order.iter().filter_map(|&index| slots[index].take()).collect();
  }

  deferred
}

/// Position of a still-deferred base class. Base classes may be written qualified or
/// relative to the model's own namespace.
fn base_class_position(
  model: &Model,
  base: &str,
  positions: &HashMap<&str, usize>,
  sorted: &SortedModels,
) -> Option<usize> {
  if let Some(position) = positions.get(base) {
    return Some(*position);
  }
  if model.module_path.is_empty() || sorted.models.contains_key(base) {
    return None;
  }
  let qualified = format!("{}.{base}", model.module_name());
  positions.get(qualified.as_str()).copied()
}
