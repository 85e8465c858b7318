//! Assembly pipeline from an unordered model graph to per-unit source text.
//!
//! The `Orchestrator` owns the collaborators (reference lookup, renderer,
//! formatter, deferred-update renderer) and runs one assembly at a time:
//! preprocessing, dependency ordering, partitioning, then per unit reference
//! resolution, optional deduplication, rendering and formatting.
//!
//! ## Usage
//!
//! ```no_run
//! use modelgen::generator::{
//!   codegen::ForwardRefUpdater,
//!   orchestrator::{AssemblyOptions, AssemblyOutput, Orchestrator},
//! };
//! use modelgen::utils::graph::GraphLoader;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let graph = GraphLoader::open("models.json").await?.parse()?;
//! let options = AssemblyOptions::builder().reuse_model(true).build();
//! let orchestrator = Orchestrator::new(options)
//!   .with_lookup(graph.reference_index())
//!   .with_deferred_updates(ForwardRefUpdater);
//!
//! let generated = orchestrator.assemble(graph.models)?;
//! if let AssemblyOutput::Single(code) = &generated.output {
//!   println!("{code}");
//! }
//! # Ok(())
//! # }
//! ```

use std::{collections::HashSet, path::PathBuf};

use indexmap::IndexMap;
use itertools::Itertools;

use crate::generator::{
  analyzer::{DependencySorter, detect_cycles},
  codegen::{ClassRenderer, CodeFormatter, DeferredUpdateRenderer, ModelRenderer},
  dedup::ModelDeduplicator,
  metrics::GenerationStats,
  model::{FUTURE_MODULE, Imports, Model},
  partition::{ModuleKey, UnitPlan, UnitSlot, partition_units, root_key},
  preprocess::ModelCollector,
  resolver::{ReferenceIndex, ReferenceLookup, UnitResolver},
};

/// Switches controlling one assembly run.
#[derive(Debug, Clone, bon::Builder)]
pub struct AssemblyOptions {
  /// Collapse structurally identical models within a unit.
  #[builder(default)]
  pub reuse_model: bool,
  /// Prefix each unit with its imports and the global imports.
  #[builder(default = true)]
  pub with_import: bool,
  #[builder(default)]
  pub snake_case_field: bool,
  #[builder(default)]
  pub strip_default_none: bool,
  /// Imports emitted into every unit, e.g. `from __future__ import annotations`.
  #[builder(default)]
  pub global_imports: Imports,
  /// Name of the single input file. References into it are treated as same-unit.
  #[builder(into)]
  pub single_source: Option<String>,
}

impl Default for AssemblyOptions {
  fn default() -> Self {
    Self::builder().build()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
  pub body: String,
  /// Source of the unit's first model, for diagnostics.
  pub source_path: Option<PathBuf>,
}

impl GeneratedUnit {
  fn placeholder() -> Self {
    Self {
      body: String::new(),
      source_path: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyOutput {
  /// Everything lived in the root namespace.
  Single(String),
  Modules(IndexMap<ModuleKey, GeneratedUnit>),
}

impl AssemblyOutput {
  pub fn single(&self) -> Option<&str> {
    match self {
      Self::Single(code) => Some(code),
      Self::Modules(_) => None,
    }
  }

  pub fn unit(&self, key: &[&str]) -> Option<&GeneratedUnit> {
    match self {
      Self::Single(_) => None,
      Self::Modules(units) => units
        .iter()
        .find(|(candidate, _)| candidate.iter().map(String::as_str).eq(key.iter().copied()))
        .map(|(_, unit)| unit),
    }
  }

  pub fn len(&self) -> usize {
    match self {
      Self::Single(_) => 1,
      Self::Modules(units) => units.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[derive(Debug)]
pub struct GeneratedOutput {
  pub output: AssemblyOutput,
  pub stats: GenerationStats,
}

/// Runs the assembly pipeline with its configured collaborators.
pub struct Orchestrator {
  options: AssemblyOptions,
  sorter: DependencySorter,
  lookup: Box<dyn ReferenceLookup>,
  renderer: Box<dyn ModelRenderer>,
  formatter: Option<Box<dyn CodeFormatter>>,
  deferred: Option<Box<dyn DeferredUpdateRenderer>>,
}

impl Orchestrator {
  /// Orchestrator with an empty reference index, class-style rendering, no
  /// formatter and no deferred-update rendering.
  pub fn new(options: AssemblyOptions) -> Self {
    Self {
      options,
      sorter: DependencySorter::default(),
      lookup: Box::new(ReferenceIndex::new()),
      renderer: Box::new(ClassRenderer),
      formatter: None,
      deferred: None,
    }
  }

  #[must_use]
  pub fn with_lookup(mut self, lookup: impl ReferenceLookup + 'static) -> Self {
    self.lookup = Box::new(lookup);
    self
  }

  #[must_use]
  pub fn with_renderer(mut self, renderer: impl ModelRenderer + 'static) -> Self {
    self.renderer = Box::new(renderer);
    self
  }

  #[must_use]
  pub fn with_formatter(mut self, formatter: impl CodeFormatter + 'static) -> Self {
    self.formatter = Some(Box::new(formatter));
    self
  }

  #[must_use]
  pub fn with_deferred_updates(mut self, renderer: impl DeferredUpdateRenderer + 'static) -> Self {
    self.deferred = Some(Box::new(renderer));
    self
  }

  #[must_use]
  pub fn with_sorter(mut self, sorter: DependencySorter) -> Self {
    self.sorter = sorter;
    self
  }

  /// Assembles `models` into source text.
  ///
  /// # Errors
  ///
  /// Returns [`crate::generator::errors::AssemblyError`] when the reference graph
  /// cannot be ordered, and propagates deduplication and formatter failures.
  pub fn assemble(&self, models: Vec<Model>) -> anyhow::Result<GeneratedOutput> {
    let mut collector = ModelCollector::from_options(&self.options);
    collector.extend(models);
    let models = collector.into_models();

    let mut stats = GenerationStats::default();
    stats.record_cycles(detect_cycles(&models));

    let sorted = self.sorter.sort(models)?;
    stats.record_sorted(sorted.models.len(), sorted.fallback_engaged);
    let require_update: HashSet<String> = sorted.require_update.iter().cloned().collect();

    let mut units: IndexMap<ModuleKey, GeneratedUnit> = IndexMap::new();
    for (key, slot) in partition_units(sorted.into_models()).into_slots() {
      let unit = match slot {
        UnitSlot::Placeholder => {
          stats.record_placeholder();
          GeneratedUnit::placeholder()
        }
        UnitSlot::Planned(plan) => {
          stats.record_unit(plan.kind);
          self.assemble_unit(plan, &require_update, &mut stats)?
        }
      };
      units.insert(key, unit);
    }

    tracing::debug!(units = units.len(), models = stats.models_sorted, "assembly complete");

    let output = if units.len() == 1 && units.contains_key(&root_key()) {
      let body = units.into_values().next().map(|unit| unit.body).unwrap_or_default();
      AssemblyOutput::Single(body)
    } else {
      AssemblyOutput::Modules(units)
    };

    Ok(GeneratedOutput { output, stats })
  }

  fn assemble_unit(
    &self,
    mut plan: UnitPlan,
    require_update: &HashSet<String>,
    stats: &mut GenerationStats,
  ) -> anyhow::Result<GeneratedUnit> {
    let unit_name = plan.key.join("/");
    let deferred_names: Vec<String> = plan
      .models
      .iter()
      .filter(|model| require_update.contains(&model.qualified_name()))
      .map(|model| model.name.clone())
      .collect();

    let mut resolver = UnitResolver::new(&plan, self.lookup.as_ref(), self.options.single_source.as_deref());
    let mut dedup = self.options.reuse_model.then(ModelDeduplicator::new);

    let mut models = Vec::with_capacity(plan.models.len());
    for mut model in std::mem::take(&mut plan.models) {
      resolver.resolve(&mut model);
      let model = match dedup.as_mut() {
        Some(dedup) => dedup.process(model)?,
        None => model,
      };
      models.push(model);
    }

    if let Some(dedup) = &dedup {
      dedup.rewrite_references(&mut models);
      stats.record_duplicates(dedup.collapsed());
    }

    tracing::debug!(
      unit = %unit_name,
      models = models.len(),
      aliases = resolver.aliases_assigned(),
      "resolved unit references"
    );
    let mut imports = resolver.into_imports();
    for model in &models {
      imports.extend(self.renderer.imports(model));
    }

    let mut parts = vec![];
    if self.options.with_import {
      stats.record_imports(imports.len());
      let mut global_imports = self.options.global_imports.clone();
      let mut future = imports.take_module(FUTURE_MODULE);
      future.extend(global_imports.take_module(FUTURE_MODULE).iter());

      parts.push(
        [future.to_string(), imports.to_string()]
          .into_iter()
          .filter(|section| !section.is_empty())
          .join("\n"),
      );
      parts.push(global_imports.to_string());
      parts.push("\n".to_string());
    }
    parts.push(models.iter().map(|model| self.renderer.render(model)).join("\n\n\n"));

    stats.record_deferred_updates(&unit_name, deferred_names.len(), self.deferred.is_some());
    if let Some(deferred) = &self.deferred {
      parts.push("\n".to_string());
      parts.push(deferred.render(&deferred_names));
    }

    let mut body = parts.join("\n");
    if let Some(formatter) = &self.formatter {
      body = formatter.format(&body)?;
    }

    Ok(GeneratedUnit {
      body,
      source_path: models.first().and_then(|model| model.source_path.clone()),
    })
  }
}
