use strum::Display;

use crate::generator::partition::UnitKind;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub models_sorted: usize,
  pub units_generated: usize,
  pub package_units: usize,
  pub placeholder_units: usize,
  pub imports_emitted: usize,
  pub deferred_updates: usize,
  pub duplicates_collapsed: usize,
  pub fallback_engaged: bool,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_sorted(&mut self, count: usize, fallback_engaged: bool) {
    self.models_sorted += count;
    if fallback_engaged {
      self.fallback_engaged = true;
      self.record_warning(GenerationWarning::FallbackOrdering);
    }
  }

  pub fn record_unit(&mut self, kind: UnitKind) {
    self.units_generated += 1;
    if kind != UnitKind::Leaf {
      self.package_units += 1;
    }
  }

  pub fn record_placeholder(&mut self) {
    self.units_generated += 1;
    self.package_units += 1;
    self.placeholder_units += 1;
  }

  pub fn record_imports(&mut self, count: usize) {
    self.imports_emitted += count;
  }

  pub fn record_deferred_updates(&mut self, unit: &str, count: usize, rendered: bool) {
    if count == 0 {
      return;
    }
    if rendered {
      self.deferred_updates += count;
    } else {
      self.record_warning(GenerationWarning::DeferredUpdatesSkipped {
        unit: unit.to_string(),
        count,
      });
    }
  }

  pub fn record_duplicates(&mut self, count: usize) {
    self.duplicates_collapsed += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Dependency passes exhausted, remaining models were ordered by base class")]
  FallbackOrdering,
  #[strum(to_string = "Unit '{unit}': {count} model(s) need a deferred update but none is rendered")]
  DeferredUpdatesSkipped { unit: String, count: usize },
}
