//! Rewrites cross-namespace type references into names that resolve through
//! relative imports, and collects those imports per output unit.

mod alias;
mod lookup;
mod relative;

use std::collections::{HashMap, HashSet};

pub use alias::AliasRegistry;
pub use lookup::{ReferenceIndex, ReferenceLookup, ResolvedReference};
pub use relative::{RelativeImport, relative, relative_from_package};

use crate::generator::{
  model::{DataType, Import, Imports, Model},
  partition::{UnitKind, UnitPlan},
};


/// Resolution state of one output unit. Aliases are shared by every model of the
/// unit; import locations chosen for rewritten names are tracked per model.
pub struct UnitResolver<'a> {
  module_name: String,
  package_init: bool,
  local_names: HashSet<String>,
  lookup: &'a dyn ReferenceLookup,
  single_source: Option<&'a str>,
  aliases: AliasRegistry,
  imports: Imports,
}

impl<'a> UnitResolver<'a> {
  pub fn new(plan: &UnitPlan, lookup: &'a dyn ReferenceLookup, single_source: Option<&'a str>) -> Self {
    let local_names = plan
      .models
      .iter()
      .flat_map(|model| [model.name.clone(), model.qualified_name()])
      .collect();

    Self {
      module_name: plan.module_name(),
      package_init: plan.kind == UnitKind::PackageInit,
      local_names,
      lookup,
      single_source,
      aliases: AliasRegistry::seeded(plan.models.iter().map(|model| model.name.clone())),
      imports: Imports::new(),
    }
  }

  pub fn resolve(&mut self, model: &mut Model) {
    self.imports.extend(model.imports.iter().cloned());

    let mut local_aliases: HashMap<(String, String), Option<String>> = HashMap::new();
    let mut rewritten: HashMap<String, (String, RelativeImport)> = HashMap::new();

    let Self {
      module_name,
      lookup,
      single_source,
      aliases,
      ..
    } = self;

    model.visit_data_types_mut(|data_type, references| {
      if !data_type.is_modular() {
        return;
      }
      let full_name = data_type.full_name();

      if is_same_unit(data_type, *lookup, *single_source, module_name) {
        references.remove(&full_name);
        return;
      }

      let new_name = match relative(module_name, &full_name) {
        None => data_type.type_name.clone(),
        Some(import) => {
          let alias = match local_aliases.get(&import.key()) {
            Some(alias) => alias.clone().unwrap_or_else(|| import.import.clone()),
            None => {
              let alias = aliases.add(&import);
              local_aliases.insert(import.key(), (alias != import.import).then(|| alias.clone()));
              alias
            }
          };
          let name = if import.member {
            alias
          } else {
            format!("{alias}.{}", data_type.type_name)
          };
          rewritten.insert(name.clone(), (full_name.clone(), import));
          name
        }
      };

      if references.remove(&full_name) {
        references.insert(new_name.clone());
      }
      data_type.type_name = new_name;
    });

    for name in &model.reference_classes {
      if self.local_names.contains(name) {
        continue;
      }
      let (target, import) = match rewritten.get(name) {
        Some((target, import)) => (target.as_str(), import.clone()),
        None => match relative(&self.module_name, name) {
          Some(import) => (name.as_str(), import),
          None => continue,
        },
      };

      let alias = local_aliases.get(&import.key()).cloned().flatten();
      let from = if self.package_init {
        relative_from_package(&self.module_name, target).map_or(import.from, |package| package.from)
      } else {
        import.from
      };
      self
        .imports
        .append(Import::from_module(from, import.import).with_alias(alias));
    }

    tracing::trace!(model = %model.qualified_name(), references = ?model.reference_classes, "resolved references");
  }

  pub fn aliases_assigned(&self) -> usize {
    self.aliases.len()
  }

  pub fn into_imports(self) -> Imports {
    self.imports
  }
}

/// A reference whose target was generated into this very unit, either by namespace
/// or because everything came from a single input file.
fn is_same_unit(
  data_type: &DataType,
  lookup: &dyn ReferenceLookup,
  single_source: Option<&str>,
  module_name: &str,
) -> bool {
  let Some(resolved) = data_type
    .reference
    .as_ref()
    .and_then(|reference| lookup.lookup(&reference.path))
  else {
    return false;
  };
  resolved.module_name == module_name || single_source.is_some_and(|file| resolved.source_file() == file)
}
