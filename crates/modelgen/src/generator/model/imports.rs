use std::{
  collections::{BTreeMap, BTreeSet},
  fmt::{self, Display, Formatter},
  str::FromStr,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Imports from this module must precede every other statement of a Python module.
pub const FUTURE_MODULE: &str = "__future__";

/// A single import directive: `from <from> import <import> [as <alias>]`, or a plain
/// `import <import>` when `from` is absent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Import {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub from: Option<String>,
  pub import: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub alias: Option<String>,
}

impl Import {
  pub fn new(import: impl Into<String>) -> Self {
    Self {
      from: None,
      import: import.into(),
      alias: None,
    }
  }

  pub fn from_module(from: impl Into<String>, import: impl Into<String>) -> Self {
    Self {
      from: Some(from.into()),
      import: import.into(),
      alias: None,
    }
  }

  #[must_use]
  pub fn with_alias(mut self, alias: Option<String>) -> Self {
    self.alias = alias;
    self
  }
}

impl Display for Import {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if let Some(from) = &self.from {
      write!(f, "from {from} ")?;
    }
    write!(f, "import {}", self.import)?;
    if let Some(alias) = &self.alias {
      write!(f, " as {alias}")?;
    }
    Ok(())
  }
}

impl FromStr for Import {
  type Err = anyhow::Error;

  /// Parses `import x [as y]` and `from m import x [as y]` statements.
  fn from_str(statement: &str) -> anyhow::Result<Self> {
    let words: Vec<&str> = statement.split_whitespace().collect();
    let (from, rest) = match words.as_slice() {
      ["from", module, "import", rest @ ..] => (Some((*module).to_string()), rest),
      ["import", rest @ ..] => (None, rest),
      _ => anyhow::bail!("Invalid import statement '{statement}': expected `import X` or `from M import X`"),
    };

    let (import, alias) = match rest {
      [name] => (*name, None),
      [name, "as", alias] => (*name, Some((*alias).to_string())),
      _ => anyhow::bail!("Invalid import statement '{statement}': expected a single imported name"),
    };

    Ok(Self {
      from,
      import: import.to_string(),
      alias,
    })
  }
}

/// Ordered, de-duplicating collection of imports, rendered one statement per source
/// module with the imported names merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Imports {
  entries: BTreeMap<Option<String>, BTreeSet<(String, Option<String>)>>,
}

impl Imports {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn append(&mut self, import: Import) {
    self
      .entries
      .entry(import.from)
      .or_default()
      .insert((import.import, import.alias));
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.values().map(BTreeSet::len).sum()
  }

  pub fn iter(&self) -> impl Iterator<Item = Import> + '_ {
    self.entries.iter().flat_map(|(from, names)| {
      names.iter().map(move |(import, alias)| Import {
        from: from.clone(),
        import: import.clone(),
        alias: alias.clone(),
      })
    })
  }

  /// Removes and returns every `from <module> import ...` entry.
  pub fn take_module(&mut self, module: &str) -> Imports {
    let mut taken = Imports::new();
    if let Some(names) = self.entries.remove(&Some(module.to_string())) {
      taken.entries.insert(Some(module.to_string()), names);
    }
    taken
  }

  pub fn contains(&self, import: &Import) -> bool {
    self
      .entries
      .get(&import.from)
      .is_some_and(|names| names.contains(&(import.import.clone(), import.alias.clone())))
  }
}

impl Extend<Import> for Imports {
  fn extend<T: IntoIterator<Item = Import>>(&mut self, iter: T) {
    for import in iter {
      self.append(import);
    }
  }
}

impl FromIterator<Import> for Imports {
  fn from_iter<T: IntoIterator<Item = Import>>(iter: T) -> Self {
    let mut imports = Self::new();
    imports.extend(iter);
    imports
  }
}

fn render_name(import: &str, alias: Option<&str>) -> String {
  match alias {
    Some(alias) => format!("{import} as {alias}"),
    None => import.to_string(),
  }
}

impl Display for Imports {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let mut lines = vec![];
    for (from, names) in &self.entries {
      match from {
        None => lines.extend(
          names
            .iter()
            .map(|(import, alias)| format!("import {}", render_name(import, alias.as_deref()))),
        ),
        Some(from) => {
          let names: Vec<String> = names
            .iter()
            .map(|(import, alias)| render_name(import, alias.as_deref()))
            .collect();
          lines.push(format!("from {from} import {}", names.join(", ")));
        }
      }
    }
    f.write_str(&lines.join("\n"))
  }
}

/// Parses a list of CLI-provided statements.
pub fn parse_statements(statements: &[String]) -> anyhow::Result<Imports> {
  statements
    .iter()
    .map(|statement| {
      statement
        .parse::<Import>()
        .with_context(|| format!("Failed to parse global import '{statement}'"))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_import_display() {
    assert_eq!(Import::new("typing").to_string(), "import typing");
    assert_eq!(Import::from_module(".", "pets").to_string(), "from . import pets");
    assert_eq!(
      Import::from_module("..", "pets").with_alias(Some("pets2".to_string())).to_string(),
      "from .. import pets as pets2"
    );
  }

  #[test]
  fn test_imports_merge_names_per_module() {
    let imports: Imports = [
      Import::from_module("typing", "Optional"),
      Import::from_module("typing", "List"),
      Import::from_module("typing", "List"),
      Import::new("enum"),
      Import::from_module(".", "d").with_alias(Some("d2".to_string())),
    ]
    .into_iter()
    .collect();

    assert_eq!(imports.len(), 4);
    assert_eq!(
      imports.to_string(),
      "import enum\nfrom . import d as d2\nfrom typing import List, Optional"
    );
  }

  #[test]
  fn test_parse_import_statements() {
    let parsed: Import = "from __future__ import annotations".parse().unwrap();
    assert_eq!(parsed, Import::from_module("__future__", "annotations"));

    let aliased: Import = "import datetime as dt".parse().unwrap();
    assert_eq!(aliased, Import::new("datetime").with_alias(Some("dt".to_string())));

    assert!("from x import".parse::<Import>().is_err());
    assert!("export x".parse::<Import>().is_err());
  }

  #[test]
  fn test_take_module_splits_out_future_imports() {
    let mut imports: Imports = [
      Import::from_module(FUTURE_MODULE, "annotations"),
      Import::from_module("typing", "Optional"),
    ]
    .into_iter()
    .collect();

    let future = imports.take_module(FUTURE_MODULE);

    assert_eq!(future.to_string(), "from __future__ import annotations");
    assert_eq!(imports.to_string(), "from typing import Optional");
    assert!(imports.take_module(FUTURE_MODULE).is_empty());
  }

  #[test]
  fn test_empty_imports_render_empty() {
    assert!(Imports::new().is_empty());
    assert_eq!(Imports::new().to_string(), "");
  }
}
