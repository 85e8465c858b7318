use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::generator::{
  model::{Imports, Model, parse_statements},
  resolver::{ReferenceIndex, ResolvedReference},
};

/// Model graph exchanged with a schema front-end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelGraph {
  pub models: Vec<Model>,
  /// Where each schema reference path was generated to.
  #[serde(default)]
  pub references: Vec<ResolvedReference>,
  /// Statements such as `from __future__ import annotations` for every unit.
  #[serde(default)]
  pub global_imports: Vec<String>,
  /// Name of the input file when the whole graph came from one file.
  #[serde(default)]
  pub source_file: Option<String>,
}

impl ModelGraph {
  pub fn reference_index(&self) -> ReferenceIndex {
    self.references.iter().cloned().collect()
  }

  pub fn global_imports(&self) -> anyhow::Result<Imports> {
    parse_statements(&self.global_imports)
  }
}

pub struct GraphLoader {
  path: PathBuf,
  content: Vec<u8>,
}

impl GraphLoader {
  pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
    let path = path.as_ref().to_path_buf();
    let content = tokio::fs::read(&path)
      .await
      .with_context(|| format!("Failed to read model graph from {}", path.display()))?;
    Ok(Self { path, content })
  }

  pub fn parse(&self) -> anyhow::Result<ModelGraph> {
    serde_json::from_slice(&self.content)
      .with_context(|| format!("Failed to parse model graph {}", self.path.display()))
  }
}
