use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use modelgen::{
  generator::analyzer::{SortedModels, sort_models},
  utils::graph::GraphLoader,
};

use crate::ui::{Colors, colors::IntoComfyColor, term_width};

/// Rows of the model listing: qualified name, namespace, kind and deferred-update marker.
fn model_rows(sorted: &SortedModels) -> Vec<(String, String, String, bool)> {
  sorted
    .models
    .iter()
    .map(|(name, model)| {
      let namespace = if model.module_path.is_empty() {
        "(root)".to_string()
      } else {
        model.module_name()
      };
      (name.clone(), namespace, model.kind.to_string(), sorted.requires_update(name))
    })
    .collect()
}

pub async fn list_models(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let graph = GraphLoader::open(input).await?.parse()?;
  let sorted = sort_models(graph.models)?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  row.add_cell(Cell::new("#").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("MODEL").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("NAMESPACE").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("KIND").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("DEFERRED").fg(IntoComfyColor::into(colors.label())));
  table.set_header(row);

  for (position, (name, namespace, kind, deferred)) in model_rows(&sorted).into_iter().enumerate() {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(position + 1)
        .fg(IntoComfyColor::into(colors.info()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(
      Cell::new(name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(namespace).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(kind).fg(IntoComfyColor::into(colors.accent())));
    row.add_cell(Cell::new(if deferred { "yes" } else { "" }).fg(IntoComfyColor::into(colors.accent())));
    table.add_row(row);
  }

  println!("{table}");
  if sorted.fallback_engaged {
    eprintln!("Base-class ordering decided the tail of this listing");
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeSet;

  use modelgen::generator::model::{Model, ModelKind};

  use super::*;

  #[test]
  fn test_model_rows_follow_emission_order() {
    let models = vec![
      Model::builder()
        .name("Owner")
        .reference_classes(BTreeSet::from(["zoo.Pet".to_string(), "Owner".to_string()]))
        .build(),
      Model::builder()
        .name("Pet")
        .kind(ModelKind::Enumeration)
        .module_path(vec!["zoo".to_string()])
        .build(),
    ];

    let rows = model_rows(&sort_models(models).unwrap());

    assert_eq!(
      rows,
      vec![
        ("zoo.Pet".to_string(), "zoo".to_string(), "enumeration".to_string(), false),
        ("Owner".to_string(), "(root)".to_string(), "composite".to_string(), true),
      ]
    );
  }
}
