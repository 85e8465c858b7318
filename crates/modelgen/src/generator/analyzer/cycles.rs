use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::generator::model::Model;

/// Reference cycles among `models`, each reported as its sorted member names.
///
/// Only references to models present in the input count; a single model is a
/// cycle when it references itself.
pub fn detect_cycles<'a>(models: impl IntoIterator<Item = &'a Model>) -> Vec<Vec<String>> {
  let models: Vec<&Model> = models.into_iter().collect();
  let names: Vec<String> = models.iter().map(|model| model.qualified_name()).collect();

  let mut graph = DiGraphMap::<&str, ()>::new();
  for name in &names {
    graph.add_node(name.as_str());
  }
  for (model, name) in models.iter().zip(&names) {
    for reference in &model.reference_classes {
      if graph.contains_node(reference.as_str()) {
        graph.add_edge(name.as_str(), reference.as_str(), ());
      }
    }
  }

  let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
    .into_iter()
    .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
    .map(|scc| {
      let mut members: Vec<String> = scc.into_iter().map(String::from).collect();
      members.sort();
      members
    })
    .collect();
  cycles.sort();
  cycles
}
