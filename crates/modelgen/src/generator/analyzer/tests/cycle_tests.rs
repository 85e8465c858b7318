use crate::generator::{
  analyzer::detect_cycles,
  tests::support::{model, model_in, with_references},
};

#[test]
fn test_detect_cycles_empty_for_acyclic_graph() {
  let models = [with_references(model("A"), &["B"]), model("B")];
  assert!(detect_cycles(&models).is_empty());
}

#[test]
fn test_detect_cycles_reports_mutual_and_self_references() {
  let models = [
    with_references(model("B"), &["A"]),
    with_references(model("A"), &["B"]),
    with_references(model("Node"), &["Node"]),
    with_references(model("Leaf"), &["External"]),
  ];

  let cycles = detect_cycles(&models);
  assert_eq!(
    cycles,
    vec![
      vec!["A".to_string(), "B".to_string()],
      vec!["Node".to_string()],
    ]
  );
}

#[test]
fn test_detect_cycles_across_namespaces() {
  let models = [
    with_references(model_in(&["a"], "Left"), &["b.Right"]),
    with_references(model_in(&["b"], "Right"), &["a.Left"]),
  ];

  let cycles = detect_cycles(&models);
  assert_eq!(cycles, vec![vec!["a.Left".to_string(), "b.Right".to_string()]]);
}
