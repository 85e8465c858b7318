use std::collections::BTreeSet;

use crate::generator::naming::identifiers::{ensure_unique, split_qualified};

#[test]
fn test_ensure_unique() {
  let used_names: BTreeSet<String> = ["pets".to_string(), "pets2".to_string()].into_iter().collect();

  assert_eq!(ensure_unique("owners", &used_names), "owners");
  assert_eq!(ensure_unique("pets", &used_names), "pets3");
}

#[test]
fn test_split_qualified() {
  assert_eq!(split_qualified("a.b.Pet"), ("a.b", "Pet"));
  assert_eq!(split_qualified("Pet"), ("", "Pet"));
}
