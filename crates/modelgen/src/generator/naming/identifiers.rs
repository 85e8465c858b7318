use std::collections::BTreeSet;

/// Ensures a name is unique within a set of used names, appending a numeric suffix if needed.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !used_names.contains(&new_name) {
      return new_name;
    }
    i += 1;
  }
}

/// Splits a qualified name into its namespace and leaf: `a.b.Pet` -> (`a.b`, `Pet`).
pub(crate) fn split_qualified(name: &str) -> (&str, &str) {
  name.rsplit_once('.').unwrap_or(("", name))
}
