use crate::generator::naming::identifiers::split_qualified;

/// Namespace segment standing for the `__init__` module of a package.
const INIT_SEGMENT: &str = "__init__";

/// Relative import location of a referenced model as seen from another namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeImport {
  /// Leading dots plus any intermediate namespace, e.g. `.` or `..x.y`.
  pub from: String,
  /// Imported name: the target's last namespace segment, or the model itself.
  pub import: String,
  /// True when `import` names the model rather than the namespace containing it.
  pub member: bool,
}

impl RelativeImport {
  pub fn key(&self) -> (String, String) {
    (self.from.clone(), self.import.clone())
  }
}

/// Computes how `current` (dotted namespace, possibly empty) imports `reference`
/// (a qualified model name). `None` means both live in the same namespace.
pub fn relative(current: &str, reference: &str) -> Option<RelativeImport> {
  let current_path: Vec<&str> = if current.is_empty() {
    vec![]
  } else {
    current.split('.').collect()
  };
  let (namespace, leaf) = split_qualified(reference);
  let reference_path: Vec<&str> = if namespace.is_empty() {
    vec![]
  } else {
    namespace.split('.').collect()
  };

  if current_path == reference_path {
    return None;
  }

  let common = current_path
    .iter()
    .zip(&reference_path)
    .take_while(|(left, right)| left == right)
    .count();

  let mut from = ".".repeat((current_path.len() - common).max(1));
  let remainder = reference_path[common..].join(".");

  let (import, member) = if remainder.is_empty() {
    (leaf.to_string(), true)
  } else if let Some((extra, last)) = remainder.rsplit_once('.') {
    from.push_str(extra);
    (last.to_string(), false)
  } else {
    (remainder, false)
  };

  Some(RelativeImport { from, import, member })
}

/// Like [`relative`], but as seen from the `__init__` module of package `current`.
///
/// Inside an init module `.` already names `current` itself, so targets below it
/// keep their dots while targets outside it need one more level.
pub fn relative_from_package(current: &str, reference: &str) -> Option<RelativeImport> {
  relative(current, reference)?;
  let init_module = if current.is_empty() {
    INIT_SEGMENT.to_string()
  } else {
    format!("{current}.{INIT_SEGMENT}")
  };
  relative(&init_module, reference)
}
