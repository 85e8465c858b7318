/// Renders the trailing block that completes models emitted before one of their
/// references, e.g. forward-reference updates.
pub trait DeferredUpdateRenderer {
  fn render(&self, names: &[String]) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardRefUpdater;

impl DeferredUpdateRenderer for ForwardRefUpdater {
  fn render(&self, names: &[String]) -> String {
    names
      .iter()
      .map(|name| format!("{name}.update_forward_refs()"))
      .collect::<Vec<_>>()
      .join("\n")
  }
}
