use std::{
  io::Write,
  process::{Command, Stdio},
};

use anyhow::Context;

/// Post-processes an assembled unit. Failures abort assembly unchanged.
pub trait CodeFormatter {
  fn format(&self, code: &str) -> anyhow::Result<String>;
}

/// Pipes source text through an external program reading stdin and writing stdout,
/// such as `black -q -` or `ruff format -`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
  program: String,
  args: Vec<String>,
}

impl CommandFormatter {
  pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
    Self {
      program: program.into(),
      args,
    }
  }

  /// Splits a whitespace-separated command line into program and arguments.
  pub fn parse(command_line: &str) -> anyhow::Result<Self> {
    let mut words = command_line.split_whitespace().map(String::from);
    let Some(program) = words.next() else {
      anyhow::bail!("Formatter command is empty");
    };
    Ok(Self::new(program, words.collect()))
  }

  pub fn program(&self) -> &str {
    &self.program
  }
}

impl CodeFormatter for CommandFormatter {
  fn format(&self, code: &str) -> anyhow::Result<String> {
    let mut child = Command::new(&self.program)
      .args(&self.args)
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .with_context(|| format!("Failed to start formatter '{}'", self.program))?;

    let mut stdin = child.stdin.take().context("Formatter stdin was not captured")?;
    let (output, written) = std::thread::scope(|scope| {
      let writer = scope.spawn(move || stdin.write_all(code.as_bytes()));
      let output = child.wait_with_output();
      (output, writer.join())
    });
    let output = output.context("Failed to wait for formatter")?;

    // A program that exits early closes its stdin, so report the exit status first
    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      anyhow::bail!("{} failed: {}", self.program, stderr.trim());
    }
    written
      .map_err(|_| anyhow::anyhow!("Formatter input writer panicked"))?
      .context("Failed to write to formatter stdin")?;

    String::from_utf8(output.stdout).context("Formatter produced invalid UTF-8")
  }
}
