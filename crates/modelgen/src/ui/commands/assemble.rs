use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use modelgen::{
  generator::{
    codegen::{CommandFormatter, ForwardRefUpdater},
    metrics::GenerationStats,
    model::{Imports, parse_statements},
    orchestrator::{AssemblyOptions, AssemblyOutput, GeneratedOutput, Orchestrator},
  },
  utils::graph::{GraphLoader, ModelGraph},
};

use crate::ui::{AssembleCommand, Colors};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct AssembleConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub verbose: bool,
  pub quiet: bool,
  pub reuse_model: bool,
  pub snake_case_field: bool,
  pub strip_default_none: bool,
  pub with_import: bool,
  pub deferred_updates: bool,
  pub formatter: Option<CommandFormatter>,
  pub global_imports: Imports,
}

impl AssembleConfig {
  pub fn from_command(command: AssembleCommand) -> anyhow::Result<Self> {
    let AssembleCommand {
      input,
      output,
      reuse_models,
      snake_case_field,
      strip_default_none,
      no_imports,
      no_deferred_updates,
      formatter,
      global_imports,
      verbose,
      quiet,
    } = command;

    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be used together");
    }
    let formatter = formatter.as_deref().map(CommandFormatter::parse).transpose()?;
    let global_imports = parse_statements(&global_imports)?;

    Ok(Self {
      input,
      output,
      verbose,
      quiet,
      reuse_model: reuse_models,
      snake_case_field,
      strip_default_none,
      with_import: !no_imports,
      deferred_updates: !no_deferred_updates,
      formatter,
      global_imports,
    })
  }

  async fn load_graph(&self) -> anyhow::Result<ModelGraph> {
    GraphLoader::open(&self.input).await?.parse()
  }

  fn create_orchestrator(&self, graph: &ModelGraph) -> anyhow::Result<Orchestrator> {
    let mut global_imports = graph.global_imports()?;
    global_imports.extend(self.global_imports.iter());

    let options = AssemblyOptions::builder()
      .reuse_model(self.reuse_model)
      .with_import(self.with_import)
      .snake_case_field(self.snake_case_field)
      .strip_default_none(self.strip_default_none)
      .global_imports(global_imports)
      .maybe_single_source(graph.source_file.clone())
      .build();

    let mut orchestrator = Orchestrator::new(options).with_lookup(graph.reference_index());
    if self.deferred_updates {
      orchestrator = orchestrator.with_deferred_updates(ForwardRefUpdater);
    }
    if let Some(formatter) = &self.formatter {
      orchestrator = orchestrator.with_formatter(formatter.clone());
    }
    Ok(orchestrator)
  }

  async fn write_output(&self, output: &AssemblyOutput) -> anyhow::Result<()> {
    match output {
      AssemblyOutput::Single(code) => {
        if let Some(parent) = self.output.parent() {
          tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.output, code)
          .await
          .with_context(|| format!("Failed to write {}", self.output.display()))?;
      }
      AssemblyOutput::Modules(units) => {
        for (key, unit) in units {
          let path = key.iter().fold(self.output.clone(), |path, part| path.join(part));
          if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
          }
          tokio::fs::write(&path, &unit.body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        }
      }
    }
    Ok(())
  }
}

struct AssembleLogger<'a> {
  config: &'a AssembleConfig,
  colors: &'a Colors,
}

impl<'a> AssembleLogger<'a> {
  fn new(config: &'a AssembleConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading model graph from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_assembling(&self, models: usize) {
    self.info(
      &format!("Assembling {models} models...")
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_statistics(&self, generated: &GeneratedOutput) {
    if self.config.quiet {
      return;
    }
    let stats = &generated.stats;

    self.stat("Models sorted:", stats.models_sorted.to_string());
    self.stat("Units generated:", stats.units_generated.to_string());
    if stats.package_units > 0 {
      self.stat(
        "",
        format!(
          "{} packages, {} placeholders",
          stats.package_units, stats.placeholder_units
        ),
      );
    }
    if self.config.with_import {
      self.stat("Imports emitted:", stats.imports_emitted.to_string());
    }
    if stats.deferred_updates > 0 {
      self.stat("Deferred updates:", stats.deferred_updates.to_string());
    }
    if self.config.reuse_model {
      self.stat("Duplicates collapsed:", stats.duplicates_collapsed.to_string());
    }

    self.print_cycles(stats);
    self.print_units(&generated.output);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_units(&self, output: &AssemblyOutput) {
    if !self.config.verbose {
      return;
    }
    if let AssemblyOutput::Modules(units) = output {
      for (key, unit) in units {
        let size = if unit.body.is_empty() {
          "placeholder".to_string()
        } else {
          format!("{} lines", unit.body.lines().count())
        };
        println!(
          "              {} {}",
          key.join("/").with(self.colors.info()),
          size.with(self.colors.value())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully assembled models".with(self.colors.success())
      );
    }
  }
}

pub async fn assemble_models(config: AssembleConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = AssembleLogger::new(&config, colors);

  logger.log_loading();
  let mut graph = config.load_graph().await?;

  logger.log_assembling(graph.models.len());
  let orchestrator = config.create_orchestrator(&graph)?;
  let models = std::mem::take(&mut graph.models);
  // External formatters run as blocking child processes
  let generated = tokio::task::block_in_place(|| orchestrator.assemble(models))?;
  logger.print_statistics(&generated);

  logger.log_writing();
  config.write_output(&generated.output).await?;

  logger.log_success();
  Ok(())
}
