use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "modelgen")]
#[command(author, version, about = "Assembles generated data models into source modules")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a model graph
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Assemble a model graph into ordered, cross-referenced source units
  Assemble(AssembleCommand),
}

#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct AssembleCommand {
  /// Path to the model graph JSON file
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Output file for a single root unit, otherwise the package directory
  #[arg(short, long, value_name = "PATH")]
  pub output: PathBuf,

  /// Collapse structurally identical models within a unit
  #[arg(long, default_value_t = false)]
  pub reuse_models: bool,

  /// Rename fields to snake_case, keeping the original name as an alias
  #[arg(long, default_value_t = false)]
  pub snake_case_field: bool,

  /// Omit `= None` defaults from optional fields
  #[arg(long, default_value_t = false)]
  pub strip_default_none: bool,

  /// Emit model bodies without import statements
  #[arg(long, default_value_t = false)]
  pub no_imports: bool,

  /// Skip the trailing `update_forward_refs()` block
  #[arg(long, default_value_t = false)]
  pub no_deferred_updates: bool,

  /// External formatter reading stdin and writing stdout (e.g. "black -q -")
  #[arg(long, value_name = "COMMAND")]
  pub formatter: Option<String>,

  /// Extra import statement added to every unit (repeatable)
  #[arg(long = "global-import", value_name = "STATEMENT")]
  pub global_imports: Vec<String>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List models in emission order with their namespace
  Models {
    /// Path to the model graph JSON file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
