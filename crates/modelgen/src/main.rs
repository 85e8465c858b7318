#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;

/// Library diagnostics go to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
  let base_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
    if verbose {
      "warn,modelgen=debug".to_string()
    } else {
      "warn".to_string()
    }
  });
  let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

  tracing_subscriber::registry()
    .with(filter)
    .with(
      fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact(),
    )
    .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  let verbose = matches!(&cli.command, Commands::Assemble(command) if command.verbose);
  init_tracing(verbose);

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Models { input } => ui::commands::list_models(&input, &colors).await?,
    },
    Commands::Assemble(command) => {
      let config = ui::commands::AssembleConfig::from_command(command)?;
      ui::commands::assemble_models(config, &colors).await?;
    }
  }

  Ok(())
}
