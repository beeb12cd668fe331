use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dfa_equiv::batch::{self, OnError};
use dfa_equiv::format::{self, Case};
use dfa_equiv::{report, text, Strategy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
  Text,
  Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
  Text,
  Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
  /// Rescan unmarked pairs until nothing changes
  Rounds,
  /// Propagate from newly marked pairs through inverse transitions
  Worklist,
}

impl From<StrategyArg> for Strategy {
  fn from(arg: StrategyArg) -> Self {
    match arg {
      StrategyArg::Rounds => Strategy::Rounds,
      StrategyArg::Worklist => Strategy::Worklist,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OnErrorArg {
  /// Report the invalid case and keep going
  Continue,
  /// Stop at the first invalid case
  Abort,
}

impl From<OnErrorArg> for OnError {
  fn from(arg: OnErrorArg) -> Self {
    match arg {
      OnErrorArg::Continue => OnError::Continue,
      OnErrorArg::Abort => OnError::Abort,
    }
  }
}

/// Find the equivalent state pairs of deterministic finite automata.
#[derive(Parser)]
#[command(name = "dfa-equiv")]
#[command(version)]
struct Cli {
  /// File holding one or more automata
  input: PathBuf,

  /// Input format (by default `.yaml`/`.yml` files are YAML, anything else is text)
  #[arg(short, long)]
  format: Option<InputFormat>,

  /// Fixpoint strategy, unless a YAML case picks its own
  #[arg(short, long, default_value = "rounds")]
  strategy: StrategyArg,

  /// What to do with a case that fails validation
  #[arg(long, default_value = "continue")]
  on_error: OnErrorArg,

  /// Report format
  #[arg(short, long, default_value = "text")]
  output: OutputFormat,
}

fn detect(path: &Path) -> InputFormat {
  match path.extension().and_then(|e| e.to_str()) {
    Some("yaml" | "yml") => InputFormat::Yaml,
    _ => InputFormat::Text,
  }
}

fn main() -> anyhow::Result<()> {
  env_logger::init();
  let cli = Cli::parse();

  let input = fs::read_to_string(&cli.input)
    .with_context(|| format!("reading {}", cli.input.display()))?;
  let cases: Vec<Case> = match cli.format.unwrap_or_else(|| detect(&cli.input)) {
    InputFormat::Yaml => format::from_yaml(&input)
      .with_context(|| format!("parsing {}", cli.input.display()))?,
    InputFormat::Text => text::parse(&input)
      .with_context(|| format!("parsing {}", cli.input.display()))?
      .into_iter()
      .map(Case::from)
      .collect(),
  };

  let config = batch::Config {
    strategy: cli.strategy.into(),
    on_error: cli.on_error.into(),
  };
  let reports = batch::run(cases, &config)?;
  match cli.output {
    OutputFormat::Text => print!("{}", report::text(&reports)),
    OutputFormat::Yaml => print!("{}", report::yaml(&reports)?),
  }
  Ok(())
}
