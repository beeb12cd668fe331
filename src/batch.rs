use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::format::Case;
use crate::{compute_with, BatchError, Dfa, DfaError, Equivalence, Strategy};

/// What to do when a case fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
  /// Report the case as failed and go on with the next one.
  #[default]
  Continue,
  /// Stop at the first invalid case.
  Abort,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
  pub strategy: Strategy,
  pub on_error: OnError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
  /// 1-based position in the input.
  pub case: usize,
  pub name: Option<String>,
  pub outcome: Result<Equivalence, DfaError>,
}

/// Validates and solves each case in order. Cases are independent of each other.
pub fn run(
  cases: impl IntoIterator<Item = Case>,
  config: &Config,
) -> Result<Vec<CaseReport>, BatchError> {
  let mut reports = vec![];
  for (i, Case { name, automaton, strategy }) in cases.into_iter().enumerate() {
    let case = i + 1;
    let outcome = Dfa::try_from(automaton).map(|dfa| {
      let strategy = strategy.unwrap_or(config.strategy);
      info!("case {case}: {} states, {strategy:?}", dfa.state_count());
      compute_with(&dfa, strategy)
    });
    if let Err(e) = &outcome {
      match config.on_error {
        OnError::Abort => {
          return Err(BatchError::Aborted {
            case,
            source: e.clone(),
          })
        }
        OnError::Continue => warn!("skipping case {case}: {e}"),
      }
    }
    reports.push(CaseReport {
      case,
      name,
      outcome,
    });
  }
  Ok(reports)
}
