use std::fmt;

use thiserror::Error;

use crate::{State, Symbol};

/// Which side of the transition table has the wrong size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
  Rows,
  /// Columns of the row belonging to this state.
  Columns(State),
}

impl fmt::Display for Dimension {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Dimension::Rows => write!(f, "row count"),
      Dimension::Columns(s) => write!(f, "column count of state {s}"),
    }
  }
}

/// Reasons an automaton description is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DfaError {
  #[error("state count must be positive, got {0}")]
  InvalidStateCount(i64),

  #[error("symbol {0} appears more than once in the alphabet")]
  DuplicateSymbol(Symbol),

  #[error("final state {state} out of range [0, {states})")]
  FinalStateOutOfRange { state: i64, states: usize },

  #[error("transition table {dimension} is {found}, expected {expected}")]
  TransitionDimensionMismatch {
    dimension: Dimension,
    expected: usize,
    found: usize,
  },

  /// `symbol` is the column index, in alphabet order.
  #[error("transition from state {state} on symbol #{symbol} goes to {dest}, outside [0, {states})")]
  InvalidDestinationState {
    state: State,
    symbol: usize,
    dest: i64,
    states: usize,
  },
}

/// Syntax errors in the line-oriented text format. Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
  #[error("input is empty, expected a case count")]
  MissingCaseCount,

  #[error("line {line}: case count must be positive, got {count}")]
  InvalidCaseCount { line: usize, count: i64 },

  #[error("unexpected end of input while reading {expected} of case {case}")]
  UnexpectedEof { case: usize, expected: &'static str },

  #[error("line {line}: {token:?} is not an integer")]
  NotAnInteger { line: usize, token: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
  #[error("case {case} is invalid: {source}")]
  Aborted {
    case: usize,
    #[source]
    source: DfaError,
  },
}
