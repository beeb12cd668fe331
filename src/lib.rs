pub mod batch;
pub mod error;
pub mod format;
pub mod report;
pub mod table;
pub mod text;

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

pub use error::{BatchError, DfaError, Dimension, ParseError};
pub use table::{compute, compute_with, Equivalence, PairTable, Strategy};

pub type State = usize;

/// An input symbol. Symbols are opaque; only their position in the alphabet matters.
///
/// Any scalar deserializes into a symbol, so `alphabet: [0, 1]` reads the
/// same as the text format's `0 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

struct SymbolVisitor;

impl<'de> Visitor<'de> for SymbolVisitor {
  type Value = Symbol;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("a scalar symbol")
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<Symbol, E> {
    Ok(Symbol::from(v))
  }

  fn visit_string<E: de::Error>(self, v: String) -> Result<Symbol, E> {
    Ok(Symbol(v))
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<Symbol, E> {
    Ok(Symbol(v.to_string()))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<Symbol, E> {
    Ok(Symbol(v.to_string()))
  }

  fn visit_f64<E: de::Error>(self, v: f64) -> Result<Symbol, E> {
    Ok(Symbol(v.to_string()))
  }

  fn visit_bool<E: de::Error>(self, v: bool) -> Result<Symbol, E> {
    Ok(Symbol(v.to_string()))
  }
}

impl<'de> Deserialize<'de> for Symbol {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(SymbolVisitor)
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for Symbol {
  fn from(s: &str) -> Self {
    Symbol(s.to_owned())
  }
}

/// A validated deterministic automaton over the states `0..state_count()`.
///
/// The transition function is total: every state has exactly one successor
/// for every symbol of the alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
  alphabet: Vec<Symbol>,
  // state -> accept?
  accept: Vec<bool>,
  // state -> symbol index -> destination
  delta: Vec<Vec<State>>,
}

impl Dfa {
  /// Checks, in order: the state count, the alphabet, the final states,
  /// the shape of the transition table and finally each destination.
  /// The first violation found is returned.
  pub fn new(
    states: usize,
    alphabet: Vec<Symbol>,
    finals: impl IntoIterator<Item = State>,
    transitions: Vec<Vec<State>>,
  ) -> Result<Self, DfaError> {
    if states == 0 {
      return Err(DfaError::InvalidStateCount(0));
    }
    check_alphabet(&alphabet)?;

    let finals = finals.into_iter().collect::<Vec<_>>();
    if let Some(&s) = finals.iter().find(|&&s| s >= states) {
      return Err(DfaError::FinalStateOutOfRange {
        state: signed(s),
        states,
      });
    }

    // nothing sized by `states` is allocated before the table agrees with it
    check_dimensions(states, alphabet.len(), &transitions)?;
    for (state, row) in transitions.iter().enumerate() {
      if let Some((symbol, &dest)) = row.iter().enumerate().find(|(_, &d)| d >= states) {
        return Err(DfaError::InvalidDestinationState {
          state,
          symbol,
          dest: signed(dest),
          states,
        });
      }
    }

    let mut accept = vec![false; states];
    for s in finals {
      accept[s] = true;
    }
    Ok(Dfa {
      alphabet,
      accept,
      delta: transitions,
    })
  }

  pub fn state_count(&self) -> usize {
    self.accept.len()
  }

  pub fn alphabet_size(&self) -> usize {
    self.alphabet.len()
  }

  pub fn alphabet(&self) -> &[Symbol] {
    &self.alphabet
  }

  /// Panics if `state` is not a state of this automaton.
  pub fn is_final(&self, state: State) -> bool {
    self.accept[state]
  }

  /// Successor of `state` on the symbol at `symbol` in alphabet order.
  /// Panics if either index is out of range.
  pub fn delta(&self, state: State, symbol: usize) -> State {
    self.delta[state][symbol]
  }

  /// Final states in ascending order.
  pub fn finals(&self) -> impl Iterator<Item = State> + '_ {
    self
      .accept
      .iter()
      .enumerate()
      .filter(|(_, &a)| a)
      .map(|(s, _)| s)
  }
}

pub(crate) fn check_alphabet(alphabet: &[Symbol]) -> Result<(), DfaError> {
  let mut seen = HashSet::new();
  for symbol in alphabet {
    if !seen.insert(symbol) {
      return Err(DfaError::DuplicateSymbol(symbol.clone()));
    }
  }
  Ok(())
}

/// The table must have one row per state and one column per symbol.
pub(crate) fn check_dimensions<T>(
  states: usize,
  symbols: usize,
  rows: &[Vec<T>],
) -> Result<(), DfaError> {
  if rows.len() != states {
    return Err(DfaError::TransitionDimensionMismatch {
      dimension: Dimension::Rows,
      expected: states,
      found: rows.len(),
    });
  }
  for (state, row) in rows.iter().enumerate() {
    if row.len() != symbols {
      return Err(DfaError::TransitionDimensionMismatch {
        dimension: Dimension::Columns(state),
        expected: symbols,
        found: row.len(),
      });
    }
  }
  Ok(())
}

fn signed(s: usize) -> i64 {
  i64::try_from(s).unwrap_or(i64::MAX)
}
