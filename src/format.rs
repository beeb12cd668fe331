use serde::{Deserialize, Serialize};

use crate::{check_alphabet, check_dimensions, Dfa, DfaError, State, Strategy, Symbol};

/// An automaton exactly as written in the input, before validation.
///
/// Numbers are signed so that negative values survive parsing and are
/// reported as the validation error they represent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automaton {
  pub states: i64,
  pub alphabet: Vec<Symbol>,
  #[serde(default)]
  pub finals: Vec<i64>,
  /// Row per state, column per symbol in alphabet order.
  pub transitions: Vec<Vec<i64>>,
}

/// One entry of a YAML input document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(flatten)]
  pub automaton: Automaton,
  /// Overrides the strategy chosen for the whole run.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub strategy: Option<Strategy>,
}

impl From<Automaton> for Case {
  fn from(automaton: Automaton) -> Self {
    Case {
      name: None,
      automaton,
      strategy: None,
    }
  }
}

pub fn from_yaml(input: &str) -> Result<Vec<Case>, serde_yaml::Error> {
  serde_yaml::from_str(input)
}

impl TryFrom<Automaton> for Dfa {
  type Error = DfaError;

  fn try_from(a: Automaton) -> Result<Self, Self::Error> {
    let states = match usize::try_from(a.states) {
      Ok(n) if n > 0 => n,
      _ => return Err(DfaError::InvalidStateCount(a.states)),
    };
    check_alphabet(&a.alphabet)?;

    let finals = a
      .finals
      .iter()
      .map(|&s| in_range(s, states).ok_or(DfaError::FinalStateOutOfRange { state: s, states }))
      .collect::<Result<Vec<State>, _>>()?;

    check_dimensions(states, a.alphabet.len(), &a.transitions)?;
    let mut transitions = Vec::with_capacity(states);
    for (state, row) in a.transitions.iter().enumerate() {
      let row = row
        .iter()
        .enumerate()
        .map(|(symbol, &dest)| {
          in_range(dest, states).ok_or(DfaError::InvalidDestinationState {
            state,
            symbol,
            dest,
            states,
          })
        })
        .collect::<Result<Vec<State>, _>>()?;
      transitions.push(row);
    }

    Dfa::new(states, a.alphabet, finals, transitions)
  }
}

fn in_range(s: i64, states: usize) -> Option<State> {
  usize::try_from(s).ok().filter(|&s| s < states)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Dimension;

  fn raw(states: i64, finals: Vec<i64>, transitions: Vec<Vec<i64>>) -> Automaton {
    Automaton {
      states,
      alphabet: vec!["a".into(), "b".into()],
      finals,
      transitions,
    }
  }

  #[test]
  fn converts_valid_automaton() {
    let dfa = Dfa::try_from(raw(2, vec![1], vec![vec![1, 0], vec![1, 1]])).unwrap();
    assert_eq!(dfa.state_count(), 2);
    assert!(dfa.is_final(1));
    assert_eq!(dfa.delta(0, 0), 1);
  }

  #[test]
  fn negative_values_map_to_named_errors() {
    assert_eq!(
      Dfa::try_from(raw(-3, vec![], vec![])),
      Err(DfaError::InvalidStateCount(-3))
    );
    assert_eq!(
      Dfa::try_from(raw(2, vec![-1], vec![vec![0, 0], vec![0, 0]])),
      Err(DfaError::FinalStateOutOfRange { state: -1, states: 2 })
    );
    assert_eq!(
      Dfa::try_from(raw(2, vec![], vec![vec![0, 0], vec![0, -4]])),
      Err(DfaError::InvalidDestinationState {
        state: 1,
        symbol: 1,
        dest: -4,
        states: 2,
      })
    );
  }

  #[test]
  fn shape_is_checked_before_destinations() {
    assert_eq!(
      Dfa::try_from(raw(2, vec![], vec![vec![0, -1], vec![0, 0, 0]])),
      Err(DfaError::TransitionDimensionMismatch {
        dimension: Dimension::Columns(1),
        expected: 2,
        found: 3,
      })
    );
  }

  #[test]
  fn parses_yaml_cases() {
    let doc = r#"
- name: worked
  states: 2
  alphabet: [a, b]
  finals: [1]
  transitions:
    - [1, 0]
    - [1, 1]
  strategy: worklist
- states: 1
  alphabet: [x]
  transitions: [[0]]
"#;
    let cases = from_yaml(doc).unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].name.as_deref(), Some("worked"));
    assert_eq!(cases[0].strategy, Some(Strategy::Worklist));
    assert_eq!(cases[0].automaton.finals, vec![1]);
    assert_eq!(cases[1].name, None);
    assert!(cases[1].automaton.finals.is_empty());
    assert_eq!(cases[1].automaton.alphabet, vec![Symbol::from("x")]);
  }

  #[test]
  fn unquoted_scalar_symbols() {
    let doc = "- states: 1\n  alphabet: [0, 1, true]\n  transitions: [[0, 0, 0]]\n";
    let cases = from_yaml(doc).unwrap();
    assert_eq!(
      cases[0].automaton.alphabet,
      vec![Symbol::from("0"), Symbol::from("1"), Symbol::from("true")]
    );
    assert!(Dfa::try_from(cases[0].automaton.clone()).is_ok());
  }

  #[test]
  fn nested_symbol_is_rejected() {
    let doc = "- states: 1\n  alphabet: [[a]]\n  transitions: [[0]]\n";
    assert!(from_yaml(doc).is_err());
  }
}
