//! The line-oriented text format:
//!
//! ```text
//! <case count>
//! <states>                  -- then, per case:
//! <alphabet symbols>
//! <final states, possibly blank>
//! <one row of destinations per state>
//! ```
//!
//! Only syntax is checked here. Range and shape problems are left in the
//! returned [`Automaton`] for validation, so a bad case does not desync the
//! cases after it.

use std::iter::Enumerate;
use std::str::Lines;

use crate::error::ParseError;
use crate::format::Automaton;
use crate::Symbol;

struct Reader<'a> {
  lines: Enumerate<Lines<'a>>,
  case: usize,
}

impl<'a> Reader<'a> {
  /// Next trimmed line with its 1-based number.
  fn line(&mut self, expected: &'static str) -> Result<(usize, &'a str), ParseError> {
    self
      .lines
      .next()
      .map(|(i, l)| (i + 1, l.trim()))
      .ok_or(ParseError::UnexpectedEof {
        case: self.case,
        expected,
      })
  }

  fn integers(&mut self, expected: &'static str) -> Result<Vec<i64>, ParseError> {
    let (line, text) = self.line(expected)?;
    text.split_whitespace().map(|t| integer(line, t)).collect()
  }
}

fn integer(line: usize, token: &str) -> Result<i64, ParseError> {
  token.parse().map_err(|_| ParseError::NotAnInteger {
    line,
    token: token.to_owned(),
  })
}

pub fn parse(input: &str) -> Result<Vec<Automaton>, ParseError> {
  let mut reader = Reader {
    lines: input.lines().enumerate(),
    case: 0,
  };
  let (line, text) = reader.line("case count").map_err(|_| ParseError::MissingCaseCount)?;
  let count = integer(line, text)?;
  if count <= 0 {
    return Err(ParseError::InvalidCaseCount { line, count });
  }

  let mut cases = vec![];
  for case in 1..=count as usize {
    reader.case = case;
    let (line, text) = reader.line("state count")?;
    let states = integer(line, text)?;
    let (_, symbols) = reader.line("alphabet")?;
    let alphabet = symbols.split_whitespace().map(Symbol::from).collect();
    let finals = reader.integers("final states")?;
    let transitions = (0..states.max(0))
      .map(|_| reader.integers("transition row"))
      .collect::<Result<Vec<_>, _>>()?;
    cases.push(Automaton {
      states,
      alphabet,
      finals,
      transitions,
    });
  }
  if reader.lines.any(|(_, l)| !l.trim().is_empty()) {
    log::debug!("ignoring input after case {count}");
  }
  Ok(cases)
}
