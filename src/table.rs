//! Table-filling computation of equivalent state pairs.
//!
//! A pair of states is marked distinguishable when exactly one of them is
//! final, or when some symbol takes them to an already-marked pair. The
//! pairs left unmarked at the fixpoint are exactly the equivalent pairs.

use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{Dfa, State};

/// How the fixpoint is reached. Both strategies yield the same relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
  /// Rescan every unmarked pair until a full pass marks nothing.
  #[default]
  Rounds,
  /// Propagate backwards from newly marked pairs through inverse transitions.
  Worklist,
}

/// Symmetric distinguishability relation over pairs of distinct states.
///
/// Stored as a flat lower triangle: `{i, j}` with `i < j` lives at
/// `j * (j - 1) / 2 + i`, so `(i, j)` and `(j, i)` share a cell.
#[derive(Debug, Clone)]
pub struct PairTable {
  states: usize,
  marks: Vec<bool>,
}

impl PairTable {
  pub fn new(states: usize) -> Self {
    PairTable {
      states,
      marks: vec![false; states * states.saturating_sub(1) / 2],
    }
  }

  fn index(p: State, q: State) -> usize {
    let (i, j) = if p < q { (p, q) } else { (q, p) };
    j * (j - 1) / 2 + i
  }

  /// A state is never distinguishable from itself.
  pub fn is_marked(&self, p: State, q: State) -> bool {
    p != q && self.marks[Self::index(p, q)]
  }

  /// Returns whether the pair was newly marked. Marks are never removed.
  fn mark(&mut self, p: State, q: State) -> bool {
    debug_assert_ne!(p, q);
    let cell = &mut self.marks[Self::index(p, q)];
    let fresh = !*cell;
    *cell = true;
    fresh
  }

  /// All pairs `(i, j)`, `i < j`, ascending by `i` then `j`.
  pub fn pairs(&self) -> impl Iterator<Item = (State, State)> {
    (0..self.states).tuple_combinations()
  }

  pub fn unmarked(&self) -> impl Iterator<Item = (State, State)> + '_ {
    self.pairs().filter(|&(i, j)| !self.is_marked(i, j))
  }

  pub fn marked_count(&self) -> usize {
    self.marks.iter().filter(|&&m| m).count()
  }
}

/// The equivalent pairs of one automaton, each `(i, j)` with `i < j`,
/// sorted ascending by `i` then `j`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Equivalence {
  pairs: Vec<(State, State)>,
}

impl Equivalence {
  fn from_table(table: &PairTable) -> Self {
    // unmarked() already yields pairs in lexicographic order
    Equivalence {
      pairs: table.unmarked().collect(),
    }
  }

  pub fn pairs(&self) -> &[(State, State)] {
    &self.pairs
  }

  pub fn count(&self) -> usize {
    self.pairs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pairs.is_empty()
  }

  /// Order-insensitive; `contains(i, i)` is false since self-pairs are never listed.
  pub fn contains(&self, p: State, q: State) -> bool {
    let key = if p < q { (p, q) } else { (q, p) };
    self.pairs.binary_search(&key).is_ok()
  }
}

impl fmt::Display for Equivalence {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.pairs.is_empty() {
      return f.write_str("None");
    }
    let rendered = self.pairs.iter().map(|(i, j)| format!("({i},{j})")).join(" ");
    f.write_str(&rendered)
  }
}

pub fn compute(dfa: &Dfa) -> Equivalence {
  compute_with(dfa, Strategy::Rounds)
}

pub fn compute_with(dfa: &Dfa, strategy: Strategy) -> Equivalence {
  let mut table = initial_table(dfa);
  match strategy {
    Strategy::Rounds => propagate_rounds(dfa, &mut table),
    Strategy::Worklist => propagate_worklist(dfa, &mut table),
  }
  let result = Equivalence::from_table(&table);
  debug!(
    "{} states: {} distinguishable pairs, {} equivalent",
    dfa.state_count(),
    table.marked_count(),
    result.count()
  );
  result
}

/// Marks every pair split by the empty word.
fn initial_table(dfa: &Dfa) -> PairTable {
  let mut table = PairTable::new(dfa.state_count());
  for (i, j) in table.pairs() {
    if dfa.is_final(i) != dfa.is_final(j) {
      table.mark(i, j);
    }
  }
  table
}

/// The first symbol (in alphabet order) leading `{i, j}` to a marked pair.
fn witness(dfa: &Dfa, table: &PairTable, i: State, j: State) -> Option<usize> {
  (0..dfa.alphabet_size()).find(|&a| {
    let (p, q) = (dfa.delta(i, a), dfa.delta(j, a));
    p != q && table.is_marked(p, q)
  })
}

// Each productive round marks at least one of the n(n-1)/2 pairs,
// so there are at most n(n-1)/2 + 1 rounds.
fn propagate_rounds(dfa: &Dfa, table: &mut PairTable) {
  let mut rounds = 0;
  loop {
    rounds += 1;
    let mut changed = false;
    for (i, j) in table.pairs() {
      if table.is_marked(i, j) {
        continue;
      }
      if let Some(a) = witness(dfa, table, i, j) {
        trace!("round {rounds}: ({i},{j}) distinguished by {}", dfa.alphabet()[a]);
        table.mark(i, j);
        changed = true;
      }
    }
    if !changed {
      break;
    }
  }
  debug!("fixpoint after {rounds} rounds");
}

// inverse[q][a] = states p with delta(p, a) = q
fn inverse(dfa: &Dfa) -> Vec<Vec<Vec<State>>> {
  let mut inv = vec![vec![vec![]; dfa.alphabet_size()]; dfa.state_count()];
  for p in 0..dfa.state_count() {
    for a in 0..dfa.alphabet_size() {
      inv[dfa.delta(p, a)][a].push(p);
    }
  }
  inv
}

fn propagate_worklist(dfa: &Dfa, table: &mut PairTable) {
  let inv = inverse(dfa);
  let mut queue: VecDeque<(State, State)> = table
    .pairs()
    .filter(|&(i, j)| table.is_marked(i, j))
    .collect();
  let mut processed = 0;
  while let Some((p, q)) = queue.pop_front() {
    processed += 1;
    for a in 0..dfa.alphabet_size() {
      for (&i, &j) in inv[p][a].iter().cartesian_product(&inv[q][a]) {
        // i == j is impossible since delta is a function and p != q
        if table.mark(i, j) {
          trace!("({i},{j}) distinguished by {} via ({p},{q})", dfa.alphabet()[a]);
          queue.push_back((i, j));
        }
      }
    }
  }
  debug!("fixpoint after {processed} worklist items");
}
