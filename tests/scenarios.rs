//! End-to-end runs over the sample inputs in `demos/`.

use dfa_equiv::batch::{self, CaseReport, Config, OnError};
use dfa_equiv::format::{self, Case};
use dfa_equiv::{report, text, BatchError, Dimension, DfaError, Strategy};

fn text_cases() -> Vec<Case> {
  text::parse(include_str!("../demos/cases.txt"))
    .unwrap()
    .into_iter()
    .map(Case::from)
    .collect()
}

fn pairs(report: &CaseReport) -> Vec<(usize, usize)> {
  report.outcome.as_ref().unwrap().pairs().to_vec()
}

#[test]
fn text_demo() {
  for strategy in [Strategy::Rounds, Strategy::Worklist] {
    let config = Config {
      strategy,
      ..Config::default()
    };
    let reports = batch::run(text_cases(), &config).unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(pairs(&reports[0]), vec![(3, 4)]);
    assert!(pairs(&reports[1]).is_empty());
    assert_eq!(pairs(&reports[2]), vec![(0, 1)]);
  }
}

#[test]
fn yaml_demo() {
  let cases = format::from_yaml(include_str!("../demos/cases.yaml")).unwrap();
  let reports = batch::run(cases, &Config::default()).unwrap();
  assert_eq!(reports[0].name.as_deref(), Some("worked example"));
  assert_eq!(pairs(&reports[0]), vec![(3, 4)]);
  assert_eq!(pairs(&reports[1]), vec![(0, 2), (1, 3)]);
  assert_eq!(
    reports[2].outcome,
    Err(DfaError::TransitionDimensionMismatch {
      dimension: Dimension::Columns(1),
      expected: 2,
      found: 1,
    })
  );
}

#[test]
fn yaml_demo_aborts_on_bad_case() {
  let cases = format::from_yaml(include_str!("../demos/cases.yaml")).unwrap();
  let config = Config {
    on_error: OnError::Abort,
    ..Config::default()
  };
  let err = batch::run(cases, &config).unwrap_err();
  assert!(matches!(err, BatchError::Aborted { case: 3, .. }));
}

#[test]
fn text_report_for_demo() {
  let reports = batch::run(text_cases(), &Config::default()).unwrap();
  let out = report::text(&reports);
  assert!(out.starts_with("Processing 3 case(s)...\n"));
  assert!(out.contains("Case 1:\nEquivalent state pairs: (3,4)\nTotal equivalent pairs: 1\n"));
  assert!(out.contains("Case 2:\nEquivalent state pairs: None\nNo equivalent states found\n"));
}

#[test]
fn invalid_text_case_does_not_disturb_neighbours() {
  // the middle case names a destination equal to the state count
  let input = "3\n2\na\n1\n1\n0\n2\na\n1\n1\n2\n1\na\n\n0\n";
  let cases = text::parse(input).unwrap().into_iter().map(Case::from);
  let reports = batch::run(cases, &Config::default()).unwrap();
  assert!(pairs(&reports[0]).is_empty());
  assert_eq!(
    reports[1].outcome,
    Err(DfaError::InvalidDestinationState {
      state: 1,
      symbol: 0,
      dest: 2,
      states: 2,
    })
  );
  assert!(pairs(&reports[2]).is_empty());
}
