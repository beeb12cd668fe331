use std::fmt::{self, Write};

use serde::Serialize;

use crate::batch::CaseReport;
use crate::State;

/// Human readable report, one block per case.
pub fn write_text(out: &mut impl Write, reports: &[CaseReport]) -> fmt::Result {
  writeln!(out, "Processing {} case(s)...", reports.len())?;
  for r in reports {
    writeln!(out)?;
    match &r.name {
      Some(name) => writeln!(out, "Case {} ({name}):", r.case)?,
      None => writeln!(out, "Case {}:", r.case)?,
    }
    match &r.outcome {
      Ok(eq) => {
        writeln!(out, "Equivalent state pairs: {eq}")?;
        if eq.is_empty() {
          writeln!(out, "No equivalent states found")?;
        } else {
          writeln!(out, "Total equivalent pairs: {}", eq.count())?;
        }
      }
      Err(e) => writeln!(out, "Error: {e}")?,
    }
  }
  Ok(())
}

pub fn text(reports: &[CaseReport]) -> String {
  let mut out = String::new();
  write_text(&mut out, reports).expect("writing to a String cannot fail");
  out
}

#[derive(Serialize)]
struct Summary<'a> {
  case: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  name: Option<&'a str>,
  #[serde(flatten)]
  body: Body<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Body<'a> {
  Solved {
    pairs: &'a [(State, State)],
    count: usize,
  },
  Failed {
    error: String,
  },
}

pub fn yaml(reports: &[CaseReport]) -> Result<String, serde_yaml::Error> {
  let summaries: Vec<Summary> = reports
    .iter()
    .map(|r| Summary {
      case: r.case,
      name: r.name.as_deref(),
      body: match &r.outcome {
        Ok(eq) => Body::Solved {
          pairs: eq.pairs(),
          count: eq.count(),
        },
        Err(e) => Body::Failed {
          error: e.to_string(),
        },
      },
    })
    .collect();
  serde_yaml::to_string(&summaries)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::batch::{run, Config};
  use crate::format::from_yaml;

  const DOC: &str = r#"
- name: worked
  states: 6
  alphabet: [a, b]
  finals: [1, 2, 5]
  transitions: [[0, 1], [2, 3], [4, 3], [5, 5], [5, 5], [5, 5]]
- states: 2
  alphabet: [a]
  finals: [0]
  transitions: [[1], [0]]
- states: 2
  alphabet: [a]
  finals: [2]
  transitions: [[1], [0]]
"#;

  fn reports() -> Vec<CaseReport> {
    run(from_yaml(DOC).unwrap(), &Config::default()).unwrap()
  }

  #[test]
  fn renders_text() {
    let expected = "\
Processing 3 case(s)...

Case 1 (worked):
Equivalent state pairs: (3,4)
Total equivalent pairs: 1

Case 2:
Equivalent state pairs: None
No equivalent states found

Case 3:
Error: final state 2 out of range [0, 2)
";
    assert_eq!(text(&reports()), expected);
  }

  #[test]
  fn renders_yaml() {
    let out = yaml(&reports()).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
    let seq = value.as_sequence().unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(seq[0]["name"].as_str(), Some("worked"));
    assert_eq!(seq[0]["count"].as_u64(), Some(1));
    assert_eq!(seq[0]["pairs"][0][1].as_u64(), Some(4));
    assert!(seq[1].get("name").is_none());
    assert_eq!(seq[1]["count"].as_u64(), Some(0));
    assert_eq!(
      seq[2]["error"].as_str(),
      Some("final state 2 out of range [0, 2)")
    );
  }
}
