use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::Serialize;

use crate::{recipe_utils::Problem, CegisOutcome, CegisResult};

/// What a single CEGIS run recovered, in a printable and serializable form.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RecoveryReport {
    pub name: String,
    pub hypotheses: usize,
    pub recovered_size: usize,
    pub iterations: usize,
    pub negatives: usize,
    pub status: String,
    pub premises: Vec<String>,
    pub target: String,
    pub recovered: Option<Vec<String>>,
    pub excluded: Vec<String>,
}

impl RecoveryReport {
    pub fn new(problem: &Problem, result: &CegisResult) -> Self {
        let status = match result.outcome {
            CegisOutcome::Accepted => "OK",
            CegisOutcome::Infeasible => "FAIL (infeasible)",
            CegisOutcome::Exhausted => "FAIL (exhausted)",
        };
        Self {
            name: problem.name.clone(),
            hypotheses: problem.hypotheses.len(),
            recovered_size: result.rules.as_ref().map_or(0, |r| r.len()),
            iterations: result.iterations,
            negatives: result.negatives.len(),
            status: status.to_string(),
            premises: problem.premises.iter().map(|p| p.to_string()).collect(),
            target: problem.target.to_string(),
            recovered: result
                .rules
                .as_ref()
                .map(|rules| rules.iter().map(|r| r.to_string()).collect()),
            excluded: result
                .negatives
                .iter()
                .map(|n| n.conclusion.to_string())
                .collect(),
        }
    }

    pub fn header() -> String {
        format!(
            "{:<18} {:>4} {:>4} {:>5} {:>4}  status\n{}",
            "Example",
            "|H|",
            "|Γ|",
            "iters",
            "neg",
            "-".repeat(60)
        )
    }

    pub fn summary_line(&self) -> String {
        let name: String = self.name.chars().take(18).collect();
        format!(
            "{:<18} {:>4} {:>4} {:>5} {:>4}  {}",
            name,
            self.hypotheses,
            self.recovered_size,
            self.iterations,
            self.negatives,
            self.status
        )
    }
}

impl Display for RecoveryReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.summary_line())?;
        writeln!(f, "  P: {}", self.premises.join(", "))?;
        writeln!(f, "  target: {}", self.target)?;
        match &self.recovered {
            None => writeln!(f, "  Recovered Γ: None")?,
            Some(rules) => {
                writeln!(f, "  Recovered Γ:")?;
                for rule in rules {
                    writeln!(f, "     {rule}")?;
                }
            }
        }
        if !self.excluded.is_empty() {
            writeln!(f, "  Negatives learned:")?;
            for c in &self.excluded {
                writeln!(f, "    excluded: {c}")?;
            }
        }
        Ok(())
    }
}

pub fn print_reports(title: &str, reports: &[RecoveryReport]) {
    println!("=== {title} ===\n");
    println!("{}", RecoveryReport::header());
    for report in reports {
        println!("{report}");
    }
}

pub fn to_file(reports: &[RecoveryReport], path: impl AsRef<Path>) -> Result<(), String> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(reports)
        .map_err(|e| format!("Failed to serialize reports: {e}"))?;
    std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
