//! Shared data models for lint and fix outputs.

use crate::rule::fixer::Fix;
use serde::Serialize;

#[derive(Serialize, Clone, Debug)]
/// A single lint issue with severity and location.
pub struct Issue {
    pub file: String,
    pub rule: String,
    pub severity: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
    /// Swap proposed for the issue; absent for load errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Issue {
    /// File-level issue (load/parse failures) anchored at 1:1.
    pub fn file_error(file: &str, rule: &str, message: String) -> Self {
        Issue {
            file: file.to_string(),
            rule: rule.to_string(),
            severity: "error".into(),
            line: 1,
            column: 1,
            message,
            fix: None,
        }
    }
}

#[derive(Serialize, Debug, Default)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub fixable: usize,
    pub files: usize,
}

impl Summary {
    pub fn from_issues(issues: &[Issue], files: usize) -> Self {
        let mut summary = Summary {
            files,
            ..Summary::default()
        };
        for is in issues {
            match is.severity.as_str() {
                "error" => summary.errors += 1,
                "warning" | "warn" => summary.warnings += 1,
                _ => summary.infos += 1,
            }
            if is.fix.is_some() {
                summary.fixable += 1;
            }
        }
        summary
    }
}

#[derive(Serialize, Debug)]
/// Lint results container.
pub struct LintResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}
