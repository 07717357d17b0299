//! Lint runner for key order validation.
//!
//! Each target source file is paired with its ESTree dump
//! (`<file><astSuffix>`), checked with the `sort-keys` rule, and the
//! violations become `Issue`s. Files are processed in parallel; issues are
//! sorted by file, line and column for deterministic output.

use crate::config::Effective;
use crate::estree::{self, Program};
use crate::models::{Issue, LintResult, Summary};
use crate::rule::{KeyOrderRule, RULE_ID};
use glob::glob;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Run lint across files matched by the configured patterns.
///
/// Load failures are reported as `load-source`, `load-ast` or `parse-ast`
/// issues with severity `error`; violations use the configured level.
pub fn run_lint(eff: &Effective) -> LintResult {
    let targets = collect_targets(&eff.repo_root, &eff.patterns, &eff.ast_suffix);
    let rule = KeyOrderRule::new(eff.rule);
    let mut issues: Vec<Issue> = targets
        .par_iter()
        .flat_map_iter(|path| {
            let file = display_path(&eff.repo_root, path);
            log::debug!("checking {}", file);
            match load_file(path, &file, &eff.ast_suffix) {
                Ok(program) => check_program(&rule, &program, &file, &eff.level),
                Err(issue) => vec![issue],
            }
        })
        .collect();
    sort_issues(&mut issues);
    let summary = Summary::from_issues(&issues, targets.len());
    LintResult { issues, summary }
}

/// Expand `patterns` under `root`, skipping the ESTree dumps themselves.
pub fn collect_targets(root: &Path, patterns: &[String], ast_suffix: &str) -> Vec<PathBuf> {
    let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        let entries = match glob(&pattern) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("ignoring invalid pattern '{}': {}", pat, e);
                continue;
            }
        };
        for p in entries.flatten() {
            let is_dump = p.to_string_lossy().ends_with(ast_suffix);
            if p.is_file() && !is_dump {
                targets.insert(p);
            }
        }
    }
    targets.into_iter().collect()
}

/// Location of the ESTree dump for `source`.
pub fn ast_path(source: &Path, ast_suffix: &str) -> PathBuf {
    let mut s: OsString = source.as_os_str().to_owned();
    s.push(ast_suffix);
    PathBuf::from(s)
}

/// Path shown to users: relative to the repo root when possible.
pub fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

/// Read a source file and its ESTree dump.
pub fn load_file(path: &Path, file: &str, ast_suffix: &str) -> Result<Program, Issue> {
    let text = fs::read_to_string(path).map_err(|e| {
        Issue::file_error(file, "load-source", format!("Failed to read source: {}", e))
    })?;
    let dump = ast_path(path, ast_suffix);
    let ast = fs::read_to_string(&dump).map_err(|_| {
        Issue::file_error(
            file,
            "load-ast",
            format!(
                "ESTree dump not found. Looked at '{}'.",
                dump.to_string_lossy()
            ),
        )
    })?;
    estree::load_program(&text, &ast).map_err(|e| {
        Issue::file_error(file, "parse-ast", format!("ESTree dump is not valid: {}", e))
    })
}

/// Run the rule on a loaded program and convert violations to issues.
pub fn check_program(rule: &KeyOrderRule, program: &Program, file: &str, level: &str) -> Vec<Issue> {
    rule.check(&program.root, &program.source)
        .into_iter()
        .map(|v| {
            let pos = program.source.position(v.span.start);
            Issue {
                file: file.to_string(),
                rule: RULE_ID.to_string(),
                severity: level.to_string(),
                line: pos.line,
                column: pos.column,
                message: v.message(),
                fix: Some(v.fix),
            }
        })
        .collect()
}

fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.line.cmp(&b.line))
            .then(a.column.cmp(&b.column))
            .then(a.message.cmp(&b.message))
    });
}
