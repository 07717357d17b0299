//! Autofix runner: apply `sort-keys` swaps to source files.
//!
//! One pass applies every non-overlapping swap of a file. Swaps that overlap
//! an applied one are counted as `remaining`; run lint again on a fresh
//! ESTree dump to pick them up.

use crate::config::Effective;
use crate::lint::{collect_targets, display_path, load_file};
use crate::models::Issue;
use crate::rule::fixer::apply_fixes;
use crate::rule::KeyOrderRule;
use rayon::prelude::*;
use std::fs;

#[derive(Debug, Clone)]
/// Per-file fix result.
pub struct FixResult {
    pub file: String,
    pub changed: bool,
    pub applied: usize,
    pub remaining: usize,
    /// Fixed text, when not written to disk.
    pub preview: Option<String>,
    /// Text before fixing, kept for diffs.
    pub original: Option<String>,
}

/// Fix files matched by the configured patterns.
///
/// With `write`, changed files are rewritten in place. With `capture_old`,
/// the original text is kept so callers can render diffs. Files that cannot
/// be loaded or written are returned as error issues.
pub fn run_fix(eff: &Effective, write: bool, capture_old: bool) -> (Vec<FixResult>, Vec<Issue>) {
    let targets = collect_targets(&eff.repo_root, &eff.patterns, &eff.ast_suffix);
    let rule = KeyOrderRule::new(eff.rule);
    let outcomes: Vec<Result<FixResult, Issue>> = targets
        .par_iter()
        .map(|path| {
            let file = display_path(&eff.repo_root, path);
            let program = load_file(path, &file, &eff.ast_suffix)?;
            let violations = rule.check(&program.root, &program.source);
            let text = program.source.text();
            let outcome = apply_fixes(text, violations.iter().map(|v| &v.fix));
            let changed = outcome.output != text;
            if write && changed {
                fs::write(path, &outcome.output).map_err(|e| {
                    Issue::file_error(&file, "write-source", format!("Failed to write: {}", e))
                })?;
                log::info!("fixed {} ({} swaps)", file, outcome.applied);
            }
            Ok(FixResult {
                file,
                changed,
                applied: outcome.applied,
                remaining: outcome.skipped,
                preview: (!write && changed).then(|| outcome.output.clone()),
                original: (capture_old && changed).then(|| text.to_string()),
            })
        })
        .collect();

    let mut results = Vec::new();
    let mut errors = Vec::new();
    for o in outcomes {
        match o {
            Ok(r) => results.push(r),
            Err(e) => errors.push(e),
        }
    }
    results.sort_by(|a, b| a.file.cmp(&b.file));
    errors.sort_by(|a, b| a.file.cmp(&b.file));
    (results, errors)
}
