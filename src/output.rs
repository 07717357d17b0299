//! Output rendering for lint and fix commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::fix::FixResult;
use crate::models::{Issue, LintResult};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use similar::{ChangeTag, TextDiff};

fn to_pretty(v: &JsonVal) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

fn severity_label(severity: &str, color: bool) -> (String, String) {
    let (icon, tag) = match severity {
        "error" => ("✖", "⟦error⟧"),
        "warning" | "warn" => ("▲", "⟦warn⟧"),
        _ => ("◆", "⟦info⟧"),
    };
    if !color {
        return (icon.to_string(), tag.to_string());
    }
    match severity {
        "error" => (icon.red().to_string(), tag.red().bold().to_string()),
        "warning" | "warn" => (icon.yellow().to_string(), tag.yellow().bold().to_string()),
        _ => (icon.blue().to_string(), tag.blue().bold().to_string()),
    }
}

fn issue_line(is: &Issue, color: bool) -> String {
    let (icon, sev) = severity_label(&is.severity, color);
    let loc = format!("{}:{}:{}", is.file, is.line, is.column);
    let loc = if color { loc.bold().to_string() } else { loc };
    format!("{} {} {} ❲{}❳ {}", icon, sev, loc, is.rule, is.message)
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    match output {
        "json" => println!("{}", to_pretty(&compose_lint_json(res))),
        _ => {
            let color = use_colors(output);
            for is in &res.issues {
                println!("{}", issue_line(is, color));
            }
            let summary = format!(
                "Summary: errors={} warnings={} infos={} fixable={} files={}",
                res.summary.errors,
                res.summary.warnings,
                res.summary.infos,
                res.summary.fixable,
                res.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print fix results. When `write` is false, previews or diffs are shown
/// for changed files; otherwise only file statuses.
pub fn print_fix(results: &[FixResult], output: &str, write: bool, diff: bool, errors: &[Issue]) {
    match output {
        "json" => println!("{}", to_pretty(&compose_fix_json(results, write, diff, errors))),
        _ => {
            let color = use_colors(output);
            for e in errors {
                eprintln!("{}", issue_line(e, color));
            }
            for r in results {
                if !r.changed {
                    if color {
                        println!("{} {}", "no changes:".bright_black(), r.file);
                    } else {
                        println!("no changes: {}", r.file);
                    }
                    continue;
                }
                if write {
                    if color {
                        println!("{} {}", "fixed:".green().bold(), r.file.bold());
                    } else {
                        println!("fixed: {}", r.file);
                    }
                } else {
                    let body = if diff {
                        build_diff(r.original.as_deref(), r.preview.as_deref(), color)
                    } else {
                        None
                    };
                    let body = body.or_else(|| r.preview.clone()).unwrap_or_default();
                    if color {
                        println!("{} {}\n{}", "---".cyan().bold(), r.file.bold(), body);
                    } else {
                        println!("--- {}\n{}", r.file, body);
                    }
                }
                if r.remaining > 0 {
                    let note = format!(
                        "{} overlapping swap(s) left in {}; run again after refreshing the AST",
                        r.remaining, r.file
                    );
                    eprintln!("{} {}", crate::utils::note_prefix(), note);
                }
            }
        }
    }
}

/// Line diff between `old` and `new`, `-`/`+` prefixed.
pub fn build_diff(old: Option<&str>, new: Option<&str>, color: bool) -> Option<String> {
    let old = old?;
    let new = new?;
    let diff = TextDiff::from_lines(old, new);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let (sign, line) = match change.tag() {
            ChangeTag::Delete => ("-", change.value()),
            ChangeTag::Insert => ("+", change.value()),
            ChangeTag::Equal => (" ", change.value()),
        };
        let text = format!("{}{}", sign, line.trim_end_matches(['\n', '\r']));
        let text = match (color, change.tag()) {
            (true, ChangeTag::Delete) => text.red().to_string(),
            (true, ChangeTag::Insert) => text.green().to_string(),
            _ => text,
        };
        out.push_str(&text);
        out.push('\n');
    }
    Some(out)
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    serde_json::to_value(res).unwrap_or(JsonVal::Null)
}

/// Compose fix JSON object (pure) for testing/snapshot purposes.
pub fn compose_fix_json(
    results: &[FixResult],
    write: bool,
    diff: bool,
    errors: &[Issue],
) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "changed": r.changed,
                "applied": r.applied,
                "remaining": r.remaining,
                "wrote": write && r.changed,
                "preview": if !write { r.preview.as_ref() } else { None },
                "diff": if diff && !write {
                    build_diff(r.original.as_deref(), r.preview.as_deref(), false)
                } else {
                    None
                },
            })
        })
        .collect();
    let changed = results.iter().filter(|r| r.changed).count();
    let summary = json!({
        "changed": changed,
        "total": results.len(),
        "wrote": if write { changed } else { 0 },
        "applied": results.iter().map(|r| r.applied).sum::<usize>(),
        "remaining": results.iter().map(|r| r.remaining).sum::<usize>(),
        "errors": errors.len(),
    });
    json!({"results": items, "errors": errors, "summary": summary})
}
