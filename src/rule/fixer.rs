//! Swap fixes for out-of-order entries.
//!
//! A fix exchanges the text of two entries, each together with its leading
//! comments. Separators and comments that trail the previous line stay
//! where they are.

use crate::ast::{Node, Span};
use crate::source::SourceCode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub span: Span,
    pub text: String,
}

/// Replacement operations in source order, non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub edits: Vec<TextEdit>,
}

impl Fix {
    /// Smallest span covering every edit.
    pub fn range(&self) -> Option<Span> {
        let start = self.edits.iter().map(|e| e.span.start).min()?;
        let end = self.edits.iter().map(|e| e.span.end).max()?;
        Some(Span::new(start, end))
    }

    /// Apply this fix alone to `text` (the text it was computed from).
    pub fn apply(&self, text: &str) -> String {
        splice(text, self.edits.iter())
    }
}

/// Result of applying several fixes in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub output: String,
    pub applied: usize,
    pub skipped: usize,
}

/// Apply non-overlapping fixes in source order. A fix whose range starts at
/// or before the end of an already applied fix is skipped; it will be
/// reported again on the next run.
pub fn apply_fixes<'f>(text: &str, fixes: impl IntoIterator<Item = &'f Fix>) -> FixOutcome {
    let mut ranged: Vec<(Span, &Fix)> = fixes
        .into_iter()
        .filter_map(|f| f.range().map(|r| (r, f)))
        .collect();
    ranged.sort_by_key(|(r, _)| (r.start, r.end));

    let mut accepted: Vec<&TextEdit> = Vec::new();
    let mut last_end: Option<usize> = None;
    let mut applied = 0;
    let mut skipped = 0;
    for (range, fix) in ranged {
        if last_end.is_some_and(|end| end >= range.start) {
            log::debug!("skipping overlapping fix at {}..{}", range.start, range.end);
            skipped += 1;
            continue;
        }
        accepted.extend(fix.edits.iter());
        last_end = Some(range.end);
        applied += 1;
    }
    FixOutcome {
        output: splice(text, accepted.into_iter()),
        applied,
        skipped,
    }
}

fn splice<'e>(text: &str, edits: impl Iterator<Item = &'e TextEdit>) -> String {
    let mut edits: Vec<&TextEdit> = edits.collect();
    edits.sort_by_key(|e| e.span.start);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.span.start < cursor {
            continue;
        }
        out.push_str(text.get(cursor..edit.span.start).unwrap_or(""));
        out.push_str(&edit.text);
        cursor = edit.span.end;
    }
    out.push_str(text.get(cursor..).unwrap_or(""));
    out
}

/// Start of the region that moves with `entry`: its first leading comment,
/// or the entry itself.
///
/// Leading comments are the comments directly before the entry. A comment
/// that starts on the line of the preceding token belongs to that line and
/// stops the scan, unless it ends on the entry's own line.
pub fn relocatable_start(source: &SourceCode, entry: &Node) -> usize {
    let comments = source.comments_before(entry.span.start);
    let prev_line = source
        .token_before(entry.span.start)
        .map(|t| source.line_of(t.span.end));
    let entry_line = source.line_of(entry.span.start);
    let mut start = entry.span.start;
    for comment in comments.iter().rev() {
        let own_line = prev_line.map_or(true, |line| source.line_of(comment.span.start) > line);
        let hugs_entry = source.line_of(comment.span.end) == entry_line;
        if !(own_line || hugs_entry) {
            break;
        }
        start = comment.span.start;
    }
    start
}

/// Fix exchanging `first` and `second` (with `first` before `second`).
pub fn swap_entries(source: &SourceCode, first: &Node, second: &Node) -> Fix {
    let a = Span::new(relocatable_start(source, first), first.span.end);
    let b = Span::new(relocatable_start(source, second), second.span.end);
    Fix {
        edits: vec![
            TextEdit {
                span: a,
                text: source.slice(b).to_string(),
            },
            TextEdit {
                span: b,
                text: source.slice(a).to_string(),
            },
        ],
    }
}
