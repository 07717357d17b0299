//! Blank-line detection between consecutive entries.

use crate::ast::Node;
use crate::source::SourceCode;

/// Whether a blank line separates `prev` from `current`.
///
/// `carried` is the frame's flag from the previous entry. It is returned
/// unchanged when there is no previous entry or nothing lies between the two
/// entries; otherwise a detected gap can only turn it on.
pub fn has_blank_line_between(
    source: &SourceCode,
    prev: Option<&Node>,
    current: &Node,
    carried: bool,
) -> bool {
    let Some(prev) = prev else {
        return carried;
    };
    let between = source.tokens_between(prev.span, current.span);
    let (Some(first), Some(last)) = (between.first(), between.last()) else {
        return carried;
    };
    if carried {
        return true;
    }

    let inner_gap = between
        .windows(2)
        .any(|pair| lines_apart(source, pair[0].span().end, pair[1].span().start));
    inner_gap
        || lines_apart(source, last.span().end, current.span.start)
        || lines_apart(source, prev.span.end, first.span().start)
}

fn lines_apart(source: &SourceCode, from: usize, to: usize) -> bool {
    source.line_of(to).saturating_sub(source.line_of(from)) > 1
}
