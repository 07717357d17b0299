//! Source text with its token and comment streams.
//!
//! Offsets are byte offsets into `text`. Tokens and comments are kept sorted
//! by start offset so range queries are binary searches.

use crate::ast::Span;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// ESTree token type (`Punctuator`, `Identifier`, `String`, ...).
    pub kind: String,
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    pub value: String,
    pub span: Span,
}

/// A token or a comment, as returned by range queries that include comments.
#[derive(Debug, Clone, Copy)]
pub enum Lexeme<'a> {
    Token(&'a Token),
    Comment(&'a Comment),
}

impl Lexeme<'_> {
    pub fn span(&self) -> Span {
        match self {
            Lexeme::Token(t) => t.span,
            Lexeme::Comment(c) => c.span,
        }
    }
}

/// 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone)]
pub struct SourceCode {
    text: String,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    line_starts: Vec<usize>,
}

impl SourceCode {
    pub fn new(text: String, mut tokens: Vec<Token>, mut comments: Vec<Comment>) -> Self {
        tokens.sort_by_key(|t| t.span.start);
        comments.sort_by_key(|c| c.span.start);
        let line_starts = compute_line_starts(&text);
        Self {
            text,
            tokens,
            comments,
            line_starts,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Text covered by `span`; empty when the span is outside the text.
    pub fn slice(&self, span: Span) -> &str {
        self.text.get(span.start..span.end).unwrap_or("")
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }

    pub fn position(&self, offset: usize) -> Position {
        let line = self.line_of(offset);
        let start = self.line_starts[line - 1];
        let end = offset.min(self.text.len());
        let column = self
            .text
            .get(start..end)
            .map(|s| s.chars().count())
            .unwrap_or(0);
        Position {
            line,
            column: column + 1,
        }
    }

    /// Tokens and comments lying entirely between the end of `left` and the
    /// start of `right`, in source order.
    pub fn tokens_between(&self, left: Span, right: Span) -> Vec<Lexeme<'_>> {
        let from = left.end;
        let to = right.start;
        let toks = self.tokens_in(from, to).iter().map(Lexeme::Token);
        let comms = self.comments_in(from, to).iter().map(Lexeme::Comment);
        let mut out: Vec<Lexeme<'_>> = toks.chain(comms).collect();
        out.sort_by_key(|l| l.span().start);
        out
    }

    /// Last token ending at or before `offset`.
    pub fn token_before(&self, offset: usize) -> Option<&Token> {
        let idx = self.tokens.partition_point(|t| t.span.end <= offset);
        idx.checked_sub(1).map(|i| &self.tokens[i])
    }

    /// Comments directly before `offset` with no token in between, in
    /// source order.
    pub fn comments_before(&self, offset: usize) -> &[Comment] {
        let floor = self.token_before(offset).map(|t| t.span.end).unwrap_or(0);
        self.comments_in(floor, offset)
    }

    fn tokens_in(&self, from: usize, to: usize) -> &[Token] {
        let lo = self.tokens.partition_point(|t| t.span.start < from);
        let hi = self.tokens.partition_point(|t| t.span.end <= to);
        if lo < hi {
            &self.tokens[lo..hi]
        } else {
            &[]
        }
    }

    fn comments_in(&self, from: usize, to: usize) -> &[Comment] {
        let lo = self.comments.partition_point(|c| c.span.start < from);
        let hi = self.comments.partition_point(|c| c.span.end <= to);
        if lo < hi {
            &self.comments[lo..hi]
        } else {
            &[]
        }
    }
}

/// Line starts using JavaScript line terminators (`\r\n`, `\r`, `\n`,
/// U+2028, U+2029).
fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\r' => {
                if let Some((_, '\n')) = chars.peek() {
                    chars.next();
                    starts.push(idx + 2);
                } else {
                    starts.push(idx + 1);
                }
            }
            '\n' => starts.push(idx + 1),
            '\u{2028}' | '\u{2029}' => starts.push(idx + ch.len_utf8()),
            _ => {}
        }
    }
    starts
}
