//! Read-only syntax tree consumed by the key order rule.
//!
//! Nodes mirror the ESTree shapes the rule cares about. Everything else is
//! kept as `NodeKind::Other` with its child nodes in source order so the
//! traversal can still reach nested object literals.

use serde::Serialize;

/// Byte range into the source text (`start` inclusive, `end` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// ESTree `type` of the node.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            NodeKind::ObjectExpression { .. } => "ObjectExpression",
            NodeKind::ObjectPattern { .. } => "ObjectPattern",
            NodeKind::Property { .. } => "Property",
            NodeKind::SpreadElement { .. } => "SpreadElement",
            NodeKind::RestElement { .. } => "RestElement",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Literal(_) => "Literal",
            NodeKind::TemplateLiteral { .. } => "TemplateLiteral",
            NodeKind::Other { kind, .. } => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// `{ a: 1, ...rest }` in expression position.
    ObjectExpression { properties: Vec<Node> },
    /// `{ a, b: c }` in binding/assignment position.
    ObjectPattern { properties: Vec<Node> },
    Property {
        key: Box<Node>,
        value: Box<Node>,
        computed: bool,
    },
    SpreadElement { argument: Box<Node> },
    RestElement { argument: Box<Node> },
    Identifier { name: String },
    Literal(Literal),
    TemplateLiteral {
        /// Cooked text of each quasi; `None` when the quasi has an invalid escape.
        quasis: Vec<Option<String>>,
        expressions: Vec<Node>,
    },
    Other { kind: String, children: Vec<Node> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    RegExp { pattern: String, flags: String },
    BigInt(String),
}
