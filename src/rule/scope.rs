//! Per-literal traversal state.

use crate::ast::Node;

/// State of one object literal while its entries are visited.
#[derive(Debug, Default)]
pub struct Frame<'a> {
    /// Name of the last named entry, `None` at the start or after a spread.
    pub prev_name: Option<String>,
    /// Last visited entry, named or not.
    pub prev_node: Option<&'a Node>,
    /// Entry that contributed `prev_name`.
    pub prev_named_node: Option<&'a Node>,
    pub prev_blank_line: bool,
}

impl<'a> Frame<'a> {
    /// Record `entry` as the latest visited entry of this literal.
    pub fn advance(&mut self, entry: &'a Node, name: Option<String>) {
        self.prev_node = Some(entry);
        if let Some(name) = name {
            self.prev_name = Some(name);
            self.prev_named_node = Some(entry);
        }
    }

    /// A spread member breaks the ordering chain.
    pub fn reset_name(&mut self) {
        self.prev_name = None;
    }
}

/// Stack of frames, innermost literal on top. The enclosing frame is
/// restored untouched when an inner literal is left.
#[derive(Debug, Default)]
pub struct ScopeStack<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> ScopeStack<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    pub fn pop(&mut self) -> Option<Frame<'a>> {
        self.frames.pop()
    }

    pub fn current(&mut self) -> Option<&mut Frame<'a>> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
