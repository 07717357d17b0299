//! `sort-keys`: require object literal keys to be sorted.
//!
//! The rule walks the tree depth-first in source order. Each object literal
//! gets its own [`scope::Frame`]; every property is compared with the last
//! named property of the same literal. Spread members break the chain, and
//! with `allowLineSeparatedGroups` a blank line starts a new group.
//!
//! Properties of destructuring patterns are not checked.

pub mod compare;
pub mod fixer;
pub mod gap;
pub mod name;
pub mod scope;

use crate::ast::{Node, NodeKind, Span};
use crate::source::SourceCode;
use compare::{Comparator, Order};
use fixer::Fix;
use scope::ScopeStack;
use serde::{Deserialize, Serialize};

pub const RULE_ID: &str = "sort-keys";

/// Options object of the rule (`[options]` in config files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase", default)]
pub struct SortOptions {
    pub case_sensitive: bool,
    pub natural: bool,
    pub allow_line_separated_groups: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            natural: false,
            allow_line_separated_groups: false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RuleConfig {
    pub order: Order,
    pub options: SortOptions,
}

/// A pair of entries found out of order.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Key of the entry that should move up.
    pub span: Span,
    pub this_name: String,
    pub prev_name: String,
    pub order: Order,
    pub insensitive: bool,
    pub natural: bool,
    pub fix: Fix,
}

impl Violation {
    pub fn message(&self) -> String {
        format!(
            "Expected object keys to be in {}{}{}ending order. '{}' should be before '{}'.",
            if self.natural { "natural " } else { "" },
            if self.insensitive { "insensitive " } else { "" },
            self.order,
            self.this_name,
            self.prev_name
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeyOrderRule {
    comparator: Comparator,
    allow_line_separated_groups: bool,
}

impl KeyOrderRule {
    pub fn new(config: RuleConfig) -> Self {
        Self {
            comparator: Comparator::new(
                config.order,
                config.options.case_sensitive,
                config.options.natural,
            ),
            allow_line_separated_groups: config.options.allow_line_separated_groups,
        }
    }

    /// Check every object literal under `root`.
    pub fn check(&self, root: &Node, source: &SourceCode) -> Vec<Violation> {
        let mut checker = Checker {
            rule: self,
            source,
            scopes: ScopeStack::new(),
            violations: Vec::new(),
        };
        checker.visit(root);
        checker.violations
    }
}

/// Traversal context of one `check` call.
struct Checker<'r, 'a> {
    rule: &'r KeyOrderRule,
    source: &'a SourceCode,
    scopes: ScopeStack<'a>,
    violations: Vec<Violation>,
}

impl<'a> Checker<'_, 'a> {
    fn visit(&mut self, node: &'a Node) {
        match &node.kind {
            NodeKind::ObjectExpression { properties } => {
                self.scopes.push();
                for entry in properties {
                    self.visit_entry(entry);
                }
                self.scopes.pop();
            }
            NodeKind::ObjectPattern { properties } => {
                for member in properties {
                    self.visit(member);
                }
            }
            NodeKind::Property { key, value, .. } => {
                self.visit(key);
                self.visit(value);
            }
            NodeKind::SpreadElement { argument } | NodeKind::RestElement { argument } => {
                self.visit(argument);
            }
            NodeKind::TemplateLiteral { expressions, .. } => {
                for expr in expressions {
                    self.visit(expr);
                }
            }
            NodeKind::Other { children, .. } => {
                for child in children {
                    self.visit(child);
                }
            }
            NodeKind::Identifier { .. } | NodeKind::Literal(_) => {}
        }
    }

    /// Member directly inside an object literal.
    fn visit_entry(&mut self, entry: &'a Node) {
        match &entry.kind {
            NodeKind::SpreadElement { argument } => {
                if let Some(frame) = self.scopes.current() {
                    frame.reset_name();
                }
                self.visit(argument);
            }
            NodeKind::Property { key, value, .. } => {
                self.check_property(entry, key);
                self.visit(key);
                self.visit(value);
            }
            _ => self.visit(entry),
        }
    }

    fn check_property(&mut self, entry: &'a Node, key: &Node) {
        let source = self.source;
        let rule = self.rule;
        let Some(frame) = self.scopes.current() else {
            return;
        };
        let this_name = name::static_name(entry);
        let prev_name = frame.prev_name.clone();
        let prev_entry = frame.prev_named_node;
        let blank_line =
            gap::has_blank_line_between(source, frame.prev_node, entry, frame.prev_blank_line);
        frame.advance(entry, this_name.clone());

        if rule.allow_line_separated_groups && blank_line {
            frame.prev_blank_line = this_name.is_none();
            return;
        }
        let (Some(prev_name), Some(this_name), Some(prev_entry)) =
            (prev_name, this_name, prev_entry)
        else {
            return;
        };
        if rule.comparator.is_valid_order(&prev_name, &this_name) {
            return;
        }
        let comparator = rule.comparator;
        self.violations.push(Violation {
            span: key.span,
            this_name,
            prev_name,
            order: comparator.order,
            insensitive: comparator.insensitive,
            natural: comparator.natural,
            fix: fixer::swap_entries(source, prev_entry, entry),
        });
    }
}
