//! Test fixtures.
//!
//! `parse` runs swc over a JavaScript snippet and converts the result into
//! the crate's ESTree-shaped [`Node`] tree plus token and comment streams,
//! the same shapes `estree::load_program` produces from a parser dump.
//! The JSON constants are parser dumps used by the file-level tests.

use crate::ast::{Literal, Node, NodeKind, Span};
use crate::source::{Comment, CommentKind, SourceCode, Token};
use swc_core::common::comments::{CommentKind as SwcCommentKind, SingleThreadedComments};
use swc_core::common::{BytePos, Spanned};
use swc_core::ecma::ast as js;
use swc_core::ecma::parser::{lexer::Lexer, Capturing, Parser, StringInput, Syntax};
use swc_core::ecma::visit::{Visit, VisitWith};

/// First byte position handed to the lexer; position 0 is swc's dummy span.
const BASE: u32 = 1;

/// Parse `src` as a script into a `Program` node and its source code.
pub fn parse(src: &str) -> (Node, SourceCode) {
    let comments = SingleThreadedComments::default();
    let (script, captured) = {
        let input = StringInput::new(src, BytePos(BASE), BytePos(BASE + src.len() as u32));
        let lexer = Lexer::new(
            Syntax::Es(Default::default()),
            Default::default(),
            input,
            Some(&comments),
        );
        let mut parser = Parser::new_from(Capturing::new(lexer));
        let script = parser
            .parse_script()
            .unwrap_or_else(|e| panic!("fixture does not parse: {:?}\n{}", e, src));
        (script, parser.input().take())
    };

    let conv = Converter { src };
    let tokens = captured
        .iter()
        .map(|t| {
            let span = conv.span(t.span);
            let text = &src[span.start..span.end];
            Token {
                kind: token_kind(text).to_string(),
                value: text.to_string(),
                span,
            }
        })
        .collect();

    let (leading, trailing) = comments.take_all();
    let mut found: Vec<Comment> = Vec::new();
    for map in [leading, trailing] {
        for list in map.borrow().values() {
            for c in list.iter() {
                found.push(Comment {
                    kind: match c.kind {
                        SwcCommentKind::Line => CommentKind::Line,
                        SwcCommentKind::Block => CommentKind::Block,
                    },
                    value: c.text.to_string(),
                    span: conv.span(c.span),
                });
            }
        }
    }
    found.sort_by_key(|c| c.span.start);
    found.dedup_by_key(|c| c.span);

    let root = Node::new(
        NodeKind::Other {
            kind: "Program".into(),
            children: conv.collect(&script),
        },
        Span::new(0, src.len()),
    );
    (root, SourceCode::new(src.to_string(), tokens, found))
}

/// Members of the first object literal found in `root` (depth-first).
pub fn entries(root: &Node) -> Vec<&Node> {
    fn find(node: &Node) -> Option<&Node> {
        match &node.kind {
            NodeKind::ObjectExpression { .. } => Some(node),
            NodeKind::ObjectPattern { properties } => properties.iter().find_map(find),
            NodeKind::Property { key, value, .. } => find(key).or_else(|| find(value)),
            NodeKind::SpreadElement { argument } | NodeKind::RestElement { argument } => {
                find(argument)
            }
            NodeKind::TemplateLiteral { expressions, .. } => expressions.iter().find_map(find),
            NodeKind::Other { children, .. } => children.iter().find_map(find),
            NodeKind::Identifier { .. } | NodeKind::Literal(_) => None,
        }
    }
    match find(root).map(|n| &n.kind) {
        Some(NodeKind::ObjectExpression { properties }) => properties.iter().collect(),
        _ => Vec::new(),
    }
}

/// ESTree token type guessed from the token text.
fn token_kind(text: &str) -> &'static str {
    match text.chars().next() {
        Some('"' | '\'') => "String",
        Some('`') => "Template",
        Some(c) if c.is_ascii_digit() => "Numeric",
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => "Identifier",
        _ => "Punctuator",
    }
}

/// swc to ESTree-shaped node conversion over one source text.
#[derive(Clone, Copy)]
struct Converter<'s> {
    src: &'s str,
}

/// Collects the outermost object literals and patterns under a node.
struct Collector<'s> {
    conv: Converter<'s>,
    found: Vec<Node>,
}

impl Visit for Collector<'_> {
    fn visit_object_lit(&mut self, n: &js::ObjectLit) {
        self.found.push(self.conv.object(n));
    }

    fn visit_object_pat(&mut self, n: &js::ObjectPat) {
        self.found.push(self.conv.pattern(n));
    }
}

impl<'s> Converter<'s> {
    fn span(&self, s: swc_core::common::Span) -> Span {
        let clamp = |p: BytePos| (p.0.saturating_sub(BASE) as usize).min(self.src.len());
        Span::new(clamp(s.lo), clamp(s.hi))
    }

    fn between(&self, lo: swc_core::common::Span, hi: swc_core::common::Span) -> Span {
        Span::new(self.span(lo).start, self.span(hi).end)
    }

    fn collect<N: VisitWith<Collector<'s>>>(&self, node: &N) -> Vec<Node> {
        let mut c = Collector {
            conv: *self,
            found: Vec::new(),
        };
        node.visit_with(&mut c);
        c.found
    }

    fn other(&self, kind: &str, span: Span, children: Vec<Node>) -> Node {
        Node::new(
            NodeKind::Other {
                kind: kind.into(),
                children,
            },
            span,
        )
    }

    fn ident(&self, sym: &str, span: swc_core::common::Span) -> Node {
        Node::new(
            NodeKind::Identifier {
                name: sym.to_string(),
            },
            self.span(span),
        )
    }

    fn object(&self, o: &js::ObjectLit) -> Node {
        let properties = o.props.iter().map(|p| self.member(p)).collect();
        Node::new(NodeKind::ObjectExpression { properties }, self.span(o.span))
    }

    fn member(&self, p: &js::PropOrSpread) -> Node {
        let prop = match p {
            js::PropOrSpread::Spread(s) => {
                let argument = Box::new(self.expr(&s.expr));
                return Node::new(
                    NodeKind::SpreadElement { argument },
                    self.between(s.dot3_token, s.expr.span()),
                );
            }
            js::PropOrSpread::Prop(prop) => &**prop,
        };
        let (key, value, span) = match prop {
            js::Prop::Shorthand(i) => (
                self.ident(&i.sym, i.span),
                self.ident(&i.sym, i.span),
                self.span(i.span),
            ),
            js::Prop::KeyValue(kv) => (
                self.prop_name(&kv.key),
                self.expr(&kv.value),
                self.between(kv.key.span(), kv.value.span()),
            ),
            js::Prop::Assign(a) => (
                self.ident(&a.key.sym, a.key.span),
                self.expr(&a.value),
                self.between(a.key.span, a.value.span()),
            ),
            js::Prop::Getter(g) => {
                let span = self.span(g.span);
                let body = g.body.as_ref().map(|b| self.collect(b)).unwrap_or_default();
                let value = self.other("FunctionExpression", span, body);
                (self.prop_name(&g.key), value, span)
            }
            js::Prop::Setter(s) => {
                let span = self.span(s.span);
                let body = s.body.as_ref().map(|b| self.collect(b)).unwrap_or_default();
                let value = self.other("FunctionExpression", span, body);
                (self.prop_name(&s.key), value, span)
            }
            js::Prop::Method(m) => {
                let value = self.other(
                    "FunctionExpression",
                    self.span(m.function.span),
                    self.collect(&*m.function),
                );
                let span = self.between(m.key.span(), m.function.span);
                (self.prop_name(&m.key), value, span)
            }
        };
        let computed = match prop {
            js::Prop::KeyValue(kv) => is_computed(&kv.key),
            js::Prop::Getter(g) => is_computed(&g.key),
            js::Prop::Setter(s) => is_computed(&s.key),
            js::Prop::Method(m) => is_computed(&m.key),
            js::Prop::Shorthand(_) | js::Prop::Assign(_) => false,
        };
        Node::new(
            NodeKind::Property {
                key: Box::new(key),
                value: Box::new(value),
                computed,
            },
            span,
        )
    }

    fn prop_name(&self, k: &js::PropName) -> Node {
        let span = self.span(k.span());
        let lit = |l: Literal| Node::new(NodeKind::Literal(l), span);
        match k {
            js::PropName::Ident(i) => self.ident(&i.sym, i.span),
            js::PropName::Str(s) => lit(Literal::String(s.value.to_string())),
            js::PropName::Num(n) => lit(Literal::Number(n.value)),
            js::PropName::BigInt(b) => lit(Literal::BigInt(b.value.to_string())),
            js::PropName::Computed(c) => self.expr(&c.expr),
        }
    }

    fn expr(&self, e: &js::Expr) -> Node {
        let span = self.span(e.span());
        match e {
            js::Expr::Object(o) => self.object(o),
            js::Expr::Ident(i) => self.ident(&i.sym, i.span),
            js::Expr::Lit(l) => match literal(l) {
                Some(lit) => Node::new(NodeKind::Literal(lit), span),
                None => self.other("Literal", span, Vec::new()),
            },
            js::Expr::Tpl(t) => Node::new(
                NodeKind::TemplateLiteral {
                    quasis: t
                        .quasis
                        .iter()
                        .map(|q| q.cooked.as_ref().map(|c| c.to_string()))
                        .collect(),
                    expressions: t.exprs.iter().map(|x| self.expr(x)).collect(),
                },
                span,
            ),
            _ => self.other("Expression", span, self.collect(e)),
        }
    }

    fn pattern(&self, o: &js::ObjectPat) -> Node {
        let properties = o.props.iter().map(|p| self.pattern_member(p)).collect();
        Node::new(NodeKind::ObjectPattern { properties }, self.span(o.span))
    }

    fn pattern_member(&self, p: &js::ObjectPatProp) -> Node {
        match p {
            js::ObjectPatProp::KeyValue(kv) => Node::new(
                NodeKind::Property {
                    key: Box::new(self.prop_name(&kv.key)),
                    value: Box::new(self.pat(&kv.value)),
                    computed: is_computed(&kv.key),
                },
                self.between(kv.key.span(), kv.value.span()),
            ),
            js::ObjectPatProp::Assign(a) => {
                let key = self.ident(&a.key.sym, a.key.span);
                let value = match &a.value {
                    Some(default) => self.other(
                        "AssignmentPattern",
                        self.span(a.span),
                        vec![key.clone(), self.expr(default)],
                    ),
                    None => key.clone(),
                };
                Node::new(
                    NodeKind::Property {
                        key: Box::new(key),
                        value: Box::new(value),
                        computed: false,
                    },
                    self.span(a.span),
                )
            }
            js::ObjectPatProp::Rest(r) => Node::new(
                NodeKind::RestElement {
                    argument: Box::new(self.pat(&r.arg)),
                },
                self.span(r.span),
            ),
        }
    }

    fn pat(&self, p: &js::Pat) -> Node {
        let span = self.span(p.span());
        match p {
            js::Pat::Ident(b) => self.ident(&b.id.sym, b.id.span),
            js::Pat::Object(o) => self.pattern(o),
            js::Pat::Assign(a) => self.other(
                "AssignmentPattern",
                span,
                vec![self.pat(&a.left), self.expr(&a.right)],
            ),
            _ => self.other("Pattern", span, self.collect(p)),
        }
    }
}

fn is_computed(key: &js::PropName) -> bool {
    matches!(key, js::PropName::Computed(_))
}

fn literal(l: &js::Lit) -> Option<Literal> {
    Some(match l {
        js::Lit::Str(s) => Literal::String(s.value.to_string()),
        js::Lit::Num(n) => Literal::Number(n.value),
        js::Lit::Bool(b) => Literal::Boolean(b.value),
        js::Lit::Null(_) => Literal::Null,
        js::Lit::BigInt(b) => Literal::BigInt(b.value.to_string()),
        js::Lit::Regex(r) => Literal::RegExp {
            pattern: r.exp.to_string(),
            flags: r.flags.to_string(),
        },
        _ => return None,
    })
}

/// Parser dump of `({b: 1, a: 2})`.
pub const SAMPLE_SOURCE: &str = "({b: 1, a: 2})";
pub const SAMPLE_AST: &str = r#"{
  "type": "Program", "range": [0, 14],
  "body": [{
    "type": "ExpressionStatement", "range": [0, 14],
    "expression": {
      "type": "ObjectExpression", "range": [1, 13],
      "properties": [
        {"type": "Property", "range": [2, 6], "computed": false,
         "key": {"type": "Identifier", "name": "b", "range": [2, 3]},
         "value": {"type": "Literal", "value": 1, "raw": "1", "range": [5, 6]}},
        {"type": "Property", "range": [8, 12], "computed": false,
         "key": {"type": "Identifier", "name": "a", "range": [8, 9]},
         "value": {"type": "Literal", "value": 2, "raw": "2", "range": [11, 12]}}
      ]
    }
  }],
  "tokens": [
    {"type": "Punctuator", "value": "(", "range": [0, 1]},
    {"type": "Punctuator", "value": "{", "range": [1, 2]},
    {"type": "Identifier", "value": "b", "range": [2, 3]},
    {"type": "Punctuator", "value": ":", "range": [3, 4]},
    {"type": "Numeric", "value": "1", "range": [5, 6]},
    {"type": "Punctuator", "value": ",", "range": [6, 7]},
    {"type": "Identifier", "value": "a", "range": [8, 9]},
    {"type": "Punctuator", "value": ":", "range": [9, 10]},
    {"type": "Numeric", "value": "2", "range": [11, 12]},
    {"type": "Punctuator", "value": "}", "range": [12, 13]},
    {"type": "Punctuator", "value": ")", "range": [13, 14]}
  ],
  "comments": []
}"#;

/// Source with a leading line comment holding non-ASCII text. Ranges in
/// [`COMMENTED_AST`] count UTF-16 units: "é" is one, "😀" two.
pub const COMMENTED_SOURCE: &str = "({\n// é😀\nb: 1,\na: 2})";
pub const COMMENTED_AST: &str = r#"{
  "type": "Program", "range": [0, 22],
  "body": [{
    "type": "ExpressionStatement", "range": [0, 22],
    "expression": {
      "type": "ObjectExpression", "range": [1, 21],
      "properties": [
        {"type": "Property", "range": [10, 14], "computed": false,
         "key": {"type": "Identifier", "name": "b", "range": [10, 11]},
         "value": {"type": "Literal", "value": 1, "raw": "1", "range": [13, 14]}},
        {"type": "Property", "range": [16, 20], "computed": false,
         "key": {"type": "Identifier", "name": "a", "range": [16, 17]},
         "value": {"type": "Literal", "value": 2, "raw": "2", "range": [19, 20]}}
      ]
    }
  }],
  "tokens": [
    {"type": "Punctuator", "value": "(", "range": [0, 1]},
    {"type": "Punctuator", "value": "{", "range": [1, 2]},
    {"type": "Identifier", "value": "b", "range": [10, 11]},
    {"type": "Punctuator", "value": ":", "range": [11, 12]},
    {"type": "Numeric", "value": "1", "range": [13, 14]},
    {"type": "Punctuator", "value": ",", "range": [14, 15]},
    {"type": "Identifier", "value": "a", "range": [16, 17]},
    {"type": "Punctuator", "value": ":", "range": [17, 18]},
    {"type": "Numeric", "value": "2", "range": [19, 20]},
    {"type": "Punctuator", "value": "}", "range": [20, 21]},
    {"type": "Punctuator", "value": ")", "range": [21, 22]}
  ],
  "comments": [
    {"type": "Line", "value": " é😀", "range": [3, 9]}
  ]
}"#;

/// Repository with `src/a.js` (one violation) and `src/ok.js` (none), each
/// next to its parser dump.
pub fn sample_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir(root.join(".git")).unwrap();
    std::fs::create_dir(root.join("src")).unwrap();
    std::fs::write(root.join("src/a.js"), SAMPLE_SOURCE).unwrap();
    std::fs::write(root.join("src/a.js.ast.json"), SAMPLE_AST).unwrap();
    std::fs::write(root.join("src/ok.js"), "({})").unwrap();
    std::fs::write(
        root.join("src/ok.js.ast.json"),
        r#"{"type": "Program", "range": [0, 4], "body": [], "tokens": [], "comments": []}"#,
    )
    .unwrap();
    dir
}

#[test]
fn fixture_parses_nested_literals() {
    let (root, source) = parse("const {a, ...r} = f({b: [1, {c: 'x'}], [`k`]: 0x10}); // end");
    let props = entries(&root);
    assert_eq!(props.len(), 2);
    assert_eq!(source.comments().len(), 1);
    assert_eq!(source.comments()[0].value, " end");
    assert_eq!(source.slice(props[0].span), "b: [1, {c: 'x'}]");
    assert_eq!(source.slice(props[1].span), "[`k`]: 0x10");
    assert!(source.tokens().iter().any(|t| t.value == "," && t.kind == "Punctuator"));
}
