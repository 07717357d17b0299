//! ESTree JSON loader.
//!
//! Turns the output of a JavaScript parser (espree/acorn with `range`,
//! `tokens` and `comment` enabled) into a [`Node`] tree and a
//! [`SourceCode`]. JavaScript ranges count UTF-16 code units; they are mapped
//! to byte offsets of the UTF-8 text here so the rest of the crate only sees
//! byte spans.

use crate::ast::{Literal, Node, NodeKind, Span};
use crate::source::{Comment, CommentKind, SourceCode, Token};
use serde_json::{Map, Value as Json};

#[derive(Debug, thiserror::Error)]
pub enum EstreeError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected an ESTree node at {0}")]
    NotANode(String),
    #[error("Missing or invalid range on {0}")]
    InvalidRange(String),
    #[error("Range {start}..{end} of {node} is outside the source text")]
    OutOfBounds {
        node: String,
        start: usize,
        end: usize,
    },
    #[error("Invalid token at index {0}")]
    InvalidToken(usize),
}

/// A loaded program: the syntax tree plus the source it was parsed from.
#[derive(Debug, Clone)]
pub struct Program {
    pub root: Node,
    pub source: SourceCode,
}

/// Parse `ast_json` (a serialized ESTree `Program`) against `text`.
pub fn load_program(text: &str, ast_json: &str) -> Result<Program, EstreeError> {
    let value: Json = serde_json::from_str(ast_json)?;
    program_from_value(text, &value)
}

pub fn program_from_value(text: &str, value: &Json) -> Result<Program, EstreeError> {
    let offsets = OffsetMap::new(text);
    let root = convert_node(value, &offsets, "$")?;
    let obj = value
        .as_object()
        .ok_or_else(|| EstreeError::NotANode("$".into()))?;
    let tokens = convert_tokens(obj.get("tokens"), &offsets)?;
    let comments = convert_comments(obj.get("comments"), &offsets)?;
    Ok(Program {
        root,
        source: SourceCode::new(text.to_string(), tokens, comments),
    })
}

/// UTF-16 offset -> byte offset table. Empty for ASCII text, where both
/// coincide.
struct OffsetMap {
    table: Vec<usize>,
    len: usize,
}

impl OffsetMap {
    fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                table: Vec::new(),
                len: text.len(),
            };
        }
        let mut table = Vec::with_capacity(text.len() + 1);
        for (byte_idx, ch) in text.char_indices() {
            for _ in 0..ch.len_utf16() {
                table.push(byte_idx);
            }
        }
        table.push(text.len());
        Self {
            table,
            len: text.len(),
        }
    }

    fn byte_offset(&self, utf16: usize) -> Option<usize> {
        if self.table.is_empty() {
            (utf16 <= self.len).then_some(utf16)
        } else {
            self.table.get(utf16).copied()
        }
    }

    fn span(&self, start: usize, end: usize, what: &str) -> Result<Span, EstreeError> {
        match (self.byte_offset(start), self.byte_offset(end)) {
            (Some(s), Some(e)) if s <= e => Ok(Span::new(s, e)),
            _ => Err(EstreeError::OutOfBounds {
                node: what.to_string(),
                start,
                end,
            }),
        }
    }
}

fn read_range(obj: &Map<String, Json>) -> Option<(usize, usize)> {
    if let Some(Json::Array(r)) = obj.get("range") {
        if let [s, e] = r.as_slice() {
            return Some((s.as_u64()? as usize, e.as_u64()? as usize));
        }
        return None;
    }
    let s = obj.get("start")?.as_u64()?;
    let e = obj.get("end")?.as_u64()?;
    Some((s as usize, e as usize))
}

fn is_node(value: &Json) -> bool {
    value
        .as_object()
        .and_then(|o| o.get("type"))
        .is_some_and(Json::is_string)
}

fn convert_node(value: &Json, offsets: &OffsetMap, path: &str) -> Result<Node, EstreeError> {
    let obj = value
        .as_object()
        .ok_or_else(|| EstreeError::NotANode(path.to_string()))?;
    let ty = obj
        .get("type")
        .and_then(Json::as_str)
        .ok_or_else(|| EstreeError::NotANode(path.to_string()))?;
    let what = format!("{} at {}", ty, path);
    let (start, end) = read_range(obj).ok_or_else(|| EstreeError::InvalidRange(what.clone()))?;
    let span = offsets.span(start, end, &what)?;

    let child = |field: &str| -> Result<Box<Node>, EstreeError> {
        let v = obj
            .get(field)
            .ok_or_else(|| EstreeError::NotANode(format!("{}.{}", path, field)))?;
        Ok(Box::new(convert_node(v, offsets, &format!("{}.{}", path, field))?))
    };
    let list = |field: &str| -> Result<Vec<Node>, EstreeError> {
        let items = obj.get(field).and_then(Json::as_array);
        let mut out = Vec::new();
        for (i, v) in items.into_iter().flatten().enumerate() {
            if v.is_null() {
                continue;
            }
            out.push(convert_node(v, offsets, &format!("{}.{}[{}]", path, field, i))?);
        }
        Ok(out)
    };

    let kind = match ty {
        "ObjectExpression" => NodeKind::ObjectExpression {
            properties: list("properties")?,
        },
        "ObjectPattern" => NodeKind::ObjectPattern {
            properties: list("properties")?,
        },
        "Property" => NodeKind::Property {
            key: child("key")?,
            value: child("value")?,
            computed: obj.get("computed").and_then(Json::as_bool).unwrap_or(false),
        },
        "SpreadElement" | "ExperimentalSpreadProperty" => NodeKind::SpreadElement {
            argument: child("argument")?,
        },
        "RestElement" | "ExperimentalRestProperty" => NodeKind::RestElement {
            argument: child("argument")?,
        },
        "Identifier" => NodeKind::Identifier {
            name: obj
                .get("name")
                .and_then(Json::as_str)
                .unwrap_or_default()
                .to_string(),
        },
        "Literal" => NodeKind::Literal(convert_literal(obj)),
        "TemplateLiteral" => NodeKind::TemplateLiteral {
            quasis: obj
                .get("quasis")
                .and_then(Json::as_array)
                .into_iter()
                .flatten()
                .map(|q| {
                    q.pointer("/value/cooked")
                        .and_then(Json::as_str)
                        .map(str::to_string)
                })
                .collect(),
            expressions: list("expressions")?,
        },
        other => NodeKind::Other {
            kind: other.to_string(),
            children: generic_children(obj, offsets, path)?,
        },
    };
    Ok(Node::new(kind, span))
}

fn convert_literal(obj: &Map<String, Json>) -> Literal {
    if let Some(re) = obj.get("regex").and_then(Json::as_object) {
        return Literal::RegExp {
            pattern: re
                .get("pattern")
                .and_then(Json::as_str)
                .unwrap_or_default()
                .to_string(),
            flags: re
                .get("flags")
                .and_then(Json::as_str)
                .unwrap_or_default()
                .to_string(),
        };
    }
    if let Some(b) = obj.get("bigint").and_then(Json::as_str) {
        return Literal::BigInt(b.to_string());
    }
    match obj.get("value") {
        Some(Json::String(s)) => Literal::String(s.clone()),
        Some(Json::Number(n)) => Literal::Number(n.as_f64().unwrap_or(0.0)),
        Some(Json::Bool(b)) => Literal::Boolean(*b),
        _ => Literal::Null,
    }
}

/// Child nodes of an unmodelled node type, in source order.
fn generic_children(
    obj: &Map<String, Json>,
    offsets: &OffsetMap,
    path: &str,
) -> Result<Vec<Node>, EstreeError> {
    let mut children = Vec::new();
    for (field, v) in obj {
        if matches!(
            field.as_str(),
            "type" | "range" | "loc" | "start" | "end" | "tokens" | "comments" | "parent"
        ) {
            continue;
        }
        match v {
            Json::Object(_) if is_node(v) => {
                children.push(convert_node(v, offsets, &format!("{}.{}", path, field))?);
            }
            Json::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if is_node(item) {
                        let p = format!("{}.{}[{}]", path, field, i);
                        children.push(convert_node(item, offsets, &p)?);
                    }
                }
            }
            _ => {}
        }
    }
    children.sort_by_key(|n| n.span.start);
    Ok(children)
}

fn convert_tokens(value: Option<&Json>, offsets: &OffsetMap) -> Result<Vec<Token>, EstreeError> {
    let mut out = Vec::new();
    for (i, t) in value.and_then(Json::as_array).into_iter().flatten().enumerate() {
        let obj = t.as_object().ok_or(EstreeError::InvalidToken(i))?;
        let (s, e) = read_range(obj).ok_or(EstreeError::InvalidToken(i))?;
        out.push(Token {
            kind: obj
                .get("type")
                .and_then(Json::as_str)
                .unwrap_or("Punctuator")
                .to_string(),
            value: obj
                .get("value")
                .and_then(Json::as_str)
                .unwrap_or_default()
                .to_string(),
            span: offsets.span(s, e, &format!("token {}", i))?,
        });
    }
    Ok(out)
}

fn convert_comments(
    value: Option<&Json>,
    offsets: &OffsetMap,
) -> Result<Vec<Comment>, EstreeError> {
    let mut out = Vec::new();
    for (i, c) in value.and_then(Json::as_array).into_iter().flatten().enumerate() {
        let obj = c.as_object().ok_or(EstreeError::InvalidToken(i))?;
        let (s, e) = read_range(obj).ok_or(EstreeError::InvalidToken(i))?;
        let kind = match obj.get("type").and_then(Json::as_str) {
            Some("Line") => CommentKind::Line,
            _ => CommentKind::Block,
        };
        out.push(Comment {
            kind,
            value: obj
                .get("value")
                .and_then(Json::as_str)
                .unwrap_or_default()
                .to_string(),
            span: offsets.span(s, e, &format!("comment {}", i))?,
        });
    }
    Ok(out)
}
