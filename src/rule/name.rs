//! Static key names for object literal entries.

use crate::ast::{Literal, Node, NodeKind};

/// Comparable name of an entry's key, or `None` when the key has no static
/// name (computed from an expression, spread members, ...).
pub fn static_name(entry: &Node) -> Option<String> {
    let NodeKind::Property { key, computed, .. } = &entry.kind else {
        return None;
    };
    match &key.kind {
        NodeKind::Identifier { name } if !computed => Some(name.clone()),
        _ => static_string_value(key),
    }
}

/// String value of a literal-like node as JavaScript's `String(value)` would
/// produce it.
pub fn static_string_value(node: &Node) -> Option<String> {
    match &node.kind {
        NodeKind::Literal(lit) => Some(match lit {
            Literal::String(s) => s.clone(),
            Literal::Number(n) => js_number_to_string(*n),
            Literal::Boolean(b) => b.to_string(),
            Literal::Null => "null".to_string(),
            Literal::RegExp { pattern, flags } => format!("/{}/{}", pattern, flags),
            Literal::BigInt(digits) => digits.clone(),
        }),
        NodeKind::TemplateLiteral { quasis, expressions }
            if expressions.is_empty() && quasis.len() == 1 =>
        {
            quasis[0].clone()
        }
        _ => None,
    }
}

/// `Number.prototype.toString()` for finite values.
pub fn js_number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{:e}", n);
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => s,
        };
    }
    format!("{}", n)
}
