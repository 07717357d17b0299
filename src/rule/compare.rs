//! Order predicates over key names.
//!
//! Eight predicates: {asc, desc} x {case sensitive, insensitive} x
//! {lexical, natural}. The predicate is resolved once from configuration into
//! a [`Comparator`] and reused for every comparison of a run.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the eight order predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparator {
    pub order: Order,
    pub insensitive: bool,
    pub natural: bool,
}

impl Comparator {
    pub fn new(order: Order, case_sensitive: bool, natural: bool) -> Self {
        Self {
            order,
            insensitive: !case_sensitive,
            natural,
        }
    }

    /// True when `prev` may precede `next`.
    pub fn is_valid_order(&self, prev: &str, next: &str) -> bool {
        match self.order {
            Order::Asc => self.asc(prev, next),
            Order::Desc => self.asc(next, prev),
        }
    }

    fn asc(&self, a: &str, b: &str) -> bool {
        let ord = if self.insensitive {
            self.base_cmp(&a.to_lowercase(), &b.to_lowercase())
        } else {
            self.base_cmp(a, b)
        };
        ord != Ordering::Greater
    }

    fn base_cmp(&self, a: &str, b: &str) -> Ordering {
        if self.natural {
            natural_compare(a, b)
        } else {
            lexical_compare(a, b)
        }
    }
}

/// JavaScript string order: UTF-16 code unit by code unit.
pub fn lexical_compare(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Natural order in the manner of the `natural-compare` package.
///
/// Characters in 45..=127 are re-ranked so punctuation sorts before digits,
/// digits before upper case and upper case before lower case. When both
/// strings reach a digit 1-9 at the same step, the whole digit runs are
/// compared by numeric value.
pub fn natural_compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let a: Vec<u16> = a.encode_utf16().collect();
    let b: Vec<u16> = b.encode_utf16().collect();
    let mut pos_a = 0;
    let mut pos_b = 0;
    let mut code_b = 1.0;
    while code_b != 0.0 {
        let mut code_a = rank(&a, pos_a) as f64;
        code_b = rank(&b, pos_b) as f64;
        pos_a += 1;
        pos_b += 1;

        if code_a > 66.0 && code_a < 76.0 && code_b > 66.0 && code_b < 76.0 {
            let (value_a, end_a) = digit_run(&a, pos_a - 1);
            let (value_b, end_b) = digit_run(&b, pos_b - 1);
            code_a = value_a;
            code_b = value_b;
            pos_a = end_a;
            pos_b = end_b;
        }

        if code_a != code_b {
            return if code_a < code_b {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
    }
    Ordering::Equal
}

fn rank(s: &[u16], pos: usize) -> u32 {
    let code = s.get(pos).copied().map(u32::from).unwrap_or(0);
    match code {
        c if !(45..=127).contains(&c) => c,
        45 => 65,              // '-'
        46..=47 => code - 1,   // '.' '/'
        48..=57 => code + 18,  // digits
        58..=64 => code - 11,  // ':' .. '@'
        65..=90 => code + 11,  // upper case
        91..=96 => code - 37,  // '[' .. '`'
        97..=122 => code + 5,  // lower case
        _ => code - 63,        // '{' .. DEL
    }
}

/// Numeric value of the digit run starting at `start`, and the index just
/// past it.
fn digit_run(s: &[u16], start: usize) -> (f64, usize) {
    let mut end = start + 1;
    while (66..76).contains(&rank(s, end)) {
        end += 1;
    }
    let digits = String::from_utf16_lossy(&s[start..end]);
    (digits.parse().unwrap_or(0.0), end)
}
