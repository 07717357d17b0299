//! keyorder core library.
//!
//! This crate checks that the keys of JavaScript object literals are sorted
//! and produces swap fixes for the ones that are not. Programs come in as an
//! ESTree JSON dump next to their source text.
//!
//! High-level modules:
//! - `ast`, `source`: ESTree subset and the token/comment view of a file.
//! - `estree`: Loading ESTree JSON into `ast` nodes with byte spans.
//! - `rule`: The `sort-keys` rule (comparators, key names, scopes, groups, fixes).
//! - `config`: Discovery and effective configuration resolution.
//! - `lint`: Running the rule over files matched by glob patterns.
//! - `fix`: Applying swap fixes to files.
//! - `models`: Issue and summary structs.
//! - `output`: Human/JSON printers for lint/fix.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `utils`: Supporting helpers.
pub mod ast;
pub mod cli;
pub mod config;
pub mod estree;
pub mod fix;
pub mod lint;
pub mod models;
pub mod output;
pub mod rule;
pub mod source;
pub mod utils;

#[cfg(test)]
mod testing;
