//! Configuration discovery and effective settings resolution.
//!
//! keyorder reads `keyorder.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `order`: `asc`
//! - `options`: `caseSensitive = true`, `natural = false`,
//!   `allowLineSeparatedGroups = false`
//! - `patterns`: `["**/*.js"]`
//! - `astSuffix`: `.ast.json` (the ESTree dump sits next to each source)
//! - `output`: `human`
//! - `level`: `error`
//! - `fix.write|diff|check`: false
//!
//! Overrides precedence: CLI > config file > defaults. Unknown keys and
//! invalid values fail the run before any file is checked.

use crate::rule::compare::Order;
use crate::rule::{RuleConfig, SortOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PATTERN: &str = "**/*.js";
pub const DEFAULT_AST_SUFFIX: &str = ".ast.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("Invalid order '{0}', expected asc or desc")]
    InvalidOrder(String),
    #[error("Invalid level '{0}', expected error, warn or info")]
    InvalidLevel(String),
    #[error("Invalid output '{0}', expected human or json")]
    InvalidOutput(String),
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Fix-related configuration section under `[fix]`.
pub struct FixCfg {
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
/// Root configuration loaded from `keyorder.toml|yaml`.
pub struct KeyOrderConfig {
    pub order: Option<Order>,
    pub options: Option<SortOptions>,
    pub patterns: Option<Vec<String>>,
    pub ast_suffix: Option<String>,
    pub output: Option<String>,
    pub level: Option<String>,
    pub fix: Option<FixCfg>,
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub repo_root: Option<String>,
    pub order: Option<String>,
    pub case_sensitive: Option<bool>,
    pub natural: Option<bool>,
    pub allow_line_separated_groups: Option<bool>,
    pub patterns: Vec<String>,
    pub output: Option<String>,
    pub level: Option<String>,
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub rule: RuleConfig,
    pub patterns: Vec<String>,
    pub ast_suffix: String,
    pub output: String,
    pub level: String,
    pub write: bool,
    pub diff: bool,
    pub check: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `keyorder.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("keyorder.toml").exists()
            || cur.join("keyorder.yaml").exists()
            || cur.join("keyorder.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `KeyOrderConfig` from `keyorder.toml` or `keyorder.yaml|yml` if
/// present.
pub fn load_config(root: &Path) -> Result<Option<KeyOrderConfig>, ConfigError> {
    let toml_path = root.join("keyorder.toml");
    if toml_path.exists() {
        let s = read(&toml_path)?;
        let cfg = toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: toml_path.to_string_lossy().to_string(),
            source,
        })?;
        return Ok(Some(cfg));
    }
    for yml in ["keyorder.yaml", "keyorder.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = read(&p)?;
            let cfg = serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
                path: p.to_string_lossy().to_string(),
                source,
            })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

pub fn parse_order(s: &str) -> Result<Order, ConfigError> {
    match s {
        "asc" => Ok(Order::Asc),
        "desc" => Ok(Order::Desc),
        other => Err(ConfigError::InvalidOrder(other.to_string())),
    }
}

fn check_level(level: String) -> Result<String, ConfigError> {
    match level.as_str() {
        "error" | "warn" | "warning" | "info" => Ok(level),
        _ => Err(ConfigError::InvalidLevel(level)),
    }
}

fn check_output(output: String) -> Result<String, ConfigError> {
    match output.as_str() {
        "human" | "json" => Ok(output),
        _ => Err(ConfigError::InvalidOutput(output)),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let order = match cli.order.as_deref() {
        Some(s) => parse_order(s)?,
        None => cfg.order.unwrap_or_default(),
    };
    let mut options = cfg.options.unwrap_or_default();
    if let Some(v) = cli.case_sensitive {
        options.case_sensitive = v;
    }
    if let Some(v) = cli.natural {
        options.natural = v;
    }
    if let Some(v) = cli.allow_line_separated_groups {
        options.allow_line_separated_groups = v;
    }

    let patterns = if !cli.patterns.is_empty() {
        cli.patterns.clone()
    } else {
        cfg.patterns
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_PATTERN.to_string()])
    };
    let ast_suffix = cfg
        .ast_suffix
        .unwrap_or_else(|| DEFAULT_AST_SUFFIX.to_string());

    let output = check_output(
        cli.output
            .clone()
            .or(cfg.output)
            .unwrap_or_else(|| "human".to_string()),
    )?;
    let level = check_level(
        cli.level
            .clone()
            .or(cfg.level)
            .unwrap_or_else(|| "error".to_string()),
    )?;

    let write = cli
        .write
        .or_else(|| cfg.fix.as_ref().and_then(|f| f.write))
        .unwrap_or(false);
    let diff = cli
        .diff
        .or_else(|| cfg.fix.as_ref().and_then(|f| f.diff))
        .unwrap_or(false);
    let check = cli
        .check
        .or_else(|| cfg.fix.as_ref().and_then(|f| f.check))
        .unwrap_or(false);

    Ok(Effective {
        repo_root,
        config_found,
        rule: RuleConfig { order, options },
        patterns,
        ast_suffix,
        output,
        level,
        write,
        diff,
        check,
    })
}
