//! CLI argument parsing via `clap`.

use crate::config::Overrides;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "keyorder",
    version,
    about = "Check and fix the order of object keys in JavaScript sources",
    long_about = "keyorder checks that object literal keys are sorted and swaps them into place.\n\nSources are read together with an ESTree JSON dump at <file><astSuffix>.\nConfiguration precedence: CLI > keyorder.toml > defaults.",
    after_help = "Examples:\n  keyorder lint 'src/**/*.js'\n  keyorder lint --order desc --natural --output json\n  keyorder fix --diff\n  keyorder fix --write",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Debug, Default)]
/// Options shared by `lint` and `fix`.
pub struct RuleArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Sort direction: asc|desc (default: asc)")]
    pub order: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "case_sensitive", help = "Compare keys case-insensitively")]
    pub case_insensitive: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "case_insensitive", help = "Compare keys case-sensitively (default)")]
    pub case_sensitive: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "no_natural", help = "Compare digit runs numerically")]
    pub natural: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "natural", help = "Compare digit runs as text (default)")]
    pub no_natural: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "no_allow_line_separated_groups", help = "Blank lines start a new sort group")]
    pub allow_line_separated_groups: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "allow_line_separated_groups", help = "Blank lines do not split groups (default)")]
    pub no_allow_line_separated_groups: bool,
    #[arg(long, help = "Severity of violations: error|warn|info (default: error)")]
    pub level: Option<String>,
    #[arg(help = "Glob patterns of source files (default from config or **/*.js)")]
    pub patterns: Vec<String>,
}

impl RuleArgs {
    /// CLI overrides; an option is only overridden when one of its flags is set.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            repo_root: self.repo_root.clone(),
            order: self.order.clone(),
            case_sensitive: switch(self.case_sensitive, self.case_insensitive),
            natural: switch(self.natural, self.no_natural),
            allow_line_separated_groups: switch(
                self.allow_line_separated_groups,
                self.no_allow_line_separated_groups,
            ),
            patterns: self.patterns.clone(),
            output: self.output.clone(),
            level: self.level.clone(),
            ..Overrides::default()
        }
    }
}

/// `Some(true)` for `on`, `Some(false)` for `off`, `None` when neither is set.
fn switch(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current keyorder version.")]
    Version,
    /// Report unsorted keys
    #[command(
        about = "Run lint checks",
        long_about = "Report object keys that are out of order. Exits non-zero when errors are reported.",
        after_help = "Examples:\n  keyorder lint\n  keyorder lint --case-insensitive 'lib/**/*.js' --output json"
    )]
    Lint {
        #[command(flatten)]
        args: RuleArgs,
    },
    /// Swap unsorted keys into place
    #[command(
        about = "Apply key order fixes",
        long_about = "Swap out-of-order keys together with their leading comments. When --diff or --check is set, write is disabled.",
        after_help = "Examples:\n  keyorder fix --diff\n  keyorder fix --write"
    )]
    Fix {
        #[command(flatten)]
        args: RuleArgs,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write changes to files")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show diffs for changed files (implies write=false)")]
        diff: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur (implies write=false)")]
        check: bool,
    },
}
