//! keyorder CLI binary entry point.
//! Resolves configuration, delegates to lint/fix and prints results.

use clap::Parser;
use keyorder::cli::{Cli, Commands, RuleArgs};
use keyorder::config::{self, Effective, Overrides};
use keyorder::utils::{error_prefix, info_prefix, note_prefix};
use keyorder::{fix, lint, output};

fn resolve(overrides: &Overrides) -> Effective {
    let eff = match config::resolve_effective(overrides) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            std::process::exit(2);
        }
    };
    log::debug!("effective config: {:?}", eff);
    if !eff.config_found {
        eprintln!("{} No keyorder.toml found; using defaults.", note_prefix());
    }
    eff
}

fn announce_patterns(eff: &Effective, args: &RuleArgs) {
    if eff.output != "json" && args.patterns.is_empty() {
        eprintln!(
            "{} Using patterns: [{}]",
            info_prefix(),
            eff.patterns.join(", ")
        );
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint { args } => {
            let eff = resolve(&args.overrides());
            announce_patterns(&eff, &args);
            let result = lint::run_lint(&eff);
            output::print_lint(&result, &eff.output);
            if result.summary.errors > 0 {
                std::process::exit(1);
            }
        }
        Commands::Fix {
            args,
            write,
            diff,
            check,
        } => {
            let eff = resolve(&Overrides {
                write: write.then_some(true),
                diff: diff.then_some(true),
                check: check.then_some(true),
                ..args.overrides()
            });
            announce_patterns(&eff, &args);
            // --diff and --check never touch files
            let eff_write = if eff.diff || eff.check {
                false
            } else {
                eff.write
            };
            let (results, errors) = fix::run_fix(&eff, eff_write, eff.diff || eff.check);
            output::print_fix(&results, &eff.output, eff_write, eff.diff, &errors);
            let pending = eff.check && results.iter().any(|r| r.changed);
            if !errors.is_empty() || pending {
                std::process::exit(1);
            }
        }
    }
}
