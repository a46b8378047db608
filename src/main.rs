//! Presslog CLI binary entry point.
//! Delegates to modules for digest/links and prints results.

use clap::Parser;
use presslog::cli::{Cli, Commands};
use presslog::config::{self, Effective};
use presslog::utils::{error_prefix, info_prefix, note_prefix};
use presslog::{digest, links, output};

fn resolve_or_exit(
    repo_root: Option<&str>,
    output: Option<&str>,
    patterns: &[String],
    lang: Option<&str>,
    fail_on_error: Option<bool>,
) -> Effective {
    match config::resolve_effective(repo_root, output, patterns, lang, fail_on_error) {
        Ok(eff) => {
            if !eff.config_found && eff.output != "json" {
                eprintln!("{} No presslog.toml found; using defaults.", note_prefix());
            }
            eff
        }
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            std::process::exit(2);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Digest {
            inputs,
            repo_root,
            output,
            fail_on_error,
        } => {
            let eff = resolve_or_exit(
                repo_root.as_deref(),
                output.as_deref(),
                &inputs,
                None,
                if fail_on_error { Some(true) } else { None },
            );
            if inputs.is_empty() && eff.output == "human" {
                eprintln!(
                    "{} Using patterns: [{}]",
                    info_prefix(),
                    eff.patterns.join(", ")
                );
            }
            let (results, errors) = digest::run_digest(&eff.repo_root, &eff.patterns);
            output::print_digest(&results, &eff.output, &errors);
            if results.is_empty() && !errors.is_empty() {
                std::process::exit(2);
            }
            if eff.fail_on_error && results.iter().any(|r| r.report.stats.error_count > 0) {
                std::process::exit(1);
            }
        }
        Commands::Links {
            file,
            repo_root,
            lang,
            output,
        } => {
            let eff = resolve_or_exit(
                repo_root.as_deref(),
                output.as_deref(),
                &[],
                lang.as_deref(),
                None,
            );
            let path = eff.repo_root.join(&file);
            match digest::digest_file(&path, &eff.repo_root) {
                Ok(d) => {
                    let resolved = links::resolve_help_links(&d.report, &eff.catalog, &eff.lang);
                    if resolved.is_empty() && eff.catalog.entries.is_empty() && eff.output != "json" {
                        eprintln!(
                            "{} No [links] catalog configured in presslog.toml.",
                            note_prefix()
                        );
                    }
                    output::print_links(&resolved, &eff.output);
                }
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            }
        }
    }
}
