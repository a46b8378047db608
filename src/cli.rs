//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "presslog",
    version,
    about = "Distill prepress workflow logs into canonical reports",
    long_about = "Presslog — reads raw prepress pipeline logs and reports classified issues, automatic fixes, page format reconciliation and statistics.\n\nConfiguration precedence: CLI > presslog.toml > defaults.",
    after_help = "Examples:\n  presslog digest logs/job-1234.json\n  presslog digest 'logs/**/*.json' --output json\n  presslog links logs/job-1234.json --lang en",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current presslog version.")]
    Version,
    /// Digest log files into reports
    #[command(
        about = "Digest prepress logs",
        long_about = "Parse each matched log file and print its report. Malformed logs produce empty reports rather than failures.",
        after_help = "Examples:\n  presslog digest logs/a.json logs/b.json\n  presslog digest --output text"
    )]
    Digest {
        #[arg(help = "Log files or glob patterns (default: config patterns or **/*.json)")]
        inputs: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json|text (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero when any report contains errors")]
        fail_on_error: bool,
    },
    /// Resolve help links for a log
    #[command(
        about = "Resolve help links",
        long_about = "Digest a single log and print help links for the issues and fixes it contains, using the [links] catalog from presslog.toml."
    )]
    Links {
        #[arg(help = "Log file")]
        file: String,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Preferred language (default: config lang or fr)")]
        lang: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
