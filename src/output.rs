//! Output rendering for digest and links commands.
//!
//! Supports `human` (default), `json` and `text` outputs. The JSON form
//! includes per-file reports and a top-level summary; `text` prints the plain
//! summary of each report.

use crate::digest::DigestResult;
use crate::error::DigestError;
use crate::models::links::HelpLink;
use crate::models::{IssueRecord, Report, Severity};
use crate::summary::render_summary;
use crate::utils::{error_prefix, use_colors};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Print digest results in the requested format, then collected errors.
pub fn print_digest(results: &[DigestResult], output: &str, errors: &[DigestError]) {
    match output {
        "json" => println!("{}", to_pretty(&compose_digest_json(results, errors))),
        "text" => {
            for (i, r) in results.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("### {}", r.file);
                print!("{}", render_summary(&r.report));
            }
            print_errors(errors);
        }
        _ => {
            let color = use_colors(output);
            for r in results {
                print_human_report(&r.file, &r.report, color);
            }
            let totals = totals(results);
            let summary = format!(
                "— Summary — files={} errors={} warnings={} infos={} fixes={}",
                results.len(),
                totals.0,
                totals.1,
                totals.2,
                totals.3
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
            print_errors(errors);
        }
    }
}

fn print_errors(errors: &[DigestError]) {
    for e in errors {
        eprintln!("{} {}", error_prefix(), e);
    }
}

fn print_human_report(file: &str, report: &Report, color: bool) {
    let header = match &report.meta.file_name {
        Some(name) => format!("{} ({})", file, name),
        None => file.to_string(),
    };
    if color {
        println!("{}", header.bold());
    } else {
        println!("{}", header);
    }
    for is in report.issues() {
        println!("  {}", issue_line(is, color));
    }
    for f in &report.fixes {
        let mark = match (f.success, color) {
            (true, true) => "✔".green().to_string(),
            (false, true) => "✘".red().to_string(),
            (true, false) => "✔".to_string(),
            (false, false) => "✘".to_string(),
        };
        println!("  {} ⟦fix⟧ ❲{}❳ — {}", mark, f.code.as_str(), f.label);
    }
    let fmt = &report.format;
    if let Some(gap) = fmt.proportion_gap_percent {
        let line = format!(
            "  ⟦format⟧ gap={:.2}% done={} blocked={}",
            gap, fmt.auto_resize_done, fmt.auto_resize_blocked
        );
        if color && fmt.auto_resize_blocked {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }
}

fn issue_line(is: &IssueRecord, color: bool) -> String {
    let (icon, sev) = match is.severity {
        Severity::Error => ("✖", "⟦error⟧"),
        Severity::Warning => ("▲", "⟦warn⟧"),
        Severity::Info => ("◆", "⟦info⟧"),
    };
    let (icon, sev) = if color {
        match is.severity {
            Severity::Error => (icon.red().to_string(), sev.red().bold().to_string()),
            Severity::Warning => (icon.yellow().to_string(), sev.yellow().bold().to_string()),
            Severity::Info => (icon.blue().to_string(), sev.blue().bold().to_string()),
        }
    } else {
        (icon.to_string(), sev.to_string())
    };
    format!("{} {} ❲{}❳ — {}", icon, sev, is.source, is.message)
}

fn totals(results: &[DigestResult]) -> (usize, usize, usize, usize) {
    results.iter().fold((0, 0, 0, 0), |acc, r| {
        let s = &r.report.stats;
        (
            acc.0 + s.error_count,
            acc.1 + s.warning_count,
            acc.2 + s.info_count,
            acc.3 + s.fixes_count,
        )
    })
}

/// Print resolved help links.
pub fn print_links(links: &[HelpLink], output: &str) {
    match output {
        "json" => println!("{}", to_pretty(&compose_links_json(links))),
        _ => {
            let color = use_colors(output);
            for l in links {
                if color {
                    println!("{} {} — {}", l.code.cyan().bold(), l.label, l.url.underline());
                } else {
                    println!("{} {} — {}", l.code, l.label, l.url);
                }
            }
        }
    }
}

fn to_pretty(v: &JsonVal) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

/// Compose digest JSON object (pure) for testing/snapshot purposes.
pub fn compose_digest_json(results: &[DigestResult], errors: &[DigestError]) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| json!({"file": r.file, "report": r.report}))
        .collect();
    let errs: Vec<_> = errors
        .iter()
        .map(|e| json!({"code": e.code(), "message": e.to_string()}))
        .collect();
    let t = totals(results);
    let summary = json!({
        "files": results.len(),
        "errors": t.0,
        "warnings": t.1,
        "infos": t.2,
        "fixes": t.3,
        "failed": errors.len(),
    });
    json!({"results": items, "errors": errs, "summary": summary})
}

/// Compose links JSON array (pure) for testing/snapshot purposes.
pub fn compose_links_json(links: &[HelpLink]) -> JsonVal {
    serde_json::to_value(links).unwrap_or(JsonVal::Array(Vec::new()))
}
