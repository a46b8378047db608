//! Plain-text summary of a report, suitable as assistant context or for a
//! customer-facing recap.

use crate::models::{IssueRecord, Report};
use std::fmt::Write;

/// Render `report` as a sectioned plain-text summary.
pub fn render_summary(report: &Report) -> String {
    let Report {
        meta,
        stats,
        errors,
        warnings,
        fixes,
        ..
    } = report;
    let mut out = String::new();

    if let Some(name) = &meta.file_name {
        let _ = writeln!(out, "File: {}", name);
    }
    if let Some(n) = meta.page_count {
        let _ = writeln!(out, "Pages: {}", n);
    }
    if let (Some(w), Some(h)) = (meta.trim_width_mm, meta.trim_height_mm) {
        let _ = writeln!(out, "Final format (trim box): {} x {} mm", w, h);
    }
    if let Some(imp) = &meta.impression {
        let _ = writeln!(out, "Planned printing: {}", imp);
    }
    let _ = writeln!(
        out,
        "\nTechnical summary: {} error(s), {} warning(s), {} automatic fix(es) detected.",
        stats.error_count, stats.warning_count, stats.fixes_count
    );

    out.push_str("\n=== AUTOMATIC FIXES APPLIED ===\n");
    if fixes.is_empty() {
        out.push_str("No automatic fix detected in this report.\n");
    } else {
        for (i, f) in fixes.iter().enumerate() {
            let _ = writeln!(out, "{}) {}", i + 1, f.label);
        }
    }

    out.push_str("\n=== ERRORS TO EXPLAIN (blocking or important) ===\n");
    push_messages(&mut out, errors, "No blocking error found.");

    out.push_str("\n=== WARNINGS (mention, but reassure) ===\n");
    push_messages(&mut out, warnings, "No significant warning.");

    out
}

fn push_messages(out: &mut String, issues: &[IssueRecord], empty: &str) {
    if issues.is_empty() {
        out.push_str(empty);
        out.push('\n');
        return;
    }
    for is in issues {
        let _ = writeln!(out, "- {}", is.message);
    }
}
