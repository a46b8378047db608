//! Report assembly: the single entry point from raw log to [`Report`].
//!
//! The pipeline is a pure fold over one log snapshot:
//! meta → validations (global, then per action) → fixes → format → stats.

use crate::coerce::coerce;
use crate::fixes::detect_fixes;
use crate::format::reconcile_format;
use crate::meta::extract_meta;
use crate::models::{IssueRecord, Report, Severity, Stats};
use crate::tree;
use crate::validations::extract_validations;
use serde_json::{Map, Value as Json};

const GLOBAL_SOURCE: &str = "Global";

/// Build a report from raw JSON text. Unparsable text yields the default report.
pub fn digest_str(raw: &str) -> Report {
    match serde_json::from_str::<Json>(raw) {
        Ok(v) => digest_with_text(&v, raw),
        Err(_) => Report::default(),
    }
}

/// Build a report from an already parsed log. A string value is treated as a
/// JSON-encoded log and decoded once.
pub fn digest(logs: &Json) -> Report {
    match logs {
        Json::String(s) => digest_str(s),
        other => {
            let text = serde_json::to_string(other).unwrap_or_default();
            digest_with_text(other, &text)
        }
    }
}

fn digest_with_text(logs: &Json, raw_text: &str) -> Report {
    let result = match coerce(logs.get("result")) {
        Some(Json::Object(map)) => map,
        _ => return Report::default(),
    };
    assemble(&result, raw_text)
}

fn assemble(result: &Map<String, Json>, raw_text: &str) -> Report {
    let meta = extract_meta(result, raw_text);

    let global = result
        .get("results")
        .and_then(|r| r.get("validations"))
        .map(|v| extract_validations(Some(v), GLOBAL_SOURCE))
        .unwrap_or_default();
    let per_action = tree::actions(result)
        .into_iter()
        .map(|node| extract_validations(node.action.get("validations"), &node.source_label()));
    let (errors, warnings, infos) = partition(std::iter::once(global).chain(per_action).flatten());

    let fixes = detect_fixes(result);
    let format = reconcile_format(&meta, &fixes);
    let stats = Stats {
        error_count: errors.len(),
        warning_count: warnings.len(),
        info_count: infos.len(),
        fixes_count: fixes.len(),
    };
    Report {
        meta,
        errors,
        warnings,
        infos,
        fixes,
        format,
        stats,
    }
}

type Partitioned = (Vec<IssueRecord>, Vec<IssueRecord>, Vec<IssueRecord>);

/// Split issues by severity, keeping traversal order within each bucket.
fn partition(issues: impl Iterator<Item = IssueRecord>) -> Partitioned {
    let mut out: Partitioned = (Vec::new(), Vec::new(), Vec::new());
    for is in issues {
        match is.severity {
            Severity::Error => out.0.push(is),
            Severity::Warning => out.1.push(is),
            Severity::Info => out.2.push(is),
        }
    }
    out
}
