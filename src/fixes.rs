//! Detection of automatic corrections in workflow logs.
//!
//! Six independent pattern families are evaluated per action; one action can
//! produce several fixes. Success for each family is decided by an explicit
//! list of [`SuccessSignal`]s, any of which is sufficient.
//!
//! Results are deduplicated on `(code, label)`, keeping the first occurrence.

use crate::coerce::{coerce, display_scalar, field, is_true, number, seq_or_empty, truthy};
use crate::models::{FixCode, FixEvidence, FixRecord};
use crate::tree::{self, ActionNode};
use serde_json::{Map, Value as Json};
use std::collections::HashSet;

/// Action status code reported by the upstream engine for completed actions.
const STATUS_COMPLETED: f64 = 3.0;
/// Markers searched in the serialized validations of an action.
const SUCCESS_MARKER: &str = r#""Success":true"#;
const COMPLETED_MARKER: &str = r#""Status":"completed""#;
const VALIDATION_MARKERS: &[&str] = &[SUCCESS_MARKER, COMPLETED_MARKER];
/// Marker left by the color conversion fixups.
const COLOR_FIXUP_MARKER: &str = "Atomyx_fixups";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Independent evidence that a corrective action succeeded.
pub enum SuccessSignal {
    /// `results.Success` is literally `true`.
    ResultsSuccessFlag,
    /// The action's numeric status equals the completed code.
    StatusCompleted,
    /// The serialized validations contain a success or completed marker.
    ValidationMarker,
    /// The serialized validations contain `"Success":true` specifically.
    SuccessMarker,
    /// Presence of the evidence is itself proof of success.
    Always,
}

const RESIZE_SIGNALS: &[SuccessSignal] = &[SuccessSignal::ResultsSuccessFlag];
const BLEED_SIGNALS: &[SuccessSignal] = &[SuccessSignal::Always];
const FLATTENING_SIGNALS: &[SuccessSignal] = &[SuccessSignal::ValidationMarker];
const RICH_BLACK_SIGNALS: &[SuccessSignal] =
    &[SuccessSignal::StatusCompleted, SuccessSignal::ValidationMarker];
const FONTS_SIGNALS: &[SuccessSignal] = &[
    SuccessSignal::ResultsSuccessFlag,
    SuccessSignal::StatusCompleted,
    SuccessSignal::SuccessMarker,
];
const COLOR_SIGNALS: &[SuccessSignal] = &[SuccessSignal::Always];

/// Per-action evidence prepared once and shared by all pattern rules.
pub struct ActionEvidence<'a> {
    pub workflow_name: &'a str,
    pub fix_flavored: bool,
    pub name: &'a str,
    pub results: Option<Json>,
    pub validations_text: String,
    pub status: Option<f64>,
    pub args: Option<Json>,
}

impl<'a> ActionEvidence<'a> {
    pub fn from_node(node: &ActionNode<'a>) -> Self {
        let action = node.action;
        ActionEvidence {
            workflow_name: node.workflow_name,
            fix_flavored: node.fix_flavored,
            name: node.name(),
            results: coerce(action.get("results")),
            validations_text: validations_text(action.get("validations")),
            status: match action.get("status") {
                Some(Json::Number(n)) => n.as_f64(),
                _ => None,
            },
            args: coerce(action.get("args")),
        }
    }

    fn result(&self, key: &str) -> Option<&Json> {
        self.results.as_ref().and_then(|r| r.get(key))
    }

    fn signal(&self, signal: SuccessSignal) -> bool {
        match signal {
            SuccessSignal::ResultsSuccessFlag => is_true(self.result("Success")),
            SuccessSignal::StatusCompleted => self.status == Some(STATUS_COMPLETED),
            SuccessSignal::ValidationMarker => VALIDATION_MARKERS
                .iter()
                .any(|m| self.validations_text.contains(m)),
            SuccessSignal::SuccessMarker => self.validations_text.contains(SUCCESS_MARKER),
            SuccessSignal::Always => true,
        }
    }

    /// True when any of `signals` holds.
    pub fn succeeded(&self, signals: &[SuccessSignal]) -> bool {
        signals.iter().any(|s| self.signal(*s))
    }

    fn name_matches(&self, exact: &str, fragment: &str) -> bool {
        self.name == exact || self.name.to_lowercase().contains(fragment)
    }

    fn evidence(&self, with_results: bool, with_validations: bool) -> FixEvidence {
        FixEvidence {
            workflow: self.workflow_name.to_string(),
            action: self.name.to_string(),
            results: if with_results { self.results.clone() } else { None },
            validations: if with_validations {
                Some(self.validations_text.clone())
            } else {
                None
            },
        }
    }
}

/// Text form of a validations payload: strings as-is, arrays re-serialized.
fn validations_text(raw: Option<&Json>) -> String {
    match raw {
        Some(Json::String(s)) => s.clone(),
        Some(v @ Json::Array(_)) => serde_json::to_string(v).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Scan every action under `result.workflowLogs` and return deduplicated fixes.
pub fn detect_fixes(result: &Map<String, Json>) -> Vec<FixRecord> {
    let nodes = tree::actions(result);
    let found = nodes
        .iter()
        .flat_map(|node| detect_action(&ActionEvidence::from_node(node)));
    dedup(found)
}

/// Apply every pattern rule to a single action, in fixed order.
pub fn detect_action(ev: &ActionEvidence<'_>) -> Vec<FixRecord> {
    [
        page_resize(ev),
        bleed_added(ev),
        flattening(ev),
        rich_black(ev),
        fonts_outlined(ev),
        color_conversion(ev),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn page_resize(ev: &ActionEvidence<'_>) -> Option<FixRecord> {
    let pages = seq_or_empty(ev.result("Pages"));
    let first = pages.first()?;
    let has_box = |names: &[&str]| names.iter().any(|n| first.get(*n).is_some_and(truthy));
    if !has_box(&["OriginalTrimBox", "OriginalMediaBox"]) || !has_box(&["NewTrimBox", "NewMediaBox"]) {
        return None;
    }
    let new_w = ev.result("NewWidth").filter(|v| !v.is_null());
    let new_h = ev.result("NewHeight").filter(|v| !v.is_null());
    let label = match (new_w, new_h) {
        (Some(w), Some(h)) => format!(
            "Pages automatically resized to {} x {}.",
            display_scalar(w),
            display_scalar(h)
        ),
        _ => "Pages automatically resized.".to_string(),
    };
    Some(FixRecord {
        code: FixCode::PageResize,
        label,
        success: ev.succeeded(RESIZE_SIGNALS),
        pages: None,
        raw: ev.evidence(true, false),
    })
}

fn bleed_added(ev: &ActionEvidence<'_>) -> Option<FixRecord> {
    let info = ev.result("BleedPageInfo")?.as_array()?;
    let added: Vec<&Json> = info
        .iter()
        .filter(|p| p.get("Success").is_some_and(truthy) && p.get("BleedAdded").is_some_and(truthy))
        .collect();
    if added.is_empty() {
        return None;
    }
    let size = ev
        .args
        .as_ref()
        .and_then(|a| field(a, &["BleedSize"]))
        .or_else(|| ev.result("BleedSizeAdded").filter(|v| !v.is_null()))
        .filter(|v| truthy(v));
    let label = match size {
        Some(s) => format!("Bleed added automatically ({} mm).", display_scalar(s)),
        None => "Bleed added automatically.".to_string(),
    };
    let pages = added
        .iter()
        .filter_map(|p| number(p.get("Page")))
        .filter(|n| *n >= 0.0 && *n <= u32::MAX as f64 && n.fract() == 0.0)
        .map(|n| n as u32)
        .collect();
    Some(FixRecord {
        code: FixCode::BleedAdded,
        label,
        success: ev.succeeded(BLEED_SIGNALS),
        pages: Some(pages),
        raw: ev.evidence(true, false),
    })
}

fn flattening(ev: &ActionEvidence<'_>) -> Option<FixRecord> {
    if !ev.fix_flavored || !ev.name_matches("FlatteningTransparencies", "flatten") {
        return None;
    }
    Some(FixRecord {
        code: FixCode::Flattening,
        label: "Transparencies flattened for safe printing.".to_string(),
        success: ev.succeeded(FLATTENING_SIGNALS),
        pages: None,
        raw: ev.evidence(true, true),
    })
}

fn rich_black(ev: &ActionEvidence<'_>) -> Option<FixRecord> {
    if !ev.fix_flavored || !ev.name_matches("RichBlack", "richblack") {
        return None;
    }
    Some(FixRecord {
        code: FixCode::RichBlackFix,
        label: "Rich blacks normalized automatically.".to_string(),
        success: ev.succeeded(RICH_BLACK_SIGNALS),
        pages: None,
        raw: ev.evidence(true, true),
    })
}

fn fonts_outlined(ev: &ActionEvidence<'_>) -> Option<FixRecord> {
    if !ev.fix_flavored || !ev.name_matches("FontsOutline", "fontoutline") {
        return None;
    }
    Some(FixRecord {
        code: FixCode::FontsOutlined,
        label: "Fonts converted to outlines for safe printing.".to_string(),
        success: ev.succeeded(FONTS_SIGNALS),
        pages: None,
        raw: ev.evidence(true, true),
    })
}

fn color_conversion(ev: &ActionEvidence<'_>) -> Option<FixRecord> {
    if !ev.fix_flavored || !ev.validations_text.contains(COLOR_FIXUP_MARKER) {
        return None;
    }
    Some(FixRecord {
        code: FixCode::ColorConversion,
        label: "Automatic color conversion applied (standard CMYK and spot color handling)."
            .to_string(),
        success: ev.succeeded(COLOR_SIGNALS),
        pages: None,
        raw: ev.evidence(false, true),
    })
}

/// Keep the first fix for each `(code, label)` pair, preserving order.
pub fn dedup(fixes: impl IntoIterator<Item = FixRecord>) -> Vec<FixRecord> {
    let mut seen: HashSet<(FixCode, String)> = HashSet::new();
    fixes
        .into_iter()
        .filter(|f| seen.insert((f.code, f.label.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(result: Json) -> Vec<FixRecord> {
        detect_fixes(result.as_object().unwrap())
    }

    fn fix_wf(actions: Json) -> Json {
        json!({"workflowLogs": [{"name": "Fix", "type": 4, "steps": [{"actions": actions}]}]})
    }

    #[test]
    fn test_page_resize_with_dimensions() {
        let results = json!({
            "Success": true,
            "NewWidth": 210,
            "NewHeight": 297,
            "Pages": [{"OriginalTrimBox": {"w": 200}, "NewMediaBox": {"w": 210}}]
        });
        let fixes = run(json!({"workflowLogs": [{"name": "Resize", "steps": [{"actions": [
            {"name": "PageResize", "results": results.to_string()}
        ]}]}]}));
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].code, FixCode::PageResize);
        assert_eq!(fixes[0].label, "Pages automatically resized to 210 x 297.");
        assert!(fixes[0].success);
        assert_eq!(fixes[0].raw.results.as_ref().unwrap()["NewWidth"], 210);
    }

    #[test]
    fn test_page_resize_requires_both_boxes_and_strict_success() {
        let fixes = run(json!({"workflowLogs": [{"steps": [{"actions": [
            {"name": "a", "results": {"Pages": [{"OriginalTrimBox": {}}], "Success": true}},
            {"name": "b", "results": {"Pages": [{"OriginalTrimBox": 1, "NewTrimBox": 1}], "Success": "true"}}
        ]}]}]}));
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].label, "Pages automatically resized.");
        assert!(!fixes[0].success);
    }

    #[test]
    fn test_bleed_pages_and_size() {
        let fixes = run(json!({"workflowLogs": [{"steps": [{"actions": [{
            "name": "AddBleed",
            "args": {"BleedSize": 3},
            "results": {"BleedPageInfo": [
                {"Page": 1, "Success": true, "BleedAdded": true},
                {"Page": 2, "Success": true, "BleedAdded": false},
                {"Page": 3, "Success": true, "BleedAdded": true}
            ], "BleedSizeAdded": 5}
        }]}]}]}));
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].code, FixCode::BleedAdded);
        assert_eq!(fixes[0].label, "Bleed added automatically (3 mm).");
        assert_eq!(fixes[0].pages, Some(vec![1, 3]));
        assert!(fixes[0].success);
    }

    #[test]
    fn test_bleed_size_from_results_and_none_added() {
        let fixes = run(json!({"workflowLogs": [{"steps": [{"actions": [
            {"results": {"BleedPageInfo": [{"Page": 1, "Success": true, "BleedAdded": true}], "BleedSizeAdded": 2.5}},
            {"results": {"BleedPageInfo": [{"Page": 1, "Success": false, "BleedAdded": true}]}}
        ]}]}]}));
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].label, "Bleed added automatically (2.5 mm).");
    }

    #[test]
    fn test_fix_only_patterns_ignored_outside_fix_workflows() {
        let fixes = run(json!({"workflowLogs": [{"name": "Check", "steps": [{"actions": [
            {"name": "RichBlack", "status": 3},
            {"name": "FlatteningTransparencies"},
            {"name": "FontsOutline"},
            {"name": "x", "validations": "Atomyx_fixups"}
        ]}]}]}));
        assert!(fixes.is_empty());
    }

    #[test]
    fn test_rich_black_status_signal_without_results() {
        let fixes = run(fix_wf(json!([{"name": "RichBlack", "status": 3, "results": "{broken"}])));
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].code, FixCode::RichBlackFix);
        assert!(fixes[0].success);
    }

    #[test]
    fn test_rich_black_text_marker_fallback() {
        let fixes = run(fix_wf(json!([
            {"name": "ConvertRichBlackText", "status": 1, "validations": [{"Status": "completed"}]}
        ])));
        assert!(fixes[0].success);
        let failed = run(fix_wf(json!([{"name": "RichBlack", "status": 2}])));
        assert!(!failed[0].success);
    }

    #[test]
    fn test_flattening_marker_search() {
        let fixes = run(fix_wf(json!([
            {"name": "FlattenAll", "validations": "[{\"Success\":true}]"}
        ])));
        assert_eq!(fixes[0].code, FixCode::Flattening);
        assert!(fixes[0].success);
        let not_yet = run(fix_wf(json!([{"name": "FlatteningTransparencies", "status": 3}])));
        assert!(!not_yet[0].success);
    }

    #[test]
    fn test_fonts_outlined_signals() {
        let by_flag = run(fix_wf(json!([{"name": "FontsOutline", "results": {"Success": true}}])));
        assert!(by_flag[0].success);
        let by_status = run(fix_wf(json!([{"name": "DoFontOutlines", "status": 3}])));
        assert!(by_status[0].success);
        let none = run(fix_wf(json!([{"name": "FontsOutline", "results": {"Success": false}}])));
        assert!(!none[0].success);
    }

    #[test]
    fn test_fonts_outlined_ignores_completed_marker() {
        let fixes = run(fix_wf(json!([
            {"name": "FontsOutline", "status": 1, "validations": [{"Status": "completed"}]}
        ])));
        assert_eq!(fixes[0].code, FixCode::FontsOutlined);
        assert!(!fixes[0].success);
        let marked = run(fix_wf(json!([
            {"name": "FontsOutline", "status": 1, "validations": [{"Success": true}]}
        ])));
        assert!(marked[0].success);
    }

    #[test]
    fn test_bleed_pages_out_of_range_are_skipped() {
        let fixes = run(json!({"workflowLogs": [{"steps": [{"actions": [{"results": {"BleedPageInfo": [
            {"Page": 2, "Success": true, "BleedAdded": true},
            {"Page": 5000000000u64, "Success": true, "BleedAdded": true},
            {"Page": -1, "Success": true, "BleedAdded": true}
        ]}}]}]}]}));
        assert_eq!(fixes[0].pages, Some(vec![2]));
    }

    #[test]
    fn test_color_conversion_and_multiple_patterns_per_action() {
        let fixes = run(fix_wf(json!([{
            "name": "RichBlack",
            "status": 3,
            "validations": [{"Message": "Atomyx_fixups applied"}]
        }])));
        let codes: Vec<FixCode> = fixes.iter().map(|f| f.code).collect();
        assert_eq!(codes, vec![FixCode::RichBlackFix, FixCode::ColorConversion]);
        assert!(fixes[1].success);
        assert!(fixes[1].raw.results.is_none());
    }

    #[test]
    fn test_duplicates_collapse_to_first() {
        let action = json!({"name": "RichBlack", "status": 3});
        let mut failing = action.clone();
        failing["status"] = json!(1);
        let fixes = run(fix_wf(json!([action.clone(), failing, action])));
        assert_eq!(fixes.len(), 1);
        assert!(fixes[0].success);
    }

    #[test]
    fn test_different_labels_are_kept() {
        let a = json!({"results": {"BleedPageInfo": [{"Page": 1, "Success": true, "BleedAdded": true}], "BleedSizeAdded": 3}});
        let b = json!({"results": {"BleedPageInfo": [{"Page": 2, "Success": true, "BleedAdded": true}], "BleedSizeAdded": 5}});
        let fixes = run(json!({"workflowLogs": [{"steps": [{"actions": [a.clone(), b, a]}]}]}));
        assert_eq!(fixes.len(), 2);
        assert_eq!(fixes[0].pages, Some(vec![1]));
    }
}
