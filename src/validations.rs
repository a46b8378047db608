//! Validation normalizer, severity classifier and tagger.
//!
//! Upstream `validations` blocks arrive either as arrays or as JSON strings
//! holding arrays, with PascalCase or camelCase keys. Anything else yields no
//! records.

use crate::coerce::{coerce, display_scalar, field, truthy};
use crate::models::{IssueRecord, IssueTag, Severity};
use serde_json::{Number, Value as Json};

/// Keyword rules in priority order; the first rule with a matching keyword wins.
const TAG_RULES: &[(IssueTag, &[&str])] = &[
    (IssueTag::ImageResolution, &["image resolution"]),
    (IssueTag::RichBlack, &["rich black"]),
    (IssueTag::Bleed, &["bleed"]),
    (IssueTag::Password, &["password"]),
    (IssueTag::FormField, &["form field"]),
    (IssueTag::Fonts, &["font", "fonts", "police"]),
];

/// Normalize a raw validations payload into issue records labeled `source`.
pub fn extract_validations(raw: Option<&Json>, source: &str) -> Vec<IssueRecord> {
    let parsed;
    let items: &[Json] = match raw {
        Some(Json::Array(items)) => items,
        other => match coerce(other) {
            Some(Json::Array(items)) => {
                parsed = items;
                &parsed
            }
            _ => return Vec::new(),
        },
    };
    items
        .iter()
        .filter(|v| truthy(v))
        .map(|v| normalize_entry(v, source))
        .collect()
}

fn normalize_entry(v: &Json, source: &str) -> IssueRecord {
    let message = field(v, &["Message", "message"])
        .map(display_scalar)
        .unwrap_or_default();
    let level = match field(v, &["Level", "level"]) {
        Some(Json::Number(n)) => n.clone(),
        _ => Number::from(0),
    };
    let severity = Severity::from_level(level.as_f64().unwrap_or(0.0));
    let tag = tag_for(&message);
    IssueRecord {
        message,
        level,
        severity,
        field_name: field(v, &["FieldName", "fieldName"]).map(display_scalar),
        kind: field(v, &["Type", "type"]).map(display_scalar),
        data: field(v, &["Data", "data"]).cloned(),
        source: source.to_string(),
        tag,
    }
}

/// Tag a message by case-insensitive keyword match.
pub fn tag_for(message: &str) -> Option<IssueTag> {
    let msg = message.to_lowercase();
    TAG_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| msg.contains(k)))
        .map(|(tag, _)| *tag)
}
