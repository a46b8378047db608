//! File identity and physical format recovery.
//!
//! Sources are ranked; each later source only fills fields still `None`:
//! 1. `result.pdfInfo` fields (`fileName`/`FileName`, `pageCount`/`PageCount`).
//! 2. `result.runtimeVariables` key/value list (`Largeur`, `Hauteur`, ...).
//! 3. `result.pdfInfo.title` as a file name.
//! 4. A `"FileName": "<name>.pdf"` pattern anywhere in the raw log text.

use crate::coerce::{display_scalar, field, non_empty_str, number, seq_or_empty, truthy};
use crate::models::MetaRecord;
use regex::Regex;
use serde_json::{Map, Value as Json};
use std::sync::OnceLock;

const KEY_WIDTH: &str = "Largeur";
const KEY_HEIGHT: &str = "Hauteur";
const KEY_IMPRESSION: &str = "Impression";
const KEY_PAGE_COUNT: &str = "FileInfo.FileInfo.PageCount";
const KEY_SAME_DIMENSION: &str = "FileInfo.FileInfo.AllPagesSameDimension";

fn file_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)"FileName"\s*:\s*"([^"]+\.(?:pdf|eps|ps|ai|indd))""#)
            .expect("static file name pattern")
    })
}

/// Build the meta record for `result`; `raw_text` is the serialized log used
/// by the last-resort file name search.
pub fn extract_meta(result: &Map<String, Json>, raw_text: &str) -> MetaRecord {
    let mut meta = MetaRecord {
        original_link: non_empty_str(result.get("originalLink")).map(str::to_string),
        final_link: non_empty_str(result.get("finalLink")).map(str::to_string),
        status: result.get("status").filter(|v| !v.is_null()).cloned(),
        ..MetaRecord::default()
    };

    if let Some(pdf) = result.get("pdfInfo").filter(|v| v.is_object()) {
        meta.file_name = field(pdf, &["fileName", "FileName"])
            .filter(|v| truthy(v))
            .map(display_scalar);
        meta.page_count = field(pdf, &["pageCount", "PageCount"]).and_then(as_count);
    }

    apply_runtime_variables(&mut meta, seq_or_empty(result.get("runtimeVariables")));

    if meta.file_name.is_none() {
        meta.file_name = result
            .get("pdfInfo")
            .and_then(|pdf| non_empty_str(pdf.get("title")))
            .map(str::to_string);
    }

    if meta.file_name.is_none() {
        meta.file_name = file_name_pattern()
            .captures(raw_text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
    }

    meta
}

/// Read the runtime key/value list, then fill only the fields earlier sources
/// left empty. Within the list a later entry overrides an earlier one.
fn apply_runtime_variables(meta: &mut MetaRecord, vars: &[Json]) {
    let mut rv = MetaRecord::default();
    for item in vars {
        let Some(key) = non_empty_str(item.get("key")) else {
            continue;
        };
        let value = item.get("value");
        match key {
            KEY_WIDTH => rv.trim_width_mm = positive(value).or(rv.trim_width_mm),
            KEY_HEIGHT => rv.trim_height_mm = positive(value).or(rv.trim_height_mm),
            KEY_IMPRESSION => {
                rv.impression = value.filter(|v| truthy(v)).map(display_scalar);
            }
            KEY_PAGE_COUNT => {
                if let Some(n) = value.and_then(as_count) {
                    rv.page_count = Some(n);
                }
            }
            KEY_SAME_DIMENSION => {
                rv.all_pages_same_dimension = Some(
                    matches!(value, Some(Json::Bool(true))) || non_empty_str(value) == Some("True"),
                );
            }
            _ => {}
        }
    }
    meta.trim_width_mm = meta.trim_width_mm.or(rv.trim_width_mm);
    meta.trim_height_mm = meta.trim_height_mm.or(rv.trim_height_mm);
    meta.impression = meta.impression.take().or(rv.impression);
    meta.page_count = meta.page_count.or(rv.page_count);
    meta.all_pages_same_dimension = meta.all_pages_same_dimension.or(rv.all_pages_same_dimension);
}

/// Non-zero, finite dimension; zero or unparsable values are treated as absent.
fn positive(value: Option<&Json>) -> Option<f64> {
    number(value).filter(|n| *n != 0.0 && n.is_finite())
}

fn as_count(value: &Json) -> Option<u64> {
    number(Some(value))
        .filter(|n| *n >= 0.0 && n.fract() == 0.0)
        .map(|n| n as u64)
}
