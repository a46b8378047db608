//! Shared data models for the distilled report and the help-link catalog.
//!
//! All report types serialize with camelCase field names; nullable fields are
//! emitted as `null` rather than omitted so consumers always see a fully
//! populated shape.

pub mod links;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as Json};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Severity derived from an upstream numeric level.
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// `level >= 2` is an error, exactly `1` a warning, anything else info.
    pub fn from_level(level: f64) -> Self {
        if level >= 2.0 {
            Severity::Error
        } else if level == 1.0 {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Known issue categories recognized from validation messages.
pub enum IssueTag {
    ImageResolution,
    RichBlack,
    Bleed,
    Password,
    FormField,
    Fonts,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One normalized validation entry.
pub struct IssueRecord {
    pub message: String,
    pub level: Number,
    pub severity: Severity,
    pub field_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub data: Option<Json>,
    pub source: String,
    pub tag: Option<IssueTag>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
/// Automatic correction families detected in workflow logs.
pub enum FixCode {
    PageResize,
    BleedAdded,
    Flattening,
    RichBlackFix,
    FontsOutlined,
    ColorConversion,
}

impl FixCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixCode::PageResize => "pageResize",
            FixCode::BleedAdded => "bleedAdded",
            FixCode::Flattening => "flattening",
            FixCode::RichBlackFix => "richBlackFix",
            FixCode::FontsOutlined => "fontsOutlined",
            FixCode::ColorConversion => "colorConversion",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
/// Evidence snapshot kept alongside a fix for downstream inspection.
pub struct FixEvidence {
    pub workflow: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One detected automatic correction.
pub struct FixRecord {
    pub code: FixCode,
    pub label: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<u32>>,
    pub raw: FixEvidence,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
/// File identity and physical format recovered from the log.
pub struct MetaRecord {
    pub file_name: Option<String>,
    pub page_count: Option<u64>,
    pub trim_width_mm: Option<f64>,
    pub trim_height_mm: Option<f64>,
    pub all_pages_same_dimension: Option<bool>,
    pub impression: Option<String>,
    pub original_link: Option<String>,
    pub final_link: Option<String>,
    pub status: Option<Json>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Width/height pair in millimeters.
pub struct Dimensions {
    pub width_mm: f64,
    pub height_mm: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
/// Requested vs achieved trim format, derived only from resize evidence.
pub struct FormatRecord {
    pub requested: Option<Dimensions>,
    #[serde(rename = "final")]
    pub final_size: Option<Dimensions>,
    pub auto_resize_done: bool,
    pub auto_resize_blocked: bool,
    pub would_exceed_max_skew: bool,
    pub proportion_gap_percent: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
/// Exact lengths of the report sequences.
pub struct Stats {
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub fixes_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
/// Canonical report distilled from one raw log snapshot.
pub struct Report {
    pub meta: MetaRecord,
    pub errors: Vec<IssueRecord>,
    pub warnings: Vec<IssueRecord>,
    pub infos: Vec<IssueRecord>,
    pub fixes: Vec<FixRecord>,
    pub format: FormatRecord,
    pub stats: Stats,
}

impl Report {
    /// Iterate every issue in report order: errors, warnings, then infos.
    pub fn issues(&self) -> impl Iterator<Item = &IssueRecord> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.infos.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::from_level(0.0), Severity::Info);
        assert_eq!(Severity::from_level(0.5), Severity::Info);
        assert_eq!(Severity::from_level(1.0), Severity::Warning);
        assert_eq!(Severity::from_level(1.5), Severity::Info);
        assert_eq!(Severity::from_level(2.0), Severity::Error);
        assert_eq!(Severity::from_level(7.0), Severity::Error);
        assert_eq!(Severity::from_level(-1.0), Severity::Info);
    }

    #[test]
    fn test_default_report_shape() {
        let out = serde_json::to_value(Report::default()).unwrap();
        assert!(out["meta"]["fileName"].is_null());
        assert!(out["format"]["final"].is_null());
        assert_eq!(out["format"]["autoResizeBlocked"], false);
        assert!(out["format"]["proportionGapPercent"].is_null());
        assert_eq!(out["stats"]["fixesCount"], 0);
        assert_eq!(out["errors"].as_array().map(|a| a.len()), Some(0));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(IssueTag::ImageResolution).unwrap(),
            "imageResolution"
        );
        assert_eq!(serde_json::to_value(FixCode::RichBlackFix).unwrap(), "richBlackFix");
        assert_eq!(serde_json::to_value(Severity::Warning).unwrap(), "warning");
    }
}
