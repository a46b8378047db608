//! Help-link resolution from a finished report.
//!
//! Each issue and fix is matched against a handful of topics by tag, fix code
//! or message keyword. Links are deduplicated by topic in first-seen order;
//! topics missing from the catalog produce nothing.

use crate::models::links::{HelpCatalog, HelpLink};
use crate::models::{FixCode, IssueTag, Report};

pub const TOPIC_IMAGE_RESOLUTION: &str = "imageResolution";
pub const TOPIC_RICH_BLACK: &str = "richBlack";
pub const TOPIC_FONTS_NOT_EMBEDDED: &str = "fontsNotEmbedded";
pub const TOPIC_DISTORTION: &str = "distortion";
pub const TOPIC_BLEED: &str = "bleed";

/// Topics suggested for a single item, in evaluation order.
fn topics_for(tag: Option<IssueTag>, code: Option<FixCode>, message: &str) -> Vec<&'static str> {
    let msg = message.to_lowercase();
    let mut out = Vec::new();
    if tag == Some(IssueTag::ImageResolution) || msg.contains("dpi") {
        out.push(TOPIC_IMAGE_RESOLUTION);
    }
    if tag == Some(IssueTag::RichBlack) || msg.contains("rich black") {
        out.push(TOPIC_RICH_BLACK);
    }
    if msg.contains("font") || msg.contains("not embedded") {
        out.push(TOPIC_FONTS_NOT_EMBEDDED);
    }
    if msg.contains("distortion") {
        out.push(TOPIC_DISTORTION);
    }
    if tag == Some(IssueTag::Bleed) || code == Some(FixCode::BleedAdded) {
        out.push(TOPIC_BLEED);
    }
    out
}

/// Resolve help links for `report` in language `lang`.
pub fn resolve_help_links(report: &Report, catalog: &HelpCatalog, lang: &str) -> Vec<HelpLink> {
    let issue_topics = report
        .issues()
        .flat_map(|is| topics_for(is.tag, None, &is.message));
    let fix_topics = report
        .fixes
        .iter()
        .flat_map(|f| topics_for(None, Some(f.code), ""));

    let mut seen: Vec<&str> = Vec::new();
    let mut links = Vec::new();
    for topic in issue_topics.chain(fix_topics) {
        if seen.contains(&topic) {
            continue;
        }
        seen.push(topic);
        if let Some(entry) = catalog.lookup(topic, lang) {
            links.push(HelpLink {
                code: topic.to_string(),
                url: entry.url.clone(),
                label: entry.label.clone(),
            });
        }
    }
    links
}
