//! Page format reconciliation.
//!
//! Compares the requested trim size (from meta) with the size reported by
//! the first page-resize fix. Without such a fix every derived field stays
//! at its non-alarming default.

use crate::coerce::{is_true, number};
use crate::models::{Dimensions, FixCode, FixRecord, FormatRecord, MetaRecord};

/// Derive the format record from meta and the detected fixes.
pub fn reconcile_format(meta: &MetaRecord, fixes: &[FixRecord]) -> FormatRecord {
    let requested = match (meta.trim_width_mm, meta.trim_height_mm) {
        (Some(w), Some(h)) if w != 0.0 && h != 0.0 => Some(Dimensions {
            width_mm: w,
            height_mm: h,
        }),
        _ => None,
    };
    let mut format = FormatRecord {
        requested,
        ..FormatRecord::default()
    };

    let Some(results) = fixes
        .iter()
        .filter(|f| f.code == FixCode::PageResize)
        .find_map(|f| f.raw.results.as_ref())
    else {
        return format;
    };

    let final_size = match (number(results.get("NewWidth")), number(results.get("NewHeight"))) {
        (Some(w), Some(h)) => Some(Dimensions {
            width_mm: w,
            height_mm: h,
        }),
        _ => None,
    };
    let success = is_true(results.get("Success"));
    let would_exceed = is_true(results.get("WouldExceedMaxSkew"));

    format.final_size = final_size;
    format.auto_resize_done = success;
    format.would_exceed_max_skew = would_exceed;
    format.auto_resize_blocked = !success || would_exceed;
    if let (Some(req), Some(fin)) = (requested, final_size) {
        format.proportion_gap_percent = Some(proportion_gap(req, fin));
    }
    format
}

/// Largest per-axis deviation of `fin` from `req`, in percent.
pub fn proportion_gap(req: Dimensions, fin: Dimensions) -> f64 {
    let gap_w = (fin.width_mm - req.width_mm).abs() / req.width_mm * 100.0;
    let gap_h = (fin.height_mm - req.height_mm).abs() / req.height_mm * 100.0;
    gap_w.max(gap_h)
}
