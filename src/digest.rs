//! Batch driver: expands patterns under a root and digests every log file.
//!
//! Files are read and processed in parallel; results are sorted by display
//! path so output is deterministic. I/O and pattern failures are collected as
//! errors next to the successful results.

use crate::error::DigestError;
use crate::models::Report;
use crate::report::digest_str;
use crate::utils::{display_path, is_glob};
use glob::glob;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Report produced for one log file.
pub struct DigestResult {
    pub file: String,
    pub report: Report,
}

/// Expand `patterns` relative to `root` into a sorted, deduplicated file list.
pub fn collect_targets(root: &Path, patterns: &[String]) -> (Vec<PathBuf>, Vec<DigestError>) {
    let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
    let mut errors = Vec::new();
    for pat in patterns {
        let abs = root.join(pat);
        if !is_glob(pat) {
            if abs.is_file() {
                targets.insert(abs);
            } else {
                errors.push(DigestError::NotFound {
                    pattern: pat.clone(),
                });
            }
            continue;
        }
        let pattern = abs.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(paths) => {
                let matched: Vec<PathBuf> = paths.flatten().filter(|p| p.is_file()).collect();
                if matched.is_empty() {
                    errors.push(DigestError::NotFound {
                        pattern: pat.clone(),
                    });
                }
                targets.extend(matched);
            }
            Err(e) => errors.push(DigestError::Glob {
                pattern: pat.clone(),
                message: e.to_string(),
            }),
        }
    }
    (targets.into_iter().collect(), errors)
}

/// Digest every file matched by `patterns` under `root`.
pub fn run_digest(root: &Path, patterns: &[String]) -> (Vec<DigestResult>, Vec<DigestError>) {
    let (targets, mut errors) = collect_targets(root, patterns);

    let per_file: Vec<Result<DigestResult, DigestError>> = targets
        .par_iter()
        .map(|path| digest_file(path, root))
        .collect();

    let mut results = Vec::new();
    for r in per_file {
        match r {
            Ok(d) => results.push(d),
            Err(e) => errors.push(e),
        }
    }
    results.sort_by(|a, b| a.file.cmp(&b.file));
    (results, errors)
}

/// Read and digest a single file. Content problems never fail; only I/O does.
pub fn digest_file(path: &Path, root: &Path) -> Result<DigestResult, DigestError> {
    let data = fs::read_to_string(path).map_err(|source| DigestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(DigestResult {
        file: display_path(path, root),
        report: digest_str(&data),
    })
}
