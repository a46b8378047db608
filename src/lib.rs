//! Presslog core library.
//!
//! This crate distills raw prepress pipeline logs (workflows → steps →
//! actions with free-form validations and results) into a canonical
//! [`models::Report`]: classified issues, detected automatic fixes, resolved
//! page format and summary statistics. The pipeline is a pure, deterministic
//! function of its input and never fails; malformed shapes degrade to
//! defaults.
//!
//! Entry points:
//! - [`report::digest`] / [`report::digest_str`]: raw log in, report out.
//! - [`summary::render_summary`]: report in, plain-text summary out.
//! - [`links::resolve_help_links`]: report in, localized help links out.
//!
//! High-level modules:
//! - `coerce`: Tolerant JSON accessors (coercion, dual-casing lookup).
//! - `validations`: Validation normalization, severity and tagging.
//! - `meta`: File identity and trim format recovery.
//! - `tree`: Workflow/step/action traversal.
//! - `fixes`: Automatic fix detection and deduplication.
//! - `format`: Requested vs achieved format reconciliation.
//! - `report`: Pipeline assembly.
//! - `digest`: Batch processing of log files on disk.
//! - `cli`, `config`, `output`, `utils`, `error`: Binary support.
pub mod cli;
pub mod coerce;
pub mod config;
pub mod digest;
pub mod error;
pub mod fixes;
pub mod format;
pub mod links;
pub mod meta;
pub mod models;
pub mod output;
pub mod report;
pub mod summary;
pub mod tree;
pub mod utils;
pub mod validations;
