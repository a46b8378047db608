//! Configuration discovery and effective settings resolution.
//!
//! Presslog reads `presslog.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `output`: `human`
//! - `patterns`: `["**/*.json"]`
//! - `lang` / `fallback_lang`: `fr`
//! - `fail_on_error`: false
//! - `links`: empty catalog
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::DigestError;
use crate::models::links::{HelpCatalog, LinkEntry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_TOML: &str = "presslog.toml";
const CONFIG_YAML: [&str; 2] = ["presslog.yaml", "presslog.yml"];
const DEFAULT_PATTERN: &str = "**/*.json";
const DEFAULT_LANG: &str = "fr";

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `presslog.toml|yaml`.
pub struct PresslogConfig {
    pub output: Option<String>,
    pub patterns: Option<Vec<String>>,
    pub lang: Option<String>,
    pub fallback_lang: Option<String>,
    pub fail_on_error: Option<bool>,
    /// `[links.<code>.<lang>]` entries with `url` and `label`.
    #[serde(default)]
    pub links: BTreeMap<String, BTreeMap<String, LinkEntry>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub output: String,
    pub patterns: Vec<String>,
    pub lang: String,
    pub fail_on_error: bool,
    pub catalog: HelpCatalog,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `presslog.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join(CONFIG_TOML).exists() || CONFIG_YAML.iter().any(|y| cur.join(y).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `PresslogConfig` from `root`, if a config file exists.
///
/// A present but unreadable or invalid file is an error rather than silently
/// falling back to defaults.
pub fn load_config(root: &Path) -> Result<Option<PresslogConfig>, DigestError> {
    let toml_path = root.join(CONFIG_TOML);
    if toml_path.exists() {
        let s = read(&toml_path)?;
        return toml::from_str(&s)
            .map(Some)
            .map_err(|e| config_error(&toml_path, e));
    }
    for yml in CONFIG_YAML {
        let p = root.join(yml);
        if p.exists() {
            let s = read(&p)?;
            return serde_yaml::from_str(&s)
                .map(Some)
                .map_err(|e| config_error(&p, e));
        }
    }
    Ok(None)
}

fn read(path: &Path) -> Result<String, DigestError> {
    fs::read_to_string(path).map_err(|source| DigestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn config_error(path: &Path, e: impl std::fmt::Display) -> DigestError {
    DigestError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_patterns: &[String],
    cli_lang: Option<&str>,
    cli_fail_on_error: Option<bool>,
) -> Result<Effective, DigestError> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let patterns = if !cli_patterns.is_empty() {
        cli_patterns.to_vec()
    } else {
        cfg.patterns
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_PATTERN.to_string()])
    };

    let lang = cli_lang
        .map(|s| s.to_string())
        .or(cfg.lang)
        .unwrap_or_else(|| DEFAULT_LANG.to_string());

    let fail_on_error = cli_fail_on_error.or(cfg.fail_on_error).unwrap_or(false);

    let catalog = HelpCatalog {
        entries: cfg.links,
        fallback_lang: cfg
            .fallback_lang
            .unwrap_or_else(|| DEFAULT_LANG.to_string()),
    };

    Ok(Effective {
        repo_root,
        config_found,
        output,
        patterns,
        lang,
        fail_on_error,
        catalog,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("presslog.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
patterns = ["logs/*.json"]
lang = "en"
fail_on_error = true

[links.bleed.en]
url = "https://help.example/en/bleed"
label = "What is bleed?"

[links.bleed.fr]
url = "https://help.example/fond-perdu"
label = "Qu'est-ce que le fond perdu ?"
    "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, &[], None, None).unwrap();
        assert!(eff.config_found);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.patterns, vec!["logs/*.json".to_string()]);
        assert_eq!(eff.lang, "en");
        assert!(eff.fail_on_error);
        assert_eq!(eff.catalog.fallback_lang, "fr");
        assert_eq!(
            eff.catalog.lookup("bleed", "de").map(|e| e.url.as_str()),
            Some("https://help.example/fond-perdu")
        );
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("presslog.yaml"),
            "lang: es\nfallback_lang: en\nlinks:\n  richBlack:\n    en:\n      url: https://h/rb\n      label: Rich black\n",
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, &[], None, None).unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.patterns, vec!["**/*.json".to_string()]);
        assert_eq!(eff.lang, "es");
        assert!(!eff.fail_on_error);
        assert_eq!(
            eff.catalog.lookup("richBlack", "es").map(|e| e.label.as_str()),
            Some("Rich black")
        );
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("presslog.toml"),
            "output = \"json\"\nlang = \"en\"\nfail_on_error = true\n",
        )
        .unwrap();
        let pats = vec!["a.json".to_string()];
        let eff = resolve_effective(root.to_str(), Some("text"), &pats, Some("de"), Some(false))
            .unwrap();
        assert_eq!(eff.output, "text");
        assert_eq!(eff.patterns, pats);
        assert_eq!(eff.lang, "de");
        assert!(!eff.fail_on_error);
    }

    #[test]
    fn test_no_config_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, &[], None, None).unwrap();
        assert!(!eff.config_found);
        assert_eq!(eff.lang, "fr");
        assert!(eff.catalog.entries.is_empty());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("presslog.toml"), "output = [").unwrap();
        let err = resolve_effective(dir.path().to_str(), None, &[], None, None).unwrap_err();
        assert_eq!(err.code(), "E_CONFIG");
    }

    #[test]
    fn test_detect_repo_root_walks_up() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("presslog.toml"), "").unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root.to_path_buf());
    }
}
