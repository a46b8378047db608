//! Small shared helpers: stderr prefixes, color gating, path display.

use owo_colors::OwoColorize;
use std::path::Path;

/// Whether colored output should be used for the given output mode.
pub fn use_colors(output: &str) -> bool {
    output == "human" && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        label.to_string()
    } else {
        paint(label)
    }
}

pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s| s.yellow().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("info:", |s| s.blue().bold().to_string())
}

/// Display `path` relative to `root` when possible.
pub fn display_path(path: &Path, root: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .filter(|p| !p.as_os_str().is_empty() && !p.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

/// True when `s` contains glob metacharacters.
pub fn is_glob(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_path_relative_and_outside() {
        let root = PathBuf::from("/repo");
        assert_eq!(display_path(Path::new("/repo/logs/a.json"), &root), "logs/a.json");
        assert_eq!(display_path(Path::new("/other/b.json"), &root), "/other/b.json");
    }

    #[test]
    fn test_is_glob() {
        assert!(is_glob("logs/*.json"));
        assert!(is_glob("log?.json"));
        assert!(!is_glob("logs/a.json"));
    }

    #[test]
    fn test_json_never_colored() {
        assert!(!use_colors("json"));
        assert!(!use_colors("text"));
    }
}
