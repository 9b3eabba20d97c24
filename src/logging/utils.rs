//! Log file location, ANSI stripping and timestamps.
use std::path::PathBuf;

/// Remove CSI escape sequences (`ESC [ ... final-byte`) from `s`.
///
/// A lone `ESC` followed by any other character drops both.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            let _ = chars.by_ref().find(|inner| ('@'..='~').contains(inner));
        }
    }
    out
}

/// Cache root: `$XDG_CACHE_HOME`, else `$HOME/.cache`.
fn cache_root() -> Option<PathBuf> {
    std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
}

/// `<cache root>/lintrc/<command>.log`, creating the directory.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = cache_root()?.join("lintrc");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn timestamp(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}
