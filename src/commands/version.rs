//! Command: print version information.

/// Print the lintrc version to stdout.
pub fn run() {
    let version = option_env!("LINTRC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    super::emit(&format!("lintrc {version}"));
}
