// Shared helpers for integration tests.
//
// Provides a temporary project directory with a configuration file and a
// fluent builder so each integration test can set up an isolated project
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lintrc_cli::cli::GlobalOpts;
use lintrc_cli::commands::CommandSetup;
use lintrc_cli::logging::Logger;

/// An isolated project backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TestProject {
    /// Temporary project directory.
    pub root: tempfile::TempDir,
    /// Path of the configuration file inside `root`.
    pub config: PathBuf,
}

impl TestProject {
    /// Project directory.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Global options pointing `--config` at this project's file.
    pub fn global_opts(&self) -> GlobalOpts {
        GlobalOpts {
            config: Some(self.config.clone()),
        }
    }

    /// Load the configuration and build its registry.
    pub fn setup(&self, log: &Logger) -> CommandSetup {
        CommandSetup::init(&self.global_opts(), log).expect("load project config")
    }
}

/// A logger that records check entries without writing a log file.
pub fn quiet_logger() -> Logger {
    Logger::with_log_file(None)
}

/// Fluent builder for [`TestProject`].
pub struct TestProjectBuilder {
    file_name: &'static str,
    plugins: Vec<String>,
    extra: String,
}

impl TestProjectBuilder {
    /// Begin a project with an empty `.lintrc.toml`.
    pub fn new() -> Self {
        Self {
            file_name: ".lintrc.toml",
            plugins: Vec::new(),
            extra: String::new(),
        }
    }

    /// Append one reference to `plugins`.
    pub fn with_plugin(mut self, reference: &str) -> Self {
        self.plugins.push(reference.to_string());
        self
    }

    /// Append raw TOML after the `plugins` array (presets, merge policy).
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.extra.push_str(toml);
        self.extra.push('\n');
        self
    }

    /// Write `.lintrc.json` instead; raw TOML added via [`Self::with_toml`]
    /// is ignored.
    pub const fn json(mut self) -> Self {
        self.file_name = ".lintrc.json";
        self
    }

    /// Write the configuration file and finalise the project.
    pub fn build(self) -> TestProject {
        let root = tempfile::tempdir().expect("create temp dir");
        let config = root.path().join(self.file_name);
        let content = if self.file_name.ends_with(".json") {
            serde_json::json!({ "plugins": self.plugins }).to_string()
        } else {
            let list: Vec<String> = self
                .plugins
                .iter()
                .map(|p| format!("{p:?}"))
                .collect();
            format!("plugins = [{}]\n{}", list.join(", "), self.extra)
        };
        std::fs::write(&config, content).expect("write config file");
        TestProject { root, config }
    }
}
