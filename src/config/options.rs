//! Resolved runtime options for the command-line front end.
//!
//! [`RunOptions`] is what remains after CLI arguments have been layered over
//! the configuration file and the hardcoded defaults.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

/// Verbosity of the log output.
///
/// Spelled in lowercase both on the command line and in the config file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Errors and warnings
    Warn,

    /// One line per loaded or saved artifact
    #[default]
    Info,

    /// Include debugging detail
    Debug,

    /// Everything
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Options that control a single command-line run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Default log level when `RUST_LOG` is not set
    pub log_level: LogLevel,

    /// Whether directory creation logs each created path
    pub verbose: bool,

    /// Directory that relative paths are resolved against (None = current directory)
    pub root: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            verbose: true,
            root: None,
        }
    }
}

impl RunOptions {
    /// Resolve `path` against [`RunOptions::root`].
    ///
    /// Absolute paths, and every path when no root is configured, are
    /// returned unchanged.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RunOptions::default();
        assert_eq!(options.log_level, LogLevel::Info);
        assert!(options.verbose);
        assert!(options.root.is_none());
    }

    #[test]
    fn test_resolve_without_root() {
        let options = RunOptions::default();
        assert_eq!(
            options.resolve(Path::new("artifacts/scores.json")),
            PathBuf::from("artifacts/scores.json")
        );
    }

    #[test]
    fn test_resolve_relative_against_root() {
        let options = RunOptions {
            root: Some(PathBuf::from("/srv/pipeline")),
            ..RunOptions::default()
        };
        assert_eq!(
            options.resolve(Path::new("config/config.yaml")),
            PathBuf::from("/srv/pipeline/config/config.yaml")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_absolute_ignores_root() {
        let options = RunOptions {
            root: Some(PathBuf::from("/srv/pipeline")),
            ..RunOptions::default()
        };
        assert_eq!(
            options.resolve(Path::new("/tmp/input.jpg")),
            PathBuf::from("/tmp/input.jpg")
        );
    }

    #[test]
    fn test_log_level_directives() {
        assert_eq!(LogLevel::Error.as_directive(), "error");
        assert_eq!(LogLevel::Info.as_directive(), "info");
        assert_eq!(LogLevel::Trace.as_directive(), "trace");
        assert_eq!(LogLevel::from_str("WARN", true), Ok(LogLevel::Warn));
        assert!(LogLevel::from_str("loud", true).is_err());
    }

    #[derive(Deserialize)]
    struct Wrapper {
        level: LogLevel,
    }

    #[test]
    fn test_log_level_deserializes_lowercase() {
        let parsed: Wrapper = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(parsed.level, LogLevel::Debug);
        assert!(toml::from_str::<Wrapper>("level = \"chatty\"").is_err());
    }
}
