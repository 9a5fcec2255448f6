//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and subcommands
//! using the [clap](https://docs.rs/clap/) library.
//!
//! [`Cli::run_options`] accepts a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pipeline_artifacts::config::{FileConfig, LogLevel, RunOptions, expand_tilde};

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a YAML configuration file and print it as JSON
    Yaml {
        /// Path to the YAML file
        path: PathBuf,

        /// Print only the value at this dotted key (e.g. `data_ingestion.root_dir`)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },

    /// Load a JSON artifact and print it
    Json {
        /// Path to the JSON file
        path: PathBuf,

        /// Print only the value at this dotted key (e.g. `metrics.accuracy`)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },

    /// Create directories, including missing parents
    ///
    /// Directories that already exist are left alone.
    Mkdirs {
        /// Directories to create, in order
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Print the size of a file as "~ N KB"
    Size {
        /// Path to the file
        path: PathBuf,
    },

    /// Encode a file (typically an image) as base64
    Encode {
        /// File to encode
        path: PathBuf,

        /// Write the encoded text here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Decode base64 text into a file
    Decode {
        /// File to write the decoded bytes to
        destination: PathBuf,

        /// Read the encoded text from this file instead of stdin
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,
    },

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values
/// act as defaults when the corresponding CLI argument is not provided.
#[derive(Parser, Debug)]
#[command(name = "pipeline-artifacts")]
#[command(
    about = "Load and save ML pipeline artifacts: YAML config, JSON, directories, file sizes and base64 images"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,

    /// Directory that relative paths are resolved against
    ///
    /// Overrides `root` from the config file. Absolute paths are never rewritten.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Don't log each directory created by `mkdirs`
    #[arg(short = 'q', long, global = true)]
    quiet: bool,
}

impl Cli {
    /// Resolve run options from CLI args and config file.
    ///
    /// - **`log_level`**: CLI > config > `info`
    /// - **verbose**: `false` if `--quiet`, else config value, else `true`
    /// - **root**: CLI > config (tilde-expanded) > none
    #[must_use]
    pub fn run_options(&self, config: &FileConfig) -> RunOptions {
        RunOptions {
            log_level: self.log_level.or(config.logging.level).unwrap_or_default(),
            verbose: !self.quiet && config.directories.verbose.unwrap_or(true),
            root: self
                .root
                .clone()
                .or_else(|| config.root.as_deref().map(expand_tilde)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_artifacts::config::file::{FileDirectoriesConfig, FileLoggingConfig};

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["pipeline-artifacts", "size", "model.h5"]);
        let options = args.run_options(&FileConfig::default());

        assert_eq!(options, RunOptions::default());
        assert!(matches!(args.command, Commands::Size { path } if path == PathBuf::from("model.h5")));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["pipeline-artifacts"]).is_err());
    }

    #[test]
    fn test_yaml_key_flag() {
        let args = Cli::parse_from([
            "pipeline-artifacts",
            "yaml",
            "config/config.yaml",
            "-k",
            "data_ingestion.root_dir",
        ]);
        match args.command {
            Commands::Yaml { path, key } => {
                assert_eq!(path, PathBuf::from("config/config.yaml"));
                assert_eq!(key.as_deref(), Some("data_ingestion.root_dir"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_mkdirs_requires_paths() {
        assert!(Cli::try_parse_from(["pipeline-artifacts", "mkdirs"]).is_err());

        let args = Cli::parse_from(["pipeline-artifacts", "mkdirs", "a", "b/c"]);
        match args.command {
            Commands::Mkdirs { paths } => {
                assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("b/c")]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_decode_input_flag() {
        let args = Cli::parse_from(["pipeline-artifacts", "decode", "out.jpg", "-i", "payload.txt"]);
        match args.command {
            Commands::Decode { destination, input } => {
                assert_eq!(destination, PathBuf::from("out.jpg"));
                assert_eq!(input, Some(PathBuf::from("payload.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_config_subcommands() {
        for (name, expected) in [
            ("show", ConfigCommand::Show),
            ("init", ConfigCommand::Init),
            ("path", ConfigCommand::Path),
        ] {
            let args = Cli::parse_from(["pipeline-artifacts", "config", name]);
            assert!(matches!(args.command, Commands::Config { command } if command == expected));
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Cli::parse_from([
            "pipeline-artifacts",
            "mkdirs",
            "artifacts",
            "--quiet",
            "--log-level",
            "debug",
        ]);
        let options = args.run_options(&FileConfig::default());

        assert!(!options.verbose);
        assert_eq!(options.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_config_values_used_when_cli_silent() {
        let args = Cli::parse_from(["pipeline-artifacts", "size", "a"]);
        let config = FileConfig {
            root: Some(PathBuf::from("/srv/pipeline")),
            logging: FileLoggingConfig {
                level: Some(LogLevel::Warn),
            },
            directories: FileDirectoriesConfig {
                verbose: Some(false),
            },
        };

        let options = args.run_options(&config);
        assert_eq!(options.log_level, LogLevel::Warn);
        assert!(!options.verbose);
        assert_eq!(options.root, Some(PathBuf::from("/srv/pipeline")));
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = Cli::parse_from([
            "pipeline-artifacts",
            "--log-level",
            "error",
            "--root",
            "/data",
            "size",
            "a",
        ]);
        let config = FileConfig {
            root: Some(PathBuf::from("/srv/pipeline")),
            logging: FileLoggingConfig {
                level: Some(LogLevel::Trace),
            },
            ..FileConfig::default()
        };

        let options = args.run_options(&config);
        assert_eq!(options.log_level, LogLevel::Error);
        assert_eq!(options.root, Some(PathBuf::from("/data")));
    }

    #[test]
    fn test_config_root_is_tilde_expanded() {
        let args = Cli::parse_from(["pipeline-artifacts", "size", "a"]);
        let config = FileConfig {
            root: Some(PathBuf::from("~/pipelines")),
            ..FileConfig::default()
        };

        if let Some(home) = dirs::home_dir() {
            assert_eq!(args.run_options(&config).root, Some(home.join("pipelines")));
        }
    }
}
