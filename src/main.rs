//! # pipeline-artifacts
//!
//! Command-line front end for the pipeline artifact helpers: inspect YAML
//! configuration and JSON artifacts, create directory trees, report file
//! sizes, and move images in and out of base64.
//!
//! ## Usage
//!
//! ```bash
//! # Print a configuration value
//! pipeline-artifacts yaml config/config.yaml -k data_ingestion.root_dir
//!
//! # Create the artifact tree
//! pipeline-artifacts mkdirs artifacts/data_ingestion artifacts/training
//!
//! # Ship an image through a text channel and back
//! pipeline-artifacts encode input.jpg -o payload.txt
//! pipeline-artifacts decode restored.jpg -i payload.txt
//! ```

mod cli;

use std::io::{self, Read};
use std::path::Path;
use std::process::exit;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use pipeline_artifacts::{
    Document,
    config::{FileConfig, RunOptions},
    create_directories, decode_image, encode_image_into_base64, get_size, load_json, read_yaml,
    to_pretty_json,
};
use tracing_subscriber::EnvFilter;

/// Entry point for the pipeline-artifacts application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("{} {err:#}", "Error:".red());

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// # Errors
///
/// Returns errors from argument resolution, logging setup, and the artifact
/// operation itself.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Commands::Config { command } = &args.command {
        return handle_config_command(command);
    }

    let file_config = load_config();
    let options = args.run_options(&file_config);
    init_tracing(&options)?;

    run_command(args.command, &options)
}

/// Install the process-wide `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the resolved log level is used.
fn init_tracing(options: &RunOptions) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.log_level.as_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))
}

/// Dispatch an artifact subcommand.
fn run_command(command: Commands, options: &RunOptions) -> Result<()> {
    match command {
        Commands::Yaml { path, key } => {
            let path = options.resolve(&path);
            let document = read_yaml(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            print_document(&document, key.as_deref())
        }
        Commands::Json { path, key } => {
            let path = options.resolve(&path);
            let document = load_json(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            print_document(&document, key.as_deref())
        }
        Commands::Mkdirs { paths } => {
            let paths: Vec<_> = paths.iter().map(|p| options.resolve(p)).collect();
            create_directories(&paths, options.verbose)?;
            Ok(())
        }
        Commands::Size { path } => {
            let path = options.resolve(&path);
            let size = get_size(&path)
                .with_context(|| format!("Failed to read size of {}", path.display()))?;
            println!("{size}");
            Ok(())
        }
        Commands::Encode { path, output } => {
            let encoded = encode_image_into_base64(options.resolve(&path))?;
            match output {
                Some(output) => write_text(&options.resolve(&output), &encoded),
                None => {
                    println!("{encoded}");
                    Ok(())
                }
            }
        }
        Commands::Decode { destination, input } => {
            let encoded = match input {
                Some(input) => {
                    let input = options.resolve(&input);
                    std::fs::read_to_string(&input)
                        .with_context(|| format!("Failed to read {}", input.display()))?
                }
                None => {
                    let mut buffer = String::new();
                    io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read base64 payload from stdin")?;
                    buffer
                }
            };
            decode_image(&encoded, options.resolve(&destination))?;
            Ok(())
        }
        Commands::Config { command } => handle_config_command(&command),
    }
}

/// Print a whole document, or the value at a dotted key, as JSON.
fn print_document(document: &Document, key: Option<&str>) -> Result<()> {
    let text = match key {
        Some(key) => {
            let Some(value) = document.lookup(key) else {
                bail!("Key `{key}` not found");
            };
            to_pretty_json(value)?
        }
        None => to_pretty_json(document)?,
    };
    println!("{text}");
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# pipeline-artifacts configuration
# All values shown are their defaults. Uncomment and change as needed.

# Directory that relative paths on the command line resolve against
# (defaults to the current directory when not set)
# root = "."

[logging]
# Log level when RUST_LOG is not set: error, warn, info, debug, trace
# level = "info"

[directories]
# Log each directory created by `mkdirs`
# verbose = true
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    let root = config.root.as_ref().map_or_else(
        || "\".\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );
    let level = config.logging.level.map_or_else(
        || "\"info\"  (default)".to_string(),
        |v| format!("\"{}\"", v.as_directive()),
    );
    let verbose = config
        .directories
        .verbose
        .map_or_else(|| "true  (default)".to_string(), |v| v.to_string());

    format!(
        "\
root    = {root}

[logging]
level   = {level}

[directories]
verbose = {verbose}"
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        create_directories([parent], false).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    write_text(&path, CONFIG_TEMPLATE)?;

    println!(
        "{} {}",
        "Config file written to:".green(),
        path.display()
    );
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    }
}
