use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use telescope::{Config, ConfigError};

#[derive(Parser)]
#[command(name = "telescope")]
#[command(about = "Turn an indented bullet outline into expandable telescopic text")]
struct Cli {
    /// Input outline file
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Text joining sibling bullets (overrides the config file)
    #[arg(short, long)]
    separator: Option<String>,

    /// Config file
    #[arg(short, long, default_value = "telescope.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Nested expandable spans
    Html,
    /// Flattened base text and substitution rules
    Json,
    /// Parsed outline, re-indented
    Tree,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serializing JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = Config::load(&cli.config)?;
    if let Some(separator) = &cli.separator {
        config.separator = separator.clone();
    }

    let raw = fs::read_to_string(&cli.input).map_err(|source| CliError::Read {
        path: cli.input.clone(),
        source,
    })?;

    let parsed = telescope::parse_outline(&raw);
    if !parsed.invalid_lines.is_empty() {
        info!(
            count = parsed.invalid_lines.len(),
            "skipped lines without a bullet marker"
        );
    }

    let rendered = match cli.format {
        Format::Tree => telescope::outline_to_text(&parsed.nodes),
        Format::Json => {
            let content = telescope::flatten(&parsed.nodes, &config.separator);
            info!(rules = content.rule_count(), "flattened outline");
            let mut json = serde_json::to_string_pretty(&content)?;
            json.push('\n');
            json
        }
        Format::Html => {
            let content = telescope::flatten(&parsed.nodes, &config.separator);
            info!(rules = content.rule_count(), "flattened outline");
            telescope::render_html(&content, &config.render)?
        }
    };

    write_output(cli.output.as_ref(), &rendered)
}

fn write_output(output: Option<&PathBuf>, rendered: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
            info!("Created {}", path.display());
            Ok(())
        }
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .map_err(|source| CliError::Write {
                path: "stdout".to_string(),
                source,
            }),
    }
}
