//! Lore Site CLI
//!
//! Thin wrapper around loresite-core for build-time use.
//!
//! ## Usage
//!
//! ```bash
//! # Print the header fragment for the party page
//! loresite header --page job
//!
//! # Pre-render the header into a page that carries the placeholder
//! loresite inject --page monster --input monster.html --output dist/monster.html
//!
//! # Show the default mobile UI config, or check an override
//! loresite config
//! loresite config --check mobile.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loresite_core::{inject_header, ActivePage, HeaderTemplate, UiConfig};

/// Lore Site - header and mobile UI tooling
#[derive(Parser)]
#[command(name = "loresite")]
#[command(version = "0.1.0")]
#[command(about = "Lore Site - header and mobile UI tooling")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the navigation header fragment
    Header {
        /// Active page: job, character, faction, monster or none
        #[arg(short, long, default_value = "none")]
        page: String,

        /// Header template JSON (defaults to the live site)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the header placeholder in a page file
    Inject {
        /// Active page: job, character, faction, monster or none
        #[arg(short, long)]
        page: String,

        /// Page containing `<!-- loresite:header -->`
        #[arg(short, long)]
        input: PathBuf,

        /// Destination (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Header template JSON (defaults to the live site)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Print the default mobile UI config, or validate a config file
    Config {
        /// Config JSON to validate
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Resolve a page tag; unknown tags render without an active entry.
fn parse_page(tag: &str) -> ActivePage {
    match tag.parse::<ActivePage>() {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(tag, error = %e, "rendering header without an active entry");
            ActivePage::None
        }
    }
}

fn load_template(path: Option<&Path>) -> Result<HeaderTemplate> {
    let Some(path) = path else {
        return Ok(HeaderTemplate::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid template {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Header {
            page,
            template,
            output,
        } => {
            let template = load_template(template.as_deref())?;
            let html = template.render(parse_page(&page));

            match output {
                Some(path) => {
                    fs::write(&path, &html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "header written");
                    println!("Wrote header for '{}' to {}", page, path.display());
                }
                None => print!("{}", html),
            }
        }

        Commands::Inject {
            page,
            input,
            output,
            template,
        } => {
            let template = load_template(template.as_deref())?;
            let source = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let rendered = inject_header(&source, &template.render(parse_page(&page)))
                .with_context(|| format!("Cannot inject header into {}", input.display()))?;

            let destination = output.unwrap_or_else(|| input.clone());
            fs::write(&destination, rendered)
                .with_context(|| format!("Failed to write {}", destination.display()))?;
            println!("Injected header for '{}' into {}", page, destination.display());
        }

        Commands::Config { check } => match check {
            Some(path) => {
                let json = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let config = UiConfig::from_json(&json)
                    .with_context(|| format!("Invalid config {}", path.display()))?;
                println!("Config OK: {}", path.display());
                println!("  Breakpoint: {}px", config.breakpoint);
                println!("  Settle window: {}ms", config.settle_ms);
                println!("  Swipe threshold: {}px", config.swipe_threshold);
                println!("  Parallax speed: {}", config.parallax_speed);
            }
            None => println!("{}", UiConfig::default().to_json_pretty()?),
        },
    }

    Ok(())
}
