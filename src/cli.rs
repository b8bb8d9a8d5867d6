//! CLI interface for the experience matcher

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "experience-matcher")]
#[command(about = "Match work experiences to a job posting")]
#[command(long_about = "Score, select and present a candidate's work experiences against a job posting using keyword, skill, industry and recency signals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select the best experiences for a job and build a full report
    Match {
        /// Path to experiences file (JSON, TOML)
        #[arg(short, long)]
        experiences: PathBuf,

        /// Path to job posting file (JSON, TOML)
        #[arg(short, long)]
        job: PathBuf,

        /// Comma-separated skills the candidate claims
        #[arg(short, long, value_delimiter = ',')]
        user_skills: Vec<String>,

        /// Maximum number of experiences to select
        #[arg(short, long)]
        max: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Score every experience against a job
    Score {
        /// Path to experiences file (JSON, TOML)
        #[arg(short, long)]
        experiences: PathBuf,

        /// Path to job posting file (JSON, TOML)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show the alternative presentations of one experience
    Present {
        /// Path to experiences file (JSON, TOML)
        #[arg(short, long)]
        experiences: PathBuf,

        /// Path to job posting file (JSON, TOML)
        #[arg(short, long)]
        job: PathBuf,

        /// Identifier of the experience to present
        #[arg(long)]
        id: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
