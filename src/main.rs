//! Experience matcher: select and pitch the work experiences that fit a job

use clap::Parser;
use experience_matcher::cli::{self, Cli, Commands, ConfigAction};
use experience_matcher::config::{Config, OutputFormat};
use experience_matcher::input::InputManager;
use experience_matcher::output::{save_report_to_file, ReportGenerator};
use experience_matcher::processing::presentation::date_range;
use experience_matcher::{AnalysisEngine, Experience, JobPosting, MatcherError, Result};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

const RECORD_EXTENSIONS: &[&str] = &["json", "toml"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Match {
            experiences,
            job,
            user_skills,
            max,
            output,
            save,
            detailed,
        } => {
            info!("Starting experience matching");

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;
            let use_colors = config.output.color_output && save.is_none();

            let (experiences, job) = load_records(&experiences, &job).await?;
            let engine = AnalysisEngine::new(config)?;
            let user_skills: Vec<String> = user_skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();

            let report = engine.build_report(&experiences, &job, &user_skills, max);
            let generator = ReportGenerator::with_options(use_colors, detailed, true, true);
            let content = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&content, &path)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Score { experiences, job, output } => {
            let output_format = cli::parse_output_format(&output).map_err(MatcherError::InvalidInput)?;
            let (experiences, job) = load_records(&experiences, &job).await?;
            let engine = AnalysisEngine::new(config)?;

            let scored = engine.select_relevant_experiences(&experiences, &job, &[], Some(experiences.len()));

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&scored)?),
                _ => {
                    println!("📊 Relevance for {} at {}\n", job.title, job.company);
                    for (i, entry) in scored.iter().enumerate() {
                        println!(
                            "  {}. [{:>3}%] {:<6} {} at {} ({})",
                            i + 1,
                            entry.relevance.score,
                            entry.relevance.priority.to_string(),
                            entry.experience.title,
                            entry.experience.company,
                            date_range(entry.experience.start_date, entry.experience.end_date)
                        );
                        for reason in &entry.relevance.reasons {
                            println!("         - {}", reason);
                        }
                    }
                }
            }
        }

        Commands::Present { experiences, job, id } => {
            let (experiences, job) = load_records(&experiences, &job).await?;
            let engine = AnalysisEngine::new(config)?;

            let experience = find_experience(&experiences, &id)?;
            for presentation in engine.generate_alternative_presentations(experience, &job).iter() {
                println!("▓ {} ({})", presentation.title, presentation.format);
                println!("  Best for: {}", presentation.best_for);
                for line in presentation.content.lines() {
                    println!("    {}", line);
                }
                println!();
            }
        }

        Commands::Config { action } => {
            let path = config_file.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Config File: {}", path.display());
                    println!("\nScoring Weights:");
                    println!("  Title: {:.0}", config.scoring.title_weight);
                    println!("  Keywords: {:.0}", config.scoring.keyword_weight);
                    println!("  Skills: {:.0}", config.scoring.skill_weight);
                    println!("  Industry bonus: {:.0}", config.scoring.industry_bonus);
                    println!("  Recency window: {:.0} years", config.scoring.recency_window_years);
                    println!("\nSelection:");
                    println!("  Max experiences: {}", config.selection.max_experiences);
                    println!("  Suggestion minimum score: {}", config.selection.suggestion_min_score);
                    println!("  Max suggestions: {}", config.selection.max_suggestions);
                    println!("\nOutput: {:?}", config.output.format);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

async fn load_records(experiences_path: &Path, job_path: &Path) -> Result<(Vec<Experience>, JobPosting)> {
    cli::validate_file_extension(experiences_path, RECORD_EXTENSIONS)
        .map_err(|e| MatcherError::InvalidInput(format!("Experiences file: {}", e)))?;
    cli::validate_file_extension(job_path, RECORD_EXTENSIONS)
        .map_err(|e| MatcherError::InvalidInput(format!("Job file: {}", e)))?;

    let mut input_manager = InputManager::new();
    let experiences = input_manager.load_experiences(experiences_path).await?;
    let job = input_manager.load_job(job_path).await?;

    Ok((experiences, job))
}

fn find_experience<'a>(experiences: &'a [Experience], id: &str) -> Result<&'a Experience> {
    experiences
        .iter()
        .find(|experience| experience.id == id)
        .ok_or_else(|| MatcherError::InvalidInput(format!("No experience with id '{}'", id)))
}
