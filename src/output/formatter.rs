//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::analyzer::MatchReport;
use crate::processing::presentation::date_range;
use crate::processing::relevance::Priority;
use crate::processing::requirements::ConnectionStrength;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for notes and cover letter drafts
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_priority_badge(&self, priority: Priority) -> String {
        let color = match priority {
            Priority::High => Color::Green,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Red,
        };
        let label = priority.to_string().to_uppercase();

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(
            &format!("EXPERIENCE MATCH: {} at {}", report.job_title, report.job_company),
            1,
        ));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.processing_time_ms
        ));

        // Package summary
        output.push_str(&self.format_header("Package Score", 2));
        output.push_str(&format!(
            "Overall: {}% | Requirement coverage: {}%\n",
            report.package.overall_score, report.package.coverage
        ));
        output.push_str(&format!(
            "{}\n",
            self.colorize(&report.package.recommendation, Color::Cyan)
        ));
        for strength in &report.package.strengths {
            output.push_str(&format!("  + {}\n", self.colorize(strength, Color::Green)));
        }
        if !report.package.gaps.is_empty() {
            output.push_str(&format!(
                "  Missing skills: {}\n",
                self.colorize(&report.package.gaps.join(", "), Color::Yellow)
            ));
        }

        // Selected experiences
        output.push_str(&self.format_header("Selected Experiences", 2));
        if report.selected.is_empty() {
            output.push_str("  No experiences supplied.\n");
        }
        for (i, scored) in report.selected.iter().enumerate() {
            let experience = &scored.experience;
            output.push_str(&format!(
                "{}. {} at {} ({}) {}% {}\n",
                i + 1,
                experience.title,
                experience.company,
                date_range(experience.start_date, experience.end_date),
                scored.relevance.score,
                self.format_priority_badge(scored.relevance.priority)
            ));
            for reason in &scored.relevance.reasons {
                output.push_str(&format!("     - {}\n", reason));
            }
            if self.detailed && !scored.relevance.matched_skills.is_empty() {
                output.push_str(&format!(
                    "     Skills: {}\n",
                    scored.relevance.matched_skills.join(", ")
                ));
            }
            if self.detailed && !scored.relevance.matched_keywords.is_empty() {
                output.push_str(&format!(
                    "     Keywords: {}\n",
                    scored.relevance.matched_keywords.join(", ")
                ));
            }
        }

        // Requirement coverage
        if !report.connections.is_empty() {
            output.push_str(&self.format_header("Requirement Coverage", 2));
            for connection in &report.connections {
                let strength = match connection.strength {
                    ConnectionStrength::Strong => self.colorize("strong", Color::Green),
                    ConnectionStrength::Moderate => self.colorize("moderate", Color::Yellow),
                };
                let sources = connection
                    .experiences
                    .iter()
                    .map(|e| format!("{} @ {}", e.title, e.company))
                    .collect::<Vec<_>>()
                    .join("; ");
                output.push_str(&format!("  • {} [{}] ← {}\n", connection.requirement, strength, sources));
                for achievement in &connection.relevant_achievements {
                    output.push_str(&format!("      ✓ {}\n", achievement));
                }
            }
        }

        // Narratives
        output.push_str(&self.format_header("Talking Points", 2));
        for entry in &report.narratives {
            output.push_str(&self.format_header(&format!("{} at {}", entry.title, entry.company), 3));
            let narratives = if self.detailed {
                &entry.narratives[..]
            } else {
                &entry.narratives[..entry.narratives.len().min(2)]
            };
            for narrative in narratives {
                output.push_str(&format!(
                    "  {} {}\n",
                    self.colorize(&format!("({})", narrative.style), Color::Magenta),
                    narrative.text
                ));
            }
        }

        // Suggestions
        if !report.suggestions.is_empty() {
            output.push_str(&self.format_header("Also Worth Including", 2));
            for suggestion in &report.suggestions {
                output.push_str(&format!(
                    "  • {} at {} ({}%): {}\n",
                    suggestion.experience.title,
                    suggestion.experience.company,
                    suggestion.relevance.score,
                    suggestion.reason
                ));
            }
        }

        // Presentations
        if self.detailed {
            output.push_str(&self.format_header("Presentation Options", 2));
            for entry in &report.presentations {
                for presentation in &entry.presentations {
                    output.push_str(&format!(
                        "\n  [{}] {}  ({})\n",
                        presentation.format,
                        self.colorize(&presentation.title, Color::Cyan),
                        presentation.best_for
                    ));
                    for line in presentation.content.lines() {
                        output.push_str(&format!("    {}\n", line));
                    }
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!(
            "# Experience Match: {} at {}\n\n",
            report.job_title, report.job_company
        ));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.processing_time_ms
            ));
        }

        output.push_str("## Package Score\n\n");
        output.push_str(&format!(
            "**Overall:** {}% | **Coverage:** {}%\n\n",
            report.package.overall_score, report.package.coverage
        ));
        output.push_str(&format!("> {}\n\n", report.package.recommendation));
        if !report.package.gaps.is_empty() {
            output.push_str(&format!("**Missing skills:** {}\n\n", report.package.gaps.join(", ")));
        }

        output.push_str("## Selected Experiences\n\n");
        output.push_str("| # | Experience | Score | Priority | Matched Skills |\n");
        output.push_str("|---|------------|-------|----------|----------------|\n");
        for (i, scored) in report.selected.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} at {} | {}% | {} | {} |\n",
                i + 1,
                scored.experience.title,
                scored.experience.company,
                scored.relevance.score,
                scored.relevance.priority,
                scored.relevance.matched_skills.join(", ")
            ));
        }
        output.push('\n');

        if !report.connections.is_empty() {
            output.push_str("## Requirement Coverage\n\n");
            for connection in &report.connections {
                let strength = match connection.strength {
                    ConnectionStrength::Strong => "strong",
                    ConnectionStrength::Moderate => "moderate",
                };
                output.push_str(&format!("- **{}** ({})\n", connection.requirement, strength));
                for achievement in &connection.relevant_achievements {
                    output.push_str(&format!("  - {}\n", achievement));
                }
            }
            output.push('\n');
        }

        output.push_str("## Talking Points\n\n");
        for entry in &report.narratives {
            output.push_str(&format!("### {} at {}\n\n", entry.title, entry.company));
            for narrative in &entry.narratives {
                output.push_str(&format!("- *{}*: {}\n", narrative.style, narrative.text));
            }
            output.push('\n');
        }

        if !report.suggestions.is_empty() {
            output.push_str("## Also Worth Including\n\n");
            for suggestion in &report.suggestions {
                output.push_str(&format!(
                    "- {} at {} ({}%): {}\n",
                    suggestion.experience.title,
                    suggestion.experience.company,
                    suggestion.relevance.score,
                    suggestion.reason
                ));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
