//! Alternative renderings of a single experience

use crate::processing::records::{Experience, JobPosting};
use crate::processing::relevance::RelevanceScorer;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationFormat {
    Chronological,
    SkillsFirst,
    AchievementFocused,
    Story,
}

impl std::fmt::Display for PresentationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PresentationFormat::Chronological => "chronological",
            PresentationFormat::SkillsFirst => "skills-first",
            PresentationFormat::AchievementFocused => "achievement-focused",
            PresentationFormat::Story => "story",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub format: PresentationFormat,
    pub title: String,
    pub content: String,
    pub best_for: String,
}

/// Render one experience four ways: chronological, skills-first,
/// achievement-focused and story.
pub fn generate_alternative_presentations(
    scorer: &RelevanceScorer,
    experience: &Experience,
    job: &JobPosting,
) -> [Presentation; 4] {
    let relevance = scorer.analyze_experience_relevance(experience, job, &[]);
    let role = format!("{} at {}", experience.title, experience.company);

    let chronological = Presentation {
        format: PresentationFormat::Chronological,
        title: role.clone(),
        content: join_lines(&[
            date_range(experience.start_date, experience.end_date),
            experience.description.clone(),
        ]),
        best_for: "Traditional resumes and conservative industries".to_string(),
    };

    let skills_title = if relevance.matched_skills.is_empty() {
        "Core Skills".to_string()
    } else {
        relevance
            .matched_skills
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(" • ")
    };
    let mut skills_content = role.clone();
    for achievement in experience.achievements.iter().take(2) {
        skills_content.push_str("\n• ");
        skills_content.push_str(achievement);
    }
    let skills_first = Presentation {
        format: PresentationFormat::SkillsFirst,
        title: skills_title,
        content: skills_content,
        best_for: "Technical roles and skills-based screening".to_string(),
    };

    let achievement_content = if experience.achievements.is_empty() {
        String::new()
    } else {
        format!(
            "• {}",
            experience
                .achievements
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join("\n• ")
        )
    };
    let achievement_focused = Presentation {
        format: PresentationFormat::AchievementFocused,
        title: format!("Key Achievements - {}", experience.company),
        content: achievement_content,
        best_for: "Results-driven roles and senior positions".to_string(),
    };

    let opening = match scorer.processor().first_sentence(&experience.description) {
        Some(clause) => format!(
            "At {}, I stepped into the {} role: {}.",
            experience.company,
            experience.title,
            lowercase_first(&clause)
        ),
        None => format!(
            "At {}, I stepped into the {} role ready to take on new challenges.",
            experience.company, experience.title
        ),
    };
    let outcome = match experience.achievements.first() {
        Some(achievement) => format!("The result: {}.", achievement.trim().trim_end_matches('.')),
        None => "Along the way, I grew my expertise and delivered consistent results for the team.".to_string(),
    };
    let story = Presentation {
        format: PresentationFormat::Story,
        title: format!("{} Journey", experience.title),
        content: format!("{} {}", opening, outcome),
        best_for: "Interviews, cover letters and networking conversations".to_string(),
    };

    [chronological, skills_first, achievement_focused, story]
}

/// `Mon YYYY`, or the fallback when the date is unknown.
pub fn format_date(date: Option<NaiveDate>, fallback: &str) -> String {
    match date {
        Some(date) => date.format("%b %Y").to_string(),
        None => fallback.to_string(),
    }
}

pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let start = format_date(start, "");
    let end = format_date(end, "Present");
    if start.is_empty() {
        end
    } else {
        format!("{} - {}", start, end)
    }
}

fn join_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
