//! Experience-to-job relevance scoring, selection and suggestions

use crate::config::{Config, ScoringConfig, SelectionConfig};
use crate::error::Result;
use crate::processing::records::{Experience, JobPosting};
use crate::processing::skill_matcher::SkillMatcher;
use crate::processing::text_processor::TextProcessor;
use aho_corasick::AhoCorasick;
use chrono::{Datelike, Local};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const FALLBACK_SUGGESTION_REASON: &str = "Related experience that may strengthen your application";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => Priority::High,
            40..=69 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevanceAnalysis {
    /// Composite fit, 0 to 100
    pub score: u8,
    pub matched_keywords: Vec<String>,
    pub matched_skills: Vec<String>,
    pub reasons: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredExperience {
    #[serde(flatten)]
    pub experience: Experience,
    pub relevance: RelevanceAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub experience: Experience,
    pub relevance: RelevanceAnalysis,
    pub reason: String,
}

/// Scores experiences against a job posting from five additive signals:
/// title similarity, keyword overlap, skill overlap, industry and recency.
pub struct RelevanceScorer {
    processor: TextProcessor,
    skill_matcher: SkillMatcher,
    scoring: ScoringConfig,
    selection: SelectionConfig,
    reference_year: i32,
}

impl RelevanceScorer {
    /// Create a scorer with default vocabularies and weights
    pub fn new() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_components(
            TextProcessor::new(),
            SkillMatcher::new()?,
            config,
        ))
    }

    pub fn with_components(processor: TextProcessor, skill_matcher: SkillMatcher, config: &Config) -> Self {
        Self {
            processor,
            skill_matcher,
            scoring: config.scoring.clone(),
            selection: config.selection.clone(),
            reference_year: Local::now().year(),
        }
    }

    /// Pin the year recency is measured against.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn processor(&self) -> &TextProcessor {
        &self.processor
    }

    pub fn skill_matcher(&self) -> &SkillMatcher {
        &self.skill_matcher
    }

    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    /// Score one experience against a job.
    ///
    /// `user_skills` is accepted so callers can pass a profile through, but only
    /// skills evidenced in the experience text contribute to the score.
    pub fn analyze_experience_relevance(
        &self,
        experience: &Experience,
        job: &JobPosting,
        user_skills: &[String],
    ) -> RelevanceAnalysis {
        let config = &self.scoring;
        let mut score = 0.0_f64;
        let mut reasons = Vec::new();

        if !user_skills.is_empty() {
            debug!(
                "Ignoring {} declared user skills for '{}' (only evidenced skills are scored)",
                user_skills.len(),
                experience.title
            );
        }

        // 1. Title similarity
        let title_similarity = self.processor.word_set_similarity(&experience.title, &job.title);
        score += title_similarity * config.title_weight;
        if title_similarity > config.title_reason_threshold {
            reasons.push(format!(
                "Similar role title ({:.0}% match)",
                title_similarity * 100.0
            ));
        }

        let job_text = job.combined_text();
        let experience_text = experience.combined_text();

        // 2. Keyword overlap
        let job_keywords = self.processor.extract_keywords(&job_text);
        let mut matched_keywords = matching_keywords(&job_keywords, &experience_text.to_lowercase());
        if !matched_keywords.is_empty() {
            let per_keyword = config.keyword_weight / job_keywords.len().max(1) as f64;
            score += per_keyword * matched_keywords.len() as f64;
            reasons.push(format!("{} relevant keywords found", matched_keywords.len()));
        }

        // 3. Skill overlap
        let job_skills = self.skill_matcher.find_skills(&job_text);
        let experience_skills = self.skill_matcher.find_skills(&experience_text);
        let mut matched_skills: Vec<String> = job_skills
            .iter()
            .filter(|skill| experience_skills.contains(skill))
            .cloned()
            .collect();
        if !matched_skills.is_empty() {
            let per_skill = config.skill_weight / job_skills.len().max(1) as f64;
            score += per_skill * matched_skills.len() as f64;
            reasons.push(format!("{} matching skills identified", matched_skills.len()));
        }

        // 4. Industry (exact, case-sensitive)
        if let (Some(ours), Some(theirs)) = (&experience.industry, &job.industry) {
            if !ours.is_empty() && ours == theirs {
                score += config.industry_bonus;
                reasons.push(format!("Same industry experience ({})", ours));
            }
        }

        // 5. Recency
        let years_since_end = experience
            .end_date
            .map(|end| (self.reference_year - end.year()).max(0))
            .unwrap_or(0);
        let recency = (config.recency_window_years - years_since_end as f64).max(0.0);
        score += recency;
        if recency > config.recency_reason_threshold {
            reasons.push("Recent experience".to_string());
        }

        matched_keywords.truncate(config.max_matched_terms);
        matched_skills.truncate(config.max_matched_terms);

        let score = clamp_score(score);

        debug!(
            "Scored '{}' at {} against '{}' ({} keywords, {} skills)",
            experience.title,
            score,
            job.title,
            matched_keywords.len(),
            matched_skills.len()
        );

        RelevanceAnalysis {
            score,
            matched_keywords,
            matched_skills,
            reasons,
            priority: Priority::from_score(score),
        }
    }

    /// Rank experiences for a job and keep the best `max_experiences`.
    pub fn select_relevant_experiences(
        &self,
        experiences: &[Experience],
        job: &JobPosting,
        user_skills: &[String],
        max_experiences: usize,
    ) -> Vec<ScoredExperience> {
        let mut scored: Vec<ScoredExperience> = experiences
            .iter()
            .map(|experience| ScoredExperience {
                relevance: self.analyze_experience_relevance(experience, job, user_skills),
                experience: experience.clone(),
            })
            .collect();

        // Stable: equal scores keep their input order
        scored.sort_by(|a, b| b.relevance.score.cmp(&a.relevance.score));
        scored.truncate(max_experiences);
        scored
    }

    /// Surface well-scoring experiences that were not selected.
    pub fn suggest_additional_experiences(
        &self,
        all_experiences: &[Experience],
        selected: &[ScoredExperience],
        job: &JobPosting,
    ) -> Vec<Suggestion> {
        let selected_ids: HashSet<&str> = selected
            .iter()
            .map(|s| s.experience.id.as_str())
            .filter(|id| !id.is_empty())
            .collect();

        let mut suggestions: Vec<Suggestion> = all_experiences
            .iter()
            .filter(|experience| {
                if experience.id.is_empty() {
                    !selected.iter().any(|s| &s.experience == *experience)
                } else {
                    !selected_ids.contains(experience.id.as_str())
                }
            })
            .map(|experience| (experience, self.analyze_experience_relevance(experience, job, &[])))
            .filter(|(_, relevance)| relevance.score >= self.selection.suggestion_min_score)
            .map(|(experience, relevance)| Suggestion {
                reason: relevance
                    .reasons
                    .first()
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_SUGGESTION_REASON.to_string()),
                experience: experience.clone(),
                relevance,
            })
            .collect();

        suggestions.sort_by(|a, b| b.relevance.score.cmp(&a.relevance.score));
        suggestions.truncate(self.selection.max_suggestions);
        suggestions
    }
}

/// Job keywords occurring as substrings of `haystack`, in job-keyword order.
fn matching_keywords(keywords: &[String], haystack: &str) -> Vec<String> {
    if keywords.is_empty() || haystack.is_empty() {
        return Vec::new();
    }

    match AhoCorasick::new(keywords) {
        Ok(automaton) => {
            let found: HashSet<usize> = automaton
                .find_overlapping_iter(haystack)
                .map(|m| m.pattern().as_usize())
                .collect();
            keywords
                .iter()
                .enumerate()
                .filter(|(idx, _)| found.contains(idx))
                .map(|(_, keyword)| keyword.clone())
                .collect()
        }
        Err(e) => {
            debug!("Falling back to linear keyword scan: {}", e);
            keywords
                .iter()
                .filter(|keyword| haystack.contains(keyword.as_str()))
                .cloned()
                .collect()
        }
    }
}

fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
