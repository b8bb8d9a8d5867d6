//! Aggregate assessment of a set of selected experiences

use crate::processing::records::JobPosting;
use crate::processing::relevance::{RelevanceScorer, ScoredExperience};
use crate::processing::requirements::connect_to_job_requirements;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const STRONG_EXPERIENCE_SCORE: u8 = 70;
const MAX_STRENGTHS: usize = 3;
const MAX_GAPS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageScore {
    pub overall_score: u8,
    /// Percentage of job requirements backed by at least one experience
    pub coverage: u8,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendation: String,
}

impl PackageScore {
    pub fn empty() -> Self {
        Self {
            overall_score: 0,
            coverage: 0,
            strengths: Vec::new(),
            gaps: Vec::new(),
            recommendation: "Add relevant work experiences".to_string(),
        }
    }
}

pub fn score_experience_package(
    scorer: &RelevanceScorer,
    experiences: &[ScoredExperience],
    job: &JobPosting,
) -> PackageScore {
    if experiences.is_empty() {
        return PackageScore::empty();
    }

    let total: f64 = experiences.iter().map(|e| f64::from(e.relevance.score)).sum();
    let overall_score = percentage(total / experiences.len() as f64);

    let coverage = if job.requirements.is_empty() {
        0
    } else {
        let connections = connect_to_job_requirements(scorer.processor(), experiences, job);
        percentage(100.0 * connections.len() as f64 / job.requirements.len() as f64)
    };

    let strengths: Vec<String> = experiences
        .iter()
        .filter(|e| e.relevance.score >= STRONG_EXPERIENCE_SCORE)
        .map(|e| format!("Strong {} experience at {}", e.experience.title, e.experience.company))
        .take(MAX_STRENGTHS)
        .collect();

    let covered: HashSet<&str> = experiences
        .iter()
        .flat_map(|e| e.relevance.matched_skills.iter().map(String::as_str))
        .collect();
    let gaps: Vec<String> = scorer
        .skill_matcher()
        .find_skills(&job.combined_text())
        .into_iter()
        .filter(|skill| !covered.contains(skill.as_str()))
        .take(MAX_GAPS)
        .collect();

    PackageScore {
        overall_score,
        coverage,
        strengths,
        gaps,
        recommendation: recommendation_for(overall_score).to_string(),
    }
}

fn recommendation_for(overall_score: u8) -> &'static str {
    if overall_score >= 70 {
        "Excellent match! Your experiences strongly align with this role's requirements."
    } else if overall_score >= 50 {
        "Good match. Emphasize the achievements that speak directly to the key requirements."
    } else {
        "Consider highlighting transferable skills and relevant accomplishments to strengthen your application."
    }
}

fn percentage(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
