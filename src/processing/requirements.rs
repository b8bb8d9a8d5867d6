//! Mapping job requirements to the experiences that evidence them

use crate::processing::records::JobPosting;
use crate::processing::relevance::ScoredExperience;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};

const MAX_RELEVANT_ACHIEVEMENTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStrength {
    Strong,
    Moderate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedExperience {
    pub title: String,
    pub company: String,
    pub relevance_score: u8,
    pub matched_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementConnection {
    pub requirement: String,
    pub experiences: Vec<ConnectedExperience>,
    pub relevant_achievements: Vec<String>,
    pub strength: ConnectionStrength,
}

/// Connect each job requirement to the scored experiences that support it.
///
/// Requirements nothing supports are left out. Results list strong connections
/// first, then those backed by more experiences.
pub fn connect_to_job_requirements(
    processor: &TextProcessor,
    experiences: &[ScoredExperience],
    job: &JobPosting,
) -> Vec<RequirementConnection> {
    let mut connections: Vec<RequirementConnection> = job
        .requirements
        .iter()
        .filter_map(|requirement| connect_requirement(processor, experiences, requirement))
        .collect();

    connections.sort_by(|a, b| {
        strength_rank(a.strength)
            .cmp(&strength_rank(b.strength))
            .then_with(|| b.experiences.len().cmp(&a.experiences.len()))
    });

    connections
}

fn connect_requirement(
    processor: &TextProcessor,
    experiences: &[ScoredExperience],
    requirement: &str,
) -> Option<RequirementConnection> {
    let keywords = processor.extract_keywords(requirement);
    let requirement_lower = requirement.to_lowercase();

    let matching: Vec<&ScoredExperience> = experiences
        .iter()
        .filter(|scored| {
            let text = scored.experience.combined_text().to_lowercase();
            keywords.iter().any(|keyword| text.contains(keyword.as_str()))
                || scored
                    .relevance
                    .matched_skills
                    .iter()
                    .any(|skill| requirement_lower.contains(&skill.to_lowercase()))
        })
        .collect();

    if matching.is_empty() {
        return None;
    }

    let relevant_achievements: Vec<String> = matching
        .iter()
        .flat_map(|scored| scored.experience.achievements.iter())
        .filter(|achievement| {
            let lowered = achievement.to_lowercase();
            keywords.iter().any(|keyword| lowered.contains(keyword.as_str()))
        })
        .take(MAX_RELEVANT_ACHIEVEMENTS)
        .cloned()
        .collect();

    let strength = if matching.len() > 1 {
        ConnectionStrength::Strong
    } else {
        ConnectionStrength::Moderate
    };

    Some(RequirementConnection {
        requirement: requirement.to_string(),
        experiences: matching
            .iter()
            .map(|scored| ConnectedExperience {
                title: scored.experience.title.clone(),
                company: scored.experience.company.clone(),
                relevance_score: scored.relevance.score,
                matched_skills: scored.relevance.matched_skills.clone(),
            })
            .collect(),
        relevant_achievements,
        strength,
    })
}

fn strength_rank(strength: ConnectionStrength) -> u8 {
    match strength {
        ConnectionStrength::Strong => 0,
        ConnectionStrength::Moderate => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::records::Experience;
    use crate::processing::relevance::{Priority, RelevanceAnalysis};

    fn scored(experience: Experience, score: u8, skills: &[&str]) -> ScoredExperience {
        ScoredExperience {
            experience,
            relevance: RelevanceAnalysis {
                score,
                matched_keywords: Vec::new(),
                matched_skills: skills.iter().map(|s| s.to_string()).collect(),
                reasons: Vec::new(),
                priority: Priority::from_score(score),
            },
        }
    }

    fn fixtures() -> Vec<ScoredExperience> {
        vec![
            scored(
                Experience::new("1", "Backend Engineer", "Acme")
                    .with_description("Designed payment services in Python")
                    .with_achievements([
                        "Scaled payment throughput 3x",
                        "Mentored four engineers",
                        "Cut payment failures by half",
                    ]),
                80,
                &["python"],
            ),
            scored(
                Experience::new("2", "Data Engineer", "Initech")
                    .with_description("Built pipelines")
                    .with_achievements(["Payment reconciliation pipeline in Airflow"]),
                55,
                &["sql"],
            ),
        ]
    }

    #[test]
    fn test_empty_requirements() {
        let processor = TextProcessor::new();
        let job = JobPosting::new("Engineer", "Co");
        assert!(connect_to_job_requirements(&processor, &fixtures(), &job).is_empty());
    }

    #[test]
    fn test_connections_and_ordering() {
        let processor = TextProcessor::new();
        let job = JobPosting::new("Engineer", "Co").with_requirements([
            "Strong Python skills",
            "Payment systems background",
            "Fluent in Japanese",
        ]);

        let connections = connect_to_job_requirements(&processor, &fixtures(), &job);

        assert_eq!(connections.len(), 2);

        let payments = &connections[0];
        assert_eq!(payments.requirement, "Payment systems background");
        assert_eq!(payments.strength, ConnectionStrength::Strong);
        assert_eq!(payments.experiences.len(), 2);
        assert_eq!(
            payments.relevant_achievements,
            vec!["Scaled payment throughput 3x", "Cut payment failures by half"]
        );

        let python = &connections[1];
        assert_eq!(python.requirement, "Strong Python skills");
        assert_eq!(python.strength, ConnectionStrength::Moderate);
        assert_eq!(python.experiences[0].company, "Acme");
        assert_eq!(python.experiences[0].relevance_score, 80);
        assert!(python.relevant_achievements.is_empty());
    }

    #[test]
    fn test_strong_connections_order_by_backing_count() {
        let processor = TextProcessor::new();
        let experiences = vec![
            scored(
                Experience::new("1", "Platform Engineer", "Acme").with_description("Kubernetes and Terraform"),
                70,
                &[],
            ),
            scored(
                Experience::new("2", "SRE", "Initech").with_description("Kubernetes with Terraform modules"),
                60,
                &[],
            ),
            scored(
                Experience::new("3", "Developer", "Globex").with_description("Deployed to Kubernetes"),
                50,
                &[],
            ),
        ];
        let job = JobPosting::new("Engineer", "Co")
            .with_requirements(["Terraform modules", "Kubernetes operations", "Fluent in Japanese"]);

        let connections = connect_to_job_requirements(&processor, &experiences, &job);

        assert_eq!(connections.len(), 2);
        assert_eq!(connections[0].requirement, "Kubernetes operations");
        assert_eq!(connections[0].strength, ConnectionStrength::Strong);
        assert_eq!(connections[0].experiences.len(), 3);
        assert_eq!(connections[1].requirement, "Terraform modules");
        assert_eq!(connections[1].strength, ConnectionStrength::Strong);
        assert_eq!(connections[1].experiences.len(), 2);
    }

    #[test]
    fn test_skill_substring_of_requirement_matches() {
        let processor = TextProcessor::new();
        let experiences = vec![scored(Experience::new("1", "Analyst", "Bank"), 40, &["sql"])];
        let job = JobPosting::new("Analyst", "Co").with_requirements(["SQL"]);

        let connections = connect_to_job_requirements(&processor, &experiences, &job);

        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].strength, ConnectionStrength::Moderate);
        assert_eq!(connections[0].experiences[0].matched_skills, vec!["sql"]);
    }
}
