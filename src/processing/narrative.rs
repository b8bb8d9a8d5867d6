//! Pitch-style narratives for one experience against one job

use crate::processing::achievements::AchievementQuantifier;
use crate::processing::records::{Experience, JobPosting};
use crate::processing::relevance::RelevanceAnalysis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NarrativeStyle {
    AchievementFocused,
    SkillsFocused,
    ProblemSolution,
    ImpactFocused,
    RequirementAligned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeStrength {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub style: NarrativeStyle,
    pub text: String,
    pub strength: NarrativeStrength,
}

impl std::fmt::Display for NarrativeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            NarrativeStyle::AchievementFocused => "achievement-focused",
            NarrativeStyle::SkillsFocused => "skills-focused",
            NarrativeStyle::ProblemSolution => "problem-solution",
            NarrativeStyle::ImpactFocused => "impact-focused",
            NarrativeStyle::RequirementAligned => "requirement-aligned",
        };
        write!(f, "{}", label)
    }
}

#[derive(Default)]
pub struct NarrativeGenerator {
    quantifier: AchievementQuantifier,
}

impl NarrativeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quantifier(quantifier: AchievementQuantifier) -> Self {
        Self { quantifier }
    }

    pub fn quantifier(&self) -> &AchievementQuantifier {
        &self.quantifier
    }

    /// Build every narrative whose inputs are available, in a fixed style order.
    /// The problem-solution narrative is always present.
    pub fn generate(
        &self,
        experience: &Experience,
        job: &JobPosting,
        relevance: &RelevanceAnalysis,
    ) -> Vec<Narrative> {
        let mut narratives = Vec::new();
        let skills = &relevance.matched_skills;
        let company = company_label(experience);
        let title = title_label(experience);
        let first_requirement = job
            .requirements
            .first()
            .map(|r| r.trim().trim_end_matches('.').to_lowercase())
            .filter(|r| !r.is_empty());

        if !experience.achievements.is_empty() {
            let quantified = self.quantifier.quantify(&experience.achievements, relevance);
            if !quantified.is_empty() {
                let highlights = quantified
                    .iter()
                    .take(2)
                    .map(|q| q.trim_end_matches('.'))
                    .collect::<Vec<_>>()
                    .join(" and ");
                let mut text = format!("At {}, I {}", company, highlights);
                if !skills.is_empty() {
                    text.push_str(&format!(", leveraging my expertise in {}", top_skills(skills, 3)));
                }
                text.push('.');
                narratives.push(Narrative {
                    style: NarrativeStyle::AchievementFocused,
                    text,
                    strength: NarrativeStrength::High,
                });
            }
        }

        if !skills.is_empty() {
            let closing = match &first_requirement {
                Some(requirement) => format!("directly supports your need for {}", requirement),
                None => "positions me to make immediate contributions to your team".to_string(),
            };
            narratives.push(Narrative {
                style: NarrativeStyle::SkillsFocused,
                text: format!(
                    "My hands-on experience with {} as {} at {} {}.",
                    top_skills(skills, 3),
                    title,
                    company,
                    closing
                ),
                strength: NarrativeStrength::High,
            });
        }

        let approach = if skills.is_empty() {
            "proven methodologies".to_string()
        } else {
            format!("my skills in {}", top_skills(skills, 3))
        };
        narratives.push(Narrative {
            style: NarrativeStyle::ProblemSolution,
            text: format!(
                "As {} at {}, I solved complex challenges by applying {}, an approach I would bring to {}.",
                title,
                company,
                approach,
                role_label(job)
            ),
            strength: NarrativeStrength::Medium,
        });

        if let Some(impact) = experience.achievements.iter().find(|a| is_measurable(a)) {
            let mut text = format!(
                "My work at {} delivered measurable impact: {}",
                company,
                impact.trim().trim_end_matches('.')
            );
            if let Some(skill) = skills.first() {
                text.push_str(&format!(", with {} at the core", skill));
            }
            text.push('.');
            narratives.push(Narrative {
                style: NarrativeStyle::ImpactFocused,
                text,
                strength: NarrativeStrength::High,
            });
        }

        if let Some(requirement) = first_requirement.filter(|_| !skills.is_empty()) {
            narratives.push(Narrative {
                style: NarrativeStyle::RequirementAligned,
                text: format!(
                    "Your requirement for {} matches my background as {} at {}, where I applied {} daily.",
                    requirement,
                    title,
                    company,
                    skills.iter().take(2).cloned().collect::<Vec<_>>().join(" and ")
                ),
                strength: NarrativeStrength::High,
            });
        }

        narratives
    }
}

fn is_measurable(achievement: &str) -> bool {
    achievement.chars().any(|c| c.is_ascii_digit())
        || achievement.contains('%')
        || achievement.to_lowercase().contains("percent")
}

fn top_skills(skills: &[String], count: usize) -> String {
    skills.iter().take(count).cloned().collect::<Vec<_>>().join(", ")
}

fn company_label(experience: &Experience) -> &str {
    if experience.company.trim().is_empty() {
        "my previous company"
    } else {
        &experience.company
    }
}

fn title_label(experience: &Experience) -> &str {
    if experience.title.trim().is_empty() {
        "a team member"
    } else {
        &experience.title
    }
}

fn role_label(job: &JobPosting) -> String {
    if job.title.trim().is_empty() {
        "this role".to_string()
    } else {
        format!("the {} role", job.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::relevance::Priority;

    fn relevance(keywords: &[&str], skills: &[&str]) -> RelevanceAnalysis {
        RelevanceAnalysis {
            score: 72,
            matched_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            matched_skills: skills.iter().map(|s| s.to_string()).collect(),
            reasons: Vec::new(),
            priority: Priority::High,
        }
    }

    fn styles(narratives: &[Narrative]) -> Vec<NarrativeStyle> {
        narratives.iter().map(|n| n.style).collect()
    }

    #[test]
    fn test_all_styles_in_order() {
        let experience = Experience::new("1", "Senior Engineer", "TechCorp")
            .with_achievements(["Improved API latency by 40%", "Led migration to Kubernetes."]);
        let job = JobPosting::new("Platform Engineer", "Cloudco")
            .with_requirements(["Experience with Kubernetes and Docker."]);

        let narratives = NarrativeGenerator::new().generate(
            &experience,
            &job,
            &relevance(&["kubernetes"], &["kubernetes", "docker", "api", "aws"]),
        );

        assert_eq!(
            styles(&narratives),
            vec![
                NarrativeStyle::AchievementFocused,
                NarrativeStyle::SkillsFocused,
                NarrativeStyle::ProblemSolution,
                NarrativeStyle::ImpactFocused,
                NarrativeStyle::RequirementAligned,
            ]
        );
        assert_eq!(
            narratives[0].text,
            "At TechCorp, I improved api latency by 40% and led migration to kubernetes, \
             leveraging my expertise in kubernetes, docker, api."
        );
        assert!(narratives[1].text.ends_with("directly supports your need for experience with kubernetes and docker."));
        assert_eq!(narratives[2].strength, NarrativeStrength::Medium);
        assert!(narratives[3].text.contains("Improved API latency by 40%, with kubernetes at the core."));
        assert!(narratives[4].text.contains("applied kubernetes and docker daily"));
        assert!(narratives
            .iter()
            .filter(|n| n.style != NarrativeStyle::ProblemSolution)
            .all(|n| n.strength == NarrativeStrength::High));
    }

    #[test]
    fn test_bare_experience_gets_problem_solution_only() {
        let narratives = NarrativeGenerator::new().generate(
            &Experience::default(),
            &JobPosting::default(),
            &relevance(&[], &[]),
        );

        assert_eq!(styles(&narratives), vec![NarrativeStyle::ProblemSolution]);
        assert!(narratives[0].text.contains("proven methodologies"));
        assert!(narratives[0].text.ends_with("bring to this role."));
    }

    #[test]
    fn test_skills_without_requirements() {
        let experience = Experience::new("1", "Developer", "Shop");
        let job = JobPosting::new("Developer", "Other");

        let narratives = NarrativeGenerator::new().generate(&experience, &job, &relevance(&[], &["react"]));

        assert_eq!(
            styles(&narratives),
            vec![NarrativeStyle::SkillsFocused, NarrativeStyle::ProblemSolution]
        );
        assert!(narratives[0].text.contains("immediate contributions"));
    }

    #[test]
    fn test_impact_from_percent_word() {
        let experience = Experience::new("1", "Marketer", "Brand")
            .with_achievements(["Grew signups by twenty percent"]);

        let narratives = NarrativeGenerator::new().generate(
            &experience,
            &JobPosting::new("Growth Lead", ""),
            &relevance(&[], &[]),
        );

        // No digit and no keyword: the quantifier drops it, the impact check does not
        assert_eq!(
            styles(&narratives),
            vec![NarrativeStyle::ProblemSolution, NarrativeStyle::ImpactFocused]
        );
        assert_eq!(
            narratives[1].text,
            "My work at Brand delivered measurable impact: Grew signups by twenty percent."
        );
    }

    #[test]
    fn test_style_serialization() {
        let json = serde_json::to_string(&NarrativeStyle::RequirementAligned).unwrap();
        assert_eq!(json, "\"requirement-aligned\"");
        assert_eq!(NarrativeStyle::ProblemSolution.to_string(), "problem-solution");
    }
}
