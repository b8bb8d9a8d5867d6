//! Main analysis engine wiring every matching component into one report

use crate::config::Config;
use crate::error::Result;
use crate::processing::narrative::{Narrative, NarrativeGenerator};
use crate::processing::package::{score_experience_package, PackageScore};
use crate::processing::presentation::{generate_alternative_presentations, Presentation};
use crate::processing::records::{Experience, JobPosting};
use crate::processing::relevance::{RelevanceAnalysis, RelevanceScorer, ScoredExperience, Suggestion};
use crate::processing::requirements::{connect_to_job_requirements, RequirementConnection};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Coordinates scoring, narratives, requirement mapping and presentations
pub struct AnalysisEngine {
    scorer: RelevanceScorer,
    narratives: NarrativeGenerator,
    config: Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub job_title: String,
    pub job_company: String,
    pub generated_at: DateTime<Utc>,

    /// Best-fitting experiences, highest score first
    pub selected: Vec<ScoredExperience>,
    pub narratives: Vec<ExperienceNarratives>,
    pub connections: Vec<RequirementConnection>,
    pub suggestions: Vec<Suggestion>,
    pub package: PackageScore,
    pub presentations: Vec<ExperiencePresentations>,

    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceNarratives {
    pub experience_id: String,
    pub title: String,
    pub company: String,
    pub narratives: Vec<Narrative>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePresentations {
    pub experience_id: String,
    pub presentations: Vec<Presentation>,
}

impl AnalysisEngine {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let scorer = RelevanceScorer::from_config(&config)?;

        Ok(Self {
            scorer,
            narratives: NarrativeGenerator::new(),
            config,
        })
    }

    /// Pin the recency reference year, e.g. for reproducible reports.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.scorer = self.scorer.with_reference_year(year);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    pub fn analyze_experience_relevance(
        &self,
        experience: &Experience,
        job: &JobPosting,
        user_skills: &[String],
    ) -> RelevanceAnalysis {
        self.scorer.analyze_experience_relevance(experience, job, user_skills)
    }

    pub fn select_relevant_experiences(
        &self,
        experiences: &[Experience],
        job: &JobPosting,
        user_skills: &[String],
        max_experiences: Option<usize>,
    ) -> Vec<ScoredExperience> {
        let limit = max_experiences.unwrap_or(self.config.selection.max_experiences);
        self.scorer.select_relevant_experiences(experiences, job, user_skills, limit)
    }

    pub fn generate_experience_narrative(
        &self,
        experience: &Experience,
        job: &JobPosting,
        relevance: &RelevanceAnalysis,
    ) -> Vec<Narrative> {
        self.narratives.generate(experience, job, relevance)
    }

    pub fn quantify_achievements(&self, achievements: &[String], relevance: &RelevanceAnalysis) -> Vec<String> {
        self.narratives.quantifier().quantify(achievements, relevance)
    }

    pub fn connect_to_job_requirements(
        &self,
        experiences: &[ScoredExperience],
        job: &JobPosting,
    ) -> Vec<RequirementConnection> {
        connect_to_job_requirements(self.scorer.processor(), experiences, job)
    }

    pub fn suggest_additional_experiences(
        &self,
        all_experiences: &[Experience],
        selected: &[ScoredExperience],
        job: &JobPosting,
    ) -> Vec<Suggestion> {
        self.scorer.suggest_additional_experiences(all_experiences, selected, job)
    }

    pub fn score_experience_package(&self, experiences: &[ScoredExperience], job: &JobPosting) -> PackageScore {
        score_experience_package(&self.scorer, experiences, job)
    }

    pub fn generate_alternative_presentations(&self, experience: &Experience, job: &JobPosting) -> [Presentation; 4] {
        generate_alternative_presentations(&self.scorer, experience, job)
    }

    /// Run the full pipeline for one job over a candidate's experiences.
    pub fn build_report(
        &self,
        experiences: &[Experience],
        job: &JobPosting,
        user_skills: &[String],
        max_experiences: Option<usize>,
    ) -> MatchReport {
        let start_time = Instant::now();
        info!(
            "Matching {} experiences against '{}' at '{}'",
            experiences.len(),
            job.title,
            job.company
        );

        let selected = self.select_relevant_experiences(experiences, job, user_skills, max_experiences);
        debug!("Selected {} experiences", selected.len());

        let narratives = selected
            .iter()
            .map(|scored| ExperienceNarratives {
                experience_id: scored.experience.id.clone(),
                title: scored.experience.title.clone(),
                company: scored.experience.company.clone(),
                narratives: self.generate_experience_narrative(&scored.experience, job, &scored.relevance),
            })
            .collect();

        let connections = self.connect_to_job_requirements(&selected, job);
        debug!(
            "Connected {} of {} requirements",
            connections.len(),
            job.requirements.len()
        );

        let suggestions = self.suggest_additional_experiences(experiences, &selected, job);
        let package = self.score_experience_package(&selected, job);

        let presentations = selected
            .iter()
            .map(|scored| ExperiencePresentations {
                experience_id: scored.experience.id.clone(),
                presentations: self.generate_alternative_presentations(&scored.experience, job).to_vec(),
            })
            .collect();

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Package score {} with {}% requirement coverage ({} ms)",
            package.overall_score, package.coverage, processing_time_ms
        );

        MatchReport {
            job_title: job.title.clone(),
            job_company: job.company.clone(),
            generated_at: Utc::now(),
            selected,
            narratives,
            connections,
            suggestions,
            package,
            presentations,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(Config::default()).unwrap().with_reference_year(2026)
    }

    fn experiences() -> Vec<Experience> {
        vec![
            Experience::new("exp-1", "Senior Software Engineer", "TechCorp")
                .with_description("Built React and Node.js applications using modern JavaScript")
                .with_achievements(["Improved application performance by 40%"]),
            Experience::new("exp-2", "Frontend Developer", "Shop")
                .with_description("React and TypeScript storefront")
                .with_dates(NaiveDate::from_ymd_opt(2019, 1, 1), NaiveDate::from_ymd_opt(2022, 6, 1))
                .with_achievements(["Raised conversion by 12%"]),
            Experience::new("exp-3", "Barista", "Cafe")
                .with_dates(None, NaiveDate::from_ymd_opt(2012, 1, 1)),
            Experience::new("exp-4", "QA Intern", "Startup")
                .with_description("Wrote Jest tests")
                .with_dates(None, NaiveDate::from_ymd_opt(2018, 8, 1)),
        ]
    }

    fn job() -> JobPosting {
        JobPosting::new("Full Stack Developer", "Acme")
            .with_description("Build web applications with React and TypeScript")
            .with_requirements(["Experience with React and modern JavaScript", "Testing with Jest"])
    }

    #[test]
    fn test_build_report() {
        let report = engine().build_report(&experiences(), &job(), &[], Some(2));

        assert_eq!(report.job_title, "Full Stack Developer");
        assert_eq!(report.selected.len(), 2);
        assert!(report.selected[0].relevance.score >= report.selected[1].relevance.score);
        assert_eq!(report.narratives.len(), 2);
        assert!(report.narratives.iter().all(|n| !n.narratives.is_empty()));
        assert_eq!(report.presentations.len(), 2);
        assert!(report.presentations.iter().all(|p| p.presentations.len() == 4));
        assert!(report
            .suggestions
            .iter()
            .all(|s| report.selected.iter().all(|sel| sel.experience.id != s.experience.id)));
        assert!(report.package.overall_score > 0);
        assert!(report.package.coverage <= 100);
    }

    #[test]
    fn test_default_selection_limit() {
        let engine = engine();
        let selected = engine.select_relevant_experiences(&experiences(), &job(), &[], None);
        assert_eq!(selected.len(), engine.config().selection.max_experiences);
    }

    #[test]
    fn test_empty_input_report() {
        let report = engine().build_report(&[], &job(), &[], None);

        assert!(report.selected.is_empty());
        assert!(report.connections.is_empty());
        assert!(report.suggestions.is_empty());
        assert_eq!(report.package, PackageScore::empty());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = Config::default();
        config.selection.max_experiences = 0;
        assert!(AnalysisEngine::new(config).is_err());
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalysisEngine>();
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = engine().build_report(&experiences(), &job(), &[], Some(1));
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("jobTitle").is_some());
        assert!(json["selected"][0].get("relevance").is_some());
        assert!(json["selected"][0]["relevance"].get("matchedSkills").is_some());
        assert!(json["package"].get("overallScore").is_some());
    }
}
