//! Integration tests for the experience matcher

use experience_matcher::config::{Config, OutputFormat};
use experience_matcher::input::InputManager;
use experience_matcher::output::{save_report_to_file, ReportGenerator};
use experience_matcher::processing::requirements::ConnectionStrength;
use experience_matcher::{AnalysisEngine, MatcherError, Priority};
use std::path::Path;

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(Config::default()).unwrap().with_reference_year(2026)
}

#[tokio::test]
async fn test_load_json_records() {
    let mut manager = InputManager::new();

    let experiences = manager
        .load_experiences(Path::new("tests/fixtures/experiences.json"))
        .await
        .unwrap();
    assert_eq!(experiences.len(), 3);
    assert_eq!(experiences[0].id, "exp-a");
    assert_eq!(experiences[1].id, "exp-b");
    assert_eq!(experiences[2].id, "exp-3");
    assert!(experiences[0].is_current());

    let job = manager.load_job(Path::new("tests/fixtures/job.json")).await.unwrap();
    assert_eq!(job.title, "Backend Engineer");
    assert_eq!(job.requirements.len(), 3);
    assert_eq!(job.industry.as_deref(), Some("Technology"));
}

#[tokio::test]
async fn test_load_toml_records() {
    let mut manager = InputManager::new();

    let experiences = manager
        .load_experiences(Path::new("tests/fixtures/experiences.toml"))
        .await
        .unwrap();
    assert_eq!(experiences.len(), 2);
    assert_eq!(experiences[0].id, "toml-1");
    assert_eq!(experiences[1].id, "exp-2");
    assert_eq!(experiences[0].start_date.map(|d| d.to_string()).as_deref(), Some("2019-03-01"));
    assert_eq!(experiences[0].end_date.map(|d| d.to_string()).as_deref(), Some("2023-08-01"));

    let job = manager.load_job(Path::new("tests/fixtures/job.toml")).await.unwrap();
    assert_eq!(job.title, "Site Reliability Engineer");
    assert_eq!(job.industry, None);

    let selected = engine().select_relevant_experiences(&experiences, &job, &[], None);
    assert_eq!(selected[0].experience.id, "toml-1");
    assert_eq!(
        selected[0].relevance.matched_skills,
        vec!["kubernetes".to_string(), "terraform".to_string()]
    );
}

#[tokio::test]
async fn test_full_match_pipeline() {
    let mut manager = InputManager::new();
    let experiences = manager
        .load_experiences(Path::new("tests/fixtures/experiences.json"))
        .await
        .unwrap();
    let job = manager.load_job(Path::new("tests/fixtures/job.json")).await.unwrap();

    let report = engine().build_report(&experiences, &job, &["python".to_string()], Some(2));

    assert_eq!(report.selected.len(), 2);
    assert_eq!(report.selected[0].experience.id, "exp-a");
    assert_eq!(report.selected[0].relevance.priority, Priority::High);
    assert!(report.selected[0]
        .relevance
        .reasons
        .contains(&"Same industry experience (Technology)".to_string()));
    assert!(report.selected[0].relevance.reasons.contains(&"Recent experience".to_string()));

    let kubernetes = report
        .connections
        .iter()
        .find(|c| c.requirement == "Kubernetes in production")
        .unwrap();
    assert_eq!(kubernetes.strength, ConnectionStrength::Moderate);
    assert_eq!(
        kubernetes.relevant_achievements,
        vec!["Led migration of 12 services to Kubernetes".to_string()]
    );

    assert!(report
        .suggestions
        .iter()
        .all(|s| report.selected.iter().all(|sel| sel.experience.id != s.experience.id)));
    assert!(report.package.coverage > 0);
    assert!(report.package.coverage <= 100);
}

#[tokio::test]
async fn test_report_rendering_and_save() {
    let mut manager = InputManager::new();
    let experiences = manager
        .load_experiences(Path::new("tests/fixtures/experiences.json"))
        .await
        .unwrap();
    let job = manager.load_job(Path::new("tests/fixtures/job.json")).await.unwrap();
    let report = engine().build_report(&experiences, &job, &[], None);

    let generator = ReportGenerator::with_options(false, true, true, false);

    let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["jobCompany"], "Initech");
    assert_eq!(value["selected"][0]["relevance"]["priority"], "high");

    let markdown = generator.generate_report(&report, OutputFormat::Markdown).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match.md");
    save_report_to_file(&markdown, &path).unwrap();
    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("## Talking Points"));
    assert!(saved.contains("Senior Backend Engineer at CloudNine"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/experiences.json");

    // First load
    let first = manager.load_experiences(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    // Second load should use cache
    let second = manager.load_experiences(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);

    let mut uncached = InputManager::new().with_cache(false);
    uncached.load_experiences(path).await.unwrap();
    assert_eq!(uncached.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.load_experiences(path).await;
    assert!(matches!(result, Err(MatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.json");

    let result = manager.load_job(path).await;
    assert!(matches!(result, Err(MatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_generated_id_does_not_shadow_explicit_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("experiences.json");
    std::fs::write(
        &path,
        r#"[
            {"id": "exp-2", "title": "Senior Backend Engineer", "description": "Python services on AWS"},
            {"title": "Backend Engineer", "description": "Python services on AWS"}
        ]"#,
    )
    .unwrap();

    let mut manager = InputManager::new();
    let experiences = manager.load_experiences(&path).await.unwrap();
    assert_eq!(experiences[0].id, "exp-2");
    assert_eq!(experiences[1].id, "exp-3");

    let job = manager.load_job(Path::new("tests/fixtures/job.json")).await.unwrap();
    let engine = engine();
    let selected = engine.select_relevant_experiences(&experiences, &job, &[], Some(1));
    let suggestions = engine.suggest_additional_experiences(&experiences, &selected, &job);

    assert_eq!(suggestions.len(), 1);
    assert_ne!(suggestions[0].experience.id, selected[0].experience.id);
}
