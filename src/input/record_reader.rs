//! Parsing experience and job records from JSON or TOML text

use crate::error::Result;
use crate::processing::records::{Experience, JobPosting};
use serde::Deserialize;
use std::collections::HashSet;

pub trait RecordReader: Send + Sync {
    fn read_experiences(&self, content: &str) -> Result<Vec<Experience>>;
    fn read_job(&self, content: &str) -> Result<JobPosting>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExperienceFile {
    List(Vec<Experience>),
    Wrapped { experiences: Vec<Experience> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JobFile {
    Wrapped { job: JobPosting },
    Plain(JobPosting),
}

impl From<ExperienceFile> for Vec<Experience> {
    fn from(file: ExperienceFile) -> Self {
        match file {
            ExperienceFile::List(experiences) | ExperienceFile::Wrapped { experiences } => experiences,
        }
    }
}

impl From<JobFile> for JobPosting {
    fn from(file: JobFile) -> Self {
        match file {
            JobFile::Wrapped { job } | JobFile::Plain(job) => job,
        }
    }
}

pub struct JsonReader;

impl RecordReader for JsonReader {
    fn read_experiences(&self, content: &str) -> Result<Vec<Experience>> {
        let file: ExperienceFile = serde_json::from_str(content)?;
        Ok(normalize_ids(file.into()))
    }

    fn read_job(&self, content: &str) -> Result<JobPosting> {
        let file: JobFile = serde_json::from_str(content)?;
        Ok(file.into())
    }
}

/// TOML has no top-level arrays, so experiences live under `[[experiences]]`.
pub struct TomlReader;

impl RecordReader for TomlReader {
    fn read_experiences(&self, content: &str) -> Result<Vec<Experience>> {
        let file: ExperienceFile = toml::from_str(content)?;
        Ok(normalize_ids(file.into()))
    }

    fn read_job(&self, content: &str) -> Result<JobPosting> {
        let file: JobFile = toml::from_str(content)?;
        Ok(file.into())
    }
}

/// Give every experience a unique identifier; records without one get `exp-{n}`,
/// skipping any `n` whose id the file already uses.
pub fn normalize_ids(mut experiences: Vec<Experience>) -> Vec<Experience> {
    for experience in experiences.iter_mut() {
        let trimmed = experience.id.trim();
        if trimmed.len() != experience.id.len() {
            experience.id = trimmed.to_string();
        }
    }

    let mut taken: HashSet<String> = experiences
        .iter()
        .filter(|experience| !experience.id.is_empty())
        .map(|experience| experience.id.clone())
        .collect();

    for (idx, experience) in experiences.iter_mut().enumerate() {
        if !experience.id.is_empty() {
            continue;
        }
        let mut n = idx + 1;
        while taken.contains(&format!("exp-{}", n)) {
            n += 1;
        }
        experience.id = format!("exp-{}", n);
        taken.insert(experience.id.clone());
    }

    experiences
}
