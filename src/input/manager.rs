//! Input manager for loading experience and job records

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::record_reader::{JsonReader, RecordReader, TomlReader};
use crate::processing::records::{Experience, JobPosting};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn load_experiences(&mut self, path: &Path) -> Result<Vec<Experience>> {
        let reader = self.reader_for(self.detect_file_type(path)?, path)?;
        let content = self.read_text(path).await?;

        let experiences = reader.read_experiences(&content)?;
        info!("Loaded {} experiences from {}", experiences.len(), path.display());
        Ok(experiences)
    }

    pub async fn load_job(&mut self, path: &Path) -> Result<JobPosting> {
        let reader = self.reader_for(self.detect_file_type(path)?, path)?;
        let content = self.read_text(path).await?;

        let job = reader.read_job(&content)?;
        info!("Loaded job posting '{}' from {}", job.title, path.display());
        Ok(job)
    }

    async fn read_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached contents for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = fs::read_to_string(path).await?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn reader_for(&self, file_type: FileType, path: &Path) -> Result<Box<dyn RecordReader>> {
        match file_type {
            FileType::Json => Ok(Box::new(JsonReader)),
            FileType::Toml => Ok(Box::new(TomlReader)),
            FileType::Unknown => Err(MatcherError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| MatcherError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
