//! Experience matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use processing::analyzer::{AnalysisEngine, MatchReport};
pub use processing::records::{Experience, JobPosting};
pub use processing::relevance::{Priority, RelevanceAnalysis, ScoredExperience};
