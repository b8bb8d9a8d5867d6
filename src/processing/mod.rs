//! Experience-to-job relevance engine

pub mod records;
pub mod text_processor;
pub mod skill_matcher;
pub mod relevance;
pub mod achievements;
pub mod narrative;
pub mod requirements;
pub mod package;
pub mod presentation;
pub mod analyzer;
