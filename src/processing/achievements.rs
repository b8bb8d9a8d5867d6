//! Achievement filtering and normalization

use crate::processing::relevance::RelevanceAnalysis;
use std::collections::HashSet;

/// Verbs that already open an achievement statement well.
pub const ACTION_VERBS: &[&str] = &[
    "led", "managed", "developed", "created", "implemented", "designed",
    "built", "improved", "increased", "reduced", "launched", "delivered",
    "optimized", "streamlined", "established", "achieved", "spearheaded",
    "coordinated", "drove", "automated", "architected", "mentored",
];

const MAX_QUANTIFIED: usize = 3;

pub struct AchievementQuantifier {
    action_verbs: HashSet<String>,
}

impl Default for AchievementQuantifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementQuantifier {
    pub fn new() -> Self {
        Self::with_action_verbs(ACTION_VERBS.iter().copied())
    }

    pub fn with_action_verbs<I, S>(verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            action_verbs: verbs.into_iter().map(|v| v.as_ref().to_lowercase()).collect(),
        }
    }

    /// Keep achievements that mention a matched keyword or a number, phrase them
    /// as verb-led clauses, and return at most three.
    pub fn quantify(&self, achievements: &[String], relevance: &RelevanceAnalysis) -> Vec<String> {
        achievements
            .iter()
            .filter(|achievement| is_quantifiable(achievement, &relevance.matched_keywords))
            .map(|achievement| {
                if self.starts_with_action_verb(achievement) {
                    achievement.to_lowercase()
                } else {
                    format!("achieved {}", achievement)
                }
            })
            .take(MAX_QUANTIFIED)
            .collect()
    }

    pub fn starts_with_action_verb(&self, text: &str) -> bool {
        text.split_whitespace()
            .next()
            .map(|word| {
                let word = word
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                self.action_verbs.contains(&word)
            })
            .unwrap_or(false)
    }
}

fn is_quantifiable(achievement: &str, keywords: &[String]) -> bool {
    if achievement.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }
    let lowered = achievement.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(&keyword.to_lowercase()))
}
