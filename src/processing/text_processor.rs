//! Text normalization and keyword extraction

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Common English words carrying no signal for job matching.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "your", "all", "can",
    "was", "were", "been", "being", "have", "has", "had", "does", "did",
    "will", "would", "could", "should", "must", "this", "that", "these",
    "those", "with", "from", "into", "they", "them", "their", "there",
    "what", "which", "when", "where", "while", "about", "also", "such",
    "than", "then", "very", "other", "more",
];

/// Tokens of this length or shorter are never keywords.
const MIN_KEYWORD_LEN: usize = 3;

pub struct TextProcessor {
    stop_words: HashSet<String>,
    non_alphanumeric: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::with_stop_words(STOP_WORDS.iter().copied())
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = stop_words
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();

        let non_alphanumeric = Regex::new(r"[^a-z0-9]+").expect("Invalid non-alphanumeric regex");

        Self {
            stop_words,
            non_alphanumeric,
        }
    }

    /// Extract de-duplicated keywords in order of first appearance.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let cleaned = self.non_alphanumeric.replace_all(&lowered, " ");

        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for token in cleaned.split_whitespace() {
            if token.chars().count() <= MIN_KEYWORD_LEN || self.stop_words.contains(token) {
                continue;
            }
            if seen.insert(token) {
                keywords.push(token.to_string());
            }
        }

        keywords
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Jaccard similarity of the lowercased whitespace-separated word sets.
    pub fn word_set_similarity(&self, text1: &str, text2: &str) -> f64 {
        let lower1 = text1.to_lowercase();
        let lower2 = text2.to_lowercase();

        let set1: HashSet<&str> = lower1.split_whitespace().collect();
        let set2: HashSet<&str> = lower2.split_whitespace().collect();

        let intersection = set1.intersection(&set2).count();
        let union = set1.union(&set2).count();

        if union == 0 {
            0.0
        } else {
            intersection as f64 / union as f64
        }
    }

    /// First sentence of the text without its terminal punctuation.
    pub fn first_sentence(&self, text: &str) -> Option<String> {
        text.unicode_sentences()
            .map(|s| s.trim().trim_end_matches(&['.', '!', '?', ';'][..]).trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }
}
