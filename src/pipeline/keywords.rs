//! Keyword tokenization and the global keyword vocabulary

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Number of tokens kept in the global vocabulary by default
pub const DEFAULT_TOP_KEYWORDS: usize = 20;

/// Tokens shorter than this are dropped
pub const MIN_TOKEN_LEN: usize = 3;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid token regex"));

/// General English stopwords plus review/news filler words
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "if", "while", "of", "at", "by", "for", "with",
        "about", "against", "between", "into", "through", "during", "before", "after", "above",
        "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
        "further", "then", "once", "here", "there", "when", "where", "why", "how", "all", "any",
        "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
        "only", "own", "same", "so", "than", "too", "very", "can", "will", "just", "don",
        "should", "now",
        // domain filler
        "movie", "film", "review", "reviews", "article", "news",
    ]
    .into_iter()
    .collect()
});

/// Split text into keyword candidates.
///
/// Lowercases, replaces anything outside `[a-z0-9\s]` with a space, splits on
/// whitespace, then drops short tokens and stopwords.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|tok| tok.chars().count() >= MIN_TOKEN_LEN && !STOPWORDS.contains(tok))
        .map(str::to_string)
        .collect()
}

/// Most frequent tokens across a whole table, with their counts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeywordVocabulary {
    entries: Vec<(String, usize)>,
}

impl KeywordVocabulary {
    /// Build the top-`top_n` vocabulary from per-row token lists.
    ///
    /// Ordered by count descending; equal counts keep first-encounter order.
    pub fn build(rows: &[Vec<String>], top_n: usize) -> Self {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut next_seen = 0usize;
        for token in rows.iter().flatten() {
            let entry = counts.entry(token.as_str()).or_insert_with(|| {
                next_seen += 1;
                (0, next_seen)
            });
            entry.0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(token, (count, first_seen))| (token, count, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let entries = ranked
            .into_iter()
            .take(top_n)
            .map(|(token, count, _)| (token.to_string(), count))
            .collect();
        Self { entries }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct in-vocabulary tokens of one row, in first-occurrence order
    pub fn row_keywords(&self, tokens: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        tokens
            .iter()
            .filter(|tok| self.contains(tok.as_str()) && seen.insert(tok.as_str()))
            .cloned()
            .collect()
    }
}
