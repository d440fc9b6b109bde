//! Rating-based sentiment proxy

use std::fmt;

use serde::Serialize;

/// Coarse sentiment label derived from a numeric rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
    Unknown,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 4] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
        SentimentLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == s)
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rating cut-offs for the sentiment proxy.
///
/// `rating >= positive` is positive, `rating <= negative` is negative,
/// anything between is neutral and an absent rating is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl SentimentThresholds {
    pub const DEFAULT_POSITIVE: f64 = 8.0;
    pub const DEFAULT_NEGATIVE: f64 = 4.0;

    pub fn new(positive: f64, negative: f64) -> Self {
        Self { positive, negative }
    }

    pub fn classify(&self, rating: Option<f64>) -> SentimentLabel {
        match rating {
            None => SentimentLabel::Unknown,
            Some(r) if r.is_nan() => SentimentLabel::Unknown,
            Some(r) if r >= self.positive => SentimentLabel::Positive,
            Some(r) if r <= self.negative => SentimentLabel::Negative,
            Some(_) => SentimentLabel::Neutral,
        }
    }
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITIVE, Self::DEFAULT_NEGATIVE)
    }
}
