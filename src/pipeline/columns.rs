//! Column names recognized by the pipeline

pub const MOVIE_TITLE: &str = "movie_title";
pub const REVIEW_TEXT: &str = "review_text";
pub const REVIEWER: &str = "reviewer";
pub const RATING: &str = "rating";
pub const REVIEW_DATE: &str = "review_date";
pub const PUBLISH_DATE: &str = "publish_date";
pub const CATEGORY: &str = "category";
pub const AUTHOR: &str = "author";

/// Free-text columns that are trimmed and lowercased
pub const NORMALIZED_TEXT_COLUMNS: [&str; 3] = [MOVIE_TITLE, REVIEW_TEXT, REVIEWER];

/// Columns parsed to calendar dates
pub const DATE_COLUMNS: [&str; 2] = [REVIEW_DATE, PUBLISH_DATE];

/// Body text candidates, in priority order
pub const TEXT_FIELD_CANDIDATES: [&str; 5] = [REVIEW_TEXT, "content", "article_text", "body", "text"];

/// Columns counted per distinct value when present
pub const GROUPING_COLUMNS: [&str; 3] = [CATEGORY, AUTHOR, REVIEWER];

// Derived columns
pub const WORD_COUNT: &str = "word_count";
pub const KEYWORDS: &str = "keywords";
pub const IS_SHORT_TEXT: &str = "is_short_text";
pub const IS_LONG_TEXT: &str = "is_long_text";
pub const SENTIMENT_PROXY: &str = "sentiment_proxy";
