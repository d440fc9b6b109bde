//! reelclean: Movie Review Cleaning Library
//!
//! Loads a table of movie reviews, reports missing values and duplicates,
//! normalizes text, dates and ratings, derives text and sentiment features
//! and aggregates them into a long-format summary table.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;
