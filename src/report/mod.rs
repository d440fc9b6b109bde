//! Report module - console rendering, CSV export and JSON run reports

pub mod export;
pub mod run_report;
pub mod summary;

pub use export::*;
pub use run_report::*;
pub use summary::*;
