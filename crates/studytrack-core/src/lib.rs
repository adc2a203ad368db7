//! studytrack-core: progress scoring engine, catalog, and reports.
//!
//! This crate turns per-activity completion statuses into chapter, subject,
//! and overall percentages using subject-specific weight tables. Scoring is
//! pure and synchronous; fetching status records is left to implementors of
//! [`traits::StatusSource`].

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod records;
pub mod report;
pub mod scoring;
pub mod statistics;
pub mod traits;

pub use config::ConfigRepository;
pub use engine::ProgressEngine;
pub use model::{Activity, Chapter, SectionConfig, Status, SubjectConfig, SubjectData};
