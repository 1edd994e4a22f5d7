//! stuteapot-core — learning-style scoring, instruments, and submissions.
//!
//! This crate defines the data model, the scorer, and the persistence trait
//! that the rest of stuteapot builds on.

pub mod check;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod statistics;
pub mod traits;

pub use check::{validate_submission, SubmissionIssue};
pub use error::ScoringError;
pub use model::{Category, CategoryScores, Instrument, RawAnswer, ResponseSet, ScoreResult};
pub use scoring::{dominant_category, RangePolicy, Scorer};
