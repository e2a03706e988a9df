// Export checks: required-field validation, bullet impact and keyword-based
// ATS scoring against a job description.

pub mod handlers;
pub mod impact;
pub mod keywords;
pub mod scoring;
pub mod validation;

pub use scoring::{AtsReport, AtsScorer, KeywordAtsScorer};
