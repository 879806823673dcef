//! External service collaborators

pub mod analysis;

pub use analysis::{AnalysisProvider, GeminiClient, ANALYSIS_FAILURE_MESSAGE};
