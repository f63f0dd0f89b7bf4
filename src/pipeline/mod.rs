//! Conversation analysis and prescription verification pipelines.
//!
//! Both pipelines run the same synchronous chain per invocation:
//! render prompt → call completion service → isolate JSON candidate →
//! parse/validate → typed outcome. A failure at any step terminates the
//! invocation with a diagnostic result; there are no retries here.

pub mod analyzer;
pub mod client;
pub mod normalize;
pub mod parser;
pub mod prompt;
pub mod summary;
pub mod template;
pub mod types;
pub mod verifier;

pub use analyzer::*;
pub use client::*;
pub use normalize::*;
pub use parser::*;
pub use prompt::*;
pub use summary::*;
pub use template::*;
pub use types::*;
pub use verifier::*;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("completion client not initialized: {0}")]
    ServiceUnavailable(String),

    #[error("completion request failed: {0}")]
    Completion(String),

    #[error("failed to parse completion: {0}")]
    Parse(String),

    #[error(transparent)]
    Template(#[from] template::TemplateError),
}

impl PipelineError {
    /// The serializable discriminant carried in failure results.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            Self::Completion(_) => ErrorKind::CompletionError,
            Self::Parse(_) => ErrorKind::ParseError,
            Self::Template(_) => ErrorKind::TemplateError,
        }
    }
}

/// Failure category exposed to callers alongside the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Boundary validation failure — caller-correctable.
    InvalidInput,
    /// The completion client could not be initialized (e.g. missing credential).
    ServiceUnavailable,
    /// The completion call itself failed.
    CompletionError,
    /// The normalized text is not valid JSON or does not match the schema shape.
    ParseError,
    /// A prompt template placeholder had no value.
    TemplateError,
}
