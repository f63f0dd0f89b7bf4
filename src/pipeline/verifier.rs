//! Prescription verification pipeline.

use serde::{Deserialize, Serialize};

use super::client::CompletionClient;
use super::normalize::isolate_json;
use super::parser::parse_review;
use super::prompt::build_verification_prompt;
use super::types::{Outcome, PrescriptionReview};
use super::PipelineError;
use crate::config::DEFAULT_RAW_SNIPPET_LIMIT;

pub const MIN_PATIENT_AGE: u32 = 1;
pub const MAX_PATIENT_AGE: u32 = 150;

/// Patient context and proposed medicines for one verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub prescribed_medicines: Vec<String>,
    pub patient_name: String,
    pub patient_age: u32,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

pub struct PrescriptionVerifier {
    client: Box<dyn CompletionClient + Send + Sync>,
    snippet_limit: usize,
}

impl PrescriptionVerifier {
    pub fn new(client: Box<dyn CompletionClient + Send + Sync>) -> Self {
        Self {
            client,
            snippet_limit: DEFAULT_RAW_SNIPPET_LIMIT,
        }
    }

    /// Override how many characters of a malformed completion are echoed
    /// in diagnostic results.
    pub fn with_snippet_limit(mut self, limit: usize) -> Self {
        self.snippet_limit = limit;
        self
    }

    /// Review a proposed prescription against the patient context.
    ///
    /// An empty medicine list or a patient age outside
    /// [`MIN_PATIENT_AGE`]..=[`MAX_PATIENT_AGE`] is rejected before the
    /// completion service is contacted.
    pub fn verify(&self, request: &VerificationRequest) -> Outcome<PrescriptionReview> {
        if request.prescribed_medicines.is_empty() {
            return Outcome::failure(
                &PipelineError::InvalidInput("no medicines provided".into()),
                None,
                self.snippet_limit,
            );
        }
        if request.patient_age < MIN_PATIENT_AGE || request.patient_age > MAX_PATIENT_AGE {
            return Outcome::failure(
                &PipelineError::InvalidInput(format!(
                    "patient age {} outside {MIN_PATIENT_AGE}..={MAX_PATIENT_AGE}",
                    request.patient_age,
                )),
                None,
                self.snippet_limit,
            );
        }

        let prompt = match build_verification_prompt(request) {
            Ok(prompt) => prompt,
            Err(e) => return Outcome::failure(&e.into(), None, self.snippet_limit),
        };

        let completion = match self.client.generate(&prompt) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "prescription verification completion failed");
                return Outcome::failure(&e, None, self.snippet_limit);
            }
        };

        let candidate = isolate_json(&completion);
        match parse_review(candidate) {
            Ok(review) => {
                tracing::debug!(
                    overall_safety = ?review.overall_safety,
                    can_prescribe = review.can_prescribe,
                    medicines = review.medicine_reviews.len(),
                    "prescription verification parsed"
                );
                Outcome::Success(review)
            }
            Err(e) => {
                tracing::warn!(error = %e, "completion did not parse as a review");
                Outcome::failure(&e, Some(candidate), self.snippet_limit)
            }
        }
    }
}
