//! Parses normalized completion text into typed pipeline results.
//!
//! The candidate is deserialized through an all-optional raw shape first,
//! then each collection is filled leniently: an item that does not match its
//! schema is dropped, never fatal. Only a candidate that fails to parse as a
//! JSON object at all produces a `Parse` error.

use serde::Deserialize;
use serde_json::Value;

use super::types::{ConversationExtraction, FollowUp, PrescriptionReview};
use super::PipelineError;

/// Validate a candidate as a conversation extraction, filling defaults.
pub fn parse_extraction(candidate: &str) -> Result<ConversationExtraction, PipelineError> {
    #[derive(Deserialize)]
    struct RawExtraction {
        diseases_and_conditions: Option<Vec<Value>>,
        symptoms: Option<Vec<Value>>,
        important_treatment_points: Option<Vec<Value>>,
        medications: Option<Vec<Value>>,
        allergies: Option<Vec<Value>>,
        medical_history: Option<Vec<Value>>,
        follow_up: Option<Value>,
        red_flags: Option<Vec<Value>>,
        summary: Option<String>,
    }

    let raw: RawExtraction =
        serde_json::from_str(candidate).map_err(|e| PipelineError::Parse(e.to_string()))?;

    Ok(ConversationExtraction {
        diseases_and_conditions: collect_valid(raw.diseases_and_conditions.as_deref()),
        symptoms: collect_valid(raw.symptoms.as_deref()),
        important_treatment_points: collect_valid(raw.important_treatment_points.as_deref()),
        medications: collect_valid(raw.medications.as_deref()),
        allergies: collect_valid(raw.allergies.as_deref()),
        medical_history: collect_valid(raw.medical_history.as_deref()),
        follow_up: raw
            .follow_up
            .and_then(|v| serde_json::from_value::<FollowUp>(v).ok())
            .unwrap_or_default(),
        red_flags: collect_valid(raw.red_flags.as_deref()),
        summary: raw.summary.unwrap_or_default(),
    })
}

/// Validate a candidate as a prescription review, filling defaults.
pub fn parse_review(candidate: &str) -> Result<PrescriptionReview, PipelineError> {
    #[derive(Deserialize)]
    struct RawReview {
        overall_safety: Option<Value>,
        can_prescribe: Option<bool>,
        verification_summary: Option<String>,
        medicine_reviews: Option<Vec<Value>>,
        drug_interactions: Option<Vec<Value>>,
        dosage_concerns: Option<Vec<Value>>,
        red_flags: Option<Vec<Value>>,
        recommendations: Option<Vec<Value>>,
        senior_doctor_notes: Option<String>,
    }

    let raw: RawReview =
        serde_json::from_str(candidate).map_err(|e| PipelineError::Parse(e.to_string()))?;

    Ok(PrescriptionReview {
        overall_safety: raw
            .overall_safety
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default(),
        can_prescribe: raw.can_prescribe.unwrap_or(false),
        verification_summary: raw.verification_summary.unwrap_or_default(),
        medicine_reviews: collect_valid(raw.medicine_reviews.as_deref()),
        drug_interactions: collect_valid(raw.drug_interactions.as_deref()),
        dosage_concerns: collect_valid(raw.dosage_concerns.as_deref()),
        red_flags: collect_valid(raw.red_flags.as_deref()),
        recommendations: collect_valid(raw.recommendations.as_deref()),
        senior_doctor_notes: raw.senior_doctor_notes.unwrap_or_default(),
    })
}

/// Keep the items of an array that match the target shape, drop the rest.
fn collect_valid<T: for<'de> Deserialize<'de>>(items: Option<&[Value]>) -> Vec<T> {
    match items {
        None => vec![],
        Some(arr) => arr
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect(),
    }
}
