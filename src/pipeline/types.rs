//! Typed results for both pipelines.
//!
//! Every collection deserializes with a default so validated results never
//! carry a null list, and every closed-set enum coerces an out-of-set string
//! to a safe fallback variant instead of failing the containing item.

use serde::{Deserialize, Serialize};

use super::{ErrorKind, PipelineError};

// ---------------------------------------------------------------------------
// Conversation analysis
// ---------------------------------------------------------------------------

/// Full structured record extracted from one clinical conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConversationExtraction {
    #[serde(default)]
    pub diseases_and_conditions: Vec<DiseaseMention>,
    #[serde(default)]
    pub symptoms: Vec<SymptomMention>,
    #[serde(default)]
    pub important_treatment_points: Vec<TreatmentPoint>,
    #[serde(default)]
    pub medications: Vec<MedicationMention>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub follow_up: FollowUp,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseMention {
    pub name: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub mentioned_by: MentionedBy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomMention {
    pub symptom: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPoint {
    #[serde(default)]
    pub category: TreatmentCategory,
    pub point: String,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationMention {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: MedicationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FollowUp {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    #[default]
    #[serde(rename = "not specified", other)]
    NotSpecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MentionedBy {
    Doctor,
    Both,
    #[default]
    #[serde(other)]
    Patient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TreatmentCategory {
    Medication,
    Diagnosis,
    History,
    Vitals,
    Instructions,
    Lifestyle,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MedicationKind {
    Prescribed,
    Discontinued,
    #[default]
    #[serde(other)]
    Current,
}

/// Lossy projection of [`ConversationExtraction`] for simple consumers.
///
/// Purely computed — no identity or storage of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConversationSummaryView {
    pub diseases: Vec<String>,
    pub symptoms: Vec<String>,
    /// Treatment points with priority high or medium only.
    pub key_treatment_points: Vec<String>,
    /// `"NAME - DOSAGE"` lines for prescribed medications only.
    pub medications_prescribed: Vec<String>,
    pub follow_up_required: bool,
    pub follow_up_timeframe: String,
    pub red_flags: Vec<String>,
    pub summary: String,
    /// `"NAME - DOSAGE"` lines for every medication regardless of type.
    pub all_medications: Vec<String>,
    pub medical_history: Vec<String>,
    pub allergies: Vec<String>,
}

// ---------------------------------------------------------------------------
// Prescription verification
// ---------------------------------------------------------------------------

/// Structured safety review of one proposed prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PrescriptionReview {
    #[serde(default)]
    pub overall_safety: OverallSafety,
    #[serde(default)]
    pub can_prescribe: bool,
    #[serde(default)]
    pub verification_summary: String,
    #[serde(default)]
    pub medicine_reviews: Vec<MedicineReview>,
    #[serde(default)]
    pub drug_interactions: Vec<DrugInteraction>,
    #[serde(default)]
    pub dosage_concerns: Vec<DosageConcern>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub senior_doctor_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineReview {
    pub medicine_name: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub age_appropriate: bool,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub alternatives_if_rejected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugInteraction {
    #[serde(default)]
    pub medicines: Vec<String>,
    #[serde(default)]
    pub interaction_type: InteractionSeverity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosageConcern {
    pub medicine: String,
    #[serde(default)]
    pub concern: String,
    #[serde(default)]
    pub recommended_adjustment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverallSafety {
    Safe,
    Unsafe,
    #[default]
    #[serde(other)]
    Caution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Approved,
    Rejected,
    #[default]
    #[serde(other)]
    Caution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionSeverity {
    Mild,
    Severe,
    #[default]
    #[serde(other)]
    Moderate,
}

// ---------------------------------------------------------------------------
// Outcome — the discriminated result every pipeline operation returns
// ---------------------------------------------------------------------------

/// Success with a payload, or a terminal failure with diagnostics.
///
/// A failure carries an all-defaults payload flattened into its serialized
/// body, so consumers iterate collections without presence checks either way.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure<T>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure<T> {
    pub kind: ErrorKind,
    pub error: String,
    /// Truncated echo of the offending completion text, for parse failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    #[serde(flatten)]
    pub fallback: T,
}

impl<T: Default> Outcome<T> {
    /// Convert a pipeline error into a terminal failure result.
    ///
    /// `raw_response` is echoed truncated to `snippet_limit` characters.
    pub fn failure(source: &PipelineError, raw_response: Option<&str>, snippet_limit: usize) -> Self {
        Outcome::Failure(Failure {
            kind: source.kind(),
            error: source.to_string(),
            raw_response: raw_response.map(|raw| truncate_chars(raw, snippet_limit)),
            fallback: T::default(),
        })
    }
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The payload on success, or the all-defaults fallback on failure.
    pub fn payload(&self) -> &T {
        match self {
            Outcome::Success(payload) => payload,
            Outcome::Failure(failure) => &failure.fallback,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure.kind),
        }
    }
}

/// First `limit` characters of `text`, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
