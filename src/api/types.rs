//! Wire-level request types with lenient defaults.

use serde::Deserialize;

use crate::pipeline::verifier::VerificationRequest;

#[derive(Debug, Deserialize)]
pub struct AnalyzeConversationRequest {
    #[serde(default)]
    pub conversation: String,
}

fn default_patient_name() -> String {
    "Unknown".to_string()
}

/// Verification request as posted by clients. Absent fields default so the
/// core's boundary validation is the single source of rejection.
#[derive(Debug, Deserialize)]
pub struct VerifyPrescriptionRequest {
    #[serde(default)]
    pub prescribed_medicines: Vec<String>,
    #[serde(default = "default_patient_name")]
    pub patient_name: String,
    #[serde(default)]
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

impl From<VerifyPrescriptionRequest> for VerificationRequest {
    fn from(wire: VerifyPrescriptionRequest) -> Self {
        Self {
            prescribed_medicines: wire.prescribed_medicines,
            patient_name: wire.patient_name,
            patient_age: wire.patient_age,
            symptoms: wire.symptoms,
            conditions: wire.conditions,
            medical_history: wire.medical_history,
            allergies: wire.allergies,
        }
    }
}
