//! The two fixed instruction templates and their build functions.
//!
//! One template per pipeline. Both are rendered through [`super::template`],
//! so the JSON examples are written with doubled braces and come out as
//! plain JSON in the final prompt.

use std::collections::BTreeMap;

use super::template::{bullet_list, render, TemplateError};
use super::verifier::VerificationRequest;

pub const ANALYSIS_PROMPT: &str = r#"You are a medical conversation analyzer. Extract ALL medical information from this conversation.

CRITICAL: Extract even if text is simple like "fever for 2 days" or "cold for 2 days".

Return ONLY valid JSON (no other text):
{{
    "diseases_and_conditions": [
        {{
            "name": "disease/condition name",
            "severity": "mild/moderate/severe/not specified",
            "mentioned_by": "doctor/patient/both"
        }}
    ],
    "symptoms": [
        {{
            "symptom": "symptom description",
            "duration": "duration if mentioned",
            "severity": "severity if mentioned"
        }}
    ],
    "important_treatment_points": [
        {{
            "category": "medication/diagnosis/history/vitals/instructions/lifestyle/other",
            "point": "detailed description",
            "priority": "high/medium/low"
        }}
    ],
    "medications": [
        {{
            "name": "medication name",
            "dosage": "dosage if mentioned",
            "frequency": "frequency if mentioned",
            "type": "current/prescribed/discontinued"
        }}
    ],
    "allergies": [],
    "medical_history": [],
    "follow_up": {{
        "required": false,
        "timeframe": "timeframe if mentioned",
        "instructions": "follow-up instructions"
    }},
    "red_flags": [],
    "summary": "Brief clinical summary"
}}

Conversation:

{conversation}"#;

pub const VERIFICATION_PROMPT: &str = r#"You are a SENIOR MEDICAL DOCTOR reviewing a prescription for safety and appropriateness.

PATIENT INFORMATION:
Name: {patient_name}
Age: {patient_age}
Symptoms: {symptoms}
Diagnosed Conditions: {conditions}
Medical History: {medical_history}
Known Allergies: {allergies}

PROPOSED PRESCRIPTION:
{prescribed_medicines}

PERFORM COMPREHENSIVE REVIEW:
1. Age-appropriateness of each medicine and dosage
2. Contraindications with patient's conditions
3. Allergy cross-reactions
4. Drug-drug interactions
5. Dosage safety for patient's age
6. Any red flags or safety concerns

Return ONLY valid JSON (no other text):
{{
    "overall_safety": "safe/caution/unsafe",
    "can_prescribe": true/false,
    "verification_summary": "Brief professional summary",
    "medicine_reviews": [
        {{
            "medicine_name": "medicine name",
            "status": "approved/caution/rejected",
            "reason": "detailed professional reasoning",
            "age_appropriate": true/false,
            "contraindications": [],
            "alternatives_if_rejected": []
        }}
    ],
    "drug_interactions": [
        {{
            "medicines": ["med1", "med2"],
            "interaction_type": "mild/moderate/severe",
            "description": "interaction details",
            "recommendation": "clinical recommendation"
        }}
    ],
    "dosage_concerns": [
        {{
            "medicine": "medicine name",
            "concern": "specific concern",
            "recommended_adjustment": "adjustment needed"
        }}
    ],
    "red_flags": [],
    "recommendations": [],
    "senior_doctor_notes": "Additional clinical guidance"
}}"#;

/// Build the conversation analysis prompt.
pub fn build_analysis_prompt(conversation: &str) -> Result<String, TemplateError> {
    let mut values = BTreeMap::new();
    values.insert("conversation", conversation.to_string());
    render(ANALYSIS_PROMPT, &values)
}

/// Build the prescription verification prompt.
///
/// List-valued inputs render as bullet lines; an empty list renders as an
/// explicit placeholder line instead of a blank.
pub fn build_verification_prompt(request: &VerificationRequest) -> Result<String, TemplateError> {
    let mut values = BTreeMap::new();
    values.insert("patient_name", request.patient_name.clone());
    values.insert("patient_age", request.patient_age.to_string());
    values.insert("symptoms", bullet_list(&request.symptoms, "Not specified"));
    values.insert("conditions", bullet_list(&request.conditions, "Not specified"));
    values.insert(
        "medical_history",
        bullet_list(&request.medical_history, "- None reported"),
    );
    values.insert("allergies", bullet_list(&request.allergies, "- None known"));
    values.insert(
        "prescribed_medicines",
        bullet_list(&request.prescribed_medicines, "Not specified"),
    );
    render(VERIFICATION_PROMPT, &values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> VerificationRequest {
        VerificationRequest {
            prescribed_medicines: vec!["Amoxicillin 500mg".into(), "Paracetamol 1g".into()],
            patient_name: "Jordan Lee".into(),
            patient_age: 34,
            symptoms: vec!["sore throat".into()],
            conditions: vec![],
            medical_history: vec![],
            allergies: vec!["Penicillin".into()],
        }
    }

    #[test]
    fn analysis_prompt_embeds_conversation() {
        let prompt = build_analysis_prompt("fever for 2 days").unwrap();
        assert!(prompt.ends_with("Conversation:\n\nfever for 2 days"));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn analysis_prompt_json_example_has_single_braces() {
        let prompt = build_analysis_prompt("some conversation").unwrap();
        assert!(prompt.contains("\"diseases_and_conditions\": ["));
        assert!(prompt.contains("\"mentioned_by\": \"doctor/patient/both\""));
        assert!(!prompt.contains("{{"));
        assert!(!prompt.contains("}}"));
    }

    #[test]
    fn verification_prompt_substitutes_patient_fields() {
        let prompt = build_verification_prompt(&sample_request()).unwrap();
        assert!(prompt.contains("Name: Jordan Lee"));
        assert!(prompt.contains("Age: 34"));
        assert!(prompt.contains("- Amoxicillin 500mg\n- Paracetamol 1g"));
        assert!(prompt.contains("- Penicillin"));
    }

    #[test]
    fn verification_prompt_renders_empty_lists_as_placeholders() {
        let mut request = sample_request();
        request.symptoms.clear();
        request.allergies.clear();
        let prompt = build_verification_prompt(&request).unwrap();
        assert!(prompt.contains("Symptoms: Not specified"));
        assert!(prompt.contains("Diagnosed Conditions: Not specified"));
        assert!(prompt.contains("Medical History: - None reported"));
        assert!(prompt.contains("Known Allergies: - None known"));
    }

    #[test]
    fn verification_prompt_leaves_no_placeholders() {
        let prompt = build_verification_prompt(&sample_request()).unwrap();
        assert!(!prompt.contains("{patient_name}"));
        assert!(!prompt.contains("{prescribed_medicines}"));
        // JSON example came out with plain braces
        assert!(prompt.contains("\"overall_safety\": \"safe/caution/unsafe\""));
        assert!(!prompt.contains("{{"));
    }
}
