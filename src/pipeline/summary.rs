//! Projection of a full extraction into the simplified summary view.

use super::types::{
    ConversationExtraction, ConversationSummaryView, MedicationKind, MedicationMention, Priority,
};

/// Project a full extraction into [`ConversationSummaryView`].
///
/// Lossy by design: names only for diseases and symptoms, treatment points
/// filtered to high/medium priority, medications annotated with dosage and
/// split into an all-medications list and a prescribed-only list. Absent
/// follow-up detail projects to `false`/empty.
pub fn summarize_extraction(extraction: &ConversationExtraction) -> ConversationSummaryView {
    ConversationSummaryView {
        diseases: extraction
            .diseases_and_conditions
            .iter()
            .map(|disease| disease.name.clone())
            .collect(),
        symptoms: extraction
            .symptoms
            .iter()
            .map(|symptom| symptom.symptom.clone())
            .collect(),
        key_treatment_points: extraction
            .important_treatment_points
            .iter()
            .filter(|point| matches!(point.priority, Priority::High | Priority::Medium))
            .map(|point| point.point.clone())
            .collect(),
        medications_prescribed: extraction
            .medications
            .iter()
            .filter(|med| med.kind == MedicationKind::Prescribed)
            .map(format_medication)
            .collect(),
        follow_up_required: extraction.follow_up.required,
        follow_up_timeframe: extraction.follow_up.timeframe.clone().unwrap_or_default(),
        red_flags: extraction.red_flags.clone(),
        summary: extraction.summary.clone(),
        all_medications: extraction.medications.iter().map(format_medication).collect(),
        medical_history: extraction.medical_history.clone(),
        allergies: extraction.allergies.clone(),
    }
}

fn format_medication(med: &MedicationMention) -> String {
    format!(
        "{} - {}",
        med.name,
        med.dosage.as_deref().unwrap_or("dosage not specified"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::parser::parse_extraction;
    use crate::pipeline::types::{FollowUp, TreatmentCategory, TreatmentPoint};

    #[test]
    fn priority_filter_keeps_high_and_medium_only() {
        let extraction = ConversationExtraction {
            important_treatment_points: vec![
                TreatmentPoint {
                    category: TreatmentCategory::Medication,
                    point: "X".into(),
                    priority: Priority::High,
                },
                TreatmentPoint {
                    category: TreatmentCategory::Lifestyle,
                    point: "Y".into(),
                    priority: Priority::Low,
                },
                TreatmentPoint {
                    category: TreatmentCategory::Instructions,
                    point: "Z".into(),
                    priority: Priority::Medium,
                },
            ],
            ..Default::default()
        };

        let view = summarize_extraction(&extraction);
        assert_eq!(view.key_treatment_points, vec!["X", "Z"]);
    }

    #[test]
    fn medication_split_annotates_dosage() {
        let candidate = r#"{
            "medications": [
                {"name": "A", "dosage": "5mg", "type": "prescribed"},
                {"name": "B", "type": "current"}
            ]
        }"#;
        let extraction = parse_extraction(candidate).unwrap();

        let view = summarize_extraction(&extraction);
        assert_eq!(view.medications_prescribed, vec!["A - 5mg"]);
        assert_eq!(view.all_medications, vec!["A - 5mg", "B - dosage not specified"]);
    }

    #[test]
    fn follow_up_defaults_project_to_false_and_empty() {
        let view = summarize_extraction(&ConversationExtraction::default());
        assert!(!view.follow_up_required);
        assert_eq!(view.follow_up_timeframe, "");
        assert!(view.diseases.is_empty());
        assert!(view.all_medications.is_empty());
    }

    #[test]
    fn follow_up_detail_passes_through() {
        let extraction = ConversationExtraction {
            follow_up: FollowUp {
                required: true,
                timeframe: Some("2 weeks".into()),
                instructions: Some("return if fever persists".into()),
            },
            ..Default::default()
        };

        let view = summarize_extraction(&extraction);
        assert!(view.follow_up_required);
        assert_eq!(view.follow_up_timeframe, "2 weeks");
    }

    #[test]
    fn scenario_fever_conversation_projects_exactly() {
        let candidate = r#"{
            "diseases_and_conditions": [],
            "symptoms": [{"symptom": "fever", "duration": "2 days"}],
            "important_treatment_points": [],
            "medications": [],
            "follow_up": {"required": false},
            "red_flags": [],
            "summary": "Patient has fever"
        }"#;
        let extraction = parse_extraction(candidate).unwrap();

        let view = summarize_extraction(&extraction);
        let expected = ConversationSummaryView {
            diseases: vec![],
            symptoms: vec!["fever".into()],
            key_treatment_points: vec![],
            medications_prescribed: vec![],
            follow_up_required: false,
            follow_up_timeframe: "".into(),
            red_flags: vec![],
            summary: "Patient has fever".into(),
            all_medications: vec![],
            medical_history: vec![],
            allergies: vec![],
        };
        assert_eq!(view, expected);
    }
}
