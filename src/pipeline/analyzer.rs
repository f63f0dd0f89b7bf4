//! Conversation analysis pipeline.
//!
//! `analyze` runs the full chain and returns a typed outcome; `summarize`
//! projects the result (or the all-defaults fallback) into the simplified
//! view, mirroring what simple consumers of the HTTP layer receive.

use super::client::CompletionClient;
use super::normalize::isolate_json;
use super::parser::parse_extraction;
use super::prompt::build_analysis_prompt;
use super::summary::summarize_extraction;
use super::types::{ConversationExtraction, ConversationSummaryView, Outcome};
use super::PipelineError;
use crate::config::DEFAULT_RAW_SNIPPET_LIMIT;

/// Minimum conversation length for analysis (characters, after trimming).
pub const MIN_CONVERSATION_LENGTH: usize = 10;

pub struct ConversationAnalyzer {
    client: Box<dyn CompletionClient + Send + Sync>,
    snippet_limit: usize,
}

impl ConversationAnalyzer {
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

    /// Analyze a clinical conversation into a structured extraction.
    ///
    /// Input shorter than [`MIN_CONVERSATION_LENGTH`] is rejected before
    /// the completion service is contacted. Every failure comes back as an
    /// `Outcome::Failure` with iterable empty collections.
    pub fn analyze(&self, conversation: &str) -> Outcome<ConversationExtraction> {
        let trimmed = conversation.trim();
        if trimmed.len() < MIN_CONVERSATION_LENGTH {
            return Outcome::failure(
                &PipelineError::InvalidInput("conversation text too short".into()),
                None,
                self.snippet_limit,
            );
        }

        let prompt = match build_analysis_prompt(trimmed) {
            Ok(prompt) => prompt,
            Err(e) => return Outcome::failure(&e.into(), None, self.snippet_limit),
        };

        let completion = match self.client.generate(&prompt) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "conversation analysis completion failed");
                return Outcome::failure(&e, None, self.snippet_limit);
            }
        };

        let candidate = isolate_json(&completion);
        match parse_extraction(candidate) {
            Ok(extraction) => {
                tracing::debug!(
                    diseases = extraction.diseases_and_conditions.len(),
                    symptoms = extraction.symptoms.len(),
                    "conversation analysis parsed"
                );
                Outcome::Success(extraction)
            }
            Err(e) => {
                tracing::warn!(error = %e, "completion did not parse as an extraction");
                Outcome::failure(&e, Some(candidate), self.snippet_limit)
            }
        }
    }

    /// Analyze and project into the simplified summary view.
    ///
    /// A failed analysis yields a view over the all-defaults extraction,
    /// so the shape is identical either way.
    pub fn summarize(&self, conversation: &str) -> ConversationSummaryView {
        let outcome = self.analyze(conversation);
        if let Outcome::Failure(failure) = &outcome {
            tracing::warn!(
                error = %failure.error,
                "analysis failed; summary reflects an empty extraction"
            );
        }
        summarize_extraction(outcome.payload())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::pipeline::client::MockCompletionClient;
    use crate::pipeline::ErrorKind;

    /// Mock client that counts calls, to prove boundary rejection never
    /// contacts the service.
    struct CountingClient {
        calls: Arc<AtomicUsize>,
        response: String,
    }

    impl CountingClient {
        fn new(response: &str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let client = Self {
                calls: Arc::clone(&calls),
                response: response.to_string(),
            };
            (client, calls)
        }
    }

    impl CompletionClient for CountingClient {
        fn generate(&self, _prompt: &str) -> Result<String, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct FailingClient;

    impl CompletionClient for FailingClient {
        fn generate(&self, _prompt: &str) -> Result<String, PipelineError> {
            Err(PipelineError::Completion("connection refused".into()))
        }
    }

    fn fever_completion() -> String {
        r#"```json
{
  "diseases_and_conditions": [],
  "symptoms": [{"symptom": "fever", "duration": "2 days"}],
  "important_treatment_points": [],
  "medications": [],
  "follow_up": {"required": false},
  "red_flags": [],
  "summary": "Patient has fever"
}
```"#
            .to_string()
    }

    #[test]
    fn short_input_is_rejected_without_a_service_call() {
        let (client, calls) = CountingClient::new("unused");
        let analyzer = ConversationAnalyzer::new(Box::new(client));

        let outcome = analyzer.analyze("hi");
        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidInput));
        assert!(outcome.payload().symptoms.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn whitespace_padding_does_not_satisfy_minimum_length() {
        let analyzer = ConversationAnalyzer::new(Box::new(MockCompletionClient::new("unused")));
        let outcome = analyzer.analyze("   hi        ");
        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidInput));
    }

    #[test]
    fn fenced_completion_parses_into_extraction() {
        let analyzer =
            ConversationAnalyzer::new(Box::new(MockCompletionClient::new(&fever_completion())));

        let outcome = analyzer.analyze("fever for 2 days");
        assert!(outcome.is_success());
        let extraction = outcome.payload();
        assert_eq!(extraction.symptoms.len(), 1);
        assert_eq!(extraction.symptoms[0].symptom, "fever");
        assert_eq!(extraction.summary, "Patient has fever");
    }

    #[test]
    fn unfenced_json_completion_also_parses() {
        let analyzer = ConversationAnalyzer::new(Box::new(MockCompletionClient::new(
            r#"{"symptoms": [{"symptom": "cough"}], "summary": "Cough"}"#,
        )));

        let outcome = analyzer.analyze("patient reports coughing");
        assert!(outcome.is_success());
        assert_eq!(outcome.payload().symptoms[0].symptom, "cough");
    }

    #[test]
    fn garbage_completion_yields_parse_failure_with_truncated_echo() {
        let garbage = "x".repeat(600);
        let analyzer = ConversationAnalyzer::new(Box::new(MockCompletionClient::new(&garbage)));

        let outcome = analyzer.analyze("fever for two days and counting");
        match &outcome {
            Outcome::Failure(failure) => {
                assert_eq!(failure.kind, ErrorKind::ParseError);
                assert_eq!(failure.raw_response.as_deref(), Some(&garbage[..500]));
                assert!(failure.fallback.diseases_and_conditions.is_empty());
                assert!(failure.fallback.symptoms.is_empty());
            }
            Outcome::Success(_) => panic!("garbage must not parse"),
        }
    }

    #[test]
    fn snippet_limit_is_configurable() {
        let analyzer = ConversationAnalyzer::new(Box::new(MockCompletionClient::new(
            "definitely not json, and quite long",
        )))
        .with_snippet_limit(10);

        let outcome = analyzer.analyze("a conversation of adequate length");
        match outcome {
            Outcome::Failure(failure) => {
                assert_eq!(failure.raw_response.as_deref(), Some("definitely"));
            }
            Outcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn completion_error_carries_no_raw_echo() {
        let analyzer = ConversationAnalyzer::new(Box::new(FailingClient));

        let outcome = analyzer.analyze("long enough conversation text");
        match outcome {
            Outcome::Failure(failure) => {
                assert_eq!(failure.kind, ErrorKind::CompletionError);
                assert!(failure.raw_response.is_none());
            }
            Outcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn summarize_projects_successful_analysis() {
        let analyzer =
            ConversationAnalyzer::new(Box::new(MockCompletionClient::new(&fever_completion())));

        let view = analyzer.summarize("fever for 2 days");
        assert_eq!(view.symptoms, vec!["fever"]);
        assert_eq!(view.summary, "Patient has fever");
        assert!(!view.follow_up_required);
        assert_eq!(view.follow_up_timeframe, "");
        assert!(view.medications_prescribed.is_empty());
    }

    #[test]
    fn summarize_of_failed_analysis_is_an_empty_view() {
        let analyzer = ConversationAnalyzer::new(Box::new(FailingClient));

        let view = analyzer.summarize("long enough conversation text");
        assert!(view.diseases.is_empty());
        assert!(view.symptoms.is_empty());
        assert_eq!(view.summary, "");
    }
}
