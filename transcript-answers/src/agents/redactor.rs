// Redactor Agent: strips PII from the query before it leaves for retrieval

use std::sync::Arc;

use tracing::debug;

use super::PiiDetector;
use crate::error::ServiceError;

pub struct RedactorAgent {
    detector: Arc<dyn PiiDetector>,
    language: String,
}

impl RedactorAgent {
    pub fn new(detector: Arc<dyn PiiDetector>, language: impl Into<String>) -> Self {
        Self {
            detector,
            language: language.into(),
        }
    }

    /// Replaces every detected entity with its category placeholder.
    pub async fn redact(&self, text: &str) -> Result<String, ServiceError> {
        let entities = self.detector.analyze(text, &self.language).await?;
        debug!("Redactor: {} PII entities detected", entities.len());

        if entities.is_empty() {
            return Ok(text.to_string());
        }

        self.detector.anonymize(text, &entities).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::PiiEntity;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeDetector {
        anonymize_calls: AtomicUsize,
        fail: bool,
    }

    impl FakeDetector {
        fn new(fail: bool) -> Self {
            Self {
                anonymize_calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl PiiDetector for FakeDetector {
        async fn analyze(
            &self,
            text: &str,
            language: &str,
        ) -> Result<Vec<PiiEntity>, ServiceError> {
            assert_eq!(language, "en");
            if self.fail {
                return Err(ServiceError::invalid("presidio-analyzer", "boom"));
            }
            Ok(text
                .find("Ahmed")
                .map(|start| {
                    vec![json!({"entity_type": "PERSON", "start": start, "end": start + 5})]
                })
                .unwrap_or_default())
        }

        async fn anonymize(
            &self,
            text: &str,
            _entities: &[PiiEntity],
        ) -> Result<String, ServiceError> {
            self.anonymize_calls.fetch_add(1, Ordering::SeqCst);
            Ok(text.replace("Ahmed", "<PERSON>"))
        }
    }

    #[tokio::test]
    async fn replaces_detected_entities() {
        let detector = Arc::new(FakeDetector::new(false));
        let agent = RedactorAgent::new(detector.clone(), "en");

        let redacted = agent.redact("My name is Ahmed, what is zakat?").await.unwrap();

        assert_eq!(redacted, "My name is <PERSON>, what is zakat?");
        assert_eq!(detector.anonymize_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clean_text_skips_anonymizer() {
        let detector = Arc::new(FakeDetector::new(false));
        let agent = RedactorAgent::new(detector.clone(), "en");

        let redacted = agent.redact("what is zakat?").await.unwrap();

        assert_eq!(redacted, "what is zakat?");
        assert_eq!(detector.anonymize_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn detector_failure_propagates() {
        let agent = RedactorAgent::new(Arc::new(FakeDetector::new(true)), "en");
        assert!(agent.redact("anything").await.is_err());
    }
}
