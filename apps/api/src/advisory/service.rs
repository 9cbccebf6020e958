use tracing::{error, info};

use crate::advisory::affiliate::AffiliateLinker;
use crate::advisory::models::{AdvisoryRequest, AdvisoryResult};
use crate::advisory::normalizer::normalize;
use crate::advisory::prompts::build_prompt;
use crate::errors::AppError;
use crate::llm_client::CompletionModel;
use crate::presentation::summarize;

/// Runs one advisory round trip: build prompt → single upstream call → normalize.
pub async fn run_advisory(
    model: &dyn CompletionModel,
    linker: &AffiliateLinker,
    request: &AdvisoryRequest,
) -> Result<AdvisoryResult, AppError> {
    let prompt = build_prompt(request.free_text());

    let raw = model.complete(&prompt.system, &prompt.user).await?;

    let result = normalize(&raw, linker).map_err(|e| {
        // Raw text stays in the logs; the caller only sees the error kind.
        error!("Failed to normalize AI response ({e}): {raw}");
        AppError::MalformedResponse(e)
    })?;

    info!("Scanned {}", summarize(&result));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingModel {
        reply: Result<String, ()>,
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl CompletionModel for RecordingModel {
        async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            self.reply.clone().map_err(|_| LlmError::EmptyResponse)
        }
    }

    fn linker() -> AffiliateLinker {
        AffiliateLinker::new(None).unwrap()
    }

    #[tokio::test]
    async fn test_sends_built_prompt_once() {
        let model = RecordingModel {
            reply: Ok(r#"{"product":"Compost","safety":{"score":5},"effectiveness":{"score":4},"overall":{"score":90}}"#.to_string()),
            seen: Mutex::new(vec![]),
        };
        let request = AdvisoryRequest::new(" Compost ").unwrap();

        let result = run_advisory(&model, &linker(), &request).await.unwrap();

        assert_eq!(result.product, "Compost");
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, "Compost");
        assert!(seen[0].0.contains("\"recommendation\""));
    }

    #[tokio::test]
    async fn test_upstream_errors_propagate() {
        let model = RecordingModel {
            reply: Err(()),
            seen: Mutex::new(vec![]),
        };
        let request = AdvisoryRequest::new("Compost").unwrap();

        let err = run_advisory(&model, &linker(), &request).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_prose_is_malformed() {
        let model = RecordingModel {
            reply: Ok("Compost is great for soil.".to_string()),
            seen: Mutex::new(vec![]),
        };
        let request = AdvisoryRequest::new("Compost").unwrap();

        let err = run_advisory(&model, &linker(), &request).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }
}
