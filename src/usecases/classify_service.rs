//! Classification service. Orchestrates prompt → backend → validation.
//!
//! Stateless across calls: only the read-only catalog, the model port and
//! the retry policy are shared, so concurrent classifications need no
//! locking.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{
    ClassificationRequest, ClassificationResult, ClassifyError, Prompt, TaxonomyCatalog,
};
use crate::ports::ModelPort;
use crate::usecases::{prompt, validator};

/// Bounded retry for transient backend failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first call.
    pub max_retries: u32,
    /// Base backoff; attempt N sleeps N × base.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Orchestrator for one classification call:
/// request validation → prompt → backend (with retry) → response validation.
pub struct ClassifyService {
    model: Arc<dyn ModelPort>,
    catalog: Arc<TaxonomyCatalog>,
    retry: RetryPolicy,
}

impl ClassifyService {
    pub fn new(model: Arc<dyn ModelPort>, catalog: Arc<TaxonomyCatalog>, retry: RetryPolicy) -> Self {
        Self {
            model,
            catalog,
            retry,
        }
    }

    /// Classify one PO description.
    ///
    /// An empty or whitespace-only description fails with `InvalidRequest`
    /// before any backend call. A returned-but-invalid response is surfaced
    /// as its validation error and never retried.
    pub async fn classify(
        &self,
        description: &str,
        supplier: Option<&str>,
    ) -> Result<ClassificationResult, ClassifyError> {
        let request = ClassificationRequest::new(description, supplier)?;
        let prompt = prompt::build_prompt(&request, &self.catalog);
        debug!(
            description_len = request.description().len(),
            has_supplier = request.supplier().is_some(),
            "prompt built"
        );

        let raw = self.invoke_with_retry(&prompt).await?;
        let result = validator::validate_response(&raw, &self.catalog)?;

        info!(
            l1 = %result.category,
            l2 = %result.sub_category,
            l3 = %result.commodity,
            "classification complete"
        );
        Ok(result)
    }

    /// Call the backend, retrying transient failures up to the policy bound
    /// with linear backoff.
    async fn invoke_with_retry(&self, prompt: &Prompt) -> Result<String, ClassifyError> {
        let mut attempt: u32 = 0;
        loop {
            match self.model.complete(prompt).await {
                Ok(raw) => return Ok(raw),
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    warn!(attempt, error = %e, "transient backend failure, retrying");
                    tokio::time::sleep(self.retry.backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
