//! Mock backend adapter for tests and keyless development runs.
//!
//! Returns predetermined outcomes without making API calls. Simulates
//! network latency with a configurable delay and counts invocations so
//! tests can assert how often the backend was hit.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::info;

use crate::domain::{ClassifyError, Prompt};
use crate::ports::ModelPort;

pub struct MockModelAdapter {
    /// Outcomes played in order before falling back to `canned`.
    script: Mutex<VecDeque<Result<String, ClassifyError>>>,
    canned: Option<String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockModelAdapter {
    /// Adapter that always answers with `canned`.
    pub fn canned(canned: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            canned: Some(canned.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Adapter that plays `outcomes` in order, then fails.
    pub fn scripted(outcomes: Vec<Result<String, ClassifyError>>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            canned: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// How many times `complete` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ModelPort for MockModelAdapter {
    async fn complete(&self, prompt: &Prompt) -> Result<String, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        info!(user_len = prompt.user.len(), "[MOCK] simulating backend call");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(outcome) = self.script.lock().await.pop_front() {
            return outcome;
        }
        match &self.canned {
            Some(canned) => Ok(canned.clone()),
            None => Err(ClassifyError::Transport("mock script exhausted".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> Prompt {
        Prompt {
            system: "system".to_string(),
            user: "user".to_string(),
        }
    }

    #[tokio::test]
    async fn test_canned_adapter_repeats_and_counts() {
        let mock = MockModelAdapter::canned(r#"{"L1":"IT Services"}"#);
        assert_eq!(mock.call_count(), 0);

        for _ in 0..3 {
            let raw = mock.complete(&prompt()).await.unwrap();
            assert_eq!(raw, r#"{"L1":"IT Services"}"#);
        }
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_scripted_adapter_plays_in_order() {
        let mock = MockModelAdapter::scripted(vec![
            Err(ClassifyError::RateLimited),
            Ok("second".to_string()),
        ]);

        assert!(matches!(
            mock.complete(&prompt()).await,
            Err(ClassifyError::RateLimited)
        ));
        assert_eq!(mock.complete(&prompt()).await.unwrap(), "second");
        // exhausted script with no canned fallback
        assert!(matches!(
            mock.complete(&prompt()).await,
            Err(ClassifyError::Transport(_))
        ));
    }
}
