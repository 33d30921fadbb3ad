//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ClassifyError, Prompt};

/// Generative backend gateway. One operation: instruction in, raw text out.
///
/// Implementations enforce their configured timeout — a call past it fails
/// with `ClassifyError::Timeout` rather than blocking. Output may vary
/// across calls with the same input, but a call is always safe to retry:
/// it produces no durable state.
#[async_trait::async_trait]
pub trait ModelPort: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, ClassifyError>;
}
