//! AI adapter module. Implements ModelPort for LLM backends.
//!
//! Provides an OpenAI-compatible adapter and a mock adapter for testing.

pub mod mock_adapter;
pub mod openai_adapter;

pub use mock_adapter::MockModelAdapter;
pub use openai_adapter::{BackendConfig, OpenAiAdapter};
