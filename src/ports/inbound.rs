//! Inbound port. UI (adapter) calls into the application.

/// Input port: the shell drives classification runs.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive classify loop until the user quits.
    async fn run(&self) -> anyhow::Result<()>;
}
