//! Wiring & DI. Entry point: bootstrap adapters, inject into the service,
//! run the shell. No classification logic here.

use std::sync::Arc;
use std::time::Duration;

use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use po_classify::adapters::ai::{BackendConfig, MockModelAdapter, OpenAiAdapter};
use po_classify::adapters::ui::tui::TuiInputPort;
use po_classify::domain::TaxonomyCatalog;
use po_classify::ports::{InputPort, ModelPort};
use po_classify::shared::config::AppConfig;
use po_classify::usecases::{ClassifyService, RetryPolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    po_classify::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_default();

    let catalog = match cfg.taxonomy_path() {
        Some(path) => {
            info!(path = %path.display(), "loading taxonomy catalog from file");
            TaxonomyCatalog::from_file(&path)?
        }
        None => TaxonomyCatalog::embedded()?,
    };
    info!(
        categories = catalog.categories().len(),
        "taxonomy catalog loaded"
    );
    let catalog = Arc::new(catalog);

    let model: Arc<dyn ModelPort> = if cfg.is_ai_configured() {
        let backend = BackendConfig {
            model: cfg.ai_model_or_default(),
            timeout: cfg.timeout_or_default(),
            temperature: cfg.temperature_or_default(),
        };
        info!(
            model = %backend.model,
            url = %cfg.ai_api_url_or_default(),
            "using OpenAI-compatible backend"
        );
        Arc::new(OpenAiAdapter::new(
            cfg.ai_api_url_or_default(),
            cfg.ai_api_key().unwrap_or_default(),
            backend,
        ))
    } else {
        warn!("PO_CLASSIFY_AI_API_KEY not set, using mock backend");
        Arc::new(
            MockModelAdapter::canned(mock_canned_response(&catalog))
                .with_delay(Duration::from_millis(400)),
        )
    };

    let retry = RetryPolicy {
        max_retries: cfg.max_retries_or_default(),
        backoff: cfg.retry_backoff_or_default(),
    };
    let service = Arc::new(ClassifyService::new(model, catalog.clone(), retry));

    let shell = TuiInputPort::new(service, cfg.export_dir_or_default());
    shell.run().await
}

/// First full chain of the catalog, as the canned mock reply.
fn mock_canned_response(catalog: &TaxonomyCatalog) -> String {
    let category = catalog.categories().first();
    let sub = category.and_then(|c| c.sub_categories.first());
    let commodity = sub.and_then(|s| s.commodities.first());
    match (category, sub, commodity) {
        (Some(c), Some(s), Some(m)) => {
            serde_json::json!({"L1": c.name, "L2": s.name, "L3": m}).to_string()
        }
        _ => "{}".to_string(),
    }
}
