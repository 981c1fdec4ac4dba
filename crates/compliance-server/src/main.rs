//! compliance_server — REST server for the three-pass compliance auditor.
//!
//! See `config` for the env vars read at startup.
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run -p compliance-server
//!
//! curl -X POST http://127.0.0.1:8000/summarize \
//!   -H "Content-Type: application/json" \
//!   -d '{"text": "Late SAR filings are fined $5,000 per account per day."}'
//! ```

use anyhow::{Context, Result};
use compliance_agentic::{create_llm_client, ReflectivePipeline};
use compliance_server::config::ServerConfig;
use compliance_server::router::build_router;
use compliance_server::state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,compliance_server=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let client = create_llm_client(config.backend)?;
    let pipeline_config = config.pipeline_config().await?;

    tracing::info!(
        backend = %config.backend,
        draft_model = %pipeline_config.stages.draft.model,
        audit_model = %pipeline_config.stages.audit.model,
        final_model = %pipeline_config.stages.finalize.model,
        custom_policy = config.policy_path.is_some(),
        "Pipeline configured"
    );

    let state = AppState::new(ReflectivePipeline::new(client, pipeline_config));
    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("compliance_server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await
        .context("server error")
}
