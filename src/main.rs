//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run the console.
//! No business logic here.

use daily_readings::adapters::lectionary::{JsonLectionary, SqliteLectionary};
use daily_readings::adapters::persistence::SessionJson;
use daily_readings::adapters::speech::SsmlRenderer;
use daily_readings::adapters::ui::ConsoleInputPort;
use daily_readings::ports::{InputPort, LectionaryPort, SessionStorePort, SpeechRenderer};
use daily_readings::shared::config::AppConfig;
use daily_readings::usecases::{DeliveryEngine, TurnService};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    daily_readings::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config unreadable, using defaults");
        AppConfig::default()
    });

    let lectionary: Arc<dyn LectionaryPort> = if let Some(db) = cfg.lectionary_db.as_deref() {
        Arc::new(
            SqliteLectionary::connect(db)
                .await
                .map_err(|e| anyhow::anyhow!("lectionary connect failed: {}", e))?,
        )
    } else if let Some(dir) = cfg.lectionary_dir.as_deref() {
        info!(dir, "using JSON lectionary");
        Arc::new(JsonLectionary::new(dir))
    } else {
        anyhow::bail!(
            "Set DAILY_READINGS_LECTIONARY_DB or DAILY_READINGS_LECTIONARY_DIR (env or .env)"
        );
    };

    let budget = cfg.delivery_budget();
    let offset = cfg.utc_offset_or_default();
    info!(
        max_length = budget.max_length,
        utc_offset = %offset,
        "speech budget configured"
    );

    let renderer: Arc<dyn SpeechRenderer> = Arc::new(SsmlRenderer::new());
    let engine = DeliveryEngine::new(Arc::clone(&renderer), budget);
    let service = Arc::new(TurnService::new(
        lectionary,
        Arc::clone(&renderer),
        engine,
        offset,
    ));

    let session_path = cfg.session_path_or_default();
    info!(path = %session_path.display(), "session file");
    let sessions: Arc<dyn SessionStorePort> = Arc::new(SessionJson::new(&session_path));

    let input_port: Arc<dyn InputPort> =
        Arc::new(ConsoleInputPort::new(service, sessions, renderer));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
