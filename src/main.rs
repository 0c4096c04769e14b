use std::sync::Arc;

use fridge::config::ServerConfig;
use fridge::llm::{AnthropicClient, LlmChat};
use fridge::rate_limit::{RateLimitConfig, RateLimiter};
use fridge::services::analysis::analysis_max_tokens;
use fridge::services::tts::{FishAudioClient, SpeechSynth, TtsConfig};
use fridge::services::words;
use fridge::state::AppState;
use fridge::store::{MemoryStore, PgStore};
use fridge::{db, routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let port = config.port;

    let state = match config.database_url.clone() {
        Some(database_url) => {
            let pool = db::init_pool(&database_url)
                .await
                .expect("database init failed");
            AppState::new(Arc::new(PgStore::new(pool)), config)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store, data is lost on restart");
            AppState::new(Arc::new(MemoryStore::new()), config)
        }
    };

    words::seed_default_categories(state.poems.as_ref())
        .await
        .expect("word category seeding failed");

    // Analysis is optional: without a key the route answers 503.
    let llm: Option<Arc<dyn LlmChat>> = match AnthropicClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; poem analysis disabled");
            None
        }
    };

    let tts_config = TtsConfig::from_env();
    let tts: Option<Arc<dyn SpeechSynth>> = match FishAudioClient::from_config(&tts_config) {
        Ok(Some(client)) => {
            tracing::info!(voice = %tts_config.default_voice, "Fish Audio client initialized");
            Some(Arc::new(client))
        }
        Ok(None) => {
            tracing::warn!("FISH_AUDIO_API_KEY not set; text-to-speech disabled");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Fish Audio client failed to build; text-to-speech disabled");
            None
        }
    };

    let state = state
        .with_llm(llm, analysis_max_tokens())
        .with_tts(tts, tts_config)
        .with_rate_limiter(RateLimiter::new(RateLimitConfig::from_env()));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "fridge listening");
    axum::serve(listener, app).await.expect("server failed");
}
