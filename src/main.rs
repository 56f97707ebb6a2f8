use std::sync::Arc;

use leetdesign::config::{init_db, Config, StoreBackend, VerificationBackend};
use leetdesign::services::grader::OpenAiGrader;
use leetdesign::services::jwt::JwtService;
use leetdesign::services::mailer::{HttpMailer, LogMailer, Mailer};
use leetdesign::services::metrics::MetricsRegistry;
use leetdesign::services::rate_limit::create_rate_limiter;
use leetdesign::services::verification::{
    MemoryVerificationStore, RedisVerificationStore, VerificationService, VerificationStore,
};
use leetdesign::store::Repositories;
use leetdesign::{create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leetdesign=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load environment configuration");

    let repos = match config.store_backend {
        StoreBackend::MySql => {
            let url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL must be set for the mysql store");
            let pool = init_db(url).await.expect("Failed to initialize MySQL");
            tracing::info!("Connected to MySQL");
            Repositories::mysql(pool)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data will not survive a restart");
            Repositories::memory()
        }
    };

    let verification_store: Arc<dyn VerificationStore> = match config.verification_backend {
        VerificationBackend::Redis => {
            let store = RedisVerificationStore::connect(&config.redis_url)
                .await
                .expect("Failed to connect to Redis");
            tracing::info!("Verification codes stored in Redis");
            Arc::new(store)
        }
        VerificationBackend::Memory => Arc::new(MemoryVerificationStore::new()),
    };

    let mailer: Arc<dyn Mailer> = match &config.mail {
        Some(mail) => Arc::new(HttpMailer::new(mail)),
        None => {
            tracing::warn!("MAIL_API_URL not set; verification emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    if config.grader.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY not set; grading requests will fail");
    }
    let grader = OpenAiGrader::new(&config.grader).expect("Failed to build grader client");

    let metrics = MetricsRegistry::new().expect("Failed to create metrics registry");
    match repos.problems.count().await {
        Ok(count) => metrics.catalog_size.set(count as f64),
        Err(e) => tracing::warn!("Could not read catalog size at start-up: {}", e),
    }

    let state = Arc::new(AppState {
        repos,
        verification: VerificationService::new(verification_store, mailer),
        grader: Arc::new(grader),
        jwt_service: JwtService::new(config.jwt_secret.clone()),
        metrics,
        cookie_secure: config.cookie_secure,
    });

    let rate_limiter = create_rate_limiter(config.rate_limit_per_second, config.rate_limit_burst);
    let app = create_app(state, rate_limiter);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await.expect("Server error");
}
