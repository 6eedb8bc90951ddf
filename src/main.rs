use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use tipster::api::router::create_router;
use tipster::config::AppConfig;
use tipster::settlement::{run_settlement_poller, PollerConfig};
use tipster::sports::{ApiSportsClient, FixtureSource};
use tipster::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_json);
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url).await?;
    db::run_migrations(&db).await?;
    tracing::info!("Database connected, migrations applied");

    let metrics_handle = metrics::init_metrics()?;

    // --- Fixture source ---
    let fixtures: Option<Arc<dyn FixtureSource>> = match config.sports_api_key.clone() {
        Some(key) => {
            let client = ApiSportsClient::with_timeout(
                config.sports_api_host.clone(),
                key,
                config.sports_api_timeout(),
            )?;
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("No SPORTS_API_KEY, settlement is unavailable");
            None
        }
    };

    let run_lock = Arc::new(Mutex::new(()));

    // --- Settlement poller ---
    match (&fixtures, config.settlement_enabled) {
        (Some(source), true) => {
            let poller_config = PollerConfig {
                interval: Duration::from_secs(config.settlement_interval_secs),
                run_timeout: config.settlement_run_timeout(),
                max_backoff: Duration::from_secs(config.settlement_max_backoff_secs),
                policy: config.failure_policy(),
            };
            tokio::spawn(run_settlement_poller(
                db.clone(),
                Arc::clone(source),
                Arc::clone(&run_lock),
                poller_config,
            ));
        }
        (None, true) => {
            tracing::warn!(
                "SETTLEMENT_ENABLED=true but no sports API configured, poller not started"
            );
        }
        (_, false) => {
            tracing::info!("Settlement poller disabled (SETTLEMENT_ENABLED=false)");
        }
    }

    let state = AppState {
        db,
        config,
        metrics_handle,
        fixtures,
        run_lock,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
