use zonewatch::api::router::create_router;
use zonewatch::alphavantage::QuoteClient;
use zonewatch::config::AppConfig;
use zonewatch::services::price_refresher::run_price_refresher;
use zonewatch::{db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database connected");

    // Ensure the macro-regime singleton exists before anything reads it.
    db::macro_repo::get_or_init(&pool).await?;

    let metrics_handle = zonewatch::metrics::init_metrics();

    let quotes = config.alpha_vantage_api_key.clone().map(|key| {
        QuoteClient::new(
            reqwest::Client::new(),
            config.alpha_vantage_base_url.clone(),
            key,
        )
    });

    // --- Background price refresher ---
    match (&quotes, config.refresh_enabled) {
        (Some(client), true) => {
            let refresher_client = client.clone();
            let refresher_pool = pool.clone();
            let interval = config.refresh_interval_secs;
            let delay = config.quote_delay_secs;
            tokio::spawn(async move {
                run_price_refresher(refresher_client, refresher_pool, interval, delay).await;
            });
        }
        (None, true) => {
            tracing::warn!("REFRESH_ENABLED is set but ALPHA_VANTAGE_API_KEY is missing");
        }
        _ => {
            tracing::info!("Background price refresher disabled (REFRESH_ENABLED=false)");
        }
    }

    let state = AppState {
        db: pool,
        config,
        metrics_handle,
        quotes,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
