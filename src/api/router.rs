use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Watchlist
        .route("/api/stocks", get(handlers::stocks::list).post(handlers::stocks::create))
        .route("/api/stocks/refresh-prices", post(handlers::stocks::refresh_prices))
        .route(
            "/api/stocks/:id",
            get(handlers::stocks::detail)
                .put(handlers::stocks::update)
                .delete(handlers::stocks::remove),
        )
        .route(
            "/api/stocks/:id/fetch-fundamentals",
            post(handlers::stocks::fetch_fundamentals),
        )
        // Triggers
        .route(
            "/api/stocks/:id/triggers",
            get(handlers::triggers::list).post(handlers::triggers::create),
        )
        .route(
            "/api/triggers/:id",
            put(handlers::triggers::update).delete(handlers::triggers::remove),
        )
        // Tags
        .route(
            "/api/stocks/:id/tags",
            get(handlers::tags::list).put(handlers::tags::replace),
        )
        .route("/api/tags/:id", delete(handlers::tags::remove))
        // Macro regime
        .route(
            "/api/macro",
            get(handlers::macro_regime::get).put(handlers::macro_regime::update),
        )
        // Dashboard
        .route("/api/dashboard/summary", get(handlers::dashboard::summary));

    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
