pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    campaign::CampaignController,
    catalog,
    health::{self, ProviderReadiness},
    media::MediaController,
};
use crate::infrastructure::config::Config;

/// Build the application router with all routes configured
pub fn build_router(
    campaign_controller: Arc<CampaignController>,
    media_controller: Arc<MediaController>,
    readiness: Arc<ProviderReadiness>,
) -> Router {
    // Campaign routes
    let campaign_routes = Router::new()
        .route("/api/campaign", get(CampaignController::get_campaign))
        .route(
            "/api/campaign/recipients",
            post(CampaignController::add_recipient),
        )
        .route(
            "/api/campaign/recipients/:number",
            delete(CampaignController::remove_recipient),
        )
        .route("/api/campaign/message", put(CampaignController::set_message))
        .route(
            "/api/campaign/language",
            put(CampaignController::select_language),
        )
        .route("/api/campaign/translate", post(CampaignController::translate))
        .route("/api/campaign/audio", post(CampaignController::generate_audio))
        .route("/api/campaign/dispatch", post(CampaignController::dispatch))
        .route(
            "/api/campaign/dispatch/status",
            get(CampaignController::dispatch_status),
        )
        .route(
            "/api/campaign/dispatch/cancel",
            post(CampaignController::cancel_dispatch),
        )
        .with_state(campaign_controller);

    // Hosted audio fetched by the telephony provider
    let media_routes = Router::new()
        .route("/media/:id", get(MediaController::get_audio))
        .with_state(media_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(readiness)
        .route("/api/country-codes", get(catalog::country_codes))
        .route("/api/languages", get(catalog::languages))
        .merge(campaign_routes)
        .merge(media_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = if config.is_development() {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
