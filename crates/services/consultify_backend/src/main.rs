// --- File: crates/services/consultify_backend/src/main.rs ---
mod app_state;
mod identity;
mod service_factory;

use app_state::AppState;
use axum::{routing::get, Router};
use consultify_common::error::{config_error, ConsultifyError};
use consultify_common::logging;
use consultify_config::load_config;
use consultify_scheduling::routes as scheduling_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ConsultifyError> {
    let config = Arc::new(load_config().map_err(config_error)?);
    logging::init();

    let state = AppState::new(config.clone());

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Consultify API!" }))
        .merge(scheduling_routes::routes(state.scheduling.clone()));

    #[allow(unused_mut)] // openapi builds add the Swagger UI below
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use consultify_scheduling::doc::SchedulingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /api/docs");
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", SchedulingApiDoc::openapi());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{addr}");
    info!("API endpoints available at http://{addr}/api");

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
