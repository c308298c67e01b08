//! shujii-lambda
//!
//! HTTP surface of the diagnosis service, served through `lambda_http`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use shujii_bedrock::narrative::NarrativeGenerator;

use state::AppState;

/// Build the application router.
pub fn app<G: NarrativeGenerator + 'static>(state: AppState<G>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/questions", get(routes::questions::list_questions))
        .route("/classify", post(routes::classify::classify_answers))
        .route("/diagnosis", post(routes::diagnosis::create_diagnosis::<G>))
        .route("/events", post(routes::events::record_event::<G>))
        .layer(axum_mw::from_fn(middleware::audit::request_log))
        .layer(cors)
        .with_state(state)
}
