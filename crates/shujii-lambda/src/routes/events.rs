use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use shujii_audit::events::EventType;
use shujii_bedrock::narrative::NarrativeGenerator;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct EventRequest {
    pub event_type: EventType,
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/".to_string()
}

/// Record a usage event. Always answers `204`; a malformed body is logged
/// and ignored.
pub async fn record_event<G: NarrativeGenerator + 'static>(
    State(state): State<AppState<G>>,
    body: Bytes,
) -> StatusCode {
    match serde_json::from_slice::<EventRequest>(&body) {
        Ok(event) => state.events.record(event.event_type, &event.path),
        Err(e) => tracing::warn!(error = %e, "ignoring malformed usage event"),
    }
    StatusCode::NO_CONTENT
}
