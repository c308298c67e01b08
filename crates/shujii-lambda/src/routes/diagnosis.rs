use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::Response;

use shujii_audit::events::EventType;
use shujii_bedrock::narrative::NarrativeGenerator;
use shujii_core::models::answer::AnswerSet;
use shujii_export::render::{FILE_NAME, MIME_TYPE};

use crate::error::ApiError;
use crate::state::AppState;

pub const SCORE_HEADER: &str = "x-diagnosis-score";
pub const CATEGORY_HEADER: &str = "x-diagnosis-category";
pub const NARRATIVE_HEADER: &str = "x-diagnosis-narrative";

/// Run a full diagnosis and return the PDF.
pub async fn create_diagnosis<G: NarrativeGenerator + 'static>(
    State(state): State<AppState<G>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let answers = AnswerSet::from_json(&body)?;
    state.events.record(EventType::ClickStart, "/diagnosis");

    let diagnosis = state.pipeline.run(&answers).await?;
    let narrative_status = if diagnosis.narrative.is_fallback() {
        "fallback"
    } else {
        "generated"
    };

    let response = Response::builder()
        .header(header::CONTENT_TYPE, MIME_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{FILE_NAME}\""),
        )
        .header(SCORE_HEADER, diagnosis.classification.score.to_string())
        .header(CATEGORY_HEADER, diagnosis.classification.category.code())
        .header(NARRATIVE_HEADER, narrative_status)
        .body(Body::from(diagnosis.document))?;

    Ok(response)
}
