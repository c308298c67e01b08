use axum::Json;
use axum::body::Bytes;
use serde::Serialize;

use shujii_core::chart::{RadarChart, radar_chart};
use shujii_core::classify::classify;
use shujii_core::models::answer::AnswerSet;
use shujii_core::models::category::{Category, MAX_SCORE};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct ClassifyResponse {
    pub score: u8,
    pub max_score: u8,
    pub score_display: String,
    pub category: Category,
    pub label: &'static str,
    pub description: &'static str,
    pub chart: RadarChart,
}

/// Score a submission without generating a narrative.
pub async fn classify_answers(body: Bytes) -> Result<Json<ClassifyResponse>, ApiError> {
    let answers = AnswerSet::from_json(&body)?;
    let classification = classify(&answers);
    let category = classification.category;

    Ok(Json(ClassifyResponse {
        score: classification.score,
        max_score: MAX_SCORE,
        score_display: classification.score_display(),
        category,
        label: category.label(),
        description: category.description(),
        chart: radar_chart(&answers),
    }))
}
