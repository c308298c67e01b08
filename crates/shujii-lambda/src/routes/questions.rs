use axum::Json;
use serde::Serialize;

use shujii_core::models::question::{
    FREE_TEXT_QUESTIONS, FreeTextQuestion, Question, YES_NO_QUESTIONS,
};

#[derive(Serialize)]
pub struct QuestionCatalogue {
    yes_no: &'static [Question],
    free_text: &'static [FreeTextQuestion],
}

pub async fn list_questions() -> Json<QuestionCatalogue> {
    Json(QuestionCatalogue {
        yes_no: &YES_NO_QUESTIONS,
        free_text: &FREE_TEXT_QUESTIONS,
    })
}
