//! HTTP endpoints backed by the question bank.
//!
//!   GET  /api/quiz  stored questions in the wire shape
//!   POST /upload    multipart `file` field in the upload text format

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use quiz_core::model::{QuestionPayload, QuizSet, wire::encode_quiz_set};
use serde_json::json;
use services::{ImportService, ImportServiceError};
use storage::repository::QuestionRepository;

#[derive(Clone)]
pub struct ServerState {
    questions: Arc<dyn QuestionRepository>,
    import: ImportService,
}

impl ServerState {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>, import: ImportService) -> Self {
        Self { questions, import }
    }
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/api/quiz", get(get_quiz_questions))
        .route("/upload", post(upload_file))
        .with_state(Arc::new(state))
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// GET /api/quiz
async fn get_quiz_questions(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<QuestionPayload>>, ApiError> {
    let records = state.questions.list_questions().await.map_err(|e| {
        tracing::error!(error = %e, "failed to list questions");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let quiz: QuizSet = records.into_iter().map(|record| record.question).collect();
    Ok(Json(encode_quiz_set(&quiz)))
}

struct Upload {
    file_name: String,
    contents: String,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        if file_name.is_empty() {
            return Err(api_error(StatusCode::BAD_REQUEST, "No selected file"));
        }
        let contents = field.text().await.map_err(|e| {
            api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to process file: {}", e.body_text()),
            )
        })?;
        return Ok(Upload {
            file_name,
            contents,
        });
    }
    Err(api_error(
        StatusCode::BAD_REQUEST,
        "No file part in the request",
    ))
}

/// POST /upload
async fn upload_file(
    State(state): State<Arc<ServerState>>,
    multipart: Multipart,
) -> impl IntoResponse {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(err) => return err,
    };

    match state.import.import_text(&upload.contents).await {
        Ok(report) => {
            tracing::info!(
                file = %upload.file_name,
                count = report.question_count,
                "upload stored"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "message": format!(
                        "File {} uploaded and questions saved successfully!",
                        upload.file_name
                    ),
                    "question_count": report.question_count,
                })),
            )
        }
        Err(ImportServiceError::Storage(e)) => {
            tracing::error!(error = %e, file = %upload.file_name, "failed to store upload");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save questions: {e}"),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, file = %upload.file_name, "rejected upload");
            api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to process file: {e}"),
            )
        }
    }
}
